/// Declares an enum together with its constant-code table.
///
/// ```
/// small_mapper::coded_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Status {
///         Active { code = "A", description = "Active account" },
///         Inactive { code = "I" },
///         Unknown { default },
///     }
/// }
///
/// use small_mapper::CodedEnum;
/// assert_eq!(Status::from_code("A").unwrap(), Status::Active);
/// assert_eq!(Status::from_code("Z").unwrap(), Status::Unknown);
/// assert_eq!(Status::Unknown.to_code(), "Unknown");
/// ```
///
/// The table is built on first use. A declaration that breaks a marker invariant (two
/// defaults, a repeated code, a marker given twice) panics at that point.
#[macro_export]
macro_rules! coded_enum {
    (@marker $builder:ident, code = $value:literal) => {
        $builder.code($value)
    };
    (@marker $builder:ident, description = $value:literal) => {
        $builder.description($value)
    };
    (@marker $builder:ident, default) => {
        $builder.mark_default()
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $variant:ident $({ $($key:ident $(= $value:literal)?),* $(,)? })?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant),*
        }

        impl $crate::CodedEnum for $name {
            fn metadata() -> &'static $crate::EnumMetadata<Self> {
                static METADATA: ::std::sync::OnceLock<$crate::EnumMetadata<$name>> =
                    ::std::sync::OnceLock::new();
                METADATA.get_or_init(|| {
                    let builder = $crate::EnumMetadata::<$name>::builder(stringify!($name));
                    $(
                        let builder = builder.member($name::$variant, stringify!($variant));
                        $($(
                            let builder = $crate::coded_enum!(@marker builder, $key $(= $value)?);
                        )*)?
                    )*
                    builder.finish()
                })
            }
        }

        impl $crate::Property for $name {
            fn type_tag() -> $crate::TypeTag {
                $crate::core::registry::enum_type_tag::<$name>()
            }

            fn to_value(&self) -> $crate::Value {
                $crate::core::registry::enum_to_value(*self)
            }

            fn from_value(
                value: $crate::Value,
            ) -> ::std::result::Result<Self, $crate::domain::model::ValueMismatch> {
                $crate::core::registry::enum_from_value(value)
            }
        }
    };
}

/// Implements `Record` for an existing struct from an ordered field list.
///
/// ```
/// small_mapper::coded_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Level { Low { code = "L", default }, High { code = "H" } }
/// }
///
/// #[derive(Debug, Default)]
/// pub struct Ticket {
///     pub title: String,
///     pub level: Level,
///     pub estimate: Option<f64>,
/// }
///
/// impl Default for Level {
///     fn default() -> Self { Level::Low }
/// }
///
/// small_mapper::record_schema! {
///     #[constructible]
///     Ticket {
///         #[csv(1, "Title")]
///         title: String,
///         level: Level,
///         estimate: Option<f64>,
///     }
/// }
///
/// let source = small_mapper::TextRecord::new("row").with("Title", "Fix it").with("LEVEL", "H");
/// let mapped = small_mapper::create_mapped::<Ticket, _>(&source).unwrap();
/// assert_eq!(mapped.value.level, Level::High);
/// assert!(mapped.report.is_complete());
/// ```
///
/// `#[constructible]` registers `Default::default` as the parameterless constructor used by
/// `create_mapped`. `#[csv(index, "Header")]` marks a field as a CSV column.
#[macro_export]
macro_rules! record_schema {
    (@constructor $name:ident constructible) => {
        ::std::option::Option::Some(<$name as ::std::default::Default>::default as fn() -> $name)
    };
    (@constructor $name:ident) => {
        ::std::option::Option::None
    };
    (
        $(#[$flag:ident])?
        $name:ident {
            $(
                $(#[csv($index:literal, $header:literal)])?
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        impl $crate::Record for $name {
            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: ::std::sync::OnceLock<$crate::Schema<$name>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    let builder = $crate::Schema::<$name>::builder(stringify!($name));
                    $(
                        let builder = builder.property::<$ty>(
                            stringify!($field),
                            |record| &record.$field,
                            |record| &mut record.$field,
                        );
                        $( let builder = builder.csv_column($index, $header); )?
                    )*
                    builder
                        .constructor($crate::record_schema!(@constructor $name $($flag)?))
                        .finish()
                })
            }
        }
    };
}
