use crate::core::metadata::{names_match, MemberDescriptor, Schema};
use crate::domain::model::{TypeTag, Value, ValueMismatch};

/// A record type with a statically declared, ordered property list.
pub trait Record: Sized + 'static {
    fn schema() -> &'static Schema<Self>;
}

/// A field type the mapper can read and write.
pub trait Property: Sized {
    fn type_tag() -> TypeTag;
    fn to_value(&self) -> Value;
    fn from_value(value: Value) -> Result<Self, ValueMismatch>;
}

/// Type-erased view of a declared enum's marker table.
pub trait EnumTable: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn members(&self) -> &[MemberDescriptor];
    fn default_index(&self) -> Option<usize>;

    fn position_of_code(&self, code: &str) -> Option<usize> {
        self.members().iter().position(|m| m.code() == Some(code))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceValue {
    pub type_tag: TypeTag,
    pub value: Value,
}

/// Anything the mapper can read properties from by name.
pub trait Source {
    fn type_name(&self) -> &str;

    /// Looks up a property by exact name, ignoring case.
    fn find_property(&self, name: &str) -> Option<SourceValue>;
}

impl<R: Record> Source for R {
    fn type_name(&self) -> &str {
        R::schema().type_name()
    }

    fn find_property(&self, name: &str) -> Option<SourceValue> {
        R::schema()
            .properties()
            .iter()
            .find(|p| names_match(p.name(), name))
            .map(|p| SourceValue {
                type_tag: *p.type_tag(),
                value: p.get(self),
            })
    }
}
