use crate::domain::model::{ScalarKind, TypeTag, Value, ValueMismatch};
use crate::domain::ports::Property;
use rust_decimal::Decimal;

macro_rules! scalar_property {
    ($ty:ty, $kind:ident) => {
        impl Property for $ty {
            fn type_tag() -> TypeTag {
                TypeTag::new(ScalarKind::$kind)
            }

            fn to_value(&self) -> Value {
                Value::$kind(*self)
            }

            fn from_value(value: Value) -> Result<Self, ValueMismatch> {
                match value {
                    Value::$kind(v) => Ok(v),
                    other => Err(ValueMismatch::new(Self::type_tag(), &other)),
                }
            }
        }
    };
}

scalar_property!(bool, Bool);
scalar_property!(i32, I32);
scalar_property!(i64, I64);
scalar_property!(f32, F32);
scalar_property!(f64, F64);
scalar_property!(Decimal, Decimal);

impl Property for String {
    fn type_tag() -> TypeTag {
        TypeTag::text()
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(ValueMismatch::new(Self::type_tag(), &other)),
        }
    }
}

impl<T: Property> Property for Option<T> {
    fn type_tag() -> TypeTag {
        T::type_tag().nullable()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
