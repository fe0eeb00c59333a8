pub mod coercion;
pub mod mapper;
pub mod metadata;
pub mod registry;

pub use crate::domain::model::{EnumValue, TypeTag, Value};
pub use crate::domain::ports::{Property, Record, Source, SourceValue};
pub use crate::utils::error::Result;
