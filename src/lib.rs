mod macros;

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{JsonRecord, TextRecord};
pub use crate::config::{CsvConfig, LoggingConfig, MapperConfig, MappingConfig};
pub use crate::core::coercion::{coerce, CoercionFailure, CoercionPolicy, FailureReason, PropertyFailure};
pub use crate::core::mapper::{copy_matching, create_mapped, Mapped, Mapper, MappingOutcome, MappingReport};
pub use crate::core::metadata::{DeclaredMembers, Marker, MemberDescriptor, Schema};
pub use crate::core::registry::{CodedEnum, EnumMetadata};
pub use crate::domain::model::{EnumValue, ScalarKind, TypeTag, Value};
pub use crate::domain::ports::{Property, Record, Source, SourceValue};
pub use crate::utils::error::{MapperError, Result};
pub use rust_decimal::Decimal;
