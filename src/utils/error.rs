use crate::core::coercion::PropertyFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("{type_name} is not an enumerated type")]
    UnsupportedTargetKind { type_name: String },

    #[error("enum {type_name} has no member marked default")]
    NoDefaultConfigured { type_name: &'static str },

    #[error("property '{}': {}", .0.property, .0.failure)]
    CoercionFailure(Box<PropertyFailure>),

    #[error("{type_name} has no parameterless constructor")]
    ConstructionFailure { type_name: &'static str },

    #[error("partial copy into {type_name}: {} properties failed", failures.len())]
    PartialCopy {
        type_name: &'static str,
        failures: Vec<PropertyFailure>,
    },

    #[error("invalid declaration for {type_name}: {message}")]
    InvalidDeclaration { type_name: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A type was declared wrong, or used where its declaration does not allow.
    Declaration,
    /// The input data could not be bridged onto the destination.
    Data,
    Configuration,
    Io,
}

impl MapperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapperError::UnsupportedTargetKind { .. }
            | MapperError::NoDefaultConfigured { .. }
            | MapperError::ConstructionFailure { .. }
            | MapperError::InvalidDeclaration { .. } => ErrorCategory::Declaration,
            MapperError::CoercionFailure(_)
            | MapperError::PartialCopy { .. }
            | MapperError::SerializationError(_) => ErrorCategory::Data,
            MapperError::ConfigError { .. }
            | MapperError::ConfigValidationError { .. }
            | MapperError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MapperError::CsvError(_) | MapperError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub(crate) fn invalid_declaration(type_name: &str, message: impl Into<String>) -> Self {
        MapperError::InvalidDeclaration {
            type_name: type_name.to_string(),
            message: message.into(),
        }
    }
}

impl From<PropertyFailure> for MapperError {
    fn from(failure: PropertyFailure) -> Self {
        MapperError::CoercionFailure(Box::new(failure))
    }
}

pub type Result<T> = std::result::Result<T, MapperError>;
