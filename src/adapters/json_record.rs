use crate::core::metadata::names_match;
use crate::domain::model::{ScalarKind, TypeTag, Value};
use crate::domain::ports::{Source, SourceValue};
use crate::utils::error::{MapperError, Result};
use serde::{Deserialize, Serialize};

/// A flat JSON object used as a mapping source.
///
/// Strings read as text, integers as `i64`, other numbers as `f64`, booleans as `bool`,
/// and `null` as nullable text. Nested objects and arrays are not mapped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl JsonRecord {
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Object(data) => Ok(Self { data }),
            other => Err(MapperError::SerializationError(serde::de::Error::custom(
                format!("expected a JSON object, found {}", json_kind(&other)),
            ))),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for JsonRecord {
    fn from(data: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { data }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn to_source_value(value: &serde_json::Value) -> Option<SourceValue> {
    let (type_tag, value) = match value {
        serde_json::Value::Null => (TypeTag::text().nullable(), Value::Null),
        serde_json::Value::Bool(b) => (TypeTag::new(ScalarKind::Bool), Value::Bool(*b)),
        serde_json::Value::String(s) => (TypeTag::text(), Value::Text(s.clone())),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => (TypeTag::new(ScalarKind::I64), Value::I64(i)),
            None => (TypeTag::new(ScalarKind::F64), Value::F64(n.as_f64()?)),
        },
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => return None,
    };
    Some(SourceValue { type_tag, value })
}

impl Source for JsonRecord {
    fn type_name(&self) -> &str {
        "json"
    }

    fn find_property(&self, name: &str) -> Option<SourceValue> {
        let (key, value) = self.data.iter().find(|(key, _)| names_match(key, name))?;
        let found = to_source_value(value);
        if found.is_none() {
            tracing::debug!("📥 json: skipping nested value under '{}'", key);
        }
        found
    }
}
