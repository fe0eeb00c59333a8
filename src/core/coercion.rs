//! Type coercion policy.
//!
//! Rules are tried in a fixed order and the first that applies wins:
//!
//! 1. identical declared types copy the value unchanged;
//! 2. a text destination receives the source's text form;
//! 3. nullable and non-nullable forms of the same kind copy directly, with null becoming the
//!    destination's zero value when the destination cannot hold null;
//! 4. two different enum types are never bridged;
//! 5. anything else is stringified and parsed into the destination kind.
//!
//! Rule 5 trims surrounding whitespace first when the policy asks for it, except for enum
//! destinations: codes are matched exactly, as `CodedEnum::from_code` does.

use crate::core::registry;
use crate::domain::model::{ScalarKind, TypeTag, Value};
use crate::utils::error::MapperError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FailureReason {
    /// Source and destination are different enum types.
    CrossEnum,
    /// No rule bridges the two declared types.
    NoRule,
    Unparseable { text: String },
    /// The destination enum needed its default member and declares none.
    NoDefault { enum_name: &'static str },
    /// The destination setter refused the coerced value.
    Rejected { message: String },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::CrossEnum => f.write_str("enum to enum mapping is not supported"),
            FailureReason::NoRule => f.write_str("no coercion rule applies"),
            FailureReason::Unparseable { text } => write!(f, "'{}' does not parse", text),
            FailureReason::NoDefault { enum_name } => {
                write!(f, "enum {} has no member marked default", enum_name)
            }
            FailureReason::Rejected { message } => write!(f, "value rejected: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot coerce {from} to {to}: {reason}")]
pub struct CoercionFailure {
    pub from: TypeTag,
    pub to: TypeTag,
    pub reason: FailureReason,
}

impl CoercionFailure {
    fn new(from: &TypeTag, to: &TypeTag, reason: FailureReason) -> Self {
        Self {
            from: *from,
            to: *to,
            reason,
        }
    }

    /// Missing declarations are configuration faults, not bad input.
    pub fn is_declaration_fault(&self) -> bool {
        matches!(self.reason, FailureReason::NoDefault { .. })
    }
}

/// A coercion failure attributed to one destination property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyFailure {
    pub property: &'static str,
    #[serde(serialize_with = "serialize_display")]
    pub failure: CoercionFailure,
}

fn serialize_display<S: serde::Serializer>(
    failure: &CoercionFailure,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(failure)
}

impl fmt::Display for PropertyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.failure)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoercionPolicy {
    /// Trim surrounding whitespace before parsing text into a scalar.
    pub trim_text: bool,
}

impl Default for CoercionPolicy {
    fn default() -> Self {
        Self { trim_text: true }
    }
}

impl CoercionPolicy {
    pub fn coerce(
        &self,
        value: &Value,
        from: &TypeTag,
        to: &TypeTag,
    ) -> Result<Value, CoercionFailure> {
        if from == to {
            return Ok(value.clone());
        }

        if to.is_text() {
            return Ok(match value.to_text() {
                Some(text) => Value::Text(text),
                None if to.is_nullable() => Value::Null,
                None => Value::Text(String::new()),
            });
        }

        if from.kind() == to.kind() {
            return match value {
                Value::Null if !to.is_nullable() => zero_value(to)
                    .map_err(|reason| CoercionFailure::new(from, to, reason)),
                other => Ok(other.clone()),
            };
        }

        if let (ScalarKind::Enum(_), ScalarKind::Enum(_)) = (from.kind(), to.kind()) {
            return Err(CoercionFailure::new(from, to, FailureReason::CrossEnum));
        }

        self.parse_into(value, from, to)
    }

    fn parse_into(&self, value: &Value, from: &TypeTag, to: &TypeTag) -> Result<Value, CoercionFailure> {
        let Some(text) = value.to_text() else {
            if to.is_nullable() {
                return Ok(Value::Null);
            }
            return zero_value(to).map_err(|reason| CoercionFailure::new(from, to, reason));
        };
        // Codes match exactly, so enum destinations see the text untrimmed.
        let text = if self.trim_text && to.enum_kind().is_none() {
            text.trim()
        } else {
            text.as_str()
        };
        let unparseable = || {
            CoercionFailure::new(
                from,
                to,
                FailureReason::Unparseable {
                    text: text.to_string(),
                },
            )
        };

        match to.kind() {
            ScalarKind::F32 => text.parse().map(Value::F32).map_err(|_| unparseable()),
            ScalarKind::F64 => text.parse().map(Value::F64).map_err(|_| unparseable()),
            ScalarKind::I32 => text.parse().map(Value::I32).map_err(|_| unparseable()),
            ScalarKind::I64 => text.parse().map(Value::I64).map_err(|_| unparseable()),
            ScalarKind::Decimal => parse_decimal(text).map(Value::Decimal).ok_or_else(unparseable),
            ScalarKind::Bool => parse_bool(text).map(Value::Bool).ok_or_else(unparseable),
            ScalarKind::Enum(_) if from.is_text() => registry::resolve_code(to, text)
                .map(Value::Enum)
                .map_err(|e| match e {
                    MapperError::NoDefaultConfigured { type_name } => CoercionFailure::new(
                        from,
                        to,
                        FailureReason::NoDefault {
                            enum_name: type_name,
                        },
                    ),
                    _ => CoercionFailure::new(from, to, FailureReason::NoRule),
                }),
            _ => Err(CoercionFailure::new(from, to, FailureReason::NoRule)),
        }
    }
}

/// Plain or scientific notation. Digit separators are refused, as for the primitive kinds.
fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains('_') {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// The value a non-nullable destination takes when the source holds null.
pub fn zero_value(tag: &TypeTag) -> Result<Value, FailureReason> {
    Ok(match tag.kind() {
        ScalarKind::Bool => Value::Bool(false),
        ScalarKind::I32 => Value::I32(0),
        ScalarKind::I64 => Value::I64(0),
        ScalarKind::F32 => Value::F32(0.0),
        ScalarKind::F64 => Value::F64(0.0),
        ScalarKind::Decimal => Value::Decimal(Decimal::ZERO),
        ScalarKind::Text => Value::Text(String::new()),
        ScalarKind::Enum(kind) => {
            let table = kind.table();
            match table.default_index() {
                Some(index) => Value::Enum(crate::domain::model::EnumValue::new(*kind, index)),
                None => {
                    return Err(FailureReason::NoDefault {
                        enum_name: table.type_name(),
                    })
                }
            }
        }
    })
}

/// Coerces with the default policy.
pub fn coerce(value: &Value, from: &TypeTag, to: &TypeTag) -> Result<Value, CoercionFailure> {
    CoercionPolicy::default().coerce(value, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Property;

    fn tag<T: Property>() -> TypeTag {
        T::type_tag()
    }

    #[test]
    fn test_identical_types_copy_unchanged() {
        let value = Value::F64(0.1 + 0.2);
        assert_eq!(coerce(&value, &tag::<f64>(), &tag::<f64>()).unwrap(), value);

        let value = Value::Decimal(Decimal::new(12345, 3));
        assert_eq!(coerce(&value, &tag::<Decimal>(), &tag::<Decimal>()).unwrap(), value);
    }

    #[test]
    fn test_text_destination_formats_invariantly() {
        let to_text = |v: Value, from: TypeTag| coerce(&v, &from, &tag::<String>()).unwrap();
        assert_eq!(to_text(Value::I32(-42), tag::<i32>()), Value::Text("-42".into()));
        assert_eq!(to_text(Value::F64(1.5), tag::<f64>()), Value::Text("1.5".into()));
        assert_eq!(to_text(Value::Bool(true), tag::<bool>()), Value::Text("true".into()));
        assert_eq!(
            to_text(Value::Decimal(Decimal::new(1050, 2)), tag::<Decimal>()),
            Value::Text("10.50".into())
        );
    }

    #[test]
    fn test_null_into_text_depends_on_destination_nullability() {
        let from = tag::<Option<i32>>();
        assert_eq!(
            coerce(&Value::Null, &from, &tag::<String>()).unwrap(),
            Value::Text(String::new())
        );
        assert_eq!(
            coerce(&Value::Null, &from, &tag::<Option<String>>()).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_nullable_to_plain_uses_zero_value() {
        assert_eq!(
            coerce(&Value::Null, &tag::<Option<i32>>(), &tag::<i32>()).unwrap(),
            Value::I32(0)
        );
        assert_eq!(
            coerce(&Value::Null, &tag::<Option<bool>>(), &tag::<bool>()).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            coerce(&Value::I64(9), &tag::<Option<i64>>(), &tag::<i64>()).unwrap(),
            Value::I64(9)
        );
        assert_eq!(
            coerce(&Value::F32(2.5), &tag::<f32>(), &tag::<Option<f32>>()).unwrap(),
            Value::F32(2.5)
        );
    }

    #[test]
    fn test_fallback_parses_text_into_numbers() {
        let from = tag::<String>();
        let text = |s: &str| Value::Text(s.to_string());
        assert_eq!(coerce(&text("42"), &from, &tag::<i32>()).unwrap(), Value::I32(42));
        assert_eq!(coerce(&text(" 7 "), &from, &tag::<i64>()).unwrap(), Value::I64(7));
        assert_eq!(coerce(&text("2.25"), &from, &tag::<f32>()).unwrap(), Value::F32(2.25));
        assert_eq!(
            coerce(&text("1e3"), &from, &tag::<Decimal>()).unwrap(),
            Value::Decimal(Decimal::new(1000, 0))
        );
        assert_eq!(
            coerce(&text("TRUE"), &from, &tag::<Option<bool>>()).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_fallback_converts_between_numeric_kinds() {
        assert_eq!(
            coerce(&Value::I32(5), &tag::<i32>(), &tag::<f64>()).unwrap(),
            Value::F64(5.0)
        );
        assert_eq!(
            coerce(&Value::I64(5), &tag::<i64>(), &tag::<Option<i32>>()).unwrap(),
            Value::I32(5)
        );
        let err = coerce(&Value::F64(3.7), &tag::<f64>(), &tag::<i32>()).unwrap_err();
        assert_eq!(
            err.reason,
            FailureReason::Unparseable {
                text: "3.7".to_string()
            }
        );
    }

    #[test]
    fn test_fallback_failure_names_both_types() {
        let err = coerce(&Value::Text("abc".into()), &tag::<String>(), &tag::<i32>()).unwrap_err();
        assert_eq!(err.from, tag::<String>());
        assert_eq!(err.to, tag::<i32>());
        assert_eq!(err.to_string(), "cannot coerce String to i32: 'abc' does not parse");
        assert!(!err.is_declaration_fault());
    }

    #[test]
    fn test_untrimmed_policy_rejects_padding() {
        let policy = CoercionPolicy { trim_text: false };
        let result = policy.coerce(&Value::Text(" 7".into()), &tag::<String>(), &tag::<i32>());
        assert!(result.is_err());
    }

    #[test]
    fn test_digit_separators_rejected_for_every_numeric_kind() {
        let grouped = Value::Text("1_000".into());
        for to in [tag::<i32>(), tag::<i64>(), tag::<f64>(), tag::<Decimal>()] {
            let err = coerce(&grouped, &tag::<String>(), &to).unwrap_err();
            assert_eq!(
                err.reason,
                FailureReason::Unparseable {
                    text: "1_000".to_string()
                }
            );
        }
        assert_eq!(
            coerce(&Value::Text("-12.50".into()), &tag::<String>(), &tag::<Decimal>()).unwrap(),
            Value::Decimal(Decimal::new(-1250, 2))
        );
    }

    #[test]
    fn test_null_into_other_kind() {
        assert_eq!(
            coerce(&Value::Null, &tag::<Option<String>>(), &tag::<i32>()).unwrap(),
            Value::I32(0)
        );
        assert_eq!(
            coerce(&Value::Null, &tag::<Option<String>>(), &tag::<Option<f64>>()).unwrap(),
            Value::Null
        );
    }
}
