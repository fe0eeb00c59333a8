use crate::config::MappingConfig;
use crate::core::coercion::{CoercionFailure, CoercionPolicy, FailureReason, PropertyFailure};
use crate::domain::ports::{Record, Source};
use crate::utils::error::{MapperError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MappingOutcome {
    Complete,
    Partial { failed: usize },
}

/// What one mapping call did to each destination property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingReport {
    pub destination: &'static str,
    pub copied: Vec<&'static str>,
    /// Destination properties with no same-named source property; left untouched.
    pub skipped: Vec<&'static str>,
    pub failures: Vec<PropertyFailure>,
}

impl MappingReport {
    fn new(destination: &'static str) -> Self {
        Self {
            destination,
            copied: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn outcome(&self) -> MappingOutcome {
        if self.failures.is_empty() {
            MappingOutcome::Complete
        } else {
            MappingOutcome::Partial {
                failed: self.failures.len(),
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_properties(&self) -> Vec<&'static str> {
        self.failures.iter().map(|f| f.property).collect()
    }

    pub fn into_result(self) -> Result<Self> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(MapperError::PartialCopy {
                type_name: self.destination,
                failures: self.failures,
            })
        }
    }
}

#[derive(Debug)]
pub struct Mapped<D> {
    pub value: D,
    pub report: MappingReport,
}

#[derive(Debug, Clone, Default)]
pub struct Mapper {
    policy: CoercionPolicy,
    strict: bool,
}

impl Mapper {
    pub fn new(config: &MappingConfig) -> Self {
        Self {
            policy: CoercionPolicy {
                trim_text: config.trim_text(),
            },
            strict: config.strict(),
        }
    }

    pub fn with_policy(policy: CoercionPolicy, strict: bool) -> Self {
        Self { policy, strict }
    }

    pub fn policy(&self) -> &CoercionPolicy {
        &self.policy
    }

    /// Copies every same-named property from `source` into `destination`.
    ///
    /// Properties that cannot be coerced keep their previous value and are listed in the
    /// report; the remaining properties are still copied. Writes are not rolled back when a
    /// later property fails. A missing default member on a destination enum aborts the call.
    pub fn copy<S, D>(&self, source: &S, destination: &mut D) -> Result<MappingReport>
    where
        S: Source + ?Sized,
        D: Record,
    {
        let schema = D::schema();
        let mut report = MappingReport::new(schema.type_name());

        for property in schema.properties() {
            let Some(found) = source.find_property(property.name()) else {
                report.skipped.push(property.name());
                continue;
            };

            let coerced = self
                .policy
                .coerce(&found.value, &found.type_tag, property.type_tag());
            let failure = match coerced {
                Ok(value) => match property.set(destination, value) {
                    Ok(()) => {
                        tracing::debug!(
                            "🔄 {} -> {}: copied '{}'",
                            source.type_name(),
                            schema.type_name(),
                            property.name()
                        );
                        report.copied.push(property.name());
                        continue;
                    }
                    Err(mismatch) => CoercionFailure {
                        from: found.type_tag,
                        to: *property.type_tag(),
                        reason: FailureReason::Rejected {
                            message: mismatch.to_string(),
                        },
                    },
                },
                Err(failure) => failure,
            };

            if let FailureReason::NoDefault { enum_name } = failure.reason {
                tracing::error!(
                    "❌ {}: property '{}' needs a default member on {}",
                    schema.type_name(),
                    property.name(),
                    enum_name
                );
                return Err(MapperError::NoDefaultConfigured {
                    type_name: enum_name,
                });
            }

            tracing::warn!(
                "🔶 {}: property '{}' not copied: {}",
                schema.type_name(),
                property.name(),
                failure
            );
            report.failures.push(PropertyFailure {
                property: property.name(),
                failure,
            });
        }

        if self.strict {
            return report.into_result();
        }
        Ok(report)
    }

    /// Constructs a fresh destination and copies into it.
    pub fn create_mapped<D, S>(&self, source: &S) -> Result<Mapped<D>>
    where
        D: Record,
        S: Source + ?Sized,
    {
        let schema = D::schema();
        let mut value = schema
            .construct()
            .ok_or(MapperError::ConstructionFailure {
                type_name: schema.type_name(),
            })?;
        let report = self.copy(source, &mut value)?;
        Ok(Mapped { value, report })
    }
}

/// `Mapper::copy` with the default policy.
pub fn copy_matching<S, D>(source: &S, destination: &mut D) -> Result<MappingReport>
where
    S: Source + ?Sized,
    D: Record,
{
    Mapper::default().copy(source, destination)
}

/// `Mapper::create_mapped` with the default policy.
pub fn create_mapped<D, S>(source: &S) -> Result<Mapped<D>>
where
    D: Record,
    S: Source + ?Sized,
{
    Mapper::default().create_mapped(source)
}
