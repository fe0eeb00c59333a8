//! Enum constant registry.
//!
//! Maps enum members to and from the stable string codes that persisted or external data
//! refer to them by. Unknown codes degrade to the member marked default; a lookup on an
//! enum that declares no default is a `NoDefaultConfigured` error.

use crate::core::metadata::{names_match, DeclaredMembers, Marker, MemberDescriptor};
use crate::domain::model::{EnumKind, EnumValue, ScalarKind, TypeTag, Value, ValueMismatch};
use crate::domain::ports::EnumTable;
use crate::utils::error::{MapperError, Result};
use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;

pub trait CodedEnum: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn metadata() -> &'static EnumMetadata<Self>;

    /// The member's constant code, or its declared name.
    ///
    /// A member with neither a code nor the default marker does not round-trip: its name is not
    /// a code, so `from_code` resolves it to the default member. Use `parse_name` to read names.
    fn to_code(self) -> String {
        let metadata = Self::metadata();
        match metadata.descriptor_of(self) {
            Some(member) => member.code().unwrap_or(member.name).to_string(),
            None => format!("{:?}", self),
        }
    }

    /// The member's description, or its declared name.
    fn to_description(self) -> String {
        let metadata = Self::metadata();
        match metadata.descriptor_of(self) {
            Some(member) => member.description().unwrap_or(member.name).to_string(),
            None => format!("{:?}", self),
        }
    }

    /// The member declaring exactly `code`, else the default member. Declared names are not
    /// consulted.
    fn from_code(code: &str) -> Result<Self> {
        let metadata = Self::metadata();
        match metadata.position_of_code(code) {
            Some(index) => Ok(metadata.values[index]),
            None => {
                tracing::debug!(
                    "🔎 {}: unknown code '{}', using default member",
                    metadata.type_name,
                    code
                );
                Self::default_member()
            }
        }
    }

    fn default_member() -> Result<Self> {
        let metadata = Self::metadata();
        metadata
            .default_index
            .map(|index| metadata.values[index])
            .ok_or(MapperError::NoDefaultConfigured {
                type_name: metadata.type_name,
            })
    }

    /// Declared codes in declaration order, skipping members without one.
    fn codes() -> Vec<&'static str> {
        Self::metadata()
            .members
            .iter()
            .filter_map(MemberDescriptor::code)
            .collect()
    }

    fn members() -> Vec<Self> {
        Self::metadata().values.clone()
    }

    /// Parses a declared member name ignoring case, falling back to the default member.
    fn parse_name(name: &str) -> Result<Self> {
        let metadata = Self::metadata();
        match metadata.members.iter().position(|m| names_match(m.name, name)) {
            Some(index) => Ok(metadata.values[index]),
            None => Self::default_member(),
        }
    }

    fn is_known_code(code: &str) -> bool {
        Self::metadata().position_of_code(code).is_some()
    }

    fn matches_any(code: &str, candidates: &[Self]) -> Result<bool> {
        let member = Self::from_code(code)?;
        Ok(candidates.contains(&member))
    }
}

pub struct EnumMetadata<E> {
    type_name: &'static str,
    values: Vec<E>,
    members: Vec<MemberDescriptor>,
    default_index: Option<usize>,
}

impl<E: CodedEnum> EnumMetadata<E> {
    pub fn builder(type_name: &'static str) -> EnumMetadataBuilder<E> {
        EnumMetadataBuilder {
            type_name,
            values: Vec::new(),
            members: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn index_of(&self, value: E) -> Option<usize> {
        self.values.iter().position(|v| *v == value)
    }

    pub fn value_at(&self, index: usize) -> Option<E> {
        self.values.get(index).copied()
    }

    pub fn descriptor_of(&self, value: E) -> Option<&MemberDescriptor> {
        self.index_of(value).map(|index| &self.members[index])
    }
}

impl<E: CodedEnum> EnumTable for EnumMetadata<E> {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    fn default_index(&self) -> Option<usize> {
        self.default_index
    }
}

impl<E: CodedEnum> DeclaredMembers for EnumMetadata<E> {
    fn declared_type_name(&self) -> &'static str {
        self.type_name
    }

    fn declared_members(&self) -> Vec<&MemberDescriptor> {
        self.members.iter().collect()
    }
}

pub struct EnumMetadataBuilder<E> {
    type_name: &'static str,
    values: Vec<E>,
    members: Vec<MemberDescriptor>,
    errors: Vec<String>,
}

impl<E: CodedEnum> EnumMetadataBuilder<E> {
    pub fn member(mut self, value: E, name: &'static str) -> Self {
        self.values.push(value);
        self.members.push(MemberDescriptor::new(name, self.type_name));
        self
    }

    pub fn code(self, code: &'static str) -> Self {
        self.mark(Marker::ConstantCode(code))
    }

    pub fn description(self, text: &'static str) -> Self {
        self.mark(Marker::Description(text))
    }

    pub fn mark_default(self) -> Self {
        self.mark(Marker::IsDefault)
    }

    fn mark(mut self, marker: Marker) -> Self {
        match self.members.last_mut() {
            Some(member) => member.markers.push(marker),
            None => self.errors.push("marker declared before any member".to_string()),
        }
        self
    }

    pub fn build(self) -> Result<EnumMetadata<E>> {
        if let Some(message) = self.errors.into_iter().next() {
            return Err(MapperError::invalid_declaration(self.type_name, message));
        }

        let mut names = HashSet::new();
        let mut codes = HashSet::new();
        let mut default_index = None;
        for (index, member) in self.members.iter().enumerate() {
            member.validate(self.type_name)?;

            if !names.insert(member.name) {
                return Err(MapperError::invalid_declaration(
                    self.type_name,
                    format!("member '{}' is declared twice", member.name),
                ));
            }
            if self.values[..index].contains(&self.values[index]) {
                return Err(MapperError::invalid_declaration(
                    self.type_name,
                    format!("member '{}' repeats an earlier value", member.name),
                ));
            }
            if let Some(code) = member.code() {
                if !codes.insert(code) {
                    return Err(MapperError::invalid_declaration(
                        self.type_name,
                        format!("code '{}' is declared by more than one member", code),
                    ));
                }
            }
            if member.is_default() {
                if default_index.is_some() {
                    return Err(MapperError::invalid_declaration(
                        self.type_name,
                        "more than one member is marked default",
                    ));
                }
                default_index = Some(index);
            }
        }

        Ok(EnumMetadata {
            type_name: self.type_name,
            values: self.values,
            members: self.members,
            default_index,
        })
    }

    /// Builds the table, panicking on an invalid declaration.
    ///
    /// # Panics
    /// When the declaration breaks a marker invariant.
    pub fn finish(self) -> EnumMetadata<E> {
        match self.build() {
            Ok(metadata) => metadata,
            Err(e) => panic!("{}", e),
        }
    }
}

pub fn enum_kind<E: CodedEnum>() -> EnumKind {
    EnumKind::new(TypeId::of::<E>(), E::metadata())
}

pub fn enum_type_tag<E: CodedEnum>() -> TypeTag {
    TypeTag::new(ScalarKind::Enum(enum_kind::<E>()))
}

pub fn enum_to_value<E: CodedEnum>(value: E) -> Value {
    match E::metadata().index_of(value) {
        Some(index) => Value::Enum(EnumValue::new(enum_kind::<E>(), index)),
        None => Value::Null,
    }
}

pub fn enum_from_value<E: CodedEnum>(value: Value) -> std::result::Result<E, ValueMismatch> {
    match &value {
        Value::Enum(member) if member.kind().type_id() == TypeId::of::<E>() => E::metadata()
            .value_at(member.index())
            .ok_or_else(|| ValueMismatch::new(enum_type_tag::<E>(), &value)),
        _ => Err(ValueMismatch::new(enum_type_tag::<E>(), &value)),
    }
}

/// Resolves a code against the enum a type tag names, with `from_code` semantics.
pub fn resolve_code(tag: &TypeTag, code: &str) -> Result<EnumValue> {
    let kind = tag
        .enum_kind()
        .ok_or_else(|| MapperError::UnsupportedTargetKind {
            type_name: tag.to_string(),
        })?;
    let table = kind.table();
    table
        .position_of_code(code)
        .or_else(|| table.default_index())
        .map(|index| EnumValue::new(kind, index))
        .ok_or(MapperError::NoDefaultConfigured {
            type_name: table.type_name(),
        })
}

/// The default member of the enum a type tag names.
pub fn resolve_default(tag: &TypeTag) -> Result<EnumValue> {
    let kind = tag
        .enum_kind()
        .ok_or_else(|| MapperError::UnsupportedTargetKind {
            type_name: tag.to_string(),
        })?;
    kind.table()
        .default_index()
        .map(|index| EnumValue::new(kind, index))
        .ok_or(MapperError::NoDefaultConfigured {
            type_name: kind.name(),
        })
}
