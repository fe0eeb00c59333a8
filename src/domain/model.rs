use crate::domain::ports::EnumTable;
use rust_decimal::Decimal;
use std::any::TypeId;
use std::fmt;
use thiserror::Error;

/// Runtime handle on a declared enum type.
#[derive(Clone, Copy)]
pub struct EnumKind {
    type_id: TypeId,
    table: &'static dyn EnumTable,
}

impl EnumKind {
    pub fn new(type_id: TypeId, table: &'static dyn EnumTable) -> Self {
        Self { type_id, table }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.table.type_name()
    }

    pub fn table(&self) -> &'static dyn EnumTable {
        self.table
    }
}

impl PartialEq for EnumKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl fmt::Debug for EnumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumKind({})", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarKind {
    Bool,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    Text,
    Enum(EnumKind),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Bool => f.write_str("bool"),
            ScalarKind::I32 => f.write_str("i32"),
            ScalarKind::I64 => f.write_str("i64"),
            ScalarKind::F32 => f.write_str("f32"),
            ScalarKind::F64 => f.write_str("f64"),
            ScalarKind::Decimal => f.write_str("Decimal"),
            ScalarKind::Text => f.write_str("String"),
            ScalarKind::Enum(kind) => f.write_str(kind.name()),
        }
    }
}

/// Declared type of a property: a scalar kind, optionally wrapped as nullable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeTag {
    kind: ScalarKind,
    nullable: bool,
}

impl TypeTag {
    pub const fn new(kind: ScalarKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub const fn text() -> Self {
        Self::new(ScalarKind::Text)
    }

    pub const fn nullable(self) -> Self {
        Self {
            kind: self.kind,
            nullable: true,
        }
    }

    pub fn kind(&self) -> &ScalarKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_text(&self) -> bool {
        self.kind == ScalarKind::Text
    }

    pub fn enum_kind(&self) -> Option<EnumKind> {
        match self.kind {
            ScalarKind::Enum(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Option<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// One member of a declared enum, identified by its declaration index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumValue {
    kind: EnumKind,
    index: usize,
}

impl EnumValue {
    pub fn new(kind: EnumKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub fn kind(&self) -> EnumKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'static str {
        self.kind
            .table()
            .members()
            .get(self.index)
            .map(|m| m.name)
            .unwrap_or("")
    }

    /// The member's constant code, or its name when none is declared.
    pub fn code(&self) -> &'static str {
        self.kind
            .table()
            .members()
            .get(self.index)
            .map(|m| m.code().unwrap_or(m.name))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Text(String),
    Enum(EnumValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Decimal(_) => "Decimal",
            Value::Text(_) => "String",
            Value::Enum(_) => "enum",
        }
    }

    /// Locale-invariant text form; `None` for null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::I32(n) => Some(n.to_string()),
            Value::I64(n) => Some(n.to_string()),
            Value::F32(n) => Some(n.to_string()),
            Value::F64(n) => Some(n.to_string()),
            Value::Decimal(d) => Some(d.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Enum(e) => Some(e.code().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueMismatch {
    pub expected: String,
    pub found: &'static str,
}

impl ValueMismatch {
    pub fn new(expected: impl fmt::Display, found: &Value) -> Self {
        Self {
            expected: expected.to_string(),
            found: found.kind_name(),
        }
    }
}
