//! Metadata accessor: ordered member descriptors and their declarative markers.
//!
//! Record schemas and enum tables are declared once per type (see `record_schema!` and
//! `coded_enum!`) and cached for the life of the process.

use crate::domain::model::{TypeTag, Value, ValueMismatch};
use crate::domain::ports::Property;
use crate::utils::error::{MapperError, Result};
use crate::utils::validation::validate_positive_number;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    ConstantCode(&'static str),
    Description(&'static str),
    IsDefault,
    /// 1-based CSV column position and header text.
    CsvColumn { index: usize, header: &'static str },
}

impl Marker {
    fn kind_name(&self) -> &'static str {
        match self {
            Marker::ConstantCode(_) => "code",
            Marker::Description(_) => "description",
            Marker::IsDefault => "default",
            Marker::CsvColumn { .. } => "csv column",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: &'static str,
    pub declared_type: String,
    pub markers: Vec<Marker>,
}

impl MemberDescriptor {
    pub fn new(name: &'static str, declared_type: impl Into<String>) -> Self {
        Self {
            name,
            declared_type: declared_type.into(),
            markers: Vec::new(),
        }
    }

    pub fn code(&self) -> Option<&'static str> {
        self.markers.iter().find_map(|m| match m {
            Marker::ConstantCode(code) => Some(*code),
            _ => None,
        })
    }

    pub fn description(&self) -> Option<&'static str> {
        self.markers.iter().find_map(|m| match m {
            Marker::Description(text) => Some(*text),
            _ => None,
        })
    }

    pub fn is_default(&self) -> bool {
        self.markers.contains(&Marker::IsDefault)
    }

    pub fn csv_column(&self) -> Option<(usize, &'static str)> {
        self.markers.iter().find_map(|m| match m {
            Marker::CsvColumn { index, header } => Some((*index, *header)),
            _ => None,
        })
    }

    /// Each marker kind may appear at most once per member.
    pub(crate) fn validate(&self, owner: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for marker in &self.markers {
            if !seen.insert(marker.kind_name()) {
                return Err(MapperError::invalid_declaration(
                    owner,
                    format!("member '{}' carries more than one {} marker", self.name, marker.kind_name()),
                ));
            }
        }
        Ok(())
    }
}

/// Enumerates the declared members of a type in declaration order.
pub trait DeclaredMembers {
    fn declared_type_name(&self) -> &'static str;
    fn declared_members(&self) -> Vec<&MemberDescriptor>;
}

/// Exact name comparison, ignoring case.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

type Getter<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;
type Setter<R> = Box<dyn Fn(&mut R, Value) -> std::result::Result<(), ValueMismatch> + Send + Sync>;

pub struct PropertyDef<R> {
    descriptor: MemberDescriptor,
    type_tag: TypeTag,
    get: Getter<R>,
    set: Setter<R>,
}

impl<R> PropertyDef<R> {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    pub fn descriptor(&self) -> &MemberDescriptor {
        &self.descriptor
    }

    pub fn get(&self, record: &R) -> Value {
        (self.get)(record)
    }

    pub fn set(&self, record: &mut R, value: Value) -> std::result::Result<(), ValueMismatch> {
        (self.set)(record, value)
    }
}

pub struct Schema<R> {
    type_name: &'static str,
    properties: Vec<PropertyDef<R>>,
    constructor: Option<fn() -> R>,
}

impl<R: 'static> Schema<R> {
    pub fn builder(type_name: &'static str) -> SchemaBuilder<R> {
        SchemaBuilder {
            type_name,
            properties: Vec::new(),
            constructor: None,
            errors: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn properties(&self) -> &[PropertyDef<R>] {
        &self.properties
    }

    pub fn find(&self, name: &str) -> Option<&PropertyDef<R>> {
        self.properties.iter().find(|p| names_match(p.name(), name))
    }

    /// Parameterless construction, when the type registered one.
    pub fn construct(&self) -> Option<R> {
        self.constructor.map(|ctor| ctor())
    }

    /// Properties carrying a CSV column marker, ordered by column index.
    pub fn csv_columns(&self) -> Vec<(&PropertyDef<R>, &'static str)> {
        let mut columns: Vec<_> = self
            .properties
            .iter()
            .filter_map(|p| p.descriptor.csv_column().map(|(index, header)| (index, p, header)))
            .collect();
        columns.sort_by_key(|(index, _, _)| *index);
        columns.into_iter().map(|(_, p, header)| (p, header)).collect()
    }
}

impl<R: 'static> DeclaredMembers for Schema<R> {
    fn declared_type_name(&self) -> &'static str {
        self.type_name
    }

    fn declared_members(&self) -> Vec<&MemberDescriptor> {
        self.properties.iter().map(|p| &p.descriptor).collect()
    }
}

pub struct SchemaBuilder<R> {
    type_name: &'static str,
    properties: Vec<PropertyDef<R>>,
    constructor: Option<fn() -> R>,
    errors: Vec<String>,
}

impl<R: 'static> SchemaBuilder<R> {
    pub fn property<T: Property + 'static>(
        mut self,
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Self {
        let type_tag = T::type_tag();
        self.properties.push(PropertyDef {
            descriptor: MemberDescriptor::new(name, type_tag.to_string()),
            type_tag,
            get: Box::new(move |record: &R| get(record).to_value()),
            set: Box::new(move |record: &mut R, value: Value| {
                *get_mut(record) = T::from_value(value)?;
                Ok(())
            }),
        });
        self
    }

    /// Marks the most recently added property as a CSV column.
    pub fn csv_column(mut self, index: usize, header: &'static str) -> Self {
        match self.properties.last_mut() {
            Some(property) => property
                .descriptor
                .markers
                .push(Marker::CsvColumn { index, header }),
            None => self
                .errors
                .push("csv column declared before any property".to_string()),
        }
        self
    }

    pub fn constructor(mut self, constructor: Option<fn() -> R>) -> Self {
        self.constructor = constructor;
        self
    }

    pub fn build(self) -> Result<Schema<R>> {
        if let Some(message) = self.errors.into_iter().next() {
            return Err(MapperError::invalid_declaration(self.type_name, message));
        }

        let mut names = HashSet::new();
        let mut columns = HashSet::new();
        for property in &self.properties {
            property.descriptor.validate(self.type_name)?;

            if !names.insert(property.name().to_lowercase()) {
                return Err(MapperError::invalid_declaration(
                    self.type_name,
                    format!("property '{}' is declared twice (names ignore case)", property.name()),
                ));
            }

            if let Some((index, _)) = property.descriptor.csv_column() {
                validate_positive_number(property.name(), index, 1).map_err(|e| {
                    MapperError::invalid_declaration(self.type_name, e.to_string())
                })?;
                if !columns.insert(index) {
                    return Err(MapperError::invalid_declaration(
                        self.type_name,
                        format!("csv column {} is used twice", index),
                    ));
                }
            }
        }

        Ok(Schema {
            type_name: self.type_name,
            properties: self.properties,
            constructor: self.constructor,
        })
    }

    /// Builds the schema, panicking on an invalid declaration.
    ///
    /// # Panics
    /// When the declaration breaks a schema invariant. Declarations are part of the type
    /// definition, so this surfaces on first use of the type.
    pub fn finish(self) -> Schema<R> {
        match self.build() {
            Ok(schema) => schema,
            Err(e) => panic!("{}", e),
        }
    }
}
