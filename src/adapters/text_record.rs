use crate::core::metadata::names_match;
use crate::domain::model::{TypeTag, Value};
use crate::domain::ports::{Source, SourceValue};

/// A loosely-typed record whose cells are all nullable text, e.g. one CSV row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRecord {
    type_name: String,
    fields: Vec<(String, Option<String>)>,
}

impl TextRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn from_pairs<I, K, V>(type_name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new(type_name);
        for (name, value) in pairs {
            record.insert(name, Some(value.into()));
        }
        record
    }

    /// Sets a cell, replacing an existing one whose name matches ignoring case.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| names_match(n, &name)) {
            Some(field) => field.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| names_match(n, name))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Source for TextRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn find_property(&self, name: &str) -> Option<SourceValue> {
        self.fields
            .iter()
            .find(|(n, _)| names_match(n, name))
            .map(|(_, value)| SourceValue {
                type_tag: TypeTag::text().nullable(),
                value: value.clone().map(Value::Text).unwrap_or(Value::Null),
            })
    }
}
