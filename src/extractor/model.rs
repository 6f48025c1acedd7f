use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One validated row of a progression table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub observed_value: f64,
    pub actor: String,
    pub observed_at: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Value,
    Actor,
    Date,
    Location,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Value, Field::Actor, Field::Date, Field::Location];

    fn slot(self) -> usize {
        match self {
            Field::Value => 0,
            Field::Actor => 1,
            Field::Date => 2,
            Field::Location => 3,
        }
    }
}

/// Header keywords for each field, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldKeywords {
    value: Vec<String>,
    actor: Vec<String>,
    date: Vec<String>,
    location: Vec<String>,
}

impl FieldKeywords {
    pub fn new<I, S>(value: I, actor: I, date: I, location: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            value: normalize_keywords(value),
            actor: normalize_keywords(actor),
            date: normalize_keywords(date),
            location: normalize_keywords(location),
        }
    }

    pub fn for_field(&self, field: Field) -> &[String] {
        match field {
            Field::Value => &self.value,
            Field::Actor => &self.actor,
            Field::Date => &self.date,
            Field::Location => &self.location,
        }
    }

    /// True when `header` (already trimmed and lower-cased) names `field`.
    pub fn matches(&self, field: Field, header: &str) -> bool {
        self.for_field(field)
            .iter()
            .any(|keyword| header.contains(keyword.as_str()))
    }
}

impl Default for FieldKeywords {
    fn default() -> Self {
        Self::new(["mark"], ["athlete"], ["date"], ["venue"])
    }
}

fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|keyword| keyword.as_ref().trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

/// Column position of each field within one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    columns: [Option<usize>; 4],
}

impl HeaderMapping {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns[field.slot()]
    }

    /// Records `column` for `field` unless the field is already mapped.
    pub fn insert_first(&mut self, field: Field, column: usize) -> bool {
        let slot = &mut self.columns[field.slot()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(column);
        true
    }

    pub fn is_complete(&self) -> bool {
        self.columns.iter().all(Option::is_some)
    }

    /// All four column indices, or `None` when any field is missing.
    pub fn columns(&self) -> Option<MappedColumns> {
        Some(MappedColumns {
            value: self.get(Field::Value)?,
            actor: self.get(Field::Actor)?,
            date: self.get(Field::Date)?,
            location: self.get(Field::Location)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedColumns {
    pub value: usize,
    pub actor: usize,
    pub date: usize,
    pub location: usize,
}
