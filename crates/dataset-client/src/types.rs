//! Dataset types for the Domo API.
//!
//! These types mirror the API's JSON structures. Every field is optional
//! because the server omits fields freely depending on the endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Dataset metadata as returned by the list and create endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Server-assigned identifier (absent until provisioned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Dataset name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of rows
    #[serde(default, rename = "rows", skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
    /// Number of columns
    #[serde(default, rename = "columns", skip_serializing_if = "Option::is_none")]
    pub column_count: Option<i64>,
    /// Column layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Owner, set by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    /// When the dataset was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the dataset was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Dataset {
    /// Identifier, or an empty string when not yet provisioned.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Name, or an empty string when the server omitted it.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// The creation payload that would reproduce this dataset's shape.
    pub fn descriptor(&self) -> DatasetDescriptor {
        DatasetDescriptor {
            name: self.name().to_string(),
            description: self.description.clone(),
            schema: self.schema.clone().unwrap_or_default(),
        }
    }
}

/// Ordered column layout of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Columns in order; names are not required to be unique
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Schema {
    /// Create a schema from columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }
}

impl FromIterator<Column> for Schema {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// A single schema column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column type (STRING, DECIMAL, LONG, DOUBLE, DATE, DATETIME)
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub column_type: String,
    /// Column name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Column {
    /// Create a column with the given name and type.
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            column_type: column_type.into(),
            name: name.into(),
        }
    }
}

/// Dataset owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// User id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Missing and `null` both decode to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload for creating a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Dataset name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Column layout
    #[serde(default)]
    pub schema: Schema,
}

impl DatasetDescriptor {
    /// Create a descriptor with a name and schema.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How uploaded rows are combined with existing dataset contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMethod {
    /// Add rows after the existing ones
    #[default]
    Append,
    /// Discard existing rows first
    Replace,
}

impl UpdateMethod {
    /// `Replace` when `replace` is set, otherwise `Append`.
    pub fn from_replace(replace: bool) -> Self {
        if replace {
            UpdateMethod::Replace
        } else {
            UpdateMethod::Append
        }
    }

    /// Query-string value understood by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMethod::Append => "APPEND",
            UpdateMethod::Replace => "REPLACE",
        }
    }
}

impl fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
