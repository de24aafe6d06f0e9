//! News record model and field validation

use crate::error::{NewsdeskError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Prefix shared by every generated record id
pub const RECORD_ID_PREFIX: &str = "noticia-";

/// A single news article as stored in the JSON document.
///
/// Field names on disk are the ones the public site reads
/// (`titulo`, `foto_principal`, ...), so they are renamed here.
/// Every key is optional on load so one hand-edited entry cannot make the
/// whole file unreadable; a missing id is filled in when the store loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "data", default)]
    pub date: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "subtitulo", default)]
    pub subtitle: String,
    #[serde(rename = "foto_principal", default)]
    pub primary_image: String,
    /// `None` is the explicit "no image" marker; `null`, `""` and a missing key all load as `None`
    #[serde(
        rename = "foto_secundaria",
        default,
        deserialize_with = "blank_as_none"
    )]
    pub secondary_image: Option<String>,
    #[serde(rename = "conteudo", default)]
    pub body: String,
    #[serde(rename = "conteudo_adicional", default)]
    pub extra_content: String,
}

impl NewsRecord {
    /// Build a record from form values under the given id
    pub fn from_fields(id: impl Into<String>, fields: RecordFields) -> Self {
        NewsRecord {
            id: id.into(),
            date: fields.date,
            title: fields.title,
            subtitle: fields.subtitle,
            primary_image: fields.primary_image,
            secondary_image: fields.secondary_image.filter(|s| !s.trim().is_empty()),
            body: fields.body,
            extra_content: fields.extra_content,
        }
    }

    /// Split the record back into its id and editable fields
    pub fn into_fields(self) -> (String, RecordFields) {
        let fields = RecordFields {
            date: self.date,
            title: self.title,
            subtitle: self.subtitle,
            primary_image: self.primary_image,
            secondary_image: self.secondary_image,
            body: self.body,
            extra_content: self.extra_content,
        };
        (self.id, fields)
    }

    /// Check the fields the store requires before saving
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(NewsdeskError::Validation("id must not be empty".to_string()));
        }
        validate_required(&self.title, &self.date)
    }
}

/// Values collected by a form before the store assigns an id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub date: String,
    pub title: String,
    pub subtitle: String,
    pub primary_image: String,
    pub secondary_image: Option<String>,
    pub body: String,
    pub extra_content: String,
}

impl RecordFields {
    /// Fields with only the two required values set
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        RecordFields {
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_required(&self.title, &self.date)
    }
}

fn validate_required(title: &str, date: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(NewsdeskError::Validation("title is required".to_string()));
    }
    if date.trim().is_empty() {
        return Err(NewsdeskError::Validation("date is required".to_string()));
    }
    Ok(())
}

/// Generate a candidate record id (`noticia-` + 8 hex digits).
///
/// Uniqueness within a document is checked by the caller.
pub fn generate_record_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", RECORD_ID_PREFIX, &hex[..8])
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
