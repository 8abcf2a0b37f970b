use serde::{Deserialize, Serialize};
use std::fmt;

use super::level::{self, Level};

/// Identifier assigned by the remote store.
///
/// Opaque to the client: it is only compared and echoed back in paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An employee record. Doubles as the editor's draft.
///
/// A record without `id` has never been saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, with = "level::optional")]
    pub level: Option<Level>,
}

impl Record {
    /// The empty draft: `{name: "", position: "", level: ""}`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(name: impl Into<String>, position: impl Into<String>, level: Level) -> Self {
        Self {
            id: None,
            name: name.into(),
            position: position.into(),
            level: Some(level),
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Shallow merge: fields present in `patch` overwrite, the rest stay.
    pub fn merge(&mut self, patch: RecordPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(level) = patch.level {
            self.level = Some(level);
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        if let Some(id) = &self.id {
            writeln!(f, "ID: {}", id)?;
        }
        writeln!(f, "Position: {}", self.position)?;
        match self.level {
            Some(level) => writeln!(f, "Level: {}", level),
            None => writeln!(f, "Level: -"),
        }
    }
}

/// A partial set of field values for [`Record::merge`].
///
/// Only field-named keys exist here; an identifier can never be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub position: Option<String>,
    pub level: Option<Level>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.position.is_none() && self.level.is_none()
    }
}
