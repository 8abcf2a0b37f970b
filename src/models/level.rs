use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Intern,
    Junior,
    Senior,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Intern => "Intern",
            Level::Junior => "Junior",
            Level::Senior => "Senior",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "intern" => Ok(Level::Intern),
            "junior" => Ok(Level::Junior),
            "senior" => Ok(Level::Senior),
            _ => Err(format!(
                "Invalid level '{}'. Valid options: Intern, Junior, Senior",
                s
            )),
        }
    }
}

/// Serde adapter for an optional level stored as a string field.
///
/// An unset level travels as `""`. On the way in, `""`, `null` and a missing
/// key all mean unset.
pub(crate) mod optional {
    use super::*;

    pub fn serialize<S>(level: &Option<Level>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(level.map(|l| l.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Level>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}
