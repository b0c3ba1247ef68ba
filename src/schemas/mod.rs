pub mod event;
mod fields;

pub use event::{EventBase, EventDetails};

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Какое представление события отдавать наружу.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    Base,
    #[default]
    Details,
}

impl View {
    /// Валидирует объект и возвращает его нормализованную JSON-форму.
    pub fn normalize(self, value: &Value) -> Result<Value, ValidationError> {
        let normalized = match self {
            View::Base => serde_json::to_value(EventBase::try_from(value)?)?,
            View::Details => serde_json::to_value(EventDetails::try_from(value)?)?,
        };
        Ok(normalized)
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(View::Base),
            "details" => Ok(View::Details),
            other => Err(format!("unknown view `{}`", other)),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Base => f.write_str("base"),
            View::Details => f.write_str("details"),
        }
    }
}
