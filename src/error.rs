use std::fmt;
use thiserror::Error;

/// Ошибка построения транспортной схемы события.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid event: expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid event: {0}")]
    Malformed(String),

    #[error("invalid event: {}", join_issues(.0))]
    Fields(Vec<FieldIssue>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    InvalidType {
        expected: &'static str,
        found: String,
    },
}

impl FieldIssue {
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            kind: IssueKind::Missing,
        }
    }

    pub fn invalid(field: &'static str, expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            field,
            kind: IssueKind::InvalidType {
                expected,
                found: found.into(),
            },
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "`{}` is required", self.field),
            IssueKind::InvalidType { expected, found } => {
                write!(f, "`{}` must be {}, found {}", self.field, expected, found)
            }
        }
    }
}

impl ValidationError {
    /// Имена полей, из-за которых построение не удалось.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::Fields(issues) => issues.iter().map(|issue| issue.field).collect(),
            _ => Vec::new(),
        }
    }

    pub fn mentions(&self, field: &str) -> bool {
        self.fields().iter().any(|name| *name == field)
    }

    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ValidationError::Fields(issues) => issues,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::Malformed(err.to_string())
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
