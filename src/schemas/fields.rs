use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{FieldIssue, ValidationError};

// Наивные метки времени (без смещения) считаем UTC
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const EPOCH_MILLIS_THRESHOLD: u64 = 20_000_000_000;

/// Значение, которое можно прочитать из одного поля JSON-объекта.
pub(crate) trait FieldValue: Sized {
    const EXPECTED: &'static str;

    fn from_json(value: &Value) -> Option<Self>;
}

impl FieldValue for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(whole_number)),
            Value::String(raw) => raw.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    const EXPECTED: &'static str = "a finite number";

    fn from_json(value: &Value) -> Option<Self> {
        let number = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(raw) => raw.trim().parse().ok(),
            _ => None,
        };
        number.filter(|number: &f64| number.is_finite())
    }
}

// Числа в текстовые поля не превращаем
impl FieldValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FieldValue for DateTime<Utc> {
    const EXPECTED: &'static str = "an ISO-8601 timestamp";

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(raw) => parse_timestamp(raw),
            Value::Number(number) => number.as_i64().and_then(from_epoch),
            _ => None,
        }
    }
}

// 1.0 -> 1, но 1.5 и значения вне i64 отбрасываем
fn whole_number(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then(|| value as i64)
}

// Выше порога число считается миллисекундами
fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.unsigned_abs() > EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Читает поля объекта и копит все найденные проблемы.
pub(crate) struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            issues: Vec::new(),
        }
    }

    pub(crate) fn required<T: FieldValue>(&mut self, name: &'static str) -> Option<T> {
        match self.fields.get(name) {
            None | Some(Value::Null) => {
                self.issues.push(FieldIssue::missing(name));
                None
            }
            Some(value) => self.convert(name, value),
        }
    }

    pub(crate) fn optional<T: FieldValue>(&mut self, name: &'static str) -> Option<T> {
        match self.fields.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => self.convert(name, value),
        }
    }

    fn convert<T: FieldValue>(&mut self, name: &'static str, value: &Value) -> Option<T> {
        let converted = T::from_json(value);
        if converted.is_none() {
            self.issues
                .push(FieldIssue::invalid(name, T::EXPECTED, describe(value)));
        }
        converted
    }

    pub(crate) fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => Err(ValidationError::Fields(self.issues)),
        }
    }
}

pub(crate) fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(kind_of(value)))
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            format!("{} {}", kind_of(value), value)
        }
        _ => kind_of(value).to_string(),
    }
}
