use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FieldIssue, ValidationError};
use crate::models::Event;
use crate::schemas::fields::{as_object, FieldReader};

/// Минимальное представление события (маркер на карте).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBase {
    pub id: i64,
    pub lat: f64,
    pub long: f64,
}

/// Полное представление события для карточки.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub base: EventBase,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub organizer: Option<String>,
}

impl EventBase {
    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let id = reader.required("id");
        let lat = reader.required("lat");
        let long = reader.required("long");

        Some(Self {
            id: id?,
            lat: lat?,
            long: long?,
        })
    }

    fn from_coordinates(id: i64, lat: f64, long: f64) -> Result<Self, ValidationError> {
        let issues: Vec<FieldIssue> = [("lat", lat), ("long", long)]
            .into_iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(field, value)| {
                FieldIssue::invalid(field, "a finite number", format!("number {}", value))
            })
            .collect();

        if issues.is_empty() {
            Ok(Self { id, lat, long })
        } else {
            Err(ValidationError::Fields(issues))
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::try_from(&value)
    }
}

impl EventDetails {
    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let base = EventBase::read(reader);
        let name = reader.required("name");
        let description = reader.optional("description");
        let start_date = reader.optional("startDate");
        let end_date = reader.optional("endDate");
        let url = reader.optional("url");
        let image = reader.optional("image");
        let venue = reader.optional("venue");
        let address = reader.optional("address");
        let organizer = reader.optional("organizer");

        Some(Self {
            base: base?,
            name: name?,
            description,
            start_date,
            end_date,
            url,
            image,
            venue,
            address,
            organizer,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::try_from(&value)
    }

    pub fn base(&self) -> &EventBase {
        &self.base
    }

    pub fn into_base(self) -> EventBase {
        self.base
    }
}

// === Из сущности ===
// float8 в базе может хранить NaN/inf, а в JSON их не передать

impl TryFrom<&Event> for EventBase {
    type Error = ValidationError;

    fn try_from(event: &Event) -> Result<Self, Self::Error> {
        Self::from_coordinates(event.id, event.lat, event.long)
    }
}

impl TryFrom<Event> for EventBase {
    type Error = ValidationError;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        Self::try_from(&event)
    }
}

impl TryFrom<Event> for EventDetails {
    type Error = ValidationError;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        // Без `..`: новое поле сущности не скомпилируется, пока его нет здесь
        let Event {
            id,
            name,
            description,
            url,
            image,
            start_date,
            end_date,
            venue,
            address,
            lat,
            long,
            organizer,
        } = event;

        Ok(Self {
            base: EventBase::from_coordinates(id, lat, long)?,
            name,
            description,
            start_date,
            end_date,
            url,
            image,
            venue,
            address,
            organizer,
        })
    }
}

impl TryFrom<&Event> for EventDetails {
    type Error = ValidationError;

    fn try_from(event: &Event) -> Result<Self, Self::Error> {
        Self::try_from(event.clone())
    }
}

// === Из произвольного объекта с теми же атрибутами ===

impl TryFrom<&Map<String, Value>> for EventBase {
    type Error = ValidationError;

    fn try_from(fields: &Map<String, Value>) -> Result<Self, Self::Error> {
        let mut reader = FieldReader::new(fields);
        let base = Self::read(&mut reader);
        let base = reader.finish(base)?;
        debug!(id = base.id, "event base validated");
        Ok(base)
    }
}

impl TryFrom<&Map<String, Value>> for EventDetails {
    type Error = ValidationError;

    fn try_from(fields: &Map<String, Value>) -> Result<Self, Self::Error> {
        let mut reader = FieldReader::new(fields);
        let details = Self::read(&mut reader);
        let details = reader.finish(details)?;
        debug!(id = details.base.id, "event details validated");
        Ok(details)
    }
}

impl TryFrom<Map<String, Value>> for EventBase {
    type Error = ValidationError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::try_from(&fields)
    }
}

impl TryFrom<Map<String, Value>> for EventDetails {
    type Error = ValidationError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::try_from(&fields)
    }
}

impl TryFrom<&Value> for EventBase {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::try_from(as_object(value)?)
    }
}

impl TryFrom<&Value> for EventDetails {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::try_from(as_object(value)?)
    }
}

impl TryFrom<Value> for EventBase {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl TryFrom<Value> for EventDetails {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

// Десериализация идет через ту же валидацию, что и TryFrom
impl<'de> Deserialize<'de> for EventBase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(&value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for EventDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(&value).map_err(serde::de::Error::custom)
    }
}
