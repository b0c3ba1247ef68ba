use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Строка таблицы `events`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "startDate")]
    #[sqlx(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate")]
    #[sqlx(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub lat: f64,
    pub long: f64,
    pub organizer: Option<String>,
}

impl Event {
    pub const TABLE: &'static str = "events";

    // Порядок совпадает с объявлением полей выше
    pub const COLUMNS: [&'static str; 12] = [
        "id",
        "name",
        "description",
        "url",
        "image",
        "startDate",
        "endDate",
        "venue",
        "address",
        "lat",
        "long",
        "organizer",
    ];
}
