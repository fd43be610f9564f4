// src/entity/note.rs
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single note. Identity is positional; there is no id field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,
    #[serde(rename = "Body", alias = "body", default)]
    pub body: String,
    #[serde(rename = "Date", alias = "date", default = "zero_date")]
    pub date: DateTime<FixedOffset>,
}

impl Note {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            date: Utc::now().fixed_offset(),
        }
    }
}

/// `0001-01-01T00:00:00Z`, the value a note without a `Date` decodes to.
pub fn zero_date() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .unwrap_or_default()
}
