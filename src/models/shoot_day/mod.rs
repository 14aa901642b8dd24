//! Shoot-day records read from the shooting schedule.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scheduled day of principal photography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootDay {
    pub date: NaiveDate,
    pub day_number: u32,
    #[serde(default)]
    pub scenes: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub call_time: Option<NaiveTime>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShootDay {
    pub fn new(date: NaiveDate, day_number: u32) -> Self {
        Self {
            date,
            day_number,
            scenes: Vec::new(),
            location: None,
            call_time: None,
            notes: None,
        }
    }

    /// Start of the day on the timeline: the call time if known, midnight otherwise.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.call_time.unwrap_or_default())
    }

    pub fn title(&self) -> String {
        format!("Shoot Day {}", self.day_number)
    }
}
