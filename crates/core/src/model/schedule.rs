use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{impl_entity, Entity};
use crate::error::DomainError;
use crate::id::BlackoutId;

/// Day of week as the API numbers it: 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    const NAMES: [&'static str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];

    pub fn new(day: u8) -> Result<Self, DomainError> {
        if usize::from(day) < Self::NAMES.len() {
            Ok(Self(day))
        } else {
            Err(DomainError::invalid_value(format!("weekday out of range: {day}")))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[usize::from(self.0)]
    }
}

impl TryFrom<u8> for Weekday {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Weekday::new(value)
    }
}

impl From<Weekday> for u8 {
    fn from(value: Weekday) -> Self {
        value.0
    }
}

/// Weekly opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub weekday: Weekday,
    pub is_open: bool,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub max_bookings: Option<u32>,
}

impl Entity for ScheduleDay {
    type Id = Weekday;

    fn id(&self) -> Weekday {
        self.weekday
    }
}

/// Body of `PUT /admin/schedule/:weekday`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDayInput {
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bookings: Option<u32>,
}

/// A closed date range (holiday, maintenance, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blackout {
    pub id: BlackoutId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

impl_entity!(Blackout, BlackoutId);

impl Blackout {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackoutInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_rejects_out_of_range_on_the_wire() {
        let ok: Weekday = serde_json::from_value(serde_json::json!(6)).unwrap();
        assert_eq!(ok.name(), "Saturday");
        assert!(serde_json::from_value::<Weekday>(serde_json::json!(7)).is_err());
    }

    #[test]
    fn blackout_covers_inclusive_range() {
        let b = Blackout {
            id: BlackoutId::new(),
            start_date: NaiveDate::from_ymd_opt(2026, 12, 24).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 26).unwrap(),
            reason: None,
        };
        assert!(b.covers(NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()));
        assert!(b.covers(NaiveDate::from_ymd_opt(2026, 12, 26).unwrap()));
        assert!(!b.covers(NaiveDate::from_ymd_opt(2026, 12, 27).unwrap()));
    }
}
