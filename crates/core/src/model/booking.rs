use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::error::DomainError;
use crate::id::{BookingId, CustomerId, ServiceId};
use crate::model::vehicle::Vehicle;
use crate::money::Cents;

/// Booking lifecycle as reported by the backend.
///
/// Which transitions are legal is decided server-side; this client only
/// displays the value and submits requested changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::InProgress => "In progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// Still on the calendar (not finished or cancelled).
    pub fn is_open(self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::InProgress
        )
    }
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::invalid_value(format!("unknown booking status '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    pub service_id: ServiceId,
    pub service_name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    pub price_cents: Cents,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub reference: String,
    pub status: BookingStatus,
    pub scheduled_date: NaiveDate,
    /// Wall-clock "HH:MM" in the business's local time.
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub items: Vec<BookingItem>,
    pub total_cents: Cents,
    #[serde(default)]
    pub deposit_cents: Cents,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl_entity!(Booking, BookingId);

impl Booking {
    /// Amount still owed after the deposit.
    pub fn balance_cents(&self) -> Cents {
        Cents(self.total_cents.0 - self.deposit_cents.0)
    }
}

/// Body of `POST /admin/bookings/:id/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_wire_names_case_insensitively() {
        assert_eq!("in_progress".parse::<BookingStatus>().unwrap(), BookingStatus::InProgress);
        assert_eq!(" Confirmed ".parse::<BookingStatus>().unwrap(), BookingStatus::Confirmed);
        assert!("done".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_value(BookingStatus::InProgress).unwrap();
        assert_eq!(json, serde_json::json!("in_progress"));
    }
}
