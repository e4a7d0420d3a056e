use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::VehicleId;
use crate::money::Cents;

/// One bookable window from `/checkout/available-slots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub start_time: String,
    pub end_time: String,
}

/// Deposit figures computed by `/checkout/deposit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositQuote {
    pub total_cents: Cents,
    pub deposit_cents: Cents,
    pub balance_cents: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Body of `POST /checkout`; the cart is implied by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub vehicle_id: VehicleId,
    pub date: NaiveDate,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
