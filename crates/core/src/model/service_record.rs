use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::id::{BookingId, CustomerId, ServiceRecordId, VehicleId};

/// Work log entry written by staff after a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: ServiceRecordId,
    #[serde(default)]
    pub booking_id: Option<BookingId>,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub vehicle_id: Option<VehicleId>,
    pub performed_on: NaiveDate,
    pub summary: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub technician: Option<String>,
}

impl_entity!(ServiceRecord, ServiceRecordId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<BookingId>,
    pub customer_id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<VehicleId>,
    pub performed_on: NaiveDate,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
}
