use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::id::ServiceId;
use crate::money::Cents;

/// A bookable detailing service from `/catalogue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailingService {
    pub id: ServiceId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price_cents: Cents,
    pub duration_minutes: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_active() -> bool {
    true
}

impl_entity!(DetailingService, ServiceId);

/// Admin create/update body for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price_cents: Cents,
    pub duration_minutes: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}
