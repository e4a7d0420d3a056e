use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::id::VehicleId;

/// Size class used by the backend for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleSize {
    Small,
    Medium,
    Large,
    Oversized,
}

impl VehicleSize {
    pub fn label(self) -> &'static str {
        match self {
            VehicleSize::Small => "Small",
            VehicleSize::Medium => "Medium",
            VehicleSize::Large => "Large",
            VehicleSize::Oversized => "Oversized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub license_plate: Option<String>,
    pub size: VehicleSize,
}

impl_entity!(Vehicle, VehicleId);

impl Vehicle {
    /// "2019 Mazda CX-5", or "Mazda CX-5" when the year is unknown.
    pub fn display_name(&self) -> String {
        match self.year {
            Some(year) => format!("{year} {} {}", self.make, self.model),
            None => format!("{} {}", self.make, self.model),
        }
    }
}

/// Body of `POST /me/vehicles` and `PUT /me/vehicles/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    pub size: VehicleSize,
}
