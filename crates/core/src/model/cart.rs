use serde::{Deserialize, Serialize};

use crate::entity::impl_entity;
use crate::id::{CartId, CartItemId, ServiceId, VehicleId};
use crate::money::Cents;

/// Shopping cart, either tied to the signed-in user or to an anonymous cart
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    /// Anonymous cart-session id issued by the backend, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub subtotal_cents: Cents,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub service_id: ServiceId,
    pub service_name: String,
    #[serde(default)]
    pub vehicle_id: Option<VehicleId>,
    pub quantity: u32,
    pub unit_price_cents: Cents,
    pub line_total_cents: Cents,
}

impl_entity!(CartItem, CartItemId);

/// Body of `POST /cart/items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub service_id: ServiceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<VehicleId>,
    #[serde(default = "one")]
    pub quantity: u32,
}

/// Body of `PATCH /cart/items/:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuantityRequest {
    pub quantity: u32,
}

fn one() -> u32 {
    1
}
