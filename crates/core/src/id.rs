//! Strongly-typed identifiers for API resources.
//!
//! The backend owns identity; these newtypes only keep a vehicle id from being
//! passed where a booking id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a fresh identifier (UUIDv7). Mostly useful in tests.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

uuid_id!(
    /// Identifier of a user account.
    UserId,
    "UserId"
);
uuid_id!(
    /// Identifier of a customer profile.
    CustomerId,
    "CustomerId"
);
uuid_id!(VehicleId, "VehicleId");
uuid_id!(
    /// Identifier of a catalogue service.
    ServiceId,
    "ServiceId"
);
uuid_id!(CartId, "CartId");
uuid_id!(CartItemId, "CartItemId");
uuid_id!(BookingId, "BookingId");
uuid_id!(BlackoutId, "BlackoutId");
uuid_id!(ServiceRecordId, "ServiceRecordId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_garbage_with_type_name() {
        let err = "not-a-uuid".parse::<BookingId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("BookingId")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let id = VehicleId::new();
        let parsed: VehicleId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
