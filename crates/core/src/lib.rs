//! `detailing-core` — shared data contracts and pure helpers.
//!
//! Everything here is deterministic and free of I/O: API payload types,
//! display formatting, form validation, list filtering and the state
//! transitions widgets apply after a mutation succeeds.

pub mod entity;
pub mod error;
pub mod format;
pub mod id;
pub mod model;
pub mod money;
pub mod query;
pub mod transitions;
pub mod validation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    BlackoutId, BookingId, CartId, CartItemId, CustomerId, ServiceId, ServiceRecordId, UserId,
    VehicleId,
};
pub use money::Cents;
pub use validation::FieldErrors;
