//! Stateful form widgets.
//!
//! A widget owns the list it shows, calls the gateway, and only after a
//! successful response folds the answer into its list through
//! [`detailing_core::transitions`]. A failed call leaves the list untouched.

use thiserror::Error;

use detailing_core::DomainError;

use crate::ApiError;

pub mod bookings;
pub mod cart;
pub mod schedule;
pub mod vehicles;

pub use bookings::BookingBoard;
pub use cart::CartWidget;
pub use schedule::ScheduleEditor;
pub use vehicles::VehicleManager;

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl WidgetError {
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            WidgetError::Invalid(err) => err.to_string(),
            WidgetError::Api(err) => err.user_message(fallback),
        }
    }
}
