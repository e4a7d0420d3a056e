use std::collections::BTreeMap;

use detailing_auth::SessionToken;
use detailing_core::model::{Booking, BookingStatus, StatusUpdate};
use detailing_core::query::{self, BookingFilter, BookingSort};
use detailing_core::{BookingId, transitions};

use crate::endpoints::admin;
use crate::{ApiClient, ApiError, Reply};

/// Admin booking list with inline status changes.
#[derive(Debug, Clone)]
pub struct BookingBoard {
    client: ApiClient,
    token: SessionToken,
    bookings: Vec<Booking>,
}

impl BookingBoard {
    pub fn new(client: ApiClient, token: SessionToken, bookings: Vec<Booking>) -> Self {
        Self {
            client,
            token,
            bookings,
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub async fn load(&mut self) -> Result<&[Booking], ApiError> {
        self.bookings = admin::bookings(&self.client, &self.token).await?;
        Ok(&self.bookings)
    }

    /// Filtered and sorted copy for display.
    pub fn visible(&self, filter: &BookingFilter, sort: BookingSort) -> Vec<Booking> {
        query::filter_bookings(self.bookings.clone(), filter, sort)
    }

    pub fn counts(&self) -> BTreeMap<BookingStatus, usize> {
        query::count_by_status(&self.bookings)
    }

    /// Ask the backend for a status change; the list changes only if it
    /// accepts.
    ///
    /// Returns the booking as the board now holds it, or `None` when the
    /// backend answered 204 for a booking this board never loaded.
    pub async fn update_status(&mut self, id: BookingId, update: &StatusUpdate) -> Result<Option<&Booking>, ApiError> {
        let reply = admin::update_booking_status(&self.client, &self.token, id, update).await?;
        let bookings = std::mem::take(&mut self.bookings);
        self.bookings = match reply {
            Reply::Content(updated) => transitions::booking_updated(bookings, updated),
            Reply::NoContent => transitions::booking_status_applied(bookings, id, update.status),
        };
        Ok(self.bookings.iter().find(|b| b.id == id))
    }
}
