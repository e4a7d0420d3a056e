//! API payload types.
//!
//! These mirror the remote JSON API one-to-one (camelCase on the wire). The
//! client never owns their lifecycle; it reads them, displays them and sends
//! them back.

pub mod booking;
pub mod cart;
pub mod catalogue;
pub mod checkout;
pub mod customer;
pub mod schedule;
pub mod service_record;
pub mod user;
pub mod vehicle;

pub use booking::{Booking, BookingItem, BookingStatus, StatusUpdate};
pub use cart::{Cart, CartItem, CartItemRequest, CartQuantityRequest};
pub use catalogue::{DetailingService, ServiceInput};
pub use checkout::{AvailableSlot, CheckoutRequest, DepositQuote, DepositRequest};
pub use customer::{CustomerProfile, CustomerSummary, ProfileInput};
pub use schedule::{Blackout, BlackoutInput, ScheduleDay, ScheduleDayInput, Weekday};
pub use service_record::{ServiceRecord, ServiceRecordInput};
pub use user::{AuthSession, LoginRequest, RegisterRequest, User};
pub use vehicle::{Vehicle, VehicleInput, VehicleSize};
