//! Local form validation.
//!
//! These checks only catch obviously bad input before a round trip; the
//! backend re-validates everything and its field errors arrive in the same
//! `field -> [message]` shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::format::parse_time;
use crate::model::{
    BlackoutInput, LoginRequest, ProfileInput, RegisterRequest, ScheduleDayInput, ServiceInput,
    ServiceRecordInput, VehicleInput,
};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_VEHICLE_YEAR: u16 = 1950;
pub const MIN_SERVICE_MINUTES: u32 = 15;
pub const MAX_SERVICE_MINUTES: u32 = 600;

/// Field name → messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// `Ok(())` when nothing was recorded.
    pub fn finish(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }

    fn require(&mut self, field: &str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
        }
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

pub fn is_plausible_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    digits >= 7
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'))
}

pub fn validate_login(req: &LoginRequest) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    if req.email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !is_plausible_email(&req.email) {
        errors.add("email", "Enter a valid email address");
    }
    if req.password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.finish()
}

pub fn validate_registration(req: &RegisterRequest, confirm_password: &str) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    errors.require("firstName", &req.first_name, "First name");
    errors.require("lastName", &req.last_name, "Last name");
    if !is_plausible_email(&req.email) {
        errors.add("email", "Enter a valid email address");
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
    if req.password != confirm_password {
        errors.add("confirmPassword", "Passwords do not match");
    }
    if let Some(phone) = req.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        if !is_plausible_phone(phone) {
            errors.add("phone", "Enter a valid phone number");
        }
    }
    errors.finish()
}

/// `current_year` is passed in so the check stays deterministic.
pub fn validate_vehicle(input: &VehicleInput, current_year: i32) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    errors.require("make", &input.make, "Make");
    errors.require("model", &input.model, "Model");
    if let Some(year) = input.year {
        let max = current_year + 1;
        if i32::from(year) < i32::from(MIN_VEHICLE_YEAR) || i32::from(year) > max {
            errors.add("year", format!("Year must be between {MIN_VEHICLE_YEAR} and {max}"));
        }
    }
    errors.finish()
}

pub fn validate_profile(input: &ProfileInput) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    errors.require("firstName", &input.first_name, "First name");
    errors.require("lastName", &input.last_name, "Last name");
    if let Some(phone) = input.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        if !is_plausible_phone(phone) {
            errors.add("phone", "Enter a valid phone number");
        }
    }
    errors.finish()
}

pub fn validate_service(input: &ServiceInput) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    errors.require("name", &input.name, "Name");
    errors.require("category", &input.category, "Category");
    if !input.price_cents.is_positive() {
        errors.add("priceCents", "Price must be greater than zero");
    }
    if !(MIN_SERVICE_MINUTES..=MAX_SERVICE_MINUTES).contains(&input.duration_minutes) {
        errors.add(
            "durationMinutes",
            format!(
                "Duration must be between {MIN_SERVICE_MINUTES} and {MAX_SERVICE_MINUTES} minutes"
            ),
        );
    }
    errors.finish()
}

pub fn validate_schedule_day(input: &ScheduleDayInput) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    if input.is_open {
        let open = input.open_time.as_deref().and_then(parse_time);
        let close = input.close_time.as_deref().and_then(parse_time);
        if open.is_none() {
            errors.add("openTime", "Opening time is required (HH:MM)");
        }
        if close.is_none() {
            errors.add("closeTime", "Closing time is required (HH:MM)");
        }
        if let (Some(open), Some(close)) = (open, close) {
            if open >= close {
                errors.add("closeTime", "Closing time must be after opening time");
            }
        }
        if input.max_bookings == Some(0) {
            errors.add("maxBookings", "Max bookings must be at least 1");
        }
    }
    errors.finish()
}

pub fn validate_blackout(input: &BlackoutInput) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    if input.end_date < input.start_date {
        errors.add("endDate", "End date must not be before start date");
    }
    errors.finish()
}

pub fn validate_service_record(input: &ServiceRecordInput) -> DomainResult<()> {
    let mut errors = FieldErrors::new();
    errors.require("summary", &input.summary, "Summary");
    errors.finish()
}
