//! List filtering and sorting for admin tables and the catalogue.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model::{Booking, BookingStatus, CustomerSummary, DetailingService};

/// Column and direction for the admin bookings table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSort {
    /// Soonest appointment first.
    #[default]
    DateAsc,
    DateDesc,
    TotalDesc,
    Status,
}

impl core::str::FromStr for BookingSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "date" => Ok(BookingSort::DateAsc),
            "-date" => Ok(BookingSort::DateDesc),
            "total" | "-total" => Ok(BookingSort::TotalDesc),
            "status" => Ok(BookingSort::Status),
            other => Err(DomainError::invalid_value(format!("unknown sort '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    /// Case-insensitive match on reference or customer name.
    pub search: Option<String>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(status) = self.status {
            if booking.status != status {
                return false;
            }
        }
        match normalized(self.search.as_deref()) {
            None => true,
            Some(needle) => {
                contains_ci(&booking.reference, &needle)
                    || booking
                        .customer_name
                        .as_deref()
                        .is_some_and(|name| contains_ci(name, &needle))
            }
        }
    }
}

/// Filter then sort. The input order is kept for ties.
pub fn filter_bookings(bookings: Vec<Booking>, filter: &BookingFilter, sort: BookingSort) -> Vec<Booking> {
    let mut out: Vec<Booking> = bookings.into_iter().filter(|b| filter.matches(b)).collect();
    sort_bookings(&mut out, sort);
    out
}

pub fn sort_bookings(bookings: &mut [Booking], sort: BookingSort) {
    match sort {
        BookingSort::DateAsc => bookings.sort_by(|a, b| {
            (a.scheduled_date, a.start_time.as_str()).cmp(&(b.scheduled_date, b.start_time.as_str()))
        }),
        BookingSort::DateDesc => bookings.sort_by(|a, b| {
            (b.scheduled_date, b.start_time.as_str()).cmp(&(a.scheduled_date, a.start_time.as_str()))
        }),
        BookingSort::TotalDesc => bookings.sort_by(|a, b| b.total_cents.cmp(&a.total_cents)),
        BookingSort::Status => bookings.sort_by_key(|b| b.status),
    }
}

/// Count bookings per status; every status is present, possibly zero.
pub fn count_by_status(bookings: &[Booking]) -> BTreeMap<BookingStatus, usize> {
    let mut counts: BTreeMap<BookingStatus, usize> =
        BookingStatus::ALL.into_iter().map(|s| (s, 0)).collect();
    for booking in bookings {
        *counts.entry(booking.status).or_default() += 1;
    }
    counts
}

/// Case-insensitive search over name, email and phone.
pub fn search_customers(customers: Vec<CustomerSummary>, query: Option<&str>) -> Vec<CustomerSummary> {
    let Some(needle) = normalized(query) else {
        return customers;
    };
    customers
        .into_iter()
        .filter(|c| {
            let full_name = format!("{} {}", c.first_name, c.last_name);
            contains_ci(&full_name, &needle)
                || contains_ci(&c.email, &needle)
                || c.phone.as_deref().is_some_and(|p| contains_ci(p, &needle))
        })
        .collect()
}

/// A catalogue section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub services: Vec<&'a DetailingService>,
}

/// Active services grouped by category (alphabetical), each group ordered by
/// display order then name. `only` keeps a single category.
pub fn group_catalogue<'a>(services: &'a [DetailingService], only: Option<&str>) -> Vec<CategoryGroup<'a>> {
    let only = normalized(only);
    let mut groups: BTreeMap<&'a str, Vec<&'a DetailingService>> = BTreeMap::new();
    for service in services.iter().filter(|s| s.active) {
        if let Some(only) = only.as_deref() {
            if !service.category.eq_ignore_ascii_case(only) {
                continue;
            }
        }
        groups.entry(service.category.as_str()).or_default().push(service);
    }
    groups
        .into_iter()
        .map(|(category, mut services)| {
            services.sort_by(|a, b| {
                a.display_order
                    .cmp(&b.display_order)
                    .then_with(|| a.name.cmp(&b.name))
            });
            CategoryGroup { category, services }
        })
        .collect()
}

fn normalized(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
