//! View models: what each page renders, already formatted for display.

use std::collections::BTreeMap;

use serde::Serialize;

use detailing_core::format::{format_cents, format_duration, format_naive_date, format_time, format_utc};
use detailing_core::model::{
    AvailableSlot, Blackout, Booking, BookingStatus, Cart, CartItem, CustomerProfile,
    CustomerSummary, DepositQuote, DetailingService, ScheduleDay, ServiceRecord, User, Vehicle,
};
use detailing_core::query::CategoryGroup;
use detailing_core::{BookingId, CartItemId, Cents, CustomerId, ServiceId, VehicleId};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCard {
    pub id: ServiceId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_cents: Cents,
    pub price: String,
    pub duration: String,
    pub active: bool,
}

impl From<&DetailingService> for ServiceCard {
    fn from(s: &DetailingService) -> Self {
        Self {
            id: s.id,
            slug: s.slug.clone(),
            name: s.name.clone(),
            description: s.description.clone(),
            category: s.category.clone(),
            price_cents: s.price_cents,
            price: format_cents(s.price_cents.get()),
            duration: format_duration(s.duration_minutes),
            active: s.active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub category: String,
    pub services: Vec<ServiceCard>,
}

impl From<CategoryGroup<'_>> for CategoryView {
    fn from(group: CategoryGroup<'_>) -> Self {
        Self {
            category: group.category.to_string(),
            services: group.services.into_iter().map(ServiceCard::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueView {
    pub categories: Vec<CategoryView>,
    pub selected_category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: CartItemId,
    pub service_name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            service_name: item.service_name.clone(),
            quantity: item.quantity,
            unit_price: format_cents(item.unit_price_cents.get()),
            line_total: format_cents(item.line_total_cents.get()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub empty: bool,
    pub item_count: u32,
    pub items: Vec<CartLineView>,
    pub subtotal_cents: Cents,
    pub subtotal: String,
}

impl CartView {
    pub fn empty() -> Self {
        Self {
            empty: true,
            item_count: 0,
            items: Vec::new(),
            subtotal_cents: Cents::ZERO,
            subtotal: format_cents(0),
        }
    }

    pub fn of(cart: Option<&Cart>) -> Self {
        match cart {
            Some(cart) => Self {
                empty: cart.is_empty(),
                item_count: cart.item_count(),
                items: cart.items.iter().map(CartLineView::from).collect(),
                subtotal_cents: cart.subtotal_cents,
                subtotal: format_cents(cart.subtotal_cents.get()),
            },
            None => Self::empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthPageView {
    /// Where to go after signing in, already sanitized.
    pub redirect: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub start_time: String,
    pub end_time: String,
    pub label: String,
}

impl From<&AvailableSlot> for SlotView {
    fn from(slot: &AvailableSlot) -> Self {
        Self {
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            label: format!("{} – {}", format_time(&slot.start_time), format_time(&slot.end_time)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositView {
    pub total: String,
    pub deposit: String,
    pub balance: String,
}

impl From<DepositQuote> for DepositView {
    fn from(q: DepositQuote) -> Self {
        Self {
            total: format_cents(q.total_cents.get()),
            deposit: format_cents(q.deposit_cents.get()),
            balance: format_cents(q.balance_cents.get()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    pub id: VehicleId,
    pub name: String,
    pub size: &'static str,
    pub license_plate: Option<String>,
    pub color: Option<String>,
}

impl From<&Vehicle> for VehicleView {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.display_name(),
            size: v.size.label(),
            license_plate: v.license_plate.clone(),
            color: v.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub date: String,
    pub date_label: String,
    pub cart: CartView,
    pub slots: Vec<SlotView>,
    pub deposit: DepositView,
    pub vehicles: Vec<VehicleView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRow {
    pub id: BookingId,
    pub reference: String,
    pub status: BookingStatus,
    pub status_label: &'static str,
    pub date: String,
    pub time: String,
    pub customer_name: Option<String>,
    pub total: String,
}

impl From<&Booking> for BookingRow {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id,
            reference: b.reference.clone(),
            status: b.status,
            status_label: b.status.label(),
            date: format_naive_date(b.scheduled_date),
            time: format_time(&b.start_time),
            customer_name: b.customer_name.clone(),
            total: format_cents(b.total_cents.get()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingLineView {
    pub service_name: String,
    pub quantity: u32,
    pub price: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetailView {
    #[serde(flatten)]
    pub row: BookingRow,
    pub end_time: Option<String>,
    pub vehicle: Option<VehicleView>,
    pub items: Vec<BookingLineView>,
    pub deposit: String,
    pub balance: String,
    pub notes: Option<String>,
    pub booked_at: String,
}

impl From<&Booking> for BookingDetailView {
    fn from(b: &Booking) -> Self {
        Self {
            row: BookingRow::from(b),
            end_time: b.end_time.as_deref().map(format_time),
            vehicle: b.vehicle.as_ref().map(VehicleView::from),
            items: b
                .items
                .iter()
                .map(|item| BookingLineView {
                    service_name: item.service_name.clone(),
                    quantity: item.quantity,
                    price: format_cents(item.price_cents.get()),
                })
                .collect(),
            deposit: format_cents(b.deposit_cents.get()),
            balance: format_cents(b.balance_cents().get()),
            notes: b.notes.clone(),
            booked_at: format_utc(b.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub name: String,
    pub email: String,
    pub sysop: bool,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            name: u.full_name(),
            email: u.email.clone(),
            sysop: u.sysop,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub user: UserView,
    pub profile: CustomerProfile,
    pub bookings: Vec<BookingRow>,
    pub vehicles: Vec<VehicleView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingsView {
    pub bookings: Vec<BookingRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehiclesView {
    pub vehicles: Vec<VehicleView>,
}

/// Counts keyed by wire status name.
pub fn status_counts(counts: BTreeMap<BookingStatus, usize>) -> BTreeMap<&'static str, usize> {
    counts.into_iter().map(|(s, n)| (s.as_str(), n)).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user: UserView,
    pub counts: BTreeMap<&'static str, usize>,
    pub upcoming: Vec<BookingRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingTableFilter {
    pub status: Option<BookingStatus>,
    pub q: Option<String>,
    pub sort: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminBookingsView {
    pub filter: BookingTableFilter,
    pub counts: BTreeMap<&'static str, usize>,
    pub bookings: Vec<BookingRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordView {
    pub id: detailing_core::ServiceRecordId,
    pub booking_id: Option<BookingId>,
    pub customer_id: CustomerId,
    pub performed_on: String,
    pub summary: String,
    pub notes: Option<String>,
    pub technician: Option<String>,
}

impl From<&ServiceRecord> for ServiceRecordView {
    fn from(r: &ServiceRecord) -> Self {
        Self {
            id: r.id,
            booking_id: r.booking_id,
            customer_id: r.customer_id,
            performed_on: format_naive_date(r.performed_on),
            summary: r.summary.clone(),
            notes: r.notes.clone(),
            technician: r.technician.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBookingView {
    pub booking: BookingDetailView,
    pub service_records: Vec<ServiceRecordView>,
    /// Statuses the form offers; the backend decides which are legal.
    pub statuses: Vec<StatusOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusOption {
    pub value: BookingStatus,
    pub label: &'static str,
}

pub fn status_options() -> Vec<StatusOption> {
    BookingStatus::ALL
        .into_iter()
        .map(|value| StatusOption {
            value,
            label: value.label(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRow {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub booking_count: u32,
}

impl From<&CustomerSummary> for CustomerRow {
    fn from(c: &CustomerSummary) -> Self {
        Self {
            id: c.id,
            name: format!("{} {}", c.first_name, c.last_name).trim().to_string(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            booking_count: c.booking_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminCustomersView {
    pub q: Option<String>,
    pub customers: Vec<CustomerRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCustomerView {
    pub profile: CustomerProfile,
    pub bookings: Vec<BookingRow>,
    pub vehicles: Vec<VehicleView>,
    pub service_records: Vec<ServiceRecordView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminServicesView {
    pub services: Vec<ServiceCard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDayView {
    pub weekday: u8,
    pub name: &'static str,
    pub is_open: bool,
    pub hours: Option<String>,
    pub max_bookings: Option<u32>,
}

impl From<&ScheduleDay> for ScheduleDayView {
    fn from(d: &ScheduleDay) -> Self {
        let hours = match (d.is_open, d.open_time.as_deref(), d.close_time.as_deref()) {
            (true, Some(open), Some(close)) => Some(format!("{} – {}", format_time(open), format_time(close))),
            _ => None,
        };
        Self {
            weekday: d.weekday.number(),
            name: d.weekday.name(),
            is_open: d.is_open,
            hours,
            max_bookings: d.max_bookings,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlackoutView {
    pub id: detailing_core::BlackoutId,
    pub from: String,
    pub to: String,
    pub reason: Option<String>,
}

impl From<&Blackout> for BlackoutView {
    fn from(b: &Blackout) -> Self {
        Self {
            id: b.id,
            from: format_naive_date(b.start_date),
            to: format_naive_date(b.end_date),
            reason: b.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminScheduleView {
    pub days: Vec<ScheduleDayView>,
    pub blackouts: Vec<BlackoutView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminServiceRecordsView {
    pub records: Vec<ServiceRecordView>,
}
