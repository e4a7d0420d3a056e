//! Local state reconciliation after a successful mutation.
//!
//! Each function takes the state a widget currently shows plus what the
//! server answered and returns the next state. Nothing here talks to the
//! network.

use crate::entity::Entity;
use crate::id::{BookingId, CartItemId};
use crate::model::{Blackout, Booking, BookingStatus, Cart, ScheduleDay};
use crate::money::Cents;

/// Replace the element with the same id in place, or append it.
pub fn upsert<T: Entity>(mut list: Vec<T>, item: T) -> Vec<T> {
    let id = item.id();
    match list.iter().position(|existing| existing.id() == id) {
        Some(idx) => list[idx] = item,
        None => list.push(item),
    }
    list
}

/// Drop every element with `id`. Unknown ids leave the list unchanged.
pub fn remove<T: Entity>(mut list: Vec<T>, id: T::Id) -> Vec<T> {
    list.retain(|existing| existing.id() != id);
    list
}

/// Server returned the updated booking.
pub fn booking_updated(list: Vec<Booking>, updated: Booking) -> Vec<Booking> {
    upsert(list, updated)
}

/// Server accepted a status change without echoing the booking (204).
pub fn booking_status_applied(mut list: Vec<Booking>, id: BookingId, status: BookingStatus) -> Vec<Booking> {
    if let Some(booking) = list.iter_mut().find(|b| b.id == id) {
        booking.status = status;
    }
    list
}

/// Days stay ordered Sunday..Saturday.
pub fn schedule_day_saved(days: Vec<ScheduleDay>, saved: ScheduleDay) -> Vec<ScheduleDay> {
    let mut days = upsert(days, saved);
    days.sort_by_key(|d| d.weekday);
    days
}

/// Blackouts stay ordered by start date.
pub fn blackout_added(list: Vec<Blackout>, added: Blackout) -> Vec<Blackout> {
    let mut list = upsert(list, added);
    list.sort_by_key(|b| (b.start_date, b.end_date));
    list
}

/// Take the server's cart, keeping the known cart session if the response
/// omits it.
pub fn cart_replaced(current: Option<&Cart>, mut server: Cart) -> Cart {
    if server.session_id.is_none() {
        server.session_id = current.and_then(|c| c.session_id.clone());
    }
    server
}

/// Server deleted the line without returning a cart (204).
pub fn cart_item_removed(mut cart: Cart, item_id: CartItemId) -> Cart {
    cart.items.retain(|item| item.id != item_id);
    cart.subtotal_cents = subtotal(&cart);
    cart
}

/// Server accepted a quantity change without returning a cart (204).
/// Zero removes the line.
pub fn cart_quantity_changed(mut cart: Cart, item_id: CartItemId, quantity: u32) -> Cart {
    if quantity == 0 {
        return cart_item_removed(cart, item_id);
    }
    if let Some(item) = cart.items.iter_mut().find(|item| item.id == item_id) {
        item.quantity = quantity;
        item.line_total_cents = item.unit_price_cents * quantity;
    }
    cart.subtotal_cents = subtotal(&cart);
    cart
}

fn subtotal(cart: &Cart) -> Cents {
    cart.items.iter().map(|item| item.line_total_cents).sum()
}
