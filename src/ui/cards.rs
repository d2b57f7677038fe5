// LedSlot - ui/cards.rs
//
// Plain-text rendering of slot cards, offer lists, booking timelines and the
// driver schedule. Every function returns a String; the caller decides where
// it is printed.

use crate::core::booking::{Booking, DriverSchedule, TimelineMarker};
use crate::core::catalog::Catalog;
use crate::core::model::{Slot, SlotStatus};
use crate::core::offer::{quick_amounts, Offer, PriceComparison};
use crate::core::region::Region;

/// Whole dollars with thousands separators: 2500 -> "$2,500".
pub fn format_currency(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Upper-case status badge, e.g. "[BOOKED]".
pub fn status_badge(status: SlotStatus) -> String {
    format!("[{}]", status.label().to_uppercase())
}

/// One line per slot: truck, badge, region, date and window, price.
pub fn slot_table(slots: &[&Slot]) -> String {
    if slots.is_empty() {
        return "No slots match the current filters.\n".to_string();
    }
    let mut out = String::new();
    for slot in slots {
        out.push_str(&format!(
            "{:<4} {:<12} {:<11} {:<12} {:<7} {:<10} {:>8}{}\n",
            slot.id,
            slot.truck_name,
            status_badge(slot.status),
            slot.region.label(),
            slot.date,
            slot.time_window,
            format_currency(slot.price),
            if slot.verified { "  verified" } else { "" },
        ));
    }
    out.push_str(&format!("{} slot(s)\n", slots.len()));
    out
}

/// Regions with a marker count.
pub fn region_list(counts: &[(Region, usize)]) -> String {
    let mut out = String::new();
    for region in Region::all() {
        let count = counts
            .iter()
            .find(|(r, _)| r == region)
            .map_or(0, |(_, n)| *n);
        let centre = region.map_center();
        out.push_str(&format!(
            "{:<12} {:>3} slot(s)  ({:.4}, {:.4})\n",
            region.label(),
            count,
            centre.lat,
            centre.lng,
        ));
    }
    out
}

fn offer_line(offer: &Offer, catalog: &Catalog) -> String {
    let slot = catalog
        .slot(&offer.slot_id)
        .map_or_else(|| format!("slot {}", offer.slot_id), Slot::label);
    let mut line = format!(
        "#{:<3} {} {}  {}  {}  {}",
        offer.id,
        offer.direction.label(),
        offer.counterparty,
        format_currency(offer.amount),
        status_badge(offer.status.display_status()),
        slot,
    );
    line.push_str(&format!("  ({}", offer.created_at));
    if let Some(expiry) = offer.visible_expiry() {
        line.push_str(&format!(", expires {expiry}"));
    }
    line.push_str(")\n");
    if let Some(ref message) = offer.message {
        line.push_str(&format!("      \"{message}\"\n"));
    }
    line
}

/// Pending offers followed by history.
pub fn offer_list(pending: &[&Offer], history: &[&Offer], catalog: &Catalog) -> String {
    let mut out = format!("Pending ({})\n", pending.len());
    for offer in pending {
        out.push_str(&offer_line(offer, catalog));
    }
    out.push_str(&format!("\nHistory ({})\n", history.len()));
    for offer in history {
        out.push_str(&offer_line(offer, catalog));
    }
    out
}

/// Price comparison block for a slot, with suggested amounts.
pub fn quote(slot: &Slot, comparison: Option<&PriceComparison>) -> String {
    let mut out = format!(
        "{}\nAsking price: {}\n",
        slot.label(),
        format_currency(slot.price)
    );
    if let Some(cmp) = comparison {
        out.push_str(&format!(
            "Your offer:   {}\n{}\n",
            format_currency(cmp.amount),
            cmp.describe()
        ));
    }
    out.push_str("Quick amounts:");
    for (pct, amount) in quick_amounts(slot.price) {
        out.push_str(&format!("  {pct}% {}", format_currency(amount)));
    }
    out.push('\n');
    out
}

/// Booking detail with parties and status timeline.
pub fn booking_detail(booking: &Booking) -> String {
    let mut out = format!(
        "Booking #{} {}\n{} ({})\n{}, {}, {}\nAmount: {}\n",
        booking.id,
        status_badge(booking.status),
        booking.truck_name,
        booking.screen_size,
        booking.region.label(),
        booking.date,
        booking.time_window,
        format_currency(booking.amount),
    );
    for (role, name) in booking.parties() {
        out.push_str(&format!("{role:<9} {name}\n"));
    }
    if !booking.timeline.is_empty() {
        out.push_str("\nTimeline\n");
        for event in &booking.timeline {
            let marker = match event.marker() {
                TimelineMarker::Completed => "[x]",
                TimelineMarker::Active => "[>]",
                TimelineMarker::Upcoming => "[ ]",
            };
            out.push_str(&format!("{marker} {:<20} {}\n", event.label, event.timestamp));
        }
    }
    out
}

fn run_line(run: &Booking) -> String {
    format!(
        "#{:<3} {} {}, {} {}  payout {}\n",
        run.id,
        run.truck_name,
        run.region.label(),
        run.date,
        run.time_window,
        format_currency(run.amount),
    )
}

/// Driver dashboard: the active run, then upcoming ones.
pub fn driver_schedule(schedule: &DriverSchedule<'_>) -> String {
    let mut out = String::from("Active run\n");
    match schedule.active {
        Some(run) => out.push_str(&run_line(run)),
        None => out.push_str("  none\n"),
    }
    out.push_str(&format!("\nUpcoming ({})\n", schedule.upcoming.len()));
    for run in &schedule.upcoming {
        out.push_str(&run_line(run));
    }
    out
}
