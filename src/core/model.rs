// LedSlot - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// presentation concerns. Offers and bookings live in their own modules
// because they carry behaviour; this file holds the plain records.

use crate::core::region::Region;
use serde::{Deserialize, Serialize};

// =============================================================================
// Slot
// =============================================================================

/// An advertisable time window on a specific LED truck.
///
/// Slots are immutable once loaded; the marketplace only filters them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,

    /// Truck identifier as painted on the vehicle (e.g. "LED-TX-001").
    pub truck_name: String,

    /// Screen dimensions for display (e.g. "20x10 ft").
    #[serde(default)]
    pub screen_size: String,

    pub region: Region,

    /// Display date (e.g. "Jan 15").
    pub date: String,

    /// Display time window (e.g. "6PM-10PM").
    pub time_window: String,

    /// Asking price in whole dollars.
    pub price: u32,

    pub status: SlotStatus,

    #[serde(default)]
    pub verified: bool,
}

impl Slot {
    /// Short description used wherever a slot is referenced from an offer.
    pub fn label(&self) -> String {
        format!("{} • {}, {}", self.truck_name, self.date, self.region)
    }
}

// =============================================================================
// Status
// =============================================================================

/// Lifecycle status shown on slot, booking, and timeline badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    #[default]
    Available,
    Offered,
    Booked,
    Running,
    Completed,
    Cancelled,
}

impl SlotStatus {
    /// Returns all variants in lifecycle order.
    pub fn all() -> &'static [SlotStatus] {
        &[
            SlotStatus::Available,
            SlotStatus::Offered,
            SlotStatus::Booked,
            SlotStatus::Running,
            SlotStatus::Completed,
            SlotStatus::Cancelled,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            SlotStatus::Available => "Available",
            SlotStatus::Offered => "Offered",
            SlotStatus::Booked => "Booked",
            SlotStatus::Running => "Running",
            SlotStatus::Completed => "Completed",
            SlotStatus::Cancelled => "Cancelled",
        }
    }

    /// Lowercase key as written in catalog files and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::Offered => "offered",
            SlotStatus::Booked => "booked",
            SlotStatus::Running => "running",
            SlotStatus::Completed => "completed",
            SlotStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the badge pulses (live states).
    pub fn is_live(&self) -> bool {
        matches!(self, SlotStatus::Available | SlotStatus::Running)
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Truck
// =============================================================================

/// An LED truck in an operator's fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plate_number: String,
    pub screen_size: String,
    #[serde(default)]
    pub resolution: String,
    pub home_region: Region,
    #[serde(default)]
    pub operating_regions: Vec<Region>,
    #[serde(default)]
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_label() {
        let slot = Slot {
            id: "1".to_string(),
            truck_name: "LED-TX-001".to_string(),
            screen_size: "20x10 ft".to_string(),
            region: Region::Dfw,
            date: "Jan 15".to_string(),
            time_window: "6PM-10PM".to_string(),
            price: 2500,
            status: SlotStatus::Available,
            verified: true,
        };
        assert_eq!(slot.label(), "LED-TX-001 • Jan 15, DFW");
    }

    #[test]
    fn test_status_deserialises_lowercase() {
        let status: SlotStatus = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(status, SlotStatus::Running);
        assert!(status.is_live());
        assert!(!SlotStatus::Booked.is_live());
    }
}
