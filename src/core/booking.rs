// LedSlot - core/booking.rs
//
// Confirmed bookings and their status timelines. Bookings are read-only:
// the timeline is recorded data, not derived from any transition logic.

use crate::core::model::SlotStatus;
use crate::core::region::Region;
use serde::{Deserialize, Serialize};

/// A confirmed agreement between operator and broker for a slot.
///
/// Driver runs are bookings seen from the driver's side; for those the
/// `amount` is the driver payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub truck_name: String,
    #[serde(default)]
    pub screen_size: String,
    pub region: Region,
    pub date: String,
    #[serde(default)]
    pub time_window: String,
    pub status: SlotStatus,
    pub amount: u32,
    #[serde(default)]
    pub operator_name: Option<String>,
    #[serde(default)]
    pub broker_name: Option<String>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl Booking {
    /// Named parties in display order.
    pub fn parties(&self) -> Vec<(&'static str, &str)> {
        [
            ("Operator", self.operator_name.as_deref()),
            ("Broker", self.broker_name.as_deref()),
            ("Driver", self.driver_name.as_deref()),
        ]
        .into_iter()
        .filter_map(|(role, name)| name.map(|n| (role, n)))
        .collect()
    }
}

/// One step of a booking's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub status: SlotStatus,
    pub label: String,
    /// Display string (e.g. "Jan 10, 2:30 PM", "Scheduled").
    pub timestamp: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub active: bool,
}

/// How a timeline dot is drawn. Completed wins over active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineMarker {
    Completed,
    Active,
    Upcoming,
}

impl TimelineEvent {
    pub fn marker(&self) -> TimelineMarker {
        if self.completed {
            TimelineMarker::Completed
        } else if self.active {
            TimelineMarker::Active
        } else {
            TimelineMarker::Upcoming
        }
    }
}

/// Driver dashboard view over a list of runs.
#[derive(Debug)]
pub struct DriverSchedule<'a> {
    /// The first run currently in progress.
    pub active: Option<&'a Booking>,
    /// Booked runs not yet started, in original order.
    pub upcoming: Vec<&'a Booking>,
}

impl<'a> DriverSchedule<'a> {
    pub fn from_runs(runs: &'a [Booking]) -> Self {
        Self {
            active: runs.iter().find(|r| r.status == SlotStatus::Running),
            upcoming: runs
                .iter()
                .filter(|r| r.status == SlotStatus::Booked)
                .collect(),
        }
    }
}
