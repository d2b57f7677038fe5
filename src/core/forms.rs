// LedSlot - core/forms.rs
//
// Operator-side form drafts: publishing a slot and registering a truck.
// Drafts hold raw text exactly as typed; `validate` turns them into records.

use crate::core::model::{Slot, SlotStatus, Truck};
use crate::core::region::Region;
use crate::util::constants;
use crate::util::error::FormError;
use chrono::{NaiveDate, NaiveTime, Timelike};

// =============================================================================
// Slot draft
// =============================================================================

/// Form state for adding or editing an availability slot.
#[derive(Debug, Clone, Default)]
pub struct SlotDraft {
    pub truck_id: String,
    pub region: Option<Region>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24-hour
    pub start_time: String,
    /// `HH:MM`, 24-hour
    pub end_time: String,
    pub price: String,
    pub notes: String,
}

impl SlotDraft {
    /// Validate against the operator's fleet and build an available slot.
    pub fn validate(&self, id: String, fleet: &[Truck]) -> Result<Slot, FormError> {
        let truck_id = required("truck", &self.truck_id)?;
        let truck = fleet
            .iter()
            .find(|t| t.id == truck_id)
            .ok_or_else(|| FormError::UnknownTruck {
                truck_id: truck_id.to_string(),
            })?;
        let region = self.region.ok_or(FormError::MissingField { field: "region" })?;

        let date = parse_date("date", &self.date)?;
        let start = parse_time("start_time", &self.start_time)?;
        let end = parse_time("end_time", &self.end_time)?;
        if end <= start {
            return Err(FormError::EmptyTimeWindow {
                start: self.start_time.trim().to_string(),
                end: self.end_time.trim().to_string(),
            });
        }

        let price = parse_positive("price", &self.price, constants::ABSOLUTE_MAX_PRICE)?;

        Ok(Slot {
            id,
            truck_name: truck.name.clone(),
            screen_size: truck.screen_size.clone(),
            region,
            date: date.format(constants::SLOT_DATE_DISPLAY_FORMAT).to_string(),
            time_window: format!("{}-{}", short_time(start), short_time(end)),
            price,
            status: SlotStatus::Available,
            verified: truck.verified,
        })
    }
}

/// "18:00" -> "6PM", "18:30" -> "6:30PM".
fn short_time(t: NaiveTime) -> String {
    if t.minute() == 0 {
        t.format("%-I%p").to_string()
    } else {
        t.format("%-I:%M%p").to_string()
    }
}

// =============================================================================
// Truck draft
// =============================================================================

/// Form state for adding or editing a truck.
#[derive(Debug, Clone, Default)]
pub struct TruckDraft {
    pub name: String,
    plate_number: String,
    pub screen_width: String,
    pub screen_height: String,
    pub resolution: String,
    pub home_region: Option<Region>,
    operating_regions: Vec<Region>,
}

impl TruckDraft {
    /// Plates are always stored upper-case.
    pub fn set_plate_number(&mut self, input: &str) {
        self.plate_number = input.to_uppercase();
    }

    pub fn plate_number(&self) -> &str {
        &self.plate_number
    }

    /// Add the region if absent, remove it if present. Order of first
    /// selection is kept.
    pub fn toggle_operating_region(&mut self, region: Region) {
        if let Some(pos) = self.operating_regions.iter().position(|r| *r == region) {
            self.operating_regions.remove(pos);
        } else {
            self.operating_regions.push(region);
        }
    }

    pub fn operating_regions(&self) -> &[Region] {
        &self.operating_regions
    }

    /// Build a truck. With no operating regions chosen, the truck operates in
    /// its home region only. New trucks start unverified.
    pub fn validate(&self, id: String) -> Result<Truck, FormError> {
        let name = required("name", &self.name)?;
        let plate = required("plate_number", &self.plate_number)?;
        let width = parse_positive(
            "screen_width",
            &self.screen_width,
            constants::MAX_SCREEN_DIMENSION_FT,
        )?;
        let height = parse_positive(
            "screen_height",
            &self.screen_height,
            constants::MAX_SCREEN_DIMENSION_FT,
        )?;
        let home_region = self
            .home_region
            .ok_or(FormError::MissingField { field: "home_region" })?;

        let operating_regions = if self.operating_regions.is_empty() {
            vec![home_region]
        } else {
            self.operating_regions.clone()
        };

        Ok(Truck {
            id,
            name: name.to_string(),
            plate_number: plate.to_string(),
            screen_size: format!("{width}x{height} ft"),
            resolution: self.resolution.trim().to_string(),
            home_region,
            operating_regions,
            verified: false,
        })
    }
}

// =============================================================================
// Field helpers
// =============================================================================

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField { field })
    } else {
        Ok(trimmed)
    }
}

fn parse_positive(field: &'static str, value: &str, max: u32) -> Result<u32, FormError> {
    let raw = required(field, value)?;
    let n: u32 = raw.parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    if n == 0 || n > max {
        return Err(FormError::OutOfRange {
            field,
            value: n,
            max,
        });
    }
    Ok(n)
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    let raw = required(field, value)?;
    NaiveDate::parse_from_str(raw, constants::SLOT_DATE_INPUT_FORMAT).map_err(|_| {
        FormError::InvalidDateTime {
            field,
            value: raw.to_string(),
            format: constants::SLOT_DATE_INPUT_FORMAT,
        }
    })
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, FormError> {
    let raw = required(field, value)?;
    NaiveTime::parse_from_str(raw, constants::SLOT_TIME_INPUT_FORMAT).map_err(|_| {
        FormError::InvalidDateTime {
            field,
            value: raw.to_string(),
            format: constants::SLOT_TIME_INPUT_FORMAT,
        }
    })
}
