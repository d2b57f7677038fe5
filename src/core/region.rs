// LedSlot - core/region.rs
//
// The six Texas metro regions slots are grouped into, with their map
// centres and marker grouping.

use crate::core::model::Slot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Texas metro-area grouping used for filtering and map markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "DFW")]
    Dfw,
    Houston,
    Austin,
    #[serde(rename = "San Antonio")]
    SanAntonio,
    #[serde(rename = "El Paso")]
    ElPaso,
    #[serde(rename = "RGV")]
    Rgv,
}

/// Map centre for a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
    pub zoom: f64,
}

/// Initial map view covering the whole state.
pub const TEXAS_CENTER: MapCenter = MapCenter {
    lat: 31.0,
    lng: -100.0,
    zoom: 5.5,
};

impl Region {
    /// All regions in chip display order.
    pub fn all() -> &'static [Region] {
        &[
            Region::Dfw,
            Region::Houston,
            Region::Austin,
            Region::SanAntonio,
            Region::ElPaso,
            Region::Rgv,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Dfw => "DFW",
            Region::Houston => "Houston",
            Region::Austin => "Austin",
            Region::SanAntonio => "San Antonio",
            Region::ElPaso => "El Paso",
            Region::Rgv => "RGV",
        }
    }

    pub fn map_center(&self) -> MapCenter {
        let (lat, lng, zoom) = match self {
            Region::Dfw => (32.7767, -96.7970, 10.0),
            Region::Houston => (29.7604, -95.3698, 10.0),
            Region::Austin => (30.2672, -97.7431, 11.0),
            Region::SanAntonio => (29.4241, -98.4936, 10.0),
            Region::ElPaso => (31.7619, -106.4850, 11.0),
            Region::Rgv => (26.2034, -98.2300, 10.0),
        };
        MapCenter { lat, lng, zoom }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names none of the six regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl fmt::Display for UnknownRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown region '{}' (expected one of: DFW, Houston, Austin, San Antonio, El Paso, RGV)",
            self.0
        )
    }
}

impl std::error::Error for UnknownRegion {}

impl FromStr for Region {
    type Err = UnknownRegion;

    /// Case-insensitive; spaces, hyphens and underscores are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "dfw" | "dallas" => Ok(Region::Dfw),
            "houston" => Ok(Region::Houston),
            "austin" => Ok(Region::Austin),
            "sanantonio" => Ok(Region::SanAntonio),
            "elpaso" => Ok(Region::ElPaso),
            "rgv" => Ok(Region::Rgv),
            _ => Err(UnknownRegion(s.to_string())),
        }
    }
}

/// Slot count per region, in region display order.
///
/// Regions with no slots are omitted, matching the map which only draws a
/// marker where there is something to show.
pub fn region_counts<'a, I>(slots: I) -> Vec<(Region, usize)>
where
    I: IntoIterator<Item = &'a Slot>,
{
    let mut counts = [0usize; 6];
    for slot in slots {
        if let Some(pos) = Region::all().iter().position(|r| *r == slot.region) {
            counts[pos] += 1;
        }
    }
    Region::all()
        .iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .map(|(r, n)| (*r, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::SlotStatus;

    fn slot(id: &str, region: Region) -> Slot {
        Slot {
            id: id.to_string(),
            truck_name: format!("LED-{id}"),
            screen_size: "20x10 ft".to_string(),
            region,
            date: "Jan 15".to_string(),
            time_window: "6PM-10PM".to_string(),
            price: 1000,
            status: SlotStatus::Available,
            verified: true,
        }
    }

    #[test]
    fn test_parse_labels_and_slugs() {
        assert_eq!("DFW".parse::<Region>(), Ok(Region::Dfw));
        assert_eq!("san antonio".parse::<Region>(), Ok(Region::SanAntonio));
        assert_eq!("El_Paso".parse::<Region>(), Ok(Region::ElPaso));
        assert_eq!("rgv".parse::<Region>(), Ok(Region::Rgv));
        assert!("Lubbock".parse::<Region>().is_err());
    }

    #[test]
    fn test_label_round_trips_through_parse() {
        for region in Region::all() {
            assert_eq!(region.label().parse::<Region>(), Ok(*region));
        }
    }

    #[test]
    fn test_serde_uses_display_labels() {
        let json = serde_json::to_string(&Region::SanAntonio).unwrap();
        assert_eq!(json, "\"San Antonio\"");
    }

    #[test]
    fn test_region_counts_skip_empty_regions() {
        let slots = vec![
            slot("1", Region::Houston),
            slot("2", Region::Dfw),
            slot("3", Region::Houston),
        ];
        assert_eq!(
            region_counts(&slots),
            vec![(Region::Dfw, 1), (Region::Houston, 2)]
        );
    }
}
