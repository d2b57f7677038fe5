// LedSlot - core/filter.rs
//
// Composable filter engine for marketplace slots.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O or presentation dependencies.

use crate::core::model::Slot;
use crate::core::region::Region;
use crate::util::error::FilterError;
use regex::Regex;
use std::collections::HashSet;

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Regions to include (empty = all).
    pub regions: HashSet<Region>,

    /// Only include slots on verified trucks.
    pub verified_only: bool,

    /// Maximum asking price (inclusive). None = no upper bound.
    pub max_price: Option<u32>,

    /// Substring match against the truck name (case-insensitive). Empty = no filter.
    pub text_search: String,

    /// Compiled truck-name pattern. None = no pattern filter.
    pub regex_search: Option<Regex>,
}

impl PartialEq for FilterState {
    fn eq(&self, other: &Self) -> bool {
        self.regions == other.regions
            && self.verified_only == other.verified_only
            && self.max_price == other.max_price
            && self.text_search == other.text_search
            && self.regex_search.as_ref().map(Regex::as_str)
                == other.regex_search.as_ref().map(Regex::as_str)
    }
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
            && !self.verified_only
            && self.max_price.is_none()
            && self.text_search.is_empty()
            && self.regex_search.is_none()
    }

    /// Set the truck-name pattern, compiling it.
    /// Returns an error if the pattern is invalid; the previous pattern is kept.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Select a region chip if it is not selected, deselect it otherwise.
    pub fn toggle_region(&mut self, region: Region) {
        if !self.regions.remove(&region) {
            self.regions.insert(region);
        }
    }

    /// Set the maximum price from raw text input.
    ///
    /// Only the leading whole-number part counts, so `"2000.5"` caps at 2000.
    /// Empty, non-numeric or negative input clears the bound rather than
    /// failing.
    pub fn set_max_price_input(&mut self, input: &str) {
        self.max_price = leading_whole_number(input);
    }

    /// Number of filters set in the filter panel (verified-only and max price).
    ///
    /// Region chips and the search box are visible on their own and are not
    /// counted. The panel's minimum screen width and date range inputs never
    /// narrow the result, so they are not modelled and not counted either.
    pub fn active_filter_count(&self) -> usize {
        [self.verified_only, self.max_price.is_some()]
            .into_iter()
            .filter(|active| *active)
            .count()
    }

    /// Reset the filter panel. Region chips and search text are kept.
    pub fn clear_panel(&mut self) {
        self.verified_only = false;
        self.max_price = None;
    }

    /// Create a quick-filter for verified trucks only.
    pub fn verified() -> Self {
        Self {
            verified_only: true,
            ..Default::default()
        }
    }

    /// Create a quick-filter for a single region.
    pub fn in_region(region: Region) -> Self {
        let mut regions = HashSet::new();
        regions.insert(region);
        Self {
            regions,
            ..Default::default()
        }
    }
}

/// Digits at the start of `input` (after trimming and an optional `+`).
///
/// None when there are no leading digits, the value is negative, or it does
/// not fit in a u32.
fn leading_whole_number(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// Apply filters to a slice of slots, returning indices of matching slots.
///
/// Indices are ascending, so the result preserves the original order and
/// never repeats a slot.
pub fn apply_filters(slots: &[Slot], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..slots.len()).collect();
    }

    let text_lower = filter.text_search.to_lowercase();

    slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| matches_all(slot, filter, &text_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Convenience wrapper returning the matching slots themselves.
pub fn filter_slots<'a>(slots: &'a [Slot], filter: &FilterState) -> Vec<&'a Slot> {
    apply_filters(slots, filter)
        .into_iter()
        .map(|idx| &slots[idx])
        .collect()
}

/// Check if a single slot matches all active filters.
fn matches_all(slot: &Slot, filter: &FilterState, text_lower: &str) -> bool {
    if !filter.regions.is_empty() && !filter.regions.contains(&slot.region) {
        return false;
    }

    if filter.verified_only && !slot.verified {
        return false;
    }

    if let Some(max) = filter.max_price {
        if slot.price > max {
            return false;
        }
    }

    if !text_lower.is_empty() && !slot.truck_name.to_lowercase().contains(text_lower) {
        return false;
    }

    if let Some(ref regex) = filter.regex_search {
        if !regex.is_match(&slot.truck_name) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::SlotStatus;

    fn make_slot(id: &str, truck: &str, region: Region, price: u32, verified: bool) -> Slot {
        Slot {
            id: id.to_string(),
            truck_name: truck.to_string(),
            screen_size: "20x10 ft".to_string(),
            region,
            date: "Jan 15".to_string(),
            time_window: "6PM-10PM".to_string(),
            price,
            status: SlotStatus::Available,
            verified,
        }
    }

    fn sample() -> Vec<Slot> {
        vec![
            make_slot("1", "LED-TX-001", Region::Dfw, 2500, true),
            make_slot("2", "LED-TX-005", Region::Dfw, 1800, true),
            make_slot("3", "LED-HOU-002", Region::Houston, 1500, false),
            make_slot("4", "LED-AUS-001", Region::Austin, 2200, true),
            make_slot("5", "LED-SA-003", Region::SanAntonio, 1500, true),
            make_slot("6", "LED-ELP-001", Region::ElPaso, 1200, false),
        ]
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let slots = sample();
        let result = apply_filters(&slots, &FilterState::default());
        assert_eq!(result, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_region_filter_preserves_order() {
        let slots = sample();
        let result = filter_slots(&slots, &FilterState::in_region(Region::Dfw));
        let ids: Vec<_> = result.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_verified_only() {
        let slots = sample();
        let result = apply_filters(&slots, &FilterState::verified());
        assert_eq!(result, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_max_price_is_inclusive() {
        let slots = sample();
        let mut filter = FilterState::default();
        filter.set_max_price_input("1500");
        assert_eq!(apply_filters(&slots, &filter), vec![2, 4, 5]);
    }

    #[test]
    fn test_invalid_max_price_means_no_constraint() {
        let mut filter = FilterState::default();
        filter.set_max_price_input("2000");
        assert_eq!(filter.max_price, Some(2000));
        filter.set_max_price_input("lots");
        assert_eq!(filter.max_price, None);
        filter.set_max_price_input("");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_decimal_max_price_uses_whole_part() {
        let slots = sample();
        let mut filter = FilterState::default();
        filter.set_max_price_input("2000.5");
        assert_eq!(filter.max_price, Some(2000));
        assert_eq!(apply_filters(&slots, &filter), vec![1, 2, 4, 5]);

        filter.set_max_price_input(" +1500 ");
        assert_eq!(filter.max_price, Some(1500));
        filter.set_max_price_input("1800abc");
        assert_eq!(filter.max_price, Some(1800));
        filter.set_max_price_input("-5");
        assert_eq!(filter.max_price, None);
        filter.set_max_price_input(".5");
        assert_eq!(filter.max_price, None);
        filter.set_max_price_input("99999999999");
        assert_eq!(filter.max_price, None);
    }

    #[test]
    fn test_text_search_case_insensitive() {
        let slots = sample();
        let filter = FilterState {
            text_search: "led-tx".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&slots, &filter), vec![0, 1]);
    }

    #[test]
    fn test_regex_filter() {
        let slots = sample();
        let mut filter = FilterState::default();
        filter.set_regex(r"^LED-(HOU|ELP)-").unwrap();
        assert_eq!(apply_filters(&slots, &filter), vec![2, 5]);
        filter.set_regex("").unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_invalid_regex_keeps_previous() {
        let mut filter = FilterState::default();
        filter.set_regex("TX").unwrap();
        assert!(filter.set_regex("[invalid").is_err());
        assert_eq!(filter.regex_search.as_ref().map(|r| r.as_str()), Some("TX"));
    }

    #[test]
    fn test_combined_filters() {
        let slots = sample();
        let mut filter = FilterState::default();
        filter.toggle_region(Region::Dfw);
        filter.toggle_region(Region::Houston);
        filter.set_max_price_input("2000");
        assert_eq!(apply_filters(&slots, &filter), vec![1, 2]);
        filter.verified_only = true;
        assert_eq!(apply_filters(&slots, &filter), vec![1]);
    }

    #[test]
    fn test_toggle_region_twice_restores_result() {
        let slots = sample();
        let mut filter = FilterState::verified();
        let before = apply_filters(&slots, &filter);
        filter.toggle_region(Region::Austin);
        assert_eq!(apply_filters(&slots, &filter), vec![3]);
        filter.toggle_region(Region::Austin);
        assert_eq!(apply_filters(&slots, &filter), before);
        assert_eq!(filter, FilterState::verified());
    }

    #[test]
    fn test_every_combination_is_ordered_subset() {
        let slots = sample();
        let prices = [None, Some(0), Some(1500), Some(2200), Some(10_000)];
        let queries = ["", "led", "HOU", "nothing"];
        for mask in 0u32..(1 << Region::all().len()) {
            for verified_only in [false, true] {
                for max_price in prices {
                    for query in queries {
                        let filter = FilterState {
                            regions: Region::all()
                                .iter()
                                .enumerate()
                                .filter(|(i, _)| mask & (1 << i) != 0)
                                .map(|(_, r)| *r)
                                .collect(),
                            verified_only,
                            max_price,
                            text_search: query.to_string(),
                            regex_search: None,
                        };
                        let result = apply_filters(&slots, &filter);
                        assert!(result.windows(2).all(|w| w[0] < w[1]));
                        assert!(result.iter().all(|&i| i < slots.len()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_active_filter_count_and_clear() {
        let mut filter = FilterState::in_region(Region::Rgv);
        filter.text_search = "tx".to_string();
        assert_eq!(filter.active_filter_count(), 0);
        filter.verified_only = true;
        filter.set_max_price_input("900");
        assert_eq!(filter.active_filter_count(), 2);
        filter.clear_panel();
        assert_eq!(filter.active_filter_count(), 0);
        assert!(filter.regions.contains(&Region::Rgv));
        assert_eq!(filter.text_search, "tx");
    }
}
