// LedSlot - app/state.rs
//
// Marketplace session state: the loaded catalog, the current filter and its
// result, and the working copy of offers that negotiation actions mutate.
// Nothing here is persisted; state lives for one process.

use crate::core::booking::{Booking, DriverSchedule};
use crate::core::catalog::Catalog;
use crate::core::filter::{self, FilterState};
use crate::core::model::Slot;
use crate::core::offer::{self, Offer, OfferDraft};
use crate::core::region::{self, Region};
use crate::util::error::{LedSlotError, Result};

/// Top-level marketplace state.
#[derive(Debug)]
pub struct MarketState {
    /// Records loaded at startup. Offers are copied out into `offers`.
    pub catalog: Catalog,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Indices of slots matching the current filter (into `catalog.slots`).
    pub filtered_indices: Vec<usize>,

    /// Offers, in creation order. Counter offers are appended.
    pub offers: Vec<Offer>,
}

impl MarketState {
    pub fn new(catalog: Catalog) -> Self {
        let offers = catalog.offers.clone();
        let mut state = Self {
            catalog,
            filter_state: FilterState::default(),
            filtered_indices: Vec::new(),
            offers,
        };
        state.apply_filters();
        state
    }

    /// Recompute filtered indices from the catalog and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter::apply_filters(&self.catalog.slots, &self.filter_state);
        tracing::debug!(
            matched = self.filtered_indices.len(),
            total = self.catalog.slots.len(),
            "Filters applied"
        );
    }

    /// Replace the whole filter and recompute.
    pub fn set_filter(&mut self, filter_state: FilterState) {
        self.filter_state = filter_state;
        self.apply_filters();
    }

    pub fn toggle_region(&mut self, region: Region) {
        self.filter_state.toggle_region(region);
        self.apply_filters();
    }

    /// Slots matching the current filter, in catalog order.
    pub fn filtered_slots(&self) -> Vec<&Slot> {
        self.filtered_indices
            .iter()
            .filter_map(|&i| self.catalog.slots.get(i))
            .collect()
    }

    /// Map marker counts for the current result.
    pub fn region_counts(&self) -> Vec<(Region, usize)> {
        region::region_counts(self.filtered_slots())
    }

    pub fn slot(&self, id: &str) -> Result<&Slot> {
        self.catalog.slot(id).ok_or_else(|| not_found("slot", id))
    }

    pub fn booking(&self, id: &str) -> Result<&Booking> {
        self.catalog.booking(id).ok_or_else(|| not_found("booking", id))
    }

    pub fn driver_schedule(&self) -> DriverSchedule<'_> {
        DriverSchedule::from_runs(&self.catalog.runs)
    }

    // -------------------------------------------------------------------------
    // Offers
    // -------------------------------------------------------------------------

    pub fn offer(&self, id: &str) -> Result<&Offer> {
        self.offers
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found("offer", id))
    }

    fn offer_mut(&mut self, id: &str) -> Result<&mut Offer> {
        self.offers
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found("offer", id))
    }

    /// (pending, history), each in creation order.
    pub fn partitioned_offers(&self) -> (Vec<&Offer>, Vec<&Offer>) {
        offer::partition_offers(&self.offers)
    }

    pub fn accept_offer(&mut self, id: &str) -> Result<&Offer> {
        let offer = self.offer_mut(id)?;
        offer.accept()?;
        tracing::info!(offer_id = %id, amount = offer.amount, "Offer accepted");
        Ok(&*offer)
    }

    pub fn reject_offer(&mut self, id: &str) -> Result<&Offer> {
        let offer = self.offer_mut(id)?;
        offer.reject()?;
        tracing::info!(offer_id = %id, "Offer rejected");
        Ok(&*offer)
    }

    /// Counter a pending offer. Returns the new pending offer.
    pub fn counter_offer(&mut self, id: &str, amount: u32) -> Result<&Offer> {
        let new_id = self.next_offer_id();
        let counter = self.offer_mut(id)?.counter(amount, new_id)?;
        tracing::info!(
            offer_id = %id,
            counter_id = %counter.id,
            amount,
            "Offer countered"
        );
        Ok(self.push_offer(counter))
    }

    /// Send a new offer on a slot from a composed draft.
    pub fn send_offer(&mut self, slot_id: &str, draft: &OfferDraft, operator: &str) -> Result<&Offer> {
        let new_id = self.next_offer_id();
        let offer = draft.submit(new_id, self.slot(slot_id)?, operator)?;
        tracing::info!(
            offer_id = %offer.id,
            slot_id = %slot_id,
            amount = offer.amount,
            "Offer sent"
        );
        Ok(self.push_offer(offer))
    }

    fn push_offer(&mut self, offer: Offer) -> &Offer {
        self.offers.push(offer);
        &self.offers[self.offers.len() - 1]
    }

    /// One past the largest numeric offer ID.
    fn next_offer_id(&self) -> String {
        let max = self
            .offers
            .iter()
            .filter_map(|o| o.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

fn not_found(kind: &'static str, id: &str) -> LedSlotError {
    LedSlotError::NotFound {
        kind,
        id: id.to_string(),
    }
}
