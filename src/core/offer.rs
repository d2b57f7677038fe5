// LedSlot - core/offer.rs
//
// Offers and the negotiation lifecycle:
//
//   pending -> accepted    (terminal)
//   pending -> rejected    (terminal)
//   pending -> countered   (superseded by a new pending offer)
//
// Transitions are local and immediate. Expiry text is display-only and is
// never checked against the clock.

use crate::core::model::{Slot, SlotStatus};
use crate::util::constants;
use crate::util::error::{FormError, NegotiationError};
use serde::{Deserialize, Serialize};

// =============================================================================
// Status and direction
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Countered,
}

impl OfferStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Countered => "countered",
        }
    }

    /// Badge status used when the offer is shown next to slots and bookings.
    pub fn display_status(&self) -> SlotStatus {
        match self {
            OfferStatus::Pending | OfferStatus::Countered => SlotStatus::Offered,
            OfferStatus::Accepted => SlotStatus::Booked,
            OfferStatus::Rejected => SlotStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the viewer sent the offer or received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Sent => Direction::Received,
            Direction::Received => Direction::Sent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Sent => "Sent to",
            Direction::Received => "Received from",
        }
    }
}

// =============================================================================
// Offer
// =============================================================================

/// A proposed price against a slot's asking price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub slot_id: String,
    pub counterparty: String,
    pub amount: u32,
    #[serde(default)]
    pub status: OfferStatus,
    pub direction: Direction,
    /// Display string (e.g. "2h ago").
    pub created_at: String,
    /// Display string (e.g. "in 22h"). Cosmetic only.
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Offer {
    pub fn is_pending(&self) -> bool {
        self.status == OfferStatus::Pending
    }

    /// Expiry text to show; only pending offers display one.
    pub fn visible_expiry(&self) -> Option<&str> {
        if self.is_pending() {
            self.expires_at.as_deref()
        } else {
            None
        }
    }

    pub fn accept(&mut self) -> Result<(), NegotiationError> {
        self.transition(OfferStatus::Accepted)
    }

    pub fn reject(&mut self) -> Result<(), NegotiationError> {
        self.transition(OfferStatus::Rejected)
    }

    /// Answer with a different amount.
    ///
    /// This offer becomes `countered`; the returned offer is the new pending
    /// proposal, flowing the other way between the same parties.
    pub fn counter(&mut self, amount: u32, new_id: String) -> Result<Offer, NegotiationError> {
        if amount == 0 || amount > constants::ABSOLUTE_MAX_PRICE {
            return Err(NegotiationError::InvalidAmount {
                amount,
                max: constants::ABSOLUTE_MAX_PRICE,
            });
        }
        self.transition(OfferStatus::Countered)?;
        Ok(Offer {
            id: new_id,
            slot_id: self.slot_id.clone(),
            counterparty: self.counterparty.clone(),
            amount,
            status: OfferStatus::Pending,
            direction: self.direction.reversed(),
            created_at: constants::JUST_NOW_LABEL.to_string(),
            expires_at: Some(ExpiryWindow::default().label()),
            message: None,
        })
    }

    fn transition(&mut self, to: OfferStatus) -> Result<(), NegotiationError> {
        if !self.is_pending() {
            return Err(NegotiationError::NotPending {
                offer_id: self.id.clone(),
                status: self.status.label().to_string(),
            });
        }
        tracing::debug!(offer_id = %self.id, from = %self.status, to = %to, "Offer transition");
        self.status = to;
        Ok(())
    }
}

/// Split offers into (pending, history), each in original order.
pub fn partition_offers(offers: &[Offer]) -> (Vec<&Offer>, Vec<&Offer>) {
    offers.iter().partition(|o| o.is_pending())
}

// =============================================================================
// Pricing
// =============================================================================

/// An amount measured against an asking price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceComparison {
    pub asking: u32,
    pub amount: u32,
    /// `asking - amount`: positive below asking, negative above.
    pub difference: i64,
    /// Difference as a whole percentage of asking. 0 when amount is 0.
    pub percent: i64,
}

impl PriceComparison {
    pub fn new(asking: u32, amount: u32) -> Self {
        let difference = i64::from(asking) - i64::from(amount);
        let percent = if amount > 0 && asking > 0 {
            rounded_percent(difference, i64::from(asking))
        } else {
            0
        };
        Self {
            asking,
            amount,
            difference,
            percent,
        }
    }

    /// One-line summary as shown under the amount field.
    pub fn describe(&self) -> String {
        match self.difference {
            d if d > 0 => format!("${d} below asking ({}% discount)", self.percent),
            d if d < 0 => format!("${} above asking", d.unsigned_abs()),
            _ => "At asking price".to_string(),
        }
    }
}

/// `num / den * 100`, rounded half away from zero.
fn rounded_percent(num: i64, den: i64) -> i64 {
    let scaled = num * 100;
    let half = den / 2;
    if scaled >= 0 {
        (scaled + half) / den
    } else {
        (scaled - half) / den
    }
}

/// Suggested amounts at fixed fractions of the asking price.
///
/// Returns `(percent_of_asking, amount)` pairs.
pub fn quick_amounts(asking: u32) -> Vec<(u32, u32)> {
    constants::QUICK_OFFER_PERCENTAGES
        .iter()
        .map(|&pct| {
            let amount = (u64::from(asking) * u64::from(pct) + 50) / 100;
            (pct, amount as u32)
        })
        .collect()
}

// =============================================================================
// Offer draft
// =============================================================================

/// How long a new offer stays open. Cosmetic: shown, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryWindow(u32);

impl ExpiryWindow {
    /// Pick one of the offered choices; anything else is `None`.
    pub fn hours(hours: u32) -> Option<Self> {
        constants::OFFER_EXPIRY_CHOICES_HOURS
            .contains(&hours)
            .then_some(Self(hours))
    }

    pub fn as_hours(&self) -> u32 {
        self.0
    }

    pub fn label(&self) -> String {
        format!("in {}h", self.0)
    }
}

impl Default for ExpiryWindow {
    fn default() -> Self {
        Self(constants::DEFAULT_OFFER_EXPIRY_HOURS)
    }
}

/// Form state of a broker composing an offer.
#[derive(Debug, Clone, Default)]
pub struct OfferDraft {
    pub amount_input: String,
    pub message: String,
    pub expires_in: ExpiryWindow,
}

impl OfferDraft {
    /// Parsed amount, or 0 when the field is empty or not a number.
    pub fn amount(&self) -> u32 {
        self.amount_input.trim().parse().unwrap_or(0)
    }

    /// The send button is disabled until something is typed.
    pub fn can_submit(&self) -> bool {
        !self.amount_input.trim().is_empty()
    }

    pub fn comparison(&self, slot: &Slot) -> PriceComparison {
        PriceComparison::new(slot.price, self.amount())
    }

    /// Turn the draft into a pending offer sent to the slot's operator.
    pub fn submit(&self, id: String, slot: &Slot, operator: &str) -> Result<Offer, FormError> {
        let raw = self.amount_input.trim();
        if raw.is_empty() {
            return Err(FormError::MissingField { field: "amount" });
        }
        let amount: u32 = match raw.parse() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(FormError::InvalidNumber {
                    field: "amount",
                    value: raw.to_string(),
                })
            }
        };
        if amount > constants::ABSOLUTE_MAX_PRICE {
            return Err(FormError::OutOfRange {
                field: "amount",
                value: amount,
                max: constants::ABSOLUTE_MAX_PRICE,
            });
        }
        let message = self.message.trim();
        Ok(Offer {
            id,
            slot_id: slot.id.clone(),
            counterparty: operator.to_string(),
            amount,
            status: OfferStatus::Pending,
            direction: Direction::Sent,
            created_at: constants::JUST_NOW_LABEL.to_string(),
            expires_at: Some(self.expires_in.label()),
            message: (!message.is_empty()).then(|| message.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::Region;

    fn pending(id: &str) -> Offer {
        Offer {
            id: id.to_string(),
            slot_id: "1".to_string(),
            counterparty: "MediaMax Agency".to_string(),
            amount: 2400,
            status: OfferStatus::Pending,
            direction: Direction::Received,
            created_at: "2h ago".to_string(),
            expires_at: Some("in 22h".to_string()),
            message: None,
        }
    }

    fn slot() -> Slot {
        Slot {
            id: "1".to_string(),
            truck_name: "LED-TX-001".to_string(),
            screen_size: "20x10 ft".to_string(),
            region: Region::Dfw,
            date: "Jan 15".to_string(),
            time_window: "6PM-10PM".to_string(),
            price: 2500,
            status: SlotStatus::Available,
            verified: true,
        }
    }

    #[test]
    fn test_accept_is_terminal() {
        let mut offer = pending("1");
        offer.accept().unwrap();
        assert_eq!(offer.status, OfferStatus::Accepted);
        assert!(offer.reject().is_err());
        assert!(offer.accept().is_err());
        assert!(offer.counter(2000, "9".to_string()).is_err());
        assert_eq!(offer.status, OfferStatus::Accepted);
    }

    #[test]
    fn test_reject_is_terminal() {
        let mut offer = pending("1");
        offer.reject().unwrap();
        let err = offer.accept().unwrap_err();
        assert_eq!(
            err,
            NegotiationError::NotPending {
                offer_id: "1".to_string(),
                status: "rejected".to_string()
            }
        );
        assert_eq!(offer.status, OfferStatus::Rejected);
    }

    #[test]
    fn test_counter_produces_new_pending_offer() {
        let mut offer = pending("1");
        let counter = offer.counter(2450, "5".to_string()).unwrap();
        assert_eq!(offer.status, OfferStatus::Countered);
        assert_eq!(counter.status, OfferStatus::Pending);
        assert_eq!(counter.amount, 2450);
        assert_eq!(counter.slot_id, offer.slot_id);
        assert_eq!(counter.direction, Direction::Sent);
        assert_eq!(counter.expires_at.as_deref(), Some("in 24h"));
        assert!(offer.counter(2400, "6".to_string()).is_err());
    }

    #[test]
    fn test_counter_rejects_zero_and_keeps_pending() {
        let mut offer = pending("1");
        assert!(matches!(
            offer.counter(0, "5".to_string()),
            Err(NegotiationError::InvalidAmount { .. })
        ));
        assert!(offer.is_pending());
    }

    #[test]
    fn test_display_status_mapping() {
        assert_eq!(OfferStatus::Pending.display_status(), SlotStatus::Offered);
        assert_eq!(OfferStatus::Countered.display_status(), SlotStatus::Offered);
        assert_eq!(OfferStatus::Accepted.display_status(), SlotStatus::Booked);
        assert_eq!(OfferStatus::Rejected.display_status(), SlotStatus::Cancelled);
    }

    #[test]
    fn test_partition_keeps_order() {
        let mut offers = vec![pending("1"), pending("2"), pending("3"), pending("4")];
        offers[0].accept().unwrap();
        offers[2].reject().unwrap();
        let (open, history) = partition_offers(&offers);
        let open: Vec<_> = open.iter().map(|o| o.id.as_str()).collect();
        let history: Vec<_> = history.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(open, vec!["2", "4"]);
        assert_eq!(history, vec!["1", "3"]);
        assert_eq!(offers[0].visible_expiry(), None);
        assert_eq!(offers[1].visible_expiry(), Some("in 22h"));
    }

    #[test]
    fn test_price_comparison() {
        let below = PriceComparison::new(2500, 2400);
        assert_eq!(below.difference, 100);
        assert_eq!(below.percent, 4);
        assert_eq!(below.describe(), "$100 below asking (4% discount)");

        let above = PriceComparison::new(2500, 2600);
        assert_eq!(above.difference, -100);
        assert_eq!(above.describe(), "$100 above asking");

        assert_eq!(PriceComparison::new(2500, 2500).describe(), "At asking price");
        assert_eq!(PriceComparison::new(2500, 0).percent, 0);
        // 130 / 2000 = 6.5% rounds up
        assert_eq!(PriceComparison::new(2000, 1870).percent, 7);
    }

    #[test]
    fn test_quick_amounts() {
        assert_eq!(
            quick_amounts(2500),
            vec![(90, 2250), (95, 2375), (100, 2500)]
        );
        assert_eq!(quick_amounts(1999)[1], (95, 1899));
    }

    #[test]
    fn test_draft_submit() {
        let mut draft = OfferDraft::default();
        assert!(!draft.can_submit());
        assert_eq!(
            draft.submit("7".to_string(), &slot(), "Texas Fleet Co.").unwrap_err(),
            FormError::MissingField { field: "amount" }
        );

        draft.amount_input = "abc".to_string();
        assert!(draft.can_submit());
        assert_eq!(draft.amount(), 0);
        assert!(draft.submit("7".to_string(), &slot(), "Texas Fleet Co.").is_err());

        draft.amount_input = "2375".to_string();
        draft.expires_in = ExpiryWindow::hours(48).unwrap();
        draft.message = "  ".to_string();
        let offer = draft.submit("7".to_string(), &slot(), "Texas Fleet Co.").unwrap();
        assert_eq!(offer.amount, 2375);
        assert_eq!(offer.direction, Direction::Sent);
        assert_eq!(offer.expires_at.as_deref(), Some("in 48h"));
        assert_eq!(offer.message, None);
        assert_eq!(draft.comparison(&slot()).percent, 5);
    }

    #[test]
    fn test_expiry_choices() {
        assert!(ExpiryWindow::hours(12).is_some());
        assert!(ExpiryWindow::hours(36).is_none());
        assert_eq!(ExpiryWindow::default().as_hours(), 24);
    }
}
