// LedSlot - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LedSlot";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LedSlot";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Catalog limits
// =============================================================================

/// Maximum size of a user catalog file in bytes.
pub const MAX_CATALOG_FILE_SIZE: u64 = 256 * 1024; // 256 KB

/// Pseudo-path used in error messages for the embedded catalog.
pub const BUILTIN_CATALOG_PATH: &str = "<builtin>/marketplace.toml";

// =============================================================================
// Pricing
// =============================================================================

/// Hard upper bound on any price or offer amount (whole dollars).
pub const ABSOLUTE_MAX_PRICE: u32 = 1_000_000;

/// Quick-offer multipliers shown under the amount field, as percent of asking.
pub const QUICK_OFFER_PERCENTAGES: &[u32] = &[90, 95, 100];

/// Offer expiry choices in hours.
pub const OFFER_EXPIRY_CHOICES_HOURS: &[u32] = &[12, 24, 48];

/// Default offer expiry in hours.
pub const DEFAULT_OFFER_EXPIRY_HOURS: u32 = 24;

/// Display string used as the creation time of offers made in this session.
pub const JUST_NOW_LABEL: &str = "just now";

// =============================================================================
// Forms
// =============================================================================

/// Input format for slot dates.
pub const SLOT_DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Input format for slot start/end times.
pub const SLOT_TIME_INPUT_FORMAT: &str = "%H:%M";

/// Display format for slot dates on cards (e.g. "Jan 15").
pub const SLOT_DATE_DISPLAY_FORMAT: &str = "%b %-d";

/// Largest screen dimension accepted on the truck form, in feet.
pub const MAX_SCREEN_DIMENSION_FT: u32 = 60;

// =============================================================================
// Proof of service
// =============================================================================

/// Maximum photos attached to a proof of service.
pub const MAX_PROOF_PHOTOS: usize = 5;

/// Photos required before a proof of service can be submitted.
pub const MIN_PROOF_PHOTOS: usize = 2;

// =============================================================================
// Sign-in
// =============================================================================

/// Digits in a US phone number.
pub const PHONE_DIGITS: usize = 10;

/// Cells in the one-time verification code.
pub const OTP_LENGTH: usize = 6;

// =============================================================================
// Export
// =============================================================================

/// Column header for CSV slot export.
pub const SLOT_CSV_HEADER: &[&str] = &[
    "id",
    "truck",
    "region",
    "date",
    "time_window",
    "price",
    "status",
    "verified",
];

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// File names
// =============================================================================

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
