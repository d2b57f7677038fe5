// LedSlot - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LedSlot operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LedSlotError {
    /// Catalog loading or validation failed.
    Catalog(CatalogError),

    /// Filter operation failed.
    Filter(FilterError),

    /// An offer transition was refused.
    Negotiation(NegotiationError),

    /// Form input could not be turned into a record.
    Form(FormError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// A record looked up by ID does not exist.
    NotFound { kind: &'static str, id: String },
}

impl fmt::Display for LedSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "Catalog error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Negotiation(e) => write!(f, "Offer error: {e}"),
            Self::Form(e) => write!(f, "Invalid input: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::NotFound { kind, id } => write!(f, "No {kind} with ID '{id}'"),
        }
    }
}

impl std::error::Error for LedSlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Negotiation(e) => Some(e),
            Self::Form(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::NotFound { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors related to loading and validating a marketplace catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalog file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is empty.
    MissingField {
        table: &'static str,
        id: String,
        field: &'static str,
    },

    /// Two records in the same table share an ID.
    DuplicateId { table: &'static str, id: String },

    /// An offer points at a slot that is not in the catalog.
    UnknownSlot { offer_id: String, slot_id: String },

    /// I/O error reading a catalog file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse catalog '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Catalog '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { table, id, field } => {
                write!(f, "{table} '{id}': missing required field '{field}'")
            }
            Self::DuplicateId { table, id } => {
                write!(f, "Duplicate {table} ID '{id}'")
            }
            Self::UnknownSlot { offer_id, slot_id } => {
                write!(f, "Offer '{offer_id}' references unknown slot '{slot_id}'")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading catalog '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for LedSlotError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter operations.
///
/// Only the optional truck-name pattern can fail; every other filter input
/// that does not parse is ignored.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid truck pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for LedSlotError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Negotiation errors
// ---------------------------------------------------------------------------

/// Errors raised by offer transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiationError {
    /// The offer has already left the pending state.
    NotPending { offer_id: String, status: String },

    /// A counter amount was zero or above the price ceiling.
    InvalidAmount { amount: u32, max: u32 },
}

impl fmt::Display for NegotiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPending { offer_id, status } => write!(
                f,
                "Offer '{offer_id}' is {status}; only pending offers can be answered"
            ),
            Self::InvalidAmount { amount, max } => {
                write!(f, "Amount {amount} must be between 1 and {max}")
            }
        }
    }
}

impl std::error::Error for NegotiationError {}

impl From<NegotiationError> for LedSlotError {
    fn from(e: NegotiationError) -> Self {
        Self::Negotiation(e)
    }
}

// ---------------------------------------------------------------------------
// Form errors
// ---------------------------------------------------------------------------

/// Errors produced when validating form drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field was left empty.
    MissingField { field: &'static str },

    /// A numeric field did not hold a positive whole number.
    InvalidNumber { field: &'static str, value: String },

    /// A number was outside its allowed range.
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// A date or time field did not match its expected format.
    InvalidDateTime {
        field: &'static str,
        value: String,
        format: &'static str,
    },

    /// The end of a time window is not after its start.
    EmptyTimeWindow { start: String, end: String },

    /// A referenced truck does not exist.
    UnknownTruck { truck_id: String },

    /// A list reached its maximum length.
    TooManyItems { field: &'static str, max: usize },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "'{field}' is required"),
            Self::InvalidNumber { field, value } => {
                write!(f, "'{field}' must be a positive whole number, got '{value}'")
            }
            Self::OutOfRange { field, value, max } => {
                write!(f, "'{field}' = {value} is out of range (1-{max})")
            }
            Self::InvalidDateTime {
                field,
                value,
                format,
            } => write!(f, "'{field}' = '{value}' does not match format '{format}'"),
            Self::EmptyTimeWindow { start, end } => {
                write!(f, "End time {end} must be after start time {start}")
            }
            Self::UnknownTruck { truck_id } => write!(f, "Unknown truck '{truck_id}'"),
            Self::TooManyItems { field, max } => {
                write!(f, "'{field}' accepts at most {max} items")
            }
        }
    }
}

impl std::error::Error for FormError {}

impl From<FormError> for LedSlotError {
    fn from(e: FormError) -> Self {
        Self::Form(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LedSlotError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LedSlotError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LedSlot results.
pub type Result<T> = std::result::Result<T, LedSlotError>;
