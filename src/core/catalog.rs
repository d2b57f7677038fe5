// LedSlot - core/catalog.rs
//
// Marketplace catalog loading and validation.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::catalog_mgr which feeds content here.

use crate::core::booking::Booking;
use crate::core::model::{Slot, Truck};
use crate::core::offer::Offer;
use crate::util::constants;
use crate::util::error::CatalogError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// All records the marketplace screens draw from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub trucks: Vec<Truck>,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub runs: Vec<Booking>,
}

impl Catalog {
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn truck(&self, id: &str) -> Option<&Truck> {
        self.trucks.iter().find(|t| t.id == id)
    }

    pub fn booking(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }
}

/// Parse a TOML string into an unvalidated `Catalog`.
///
/// `source_path` is used for error messages only.
pub fn parse_catalog_toml(toml_content: &str, source_path: &Path) -> Result<Catalog, CatalogError> {
    toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate cross-record invariants.
///
/// Checks:
/// - IDs and names are non-empty
/// - IDs are unique within each table
/// - Every offer references a slot in the catalog
pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    check_table("truck", catalog.trucks.iter().map(|t| (&t.id, &t.name)))?;
    check_table(
        "slot",
        catalog.slots.iter().map(|s| (&s.id, &s.truck_name)),
    )?;
    check_table(
        "offer",
        catalog.offers.iter().map(|o| (&o.id, &o.counterparty)),
    )?;
    check_table(
        "booking",
        catalog.bookings.iter().map(|b| (&b.id, &b.truck_name)),
    )?;
    check_table("run", catalog.runs.iter().map(|r| (&r.id, &r.truck_name)))?;

    for offer in &catalog.offers {
        if catalog.slot(&offer.slot_id).is_none() {
            return Err(CatalogError::UnknownSlot {
                offer_id: offer.id.clone(),
                slot_id: offer.slot_id.clone(),
            });
        }
    }

    Ok(())
}

/// Every (id, name) pair must be non-empty and ids must be unique.
fn check_table<'a, I>(table: &'static str, rows: I) -> Result<(), CatalogError>
where
    I: Iterator<Item = (&'a String, &'a String)>,
{
    let mut seen = HashSet::new();
    for (id, name) in rows {
        if id.is_empty() {
            return Err(CatalogError::MissingField {
                table,
                id: "(empty)".to_string(),
                field: "id",
            });
        }
        if name.is_empty() {
            return Err(CatalogError::MissingField {
                table,
                id: id.clone(),
                field: "name",
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

/// Parse and validate in one step.
pub fn load_catalog_str(toml_content: &str, source_path: &Path) -> Result<Catalog, CatalogError> {
    let catalog = parse_catalog_toml(toml_content, source_path)?;
    validate(&catalog)?;
    Ok(catalog)
}

/// Catalog embedded in the binary.
fn builtin_catalog_source() -> &'static str {
    include_str!("../../catalog/marketplace.toml")
}

/// Load the built-in catalog.
///
/// A failure here is a bug in the embedded file; it is logged and an empty
/// catalog is returned so the binary still starts.
pub fn load_builtin_catalog() -> Catalog {
    let path = PathBuf::from(constants::BUILTIN_CATALOG_PATH);
    match load_catalog_str(builtin_catalog_source(), &path) {
        Ok(catalog) => {
            tracing::debug!(
                trucks = catalog.trucks.len(),
                slots = catalog.slots.len(),
                offers = catalog.offers.len(),
                bookings = catalog.bookings.len(),
                runs = catalog.runs.len(),
                "Loaded built-in catalog"
            );
            catalog
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load built-in catalog");
            Catalog::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::Region;

    const MINIMAL: &str = r#"
[[slots]]
id = "1"
truck_name = "LED-TX-001"
region = "DFW"
date = "Jan 15"
time_window = "6PM-10PM"
price = 2500
status = "available"
verified = true

[[offers]]
id = "1"
slot_id = "1"
counterparty = "MediaMax Agency"
amount = 2400
direction = "received"
created_at = "2h ago"
"#;

    fn path() -> PathBuf {
        PathBuf::from("test.toml")
    }

    #[test]
    fn test_parse_minimal() {
        let catalog = load_catalog_str(MINIMAL, &path()).unwrap();
        assert_eq!(catalog.slots.len(), 1);
        assert_eq!(catalog.slots[0].region, Region::Dfw);
        assert!(catalog.offers[0].is_pending());
        assert!(catalog.trucks.is_empty());
    }

    #[test]
    fn test_unknown_slot_reference() {
        let toml = MINIMAL.replace("slot_id = \"1\"", "slot_id = \"42\"");
        let err = load_catalog_str(&toml, &path()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownSlot { ref slot_id, .. } if slot_id == "42"));
    }

    #[test]
    fn test_duplicate_slot_id() {
        let toml = format!(
            "[[slots]]\nid = \"1\"\ntruck_name = \"LED-TX-002\"\nregion = \"RGV\"\n\
             date = \"Jan 16\"\ntime_window = \"5PM-9PM\"\nprice = 900\nstatus = \"booked\"\n{MINIMAL}"
        );
        let err = load_catalog_str(&toml, &path()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { table: "slot", .. }));
    }

    #[test]
    fn test_unknown_region_is_parse_error() {
        let toml = MINIMAL.replace("\"DFW\"", "\"Lubbock\"");
        assert!(matches!(
            load_catalog_str(&toml, &path()),
            Err(CatalogError::TomlParse { .. })
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let toml = MINIMAL.replace("\"MediaMax Agency\"", "\"\"");
        assert!(matches!(
            load_catalog_str(&toml, &path()),
            Err(CatalogError::MissingField { table: "offer", .. })
        ));
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = load_builtin_catalog();
        assert_eq!(catalog.slots.len(), 6);
        assert!(!catalog.offers.is_empty());
        assert!(catalog.booking("1").is_some());
        assert!(validate(&catalog).is_ok());
    }
}
