// LedSlot - app/catalog_mgr.rs
//
// Chooses and loads the marketplace catalog: a user-supplied TOML file when
// one is configured, the catalog embedded in the binary otherwise.

use crate::core::catalog::{self, Catalog};
use crate::util::constants;
use crate::util::error::CatalogError;
use std::path::Path;

/// Load the catalog from `user_path`, or the built-in one when `None`.
///
/// A configured user catalog that cannot be read or fails validation is an
/// error; it never silently falls back to the built-in data.
pub fn load_catalog(user_path: Option<&Path>) -> Result<Catalog, CatalogError> {
    let Some(path) = user_path else {
        let catalog = catalog::load_builtin_catalog();
        tracing::info!(slots = catalog.slots.len(), "Using built-in catalog");
        return Ok(catalog);
    };

    let catalog = load_user_catalog(path)?;
    tracing::info!(
        path = %path.display(),
        trucks = catalog.trucks.len(),
        slots = catalog.slots.len(),
        offers = catalog.offers.len(),
        "Loaded user catalog"
    );
    Ok(catalog)
}

fn load_user_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let metadata = std::fs::metadata(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_CATALOG_FILE_SIZE {
        return Err(CatalogError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_CATALOG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    catalog::load_catalog_str(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_when_no_path() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.slots.len(), 6);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let padding = "#".repeat(constants::MAX_CATALOG_FILE_SIZE as usize + 1);
        file.write_all(padding.as_bytes()).unwrap();
        let err = load_catalog(Some(file.path())).unwrap_err();
        assert!(matches!(err, CatalogError::FileTooLarge { .. }));
    }
}
