// LedSlot - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::export::OutputFormat;
use crate::core::region::Region;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LedSlot configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/ledslot/ or %APPDATA%\LedSlot\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so a newer config file still loads.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[marketplace]` section.
    pub marketplace: MarketplaceSection,
    /// `[catalog]` section.
    pub catalog: CatalogSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[marketplace]` config section: filter defaults for `search`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MarketplaceSection {
    /// Regions preselected when no `--region` is given.
    pub default_regions: Option<Vec<String>>,
    /// Verified trucks only.
    pub verified_only: Option<bool>,
    /// Upper price bound in whole dollars.
    pub max_price: Option<i64>,
}

/// `[catalog]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// User catalog replacing the built-in one.
    pub path: Option<String>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// "table", "json" or "csv".
    pub format: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    // -- Marketplace --
    pub default_regions: Vec<Region>,
    pub verified_only: bool,
    pub max_price: Option<u32>,

    // -- Catalog --
    pub catalog_path: Option<PathBuf>,

    // -- Export --
    pub output_format: OutputFormat,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning
/// so the command still runs but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw_config(&config_path) {
        Ok(raw) => raw,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate_config(raw, config_dir, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate each field, accumulating a warning for every rejected value.
fn validate_config(raw: RawConfig, config_dir: &Path, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();
    let mut reject = |field: &str, value: String, expected: &str| {
        warnings.push(format!(
            "{}. Using default.",
            ConfigError::ValueOutOfRange {
                field: field.to_string(),
                value,
                expected: expected.to_string(),
            }
        ));
    };

    // -- Marketplace: default_regions --
    if let Some(names) = raw.marketplace.default_regions {
        for name in names {
            match name.parse::<Region>() {
                Ok(region) if !config.default_regions.contains(&region) => {
                    config.default_regions.push(region)
                }
                Ok(_) => {}
                Err(e) => reject("marketplace.default_regions", name, &e.to_string()),
            }
        }
    }

    // -- Marketplace: verified_only --
    if let Some(verified) = raw.marketplace.verified_only {
        config.verified_only = verified;
    }

    // -- Marketplace: max_price --
    if let Some(price) = raw.marketplace.max_price {
        match u32::try_from(price) {
            Ok(p) if (1..=constants::ABSOLUTE_MAX_PRICE).contains(&p) => {
                config.max_price = Some(p)
            }
            _ => reject(
                "marketplace.max_price",
                price.to_string(),
                &format!("1-{}", constants::ABSOLUTE_MAX_PRICE),
            ),
        }
    }

    // -- Catalog: path (relative paths resolve against the config directory) --
    if let Some(path) = raw.catalog.path.filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        config.catalog_path = Some(if path.is_relative() {
            config_dir.join(path)
        } else {
            path
        });
    }

    // -- Export: format --
    if let Some(format) = raw.export.format {
        match format.parse::<OutputFormat>() {
            Ok(f) => config.output_format = f,
            Err(_) => reject("export.format", format, "\"table\", \"json\" or \"csv\""),
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            reject(
                "logging.level",
                level,
                &constants::VALID_LOG_LEVELS.join(", "),
            );
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file.filter(|f| !f.is_empty()) {
        config.log_file = Some(file);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(toml: &str) -> (AppConfig, Vec<String>) {
        let raw: RawConfig = toml::from_str(toml).unwrap();
        let mut warnings = Vec::new();
        let config = validate_config(raw, Path::new("/etc/ledslot"), &mut warnings);
        (config, warnings)
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = validate("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_values() {
        let (config, warnings) = validate(
            r#"
[marketplace]
default_regions = ["dfw", "San Antonio", "DFW"]
verified_only = true
max_price = 2000

[catalog]
path = "my-catalog.toml"

[export]
format = "csv"

[logging]
level = "DEBUG"
"#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.default_regions, vec![Region::Dfw, Region::SanAntonio]);
        assert!(config.verified_only);
        assert_eq!(config.max_price, Some(2000));
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/ledslot/my-catalog.toml"))
        );
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back_with_warnings() {
        let (config, warnings) = validate(
            r#"
[marketplace]
default_regions = ["Lubbock", "Austin"]
max_price = -5

[export]
format = "xml"

[logging]
level = "verbose"
"#,
        );
        assert_eq!(warnings.len(), 4);
        assert_eq!(config.default_regions, vec![Region::Austin]);
        assert_eq!(config.max_price, None);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.log_level, None);
        assert!(warnings[0].contains("Lubbock"));
    }
}
