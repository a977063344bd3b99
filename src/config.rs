//! Application configuration
//!
//! TOML file with equipment defaults, display preferences, input limits
//! and logging. Every field has a default, so a partial (or missing) file
//! is valid:
//!
//! ```toml
//! [equipment]
//! default = "smith_machine"
//! custom_base_weight = 45.0
//! custom_increment = 2.5
//!
//! [display]
//! precision = 1
//! unit_label = "kg"
//!
//! [limits]
//! max_reps = 30
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::display::DisplaySettings;
use crate::equipment::{CustomEquipment, Equipment};
use crate::logging::LogConfig;
use crate::validation::ValidationLimits;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub equipment: EquipmentDefaults,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub limits: ValidationLimits,

    #[serde(default)]
    pub logging: LogConfig,
}

/// Default equipment selection and custom profile values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDefaults {
    /// Catalog key used when none is given on the command line
    #[serde(default = "default_equipment_key")]
    pub default: String,

    #[serde(default)]
    pub custom_base_weight: Option<f64>,

    #[serde(default)]
    pub custom_increment: Option<f64>,

    /// Loadable weights for the custom profile, replacing the increment
    #[serde(default)]
    pub custom_weights: Option<Vec<f64>>,
}

fn default_equipment_key() -> String {
    "none".to_string()
}

impl Default for EquipmentDefaults {
    fn default() -> Self {
        Self {
            default: default_equipment_key(),
            custom_base_weight: None,
            custom_increment: None,
            custom_weights: None,
        }
    }
}

impl EquipmentDefaults {
    /// Custom profile built from the configured values
    pub fn custom_equipment(&self) -> CustomEquipment {
        CustomEquipment {
            base_weight: self.custom_base_weight,
            increment: self.custom_increment,
            weights: self.custom_weights.clone(),
        }
    }

    /// Equipment for `key`, filling the custom profile from configuration
    ///
    /// Returns `None` for keys outside the catalog.
    pub fn equipment_for(&self, key: &str) -> Option<Equipment> {
        match Equipment::from_key(key)? {
            Equipment::Custom(_) => Some(Equipment::Custom(self.custom_equipment())),
            equipment => Some(equipment),
        }
    }
}

/// Configuration loader for TOML files
pub struct ConfigLoader;

impl ConfigLoader {
    /// `<config dir>/rpecalc/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rpecalc").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::load_from_string(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn load_from_string(content: &str) -> Result<AppConfig> {
        let config: AppConfig = toml::from_str(content).context("Invalid TOML syntax")?;
        Ok(config)
    }

    /// Load an explicit path, else the default path if it exists, else defaults
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading default config");
                Self::load_from_file(&path)
            }
            _ => Ok(AppConfig::default()),
        }
    }

    /// Serialize configuration to TOML
    pub fn to_toml_string(config: &AppConfig) -> Result<String> {
        toml::to_string_pretty(config).context("Failed to serialize configuration")
    }

    /// Write configuration to a TOML file, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, Self::to_toml_string(config)?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
