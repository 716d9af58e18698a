//! Engine configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file yields the
//! stock es-CL setup with a 36% company floor in flexible mode.
//!
//! ```toml
//! company_floor_percent = 36.0
//! default_pilot_share = 14.0
//! default_helper_share = 8.0
//! mode = "strict"
//!
//! [locale]
//! grouping = "."
//! decimal = ","
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        COMPANY_FLOOR_PERCENT, DEFAULT_HELPER_SHARE, DEFAULT_PILOT_SHARE, MAX_PERCENT, MIN_PERCENT,
    },
    currency::NumberLocale,
    errors::ConfigError,
    roster::ShareDefaults,
};

/// How a save treats a distribution that does not total exactly 100%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionMode {
    /// Saving is blocked unless the aggregate is exactly 100%
    Strict,
    /// Saving always proceeds; overage is reported to the caller
    #[default]
    Flexible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub company_floor_percent: f64,
    pub default_pilot_share: f64,
    pub default_helper_share: f64,
    pub mode: DistributionMode,
    pub locale: NumberLocale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            company_floor_percent: COMPANY_FLOOR_PERCENT,
            default_pilot_share: DEFAULT_PILOT_SHARE,
            default_helper_share: DEFAULT_HELPER_SHARE,
            mode: DistributionMode::default(),
            locale: NumberLocale::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("company_floor_percent", self.company_floor_percent),
            ("default_pilot_share", self.default_pilot_share),
            ("default_helper_share", self.default_helper_share),
        ] {
            if !(MIN_PERCENT..=MAX_PERCENT).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{field} must be between 0 and 100, got {value}"
                )));
            }
        }

        if self.locale.grouping == self.locale.decimal {
            return Err(ConfigError::Validation(format!(
                "locale grouping and decimal separators must differ, both are '{}'",
                self.locale.grouping
            )));
        }

        Ok(())
    }

    pub fn share_defaults(&self) -> ShareDefaults {
        ShareDefaults {
            pilot: self.default_pilot_share,
            helper: self.default_helper_share,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == DistributionMode::Strict
    }
}
