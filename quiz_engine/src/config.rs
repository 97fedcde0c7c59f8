//! Game configuration.
//!
//! Built once at startup and handed to the engine; nothing mutates it afterwards.

use company_registry::AttributeKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Largest accepted `company_cooldown`.
pub const MAX_COMPANY_COOLDOWN: usize = 1_000;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Smallest gap between two companies' numeric values for a fair question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinDifferences {
    /// Founding years.
    pub years: f64,
    pub employees: f64,
    /// Euros.
    pub revenue: f64,
    /// Euros.
    pub profit: f64,
    /// Euros.
    pub labor_costs: f64,
}

impl Default for MinDifferences {
    fn default() -> Self {
        Self {
            years: 7.0,
            employees: 20.0,
            revenue: 2_000_000.0,
            profit: 500_000.0,
            labor_costs: 100_000.0,
        }
    }
}

impl MinDifferences {
    /// Threshold for a numeric kind, `None` for categorical kinds.
    pub fn for_kind(&self, kind: AttributeKind) -> Option<f64> {
        match kind {
            AttributeKind::FoundingYear => Some(self.years),
            AttributeKind::Employees => Some(self.employees),
            AttributeKind::Revenue => Some(self.revenue),
            AttributeKind::Profit => Some(self.profit),
            AttributeKind::LaborCosts => Some(self.labor_costs),
            _ => None,
        }
    }

    fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("min_difference.years", self.years),
            ("min_difference.employees", self.employees),
            ("min_difference.revenue", self.revenue),
            ("min_difference.profit", self.profit),
            ("min_difference.labor_costs", self.labor_costs),
        ]
    }
}

/// Process-wide game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Score at which the reward unlocks.
    pub promo_threshold: i64,

    /// Number of questions before an attribute type may be asked again.
    /// At most the number of attribute kinds.
    pub type_cooldown: usize,

    /// Number of questions before a company may appear again.
    /// At most [`MAX_COMPANY_COOLDOWN`].
    pub company_cooldown: usize,

    pub min_difference: MinDifferences,

    /// Evict the oldest cooldown entry instead of failing when the
    /// cooldowns leave nothing to ask.
    pub relax_cooldowns: bool,

    /// How many times a broken question is regenerated before giving up.
    pub max_build_attempts: u32,

    /// Only draw from companies with every attribute present.
    pub require_complete_records: bool,

    /// Activity descriptions longer than this are cut short in prompts.
    pub activity_max_chars: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            promo_threshold: 5,
            type_cooldown: 5,
            company_cooldown: 2,
            min_difference: MinDifferences::default(),
            relax_cooldowns: true,
            max_build_attempts: 3,
            require_complete_records: false,
            activity_max_chars: 60,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.promo_threshold < 1 {
            return Err(ConfigError::Invalid {
                field: "promo_threshold",
                reason: format!("must be at least 1, got {}", self.promo_threshold),
            });
        }
        if self.max_build_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "max_build_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.type_cooldown > AttributeKind::ALL.len() {
            return Err(ConfigError::Invalid {
                field: "type_cooldown",
                reason: format!(
                    "must be at most {} (one per attribute kind), got {}",
                    AttributeKind::ALL.len(),
                    self.type_cooldown
                ),
            });
        }
        if self.company_cooldown > MAX_COMPANY_COOLDOWN {
            return Err(ConfigError::Invalid {
                field: "company_cooldown",
                reason: format!("must be at most {MAX_COMPANY_COOLDOWN}, got {}", self.company_cooldown),
            });
        }
        for (field, value) in self.min_difference.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}
