//! Damage configuration with documented constants
//!
//! All tunable thresholds of the body-part system live here. An anatomy
//! file may override any of them through its `[damage]` table.

use serde::{Deserialize, Serialize};

/// Configuration for body-part damage and recovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    // === DAMAGE ===
    /// Overall health ratio above which body parts are protected
    ///
    /// While `health / max_health` is strictly greater than this value a hit
    /// can take a part down to 1 but never destroy it. At exactly this ratio
    /// damage applies normally.
    pub protection_threshold: f64,

    /// Upper bound of the number of parts hit by one damage application
    ///
    /// The actual count is drawn uniformly from `1..=max_parts_per_hit` and
    /// then capped by the size of the hit location.
    pub max_parts_per_hit: usize,

    // === RECOVERY ===
    /// Fraction of max health a destroyed part must reach to function again
    ///
    /// Inclusive: a part at exactly half of its max is restored.
    pub restore_threshold: f64,

    /// Fraction of overall max health given back on a death reset
    ///
    /// Also the default of the administrative restore command.
    pub revive_fraction: f64,

    // === PRESENTATION ===
    /// Locale used for part names in events and status snapshots
    pub locale: String,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            protection_threshold: 0.6,
            max_parts_per_hit: 3,
            restore_threshold: 0.5,
            revive_fraction: 0.5,
            locale: "en".to_string(),
        }
    }
}

impl DamageConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.protection_threshold) {
            return Err(format!(
                "protection_threshold ({}) must be within 0.0..=1.0",
                self.protection_threshold
            ));
        }

        if !(self.restore_threshold > 0.0 && self.restore_threshold <= 1.0) {
            return Err(format!(
                "restore_threshold ({}) must be within (0.0, 1.0]",
                self.restore_threshold
            ));
        }

        if !(self.revive_fraction > 0.0 && self.revive_fraction <= 1.0) {
            return Err(format!(
                "revive_fraction ({}) must be within (0.0, 1.0]",
                self.revive_fraction
            ));
        }

        if self.max_parts_per_hit == 0 {
            return Err("max_parts_per_hit must be at least 1".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<DamageConfig> = OnceLock::new();

/// Get the global damage config (initializes with defaults if not set)
pub fn config() -> &'static DamageConfig {
    CONFIG.get_or_init(DamageConfig::default)
}

/// Set the global damage config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: DamageConfig) -> Result<(), DamageConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DamageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_thresholds() {
        let config = DamageConfig::new();
        assert_eq!(config.protection_threshold, 0.6);
        assert_eq!(config.restore_threshold, 0.5);
        assert_eq!(config.max_parts_per_hit, 3);
    }

    #[test]
    fn test_zero_parts_per_hit_rejected() {
        let config = DamageConfig {
            max_parts_per_hit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_override_keeps_defaults() {
        let config: DamageConfig = toml::from_str("protection_threshold = 0.75").unwrap();
        assert_eq!(config.protection_threshold, 0.75);
        assert_eq!(config.restore_threshold, 0.5);
        assert_eq!(config.locale, "en");
    }
}
