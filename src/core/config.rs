//! Server configuration with documented vocation baselines
//!
//! Every default a vocation falls back to when its definition record
//! leaves an attribute out is collected in [`VocationBaselines`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, VocationError};
use crate::core::types::Ticks;

/// Default values applied to every vocation before its record is read
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VocationBaselines {
    // === LEVEL GAINS ===
    /// Carrying capacity gained per character level (hundredths of an oz)
    pub gain_cap: u32,

    /// Hit points gained per character level
    pub gain_hp: u32,

    /// Mana gained per character level
    pub gain_mana: u32,

    // === REGENERATION ===
    /// Ticks between passive health regeneration events
    pub gain_health_ticks: Ticks,

    /// Health restored per regeneration event
    pub gain_health_amount: u32,

    /// Ticks between passive mana regeneration events
    pub gain_mana_ticks: Ticks,

    /// Mana restored per regeneration event
    pub gain_mana_amount: u32,

    /// Ticks between soul point regeneration events
    pub gain_soul_ticks: Ticks,

    /// Soul point ceiling
    pub soul_max: u16,

    // === PROGRESSION ===
    /// Growth factor of the mana required per magic level
    ///
    /// At 1.1 each magic level costs 10% more mana than the previous one.
    pub mana_multiplier: f32,

    // === SPEED ===
    /// Milliseconds between melee attacks
    pub attack_speed: u32,

    /// Base movement speed before level and haste bonuses
    pub base_speed: u32,

    // === DAMAGE ===
    pub melee_damage_multiplier: f32,
    pub dist_damage_multiplier: f32,
    pub defense_multiplier: f32,
    pub armor_multiplier: f32,
}

impl Default for VocationBaselines {
    fn default() -> Self {
        Self {
            gain_cap: 10 * 100,
            gain_hp: 5,
            gain_mana: 5,

            gain_health_ticks: 6,
            gain_health_amount: 5000,
            gain_mana_ticks: 3,
            gain_mana_amount: 5000,
            gain_soul_ticks: 120,
            soul_max: 100,

            mana_multiplier: 1.1,

            attack_speed: 1300,
            base_speed: 100,

            melee_damage_multiplier: 1.0,
            dist_damage_multiplier: 1.0,
            defense_multiplier: 1.0,
            armor_multiplier: 1.0,
        }
    }
}

impl VocationBaselines {
    /// Validate baselines for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.mana_multiplier <= 0.0 {
            return Err(format!(
                "mana_multiplier ({}) must be positive",
                self.mana_multiplier
            ));
        }

        let ticks = [
            ("gain_health_ticks", self.gain_health_ticks),
            ("gain_mana_ticks", self.gain_mana_ticks),
            ("gain_soul_ticks", self.gain_soul_ticks),
        ];
        for (name, value) in ticks {
            if value == 0 {
                return Err(format!("{} must be at least 1", name));
            }
        }

        if self.attack_speed == 0 || self.base_speed == 0 {
            return Err("attack_speed and base_speed must be positive".into());
        }

        let multipliers = [
            self.melee_damage_multiplier,
            self.dist_damage_multiplier,
            self.defense_multiplier,
            self.armor_multiplier,
        ];
        if multipliers.iter().any(|m| *m <= 0.0) {
            return Err("Damage, defense and armor multipliers must be positive".into());
        }

        Ok(())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TOML file holding the `[[vocation]]` definitions
    pub definitions_path: PathBuf,

    /// `tracing_subscriber` env-filter directive
    pub log_filter: String,

    pub baselines: VocationBaselines,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            definitions_path: PathBuf::from("data/vocations.toml"),
            log_filter: "vocation_registry=info".to_string(),
            baselines: VocationBaselines::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(content)?;
        config
            .baselines
            .validate()
            .map_err(VocationError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ServerConfig> = OnceLock::new();

/// Get the global server config (initializes with defaults if not set)
pub fn config() -> &'static ServerConfig {
    CONFIG.get_or_init(ServerConfig::default)
}

/// Set the global server config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: ServerConfig) -> std::result::Result<(), ServerConfig> {
    CONFIG.set(config)
}
