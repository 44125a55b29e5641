//! Game Configuration
//!
//! Selectable body parts, sides and colors plus the single timing parameter
//! shared by the spin animation and its tick cadence. The default
//! configuration is embedded at compile time so the engine works with zero
//! file I/O; a custom configuration can be loaded from JSON.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Default configuration JSON, embedded into the binary.
pub const DEFAULT_CONFIG_JSON: &str = include_str!("../data/default_config.json");

static DEFAULT_CONFIG: Lazy<GameConfig> = Lazy::new(|| {
    let config: GameConfig =
        serde_json::from_str(DEFAULT_CONFIG_JSON).expect("embedded default config must parse");
    config.validate().expect("embedded default config must validate");
    config
});

// ============================================================================
// Identifier enums
// ============================================================================

/// Body part identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPartId {
    Hand,
    Foot,
}

impl BodyPartId {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyPartId::Hand => "hand",
            BodyPartId::Foot => "foot",
        }
    }
}

/// Side identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideId {
    Left,
    Right,
}

impl SideId {
    pub fn as_str(self) -> &'static str {
        match self {
            SideId::Left => "left",
            SideId::Right => "right",
        }
    }
}

/// Color identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorId {
    Red,
    Green,
    Blue,
    Yellow,
}

impl ColorId {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorId::Red => "red",
            ColorId::Green => "green",
            ColorId::Blue => "blue",
            ColorId::Yellow => "yellow",
        }
    }
}

// ============================================================================
// Configuration records
// ============================================================================

/// Selectable body part with its icon asset reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPart {
    pub id: BodyPartId,
    pub icon: String,
}

/// Selectable side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    pub id: SideId,
}

/// Selectable color with its display color spec
///
/// `value` is an opaque string: either a direct hex triplet (`#rrggbb`) or a
/// theme indirection (`var(--name)`) resolved through [`GameConfig::theme`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDef {
    pub id: ColorId,
    pub value: String,
}

/// Game configuration
///
/// Static for the lifetime of an engine instance. `animation_duration_ms`
/// controls both the spin animation length and the tick cadence
/// (`animation_duration_ms / 4`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub body_parts: Vec<BodyPart>,
    pub sides: Vec<Side>,
    pub colors: Vec<ColorDef>,
    pub animation_duration_ms: u64,
    /// Theme token table for `var(--name)` color indirections
    #[serde(default)]
    pub theme: HashMap<String, String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl GameConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validate configuration invariants.
    ///
    /// The selection engine removes at most one (body part, side) pair from
    /// the candidate set, so the Cartesian product must contain at least two
    /// pairs. The tick cadence is `animation_duration_ms / 4` and eight ticks
    /// must land exactly on the 2x safety bound, so the duration must divide
    /// evenly by four.
    pub fn validate(&self) -> Result<()> {
        let pairs = self.body_parts.len() * self.sides.len();
        if pairs < 2 {
            return Err(CoreError::InvalidConfig(format!(
                "need at least 2 (body part, side) combinations, got {}",
                pairs
            )));
        }
        if self.colors.is_empty() {
            return Err(CoreError::InvalidConfig("need at least one color".into()));
        }
        if self.animation_duration_ms == 0 || self.animation_duration_ms % 4 != 0 {
            return Err(CoreError::InvalidConfig(format!(
                "animation_duration_ms must be a positive multiple of 4, got {}",
                self.animation_duration_ms
            )));
        }
        Ok(())
    }

    /// Tick cadence of the spin animation.
    pub fn tick_interval_ms(&self) -> u64 {
        self.animation_duration_ms / 4
    }

    /// Safety bound that force-stops a spin cycle.
    pub fn safety_timeout_ms(&self) -> u64 {
        self.animation_duration_ms * 2
    }

    /// Look up a color definition by id.
    pub fn color(&self, id: ColorId) -> Option<&ColorDef> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// Look up a body part definition by id.
    pub fn body_part(&self, id: BodyPartId) -> Option<&BodyPart> {
        self.body_parts.iter().find(|p| p.id == id)
    }
}
