//! # tw_core - Deterministic Spin Selection & Presentation Engine
//!
//! This library provides the game engine behind a party-game spinner: it
//! randomly selects a body part, a side and a color, renders the result as a
//! localized sentence plus icon/contrast directives, and emits the events a
//! presentation surface and a speech collaborator consume.
//!
//! ## Features
//! - 100% deterministic spins (same seed = same cycle)
//! - Non-repeat guarantee on consecutive (body part, side) pairs
//! - Fluent-based localization with language negotiation
//! - JSON API for easy integration with rendering layers

pub mod api;
pub mod config;
pub mod contrast;
pub mod engine;
pub mod error;
pub mod geo;
pub mod i18n;
pub mod render;
pub mod speech;

// Re-export main API functions
pub use api::{run_spin_json, SpinRequest, SpinResponse};
pub use error::{CoreError, Result};

// Re-export configuration types
pub use config::{BodyPart, BodyPartId, ColorDef, ColorId, GameConfig, Side, SideId};

// Re-export engine types
pub use contrast::Contrast;
pub use engine::{Selection, Selector, SpinController, SpinEvent, SpinState};
pub use geo::{detect_language, CountryProvider};
pub use i18n::{Localizer, DEFAULT_LANGUAGE, SUPPORTED_LOCALES};
pub use render::{render, IconDirective, RenderedResult};
pub use speech::{Announcer, SpeechBackend, Voice};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
