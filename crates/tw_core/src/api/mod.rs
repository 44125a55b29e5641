//! JSON API
//!
//! String-in, string-out entry point for embedding the engine behind a
//! rendering layer without linking against its types. One call runs one
//! complete spin cycle on a virtual clock and returns everything the surface
//! needs to apply: tick colors, the final selection, the localized sentence
//! and the icon/contrast directives. Deterministic: same request, same
//! response.

use serde::{Deserialize, Serialize};

use crate::config::{BodyPartId, ColorId, GameConfig, SideId};
use crate::contrast::Contrast;
use crate::engine::spin::{SpinController, SpinEvent};
use crate::i18n::{Localizer, DEFAULT_LANGUAGE};
use crate::render::IconDirective;
use crate::SCHEMA_VERSION;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const UNSUPPORTED_SCHEMA_VERSION: &str = "UNSUPPORTED_SCHEMA_VERSION";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const SERIALIZATION_FAILED: &str = "SERIALIZATION_FAILED";
    pub const INTERNAL: &str = "INTERNAL";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

/// Spin request envelope.
#[derive(Debug, Deserialize)]
pub struct SpinRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Two-letter language code; defaults to the detection fallback.
    #[serde(default)]
    pub language: Option<String>,
    /// Custom game configuration; defaults to the embedded one.
    #[serde(default)]
    pub config: Option<GameConfig>,
}

/// Outcome of one full spin cycle.
#[derive(Debug, Serialize)]
pub struct SpinResponse {
    pub schema_version: u8,
    /// Negotiated locale the sentence was rendered in.
    pub locale: String,
    pub text: String,
    pub body_part: BodyPartId,
    pub side: SideId,
    pub color: ColorId,
    pub background: String,
    pub contrast: Contrast,
    pub icon: IconDirective,
    /// Visual color steps of the animation, in tick order.
    pub tick_colors: Vec<ColorId>,
}

/// Run one spin cycle and return the outcome as JSON.
pub fn run_spin_json(request_json: &str) -> Result<String, String> {
    let request: SpinRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(err_code(
            error_codes::UNSUPPORTED_SCHEMA_VERSION,
            format!("expected {}, got {}", SCHEMA_VERSION, request.schema_version),
        ));
    }

    let config = request.config.unwrap_or_default();
    let mut localizer = Localizer::new();
    localizer.set_language(request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE));

    let mut controller = SpinController::from_seed(config, localizer, request.seed)
        .map_err(|e| err_code(error_codes::INVALID_CONFIG, e))?;

    // Drive the cycle on a virtual clock: jump to each deadline in turn
    // until the controller is fully settled.
    let mut events = controller.spin(0);
    while let Some(deadline) = controller.next_deadline_ms() {
        events.extend(controller.advance(deadline));
    }

    let mut tick_colors = Vec::new();
    let mut outcome = None;
    for event in events {
        match event {
            SpinEvent::TickColor(color) => tick_colors.push(color.id),
            SpinEvent::ResultReady { selection, rendered } => {
                outcome = Some((selection, rendered));
            }
            _ => {}
        }
    }

    let (selection, rendered) =
        outcome.ok_or_else(|| err_code(error_codes::INTERNAL, "spin cycle produced no result"))?;

    let response = SpinResponse {
        schema_version: SCHEMA_VERSION,
        locale: controller.localizer().current_locale().to_string(),
        text: rendered.text,
        body_part: selection.body_part.id,
        side: selection.side.id,
        color: selection.color.id,
        background: rendered.background,
        contrast: rendered.contrast,
        icon: rendered.icon,
        tick_colors,
    };

    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SERIALIZATION_FAILED, e))
}
