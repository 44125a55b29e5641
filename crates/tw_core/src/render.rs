//! Presentation Formatter
//!
//! Turns a finished [`Selection`] into the directives a rendering surface
//! applies: the localized result sentence, the background color spec, the
//! contrast token, and the icon directive (asset, mirror flag, contrast
//! treatment, accessibility label).

use serde::Serialize;

use crate::config::GameConfig;
use crate::contrast::{self, Contrast};
use crate::engine::selection::Selection;
use crate::i18n::Localizer;

/// Icon rendering directive for the selected body part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconDirective {
    /// Icon asset reference from the body part configuration.
    pub asset: String,
    /// Mirror horizontally. True exactly when the selected side is left.
    pub mirrored: bool,
    /// Tone treatment matching the background's contrast token.
    pub contrast: Contrast,
    /// Descriptive label for assistive tech; equals the result sentence.
    pub aria_label: String,
}

/// Render output for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResult {
    /// Localized result sentence.
    pub text: String,
    /// Background color spec of the selected color.
    pub background: String,
    /// Contrast token for text on the background.
    pub contrast: Contrast,
    pub icon: IconDirective,
}

/// Render a selection with the active locale and theme.
pub fn render(selection: &Selection, localizer: &Localizer, config: &GameConfig) -> RenderedResult {
    let text = localizer.format_result(
        selection.body_part.id,
        selection.side.id,
        selection.color.id,
    );
    let token = contrast::resolve(&selection.color.value, &config.theme);

    RenderedResult {
        text: text.clone(),
        background: selection.color.value.clone(),
        contrast: token,
        icon: IconDirective {
            asset: selection.body_part.icon.clone(),
            mirrored: selection.side.id == crate::config::SideId::Left,
            contrast: token,
            aria_label: text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BodyPartId, ColorId, SideId};

    fn selection(body_part: BodyPartId, side: SideId, color: ColorId) -> Selection {
        let config = GameConfig::default();
        Selection {
            body_part: config.body_part(body_part).unwrap().clone(),
            side: crate::config::Side { id: side },
            color: config.color(color).unwrap().clone(),
        }
    }

    #[test]
    fn test_english_render() {
        let config = GameConfig::default();
        let localizer = Localizer::new();
        let result = render(&selection(BodyPartId::Hand, SideId::Left, ColorId::Red), &localizer, &config);

        assert_eq!(result.text, "Left Hand on Red");
        assert_eq!(result.background, "var(--red)");
        // var(--red) -> #e53935, luminance 0.42 -> light treatment
        assert_eq!(result.contrast, Contrast::Light);
        assert_eq!(result.icon.asset, "hand.svg");
        assert!(result.icon.mirrored);
        assert_eq!(result.icon.aria_label, result.text);
    }

    #[test]
    fn test_polish_render() {
        let config = GameConfig::default();
        let mut localizer = Localizer::new();
        localizer.set_language("pl");
        let result = render(&selection(BodyPartId::Hand, SideId::Left, ColorId::Red), &localizer, &config);

        assert_eq!(result.text, "Lewa Ręka na Czerwony");
    }

    #[test]
    fn test_right_side_never_mirrors() {
        let config = GameConfig::default();
        let localizer = Localizer::new();
        let result = render(&selection(BodyPartId::Foot, SideId::Right, ColorId::Yellow), &localizer, &config);

        assert!(!result.icon.mirrored);
        assert_eq!(result.icon.asset, "foot.svg");
        // var(--yellow) -> #fdd835, luminance 0.82 -> dark treatment
        assert_eq!(result.contrast, Contrast::Dark);
        assert_eq!(result.icon.contrast, result.contrast);
    }
}
