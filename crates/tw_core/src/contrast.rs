//! Contrast Resolver
//!
//! Maps a background color spec to the contrast token the text and icon
//! should use on top of it. Perceived luminance is computed from 0-255
//! channels as `(0.299*R + 0.587*G + 0.114*B) / 255`.
//!
//! Token naming is literal, not conventional: luminance below 0.5 yields
//! [`Contrast::Light`], at or above 0.5 yields [`Contrast::Dark`]. Styling
//! layers key off these exact tokens; do not swap them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Contrast token for text/icon treatment against a background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    Light,
    Dark,
}

/// Resolve the contrast token for a color spec.
///
/// Direct hex triplets (`#rrggbb`) are resolved through luminance. A
/// `var(--name)` indirection is first looked up in `theme`; a token that
/// cannot be resolved to concrete channels yields [`Contrast::Light`]
/// deterministically.
pub fn resolve(spec: &str, theme: &HashMap<String, String>) -> Contrast {
    let value = resolve_theme_token(spec, theme);
    match parse_hex_rgb(value) {
        Some((r, g, b)) => {
            if luminance(r, g, b) < 0.5 {
                Contrast::Light
            } else {
                Contrast::Dark
            }
        }
        None => Contrast::Light,
    }
}

/// Resolve a `var(--name)` indirection through the theme table.
///
/// Direct values pass through unchanged. An unknown token resolves to the
/// empty string, which downstream parsing treats as unresolvable.
pub fn resolve_theme_token<'a>(spec: &'a str, theme: &'a HashMap<String, String>) -> &'a str {
    if let Some(rest) = spec.strip_prefix("var(") {
        if let Some(name) = rest.strip_suffix(')') {
            return theme.get(name.trim()).map(String::as_str).unwrap_or("");
        }
    }
    spec
}

/// Relative luminance of 0-255 channels, in `0.0..=1.0`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}

/// Parse a `#rrggbb` triplet. Anything else is unresolvable.
#[inline]
fn parse_hex_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
