//! Language Detection Boundary
//!
//! The engine defaults its language from a one-time country lookup (an
//! external geolocation collaborator). Only the boundary is modeled here:
//! callers supply a [`CountryProvider`]; any failure or non-matching country
//! degrades to [`DEFAULT_LANGUAGE`]. No retry.

use thiserror::Error;

use crate::i18n::DEFAULT_LANGUAGE;

/// Country codes with a non-default language.
const COUNTRY_LANGUAGES: &[(&str, &str)] = &[("PL", "pl")];

/// Country lookup failure. Never surfaced past [`detect_language`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("country lookup failed: {0}")]
pub struct LookupError(pub String);

/// One-shot country lookup collaborator (geolocation service, environment,
/// fixed value in tests).
pub trait CountryProvider {
    /// ISO 3166-1 alpha-2 country code, e.g. `PL`.
    fn country_code(&mut self) -> Result<String, LookupError>;
}

/// Detect the UI language from the provider's country.
///
/// Fail soft: lookup errors and unmapped countries both yield
/// [`DEFAULT_LANGUAGE`].
pub fn detect_language<P: CountryProvider>(provider: &mut P) -> &'static str {
    match provider.country_code() {
        Ok(code) => COUNTRY_LANGUAGES
            .iter()
            .find(|(country, _)| code.eq_ignore_ascii_case(country))
            .map(|(_, lang)| *lang)
            .unwrap_or(DEFAULT_LANGUAGE),
        Err(err) => {
            log::debug!("language detection failed, using default: {}", err);
            DEFAULT_LANGUAGE
        }
    }
}
