//! Result Text Localization
//!
//! Fluent (FTL) 기반 다국어 지원. Locale bundles are embedded at compile
//! time; languages are negotiated with `fluent-langneg` and fall back to
//! the default locale when a requested code is unknown.

use fluent::{FluentArgs, FluentBundle, FluentMessage, FluentResource, FluentValue};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

use crate::config::{BodyPartId, ColorId, SideId};
use crate::error::{CoreError, Result};

/// Supported locales, first entry is the fallback
pub const SUPPORTED_LOCALES: &[&str] = &["en-US", "pl-PL"];

/// Default language code used when detection fails or yields no match
pub const DEFAULT_LANGUAGE: &str = "en";

const FTL_EN_US: &str = r#"
# Twister Spinner UI
app-title = Twister Spinner
spin-button = Spin

body-part-hand = Hand
body-part-foot = Foot

side-left = Left
side-right = Right

color-red = Red
color-green = Green
color-blue = Blue
color-yellow = Yellow

result = { $side } { $bodyPart } on { $color }
"#;

const FTL_PL_PL: &str = r#"
# Twister Spinner UI
app-title = Twister Spinner
spin-button = Losuj

body-part-hand = Ręka
body-part-foot = Stopa

side-left = Lewa
side-right = Prawa

color-red = Czerwony
color-green = Zielony
color-blue = Niebieski
color-yellow = Żółty

result = { $side } { $bodyPart } na { $color }
"#;

/// Result text localizer
pub struct Localizer {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
    fallback_locale: String,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer {
    /// Create a localizer with the embedded locale bundles loaded.
    pub fn new() -> Self {
        let mut localizer = Self {
            bundles: HashMap::new(),
            current_locale: SUPPORTED_LOCALES[0].to_string(),
            fallback_locale: SUPPORTED_LOCALES[0].to_string(),
        };
        localizer
            .load_locale("en-US", FTL_EN_US)
            .expect("embedded en-US FTL must parse");
        localizer
            .load_locale("pl-PL", FTL_PL_PL)
            .expect("embedded pl-PL FTL must parse");
        localizer
    }

    /// Load a locale from FTL content.
    pub fn load_locale(&mut self, locale: &str, ftl_content: &str) -> Result<()> {
        let resource = FluentResource::try_new(ftl_content.to_string())
            .map_err(|_| CoreError::LocaleParse("failed to parse FTL content".into()))?;

        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|_| CoreError::LocaleParse(format!("invalid locale: {}", locale)))?;

        let mut bundle = FluentBundle::new(vec![lang_id]);
        // Rendered sentences go to plain-text surfaces (results line, speech),
        // so Unicode isolation marks around placeables must stay off.
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|_| CoreError::LocaleParse("failed to add resource to bundle".into()))?;

        self.bundles.insert(locale.to_string(), bundle);
        Ok(())
    }

    /// Set the current locale to an exact loaded locale id.
    pub fn set_locale(&mut self, locale: &str) -> Result<()> {
        if !self.bundles.contains_key(locale) {
            return Err(CoreError::UnknownLocale(locale.to_string()));
        }
        self.current_locale = locale.to_string();
        Ok(())
    }

    /// Negotiate the best loaded locale for the requested language codes.
    ///
    /// Bare codes match regional bundles (`pl` -> `pl-PL`); no match yields
    /// the fallback locale.
    pub fn negotiate_locale(&self, requested: &[&str]) -> String {
        let available: Vec<LanguageIdentifier> =
            self.bundles.keys().filter_map(|k| k.parse().ok()).collect();

        let requested: Vec<LanguageIdentifier> =
            requested.iter().filter_map(|l| l.parse().ok()).collect();

        let default: LanguageIdentifier =
            self.fallback_locale.parse().expect("fallback locale must be valid");

        let negotiated = negotiate_languages(
            &requested,
            &available,
            Some(&default),
            NegotiationStrategy::Filtering,
        );

        negotiated.first().map(|l| l.to_string()).unwrap_or_else(|| self.fallback_locale.clone())
    }

    /// Negotiate and activate the locale for a language code.
    pub fn set_language(&mut self, code: &str) {
        self.current_locale = self.negotiate_locale(&[code]);
    }

    /// Active locale id (e.g. `pl-PL`).
    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    /// Bare language subtag of the active locale (e.g. `pl`).
    pub fn language_code(&self) -> String {
        self.current_locale
            .parse::<LanguageIdentifier>()
            .map(|id| id.language.to_string())
            .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string())
    }

    /// Application title.
    pub fn title(&self) -> String {
        self.format("app-title", None)
    }

    /// Spin button label.
    pub fn spin_label(&self) -> String {
        self.format("spin-button", None)
    }

    /// Localized body part name.
    pub fn body_part_name(&self, id: BodyPartId) -> String {
        self.format(&format!("body-part-{}", id.as_str()), None)
    }

    /// Localized side name.
    pub fn side_name(&self, id: SideId) -> String {
        self.format(&format!("side-{}", id.as_str()), None)
    }

    /// Localized color name.
    pub fn color_name(&self, id: ColorId) -> String {
        self.format(&format!("color-{}", id.as_str()), None)
    }

    /// Render the result sentence for a selection.
    ///
    /// The `result` template may order its three placeholders freely per
    /// language; each name is substituted by argument, not by position.
    pub fn format_result(&self, body_part: BodyPartId, side: SideId, color: ColorId) -> String {
        let mut args = HashMap::new();
        args.insert("side".to_string(), FluentValue::from(self.side_name(side)));
        args.insert("bodyPart".to_string(), FluentValue::from(self.body_part_name(body_part)));
        args.insert("color".to_string(), FluentValue::from(self.color_name(color)));
        self.format("result", Some(args))
    }

    /// Format a message by key, falling back to the fallback locale.
    pub fn format(&self, key: &str, args: Option<HashMap<String, FluentValue>>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(message) = bundle.get_message(key) {
                return self.format_pattern(bundle, message, args);
            }
        }

        if self.current_locale != self.fallback_locale {
            if let Some(bundle) = self.bundles.get(&self.fallback_locale) {
                if let Some(message) = bundle.get_message(key) {
                    return self.format_pattern(bundle, message, args);
                }
            }
        }

        format!("[{}]", key)
    }

    fn format_pattern(
        &self,
        bundle: &FluentBundle<FluentResource>,
        message: FluentMessage,
        args: Option<HashMap<String, FluentValue>>,
    ) -> String {
        let pattern = message.value().expect("message has no value");
        let mut errors = vec![];

        let formatted = if let Some(hash_args) = args {
            let mut fluent_args = FluentArgs::new();
            for (key, value) in hash_args {
                fluent_args.set(key, value);
            }
            bundle.format_pattern(pattern, Some(&fluent_args), &mut errors)
        } else {
            bundle.format_pattern(pattern, None, &mut errors)
        };

        formatted.to_string()
    }
}
