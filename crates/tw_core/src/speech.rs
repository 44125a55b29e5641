//! Speech Announcer Boundary
//!
//! Vocalizes rendered result sentences through an external speech
//! collaborator. Best effort throughout: voice matching prefers an exact
//! locale prefix, then the bare language; a backend without voices defers the
//! utterance until the voice inventory arrives; an unavailable backend is a
//! silent no-op. No error ever reaches the caller.

/// Language code to speech locale mapping.
const LANGUAGE_LOCALES: &[(&str, &str)] = &[("en", "en-US"), ("pl", "pl-PL")];

/// A voice offered by the speech backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP-47 tag reported by the backend, e.g. `pl-PL`.
    pub lang: String,
}

/// External speech synthesis collaborator.
pub trait SpeechBackend {
    /// Whether synthesis is supported at all in this environment.
    fn is_available(&self) -> bool;

    /// Currently known voices. May be empty until the backend finishes its
    /// one-time voice discovery.
    fn voices(&self) -> Vec<Voice>;

    /// Vocalize `text` for `locale`, optionally with a specific voice.
    fn speak(&mut self, text: &str, locale: &str, voice: Option<&Voice>);
}

/// Map a bare language code to the speech locale; unknown codes pass through.
pub fn language_to_locale(lang: &str) -> String {
    LANGUAGE_LOCALES
        .iter()
        .find(|(code, _)| *code == lang)
        .map(|(_, locale)| (*locale).to_string())
        .unwrap_or_else(|| lang.to_string())
}

struct PendingUtterance {
    text: String,
    lang: String,
}

/// Speech announcer with one-time voice selection.
pub struct Announcer<B: SpeechBackend> {
    backend: B,
    selected_voice: Option<Voice>,
    voice_initialized: bool,
    pending: Option<PendingUtterance>,
}

impl<B: SpeechBackend> Announcer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, selected_voice: None, voice_initialized: false, pending: None }
    }

    /// Vocalize the result text, best effort.
    ///
    /// When the backend reports no voices yet, the utterance is parked and
    /// dispatched from [`Announcer::voices_changed`]; only the most recent
    /// utterance is kept.
    pub fn announce(&mut self, text: &str, lang: &str) {
        if !self.backend.is_available() {
            log::debug!("speech synthesis not supported, skipping announcement");
            return;
        }

        if !self.voice_initialized && self.backend.voices().is_empty() {
            self.pending = Some(PendingUtterance { text: text.to_string(), lang: lang.to_string() });
            return;
        }

        self.initialize_voice(lang);
        self.speak_now(text, lang);
    }

    /// Notification that the backend's voice inventory changed.
    ///
    /// Dispatches a parked utterance once voices exist; stays parked when the
    /// inventory is still empty.
    pub fn voices_changed(&mut self) {
        if self.backend.voices().is_empty() {
            return;
        }
        if let Some(pending) = self.pending.take() {
            self.initialize_voice(&pending.lang);
            self.speak_now(&pending.text, &pending.lang);
        }
    }

    /// One-time voice selection: exact locale prefix first, bare language
    /// prefix second, none otherwise.
    fn initialize_voice(&mut self, lang: &str) {
        if self.voice_initialized {
            return;
        }
        let voices = self.backend.voices();
        if voices.is_empty() {
            return;
        }

        let locale = language_to_locale(lang);
        self.selected_voice = voices
            .iter()
            .find(|v| v.lang.starts_with(&locale))
            .or_else(|| voices.iter().find(|v| v.lang.starts_with(lang)))
            .cloned();
        self.voice_initialized = true;
    }

    fn speak_now(&mut self, text: &str, lang: &str) {
        let locale = language_to_locale(lang);
        let voice = self.selected_voice.clone();
        self.backend.speak(text, &locale, voice.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockBackend {
        available: bool,
        voices: Vec<Voice>,
        spoken: Vec<(String, String, Option<String>)>,
    }

    impl MockBackend {
        fn new(available: bool, voices: Vec<Voice>) -> Self {
            Self { available, voices, spoken: Vec::new() }
        }
    }

    impl SpeechBackend for MockBackend {
        fn is_available(&self) -> bool {
            self.available
        }

        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&mut self, text: &str, locale: &str, voice: Option<&Voice>) {
            self.spoken.push((text.to_string(), locale.to_string(), voice.map(|v| v.name.clone())));
        }
    }

    fn voice(name: &str, lang: &str) -> Voice {
        Voice { name: name.to_string(), lang: lang.to_string() }
    }

    #[test]
    fn test_unavailable_backend_is_silent() {
        let mut announcer = Announcer::new(MockBackend::new(false, vec![voice("a", "en-US")]));
        announcer.announce("Left Hand on Red", "en");
        assert!(announcer.backend.spoken.is_empty());
    }

    #[test]
    fn test_exact_locale_voice_preferred() {
        let voices = vec![voice("bare", "pl"), voice("exact", "pl-PL")];
        let mut announcer = Announcer::new(MockBackend::new(true, voices));
        announcer.announce("Lewa Ręka na Czerwony", "pl");

        assert_eq!(announcer.backend.spoken.len(), 1);
        let (text, locale, voice_name) = &announcer.backend.spoken[0];
        assert_eq!(text, "Lewa Ręka na Czerwony");
        assert_eq!(locale, "pl-PL");
        assert_eq!(voice_name.as_deref(), Some("exact"));
    }

    #[test]
    fn test_bare_language_voice_fallback() {
        let voices = vec![voice("other", "en-GB"), voice("bare", "pl")];
        let mut announcer = Announcer::new(MockBackend::new(true, voices));
        announcer.announce("Lewa Ręka na Czerwony", "pl");

        assert_eq!(announcer.backend.spoken[0].2.as_deref(), Some("bare"));
    }

    #[test]
    fn test_no_matching_voice_still_speaks() {
        let voices = vec![voice("korean", "ko-KR")];
        let mut announcer = Announcer::new(MockBackend::new(true, voices));
        announcer.announce("Left Hand on Red", "en");

        assert_eq!(announcer.backend.spoken.len(), 1);
        assert_eq!(announcer.backend.spoken[0].2, None);
    }

    #[test]
    fn test_utterance_deferred_until_voices_arrive() {
        let mut announcer = Announcer::new(MockBackend::new(true, vec![]));
        announcer.announce("Left Hand on Red", "en");
        assert!(announcer.backend.spoken.is_empty());

        announcer.backend.voices = vec![voice("us", "en-US")];
        announcer.voices_changed();

        assert_eq!(announcer.backend.spoken.len(), 1);
        assert_eq!(announcer.backend.spoken[0].2.as_deref(), Some("us"));

        // Voice selection is one-time; later announcements speak directly.
        announcer.announce("Right Foot on Blue", "en");
        assert_eq!(announcer.backend.spoken.len(), 2);
    }

    #[test]
    fn test_stays_silent_when_voices_never_arrive() {
        let mut announcer = Announcer::new(MockBackend::new(true, vec![]));
        announcer.announce("Left Hand on Red", "en");
        announcer.voices_changed();
        assert!(announcer.backend.spoken.is_empty());
    }

    #[test]
    fn test_unknown_language_locale_passthrough() {
        assert_eq!(language_to_locale("en"), "en-US");
        assert_eq!(language_to_locale("pl"), "pl-PL");
        assert_eq!(language_to_locale("de"), "de");
    }
}
