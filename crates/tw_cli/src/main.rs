//! Twister Spinner CLI
//!
//! 터미널 기반 스핀 실행기. Drives the spin lifecycle on a real clock,
//! prints the animation ticks and the final result, and routes announce
//! events through a console speech backend.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use tw_core::geo::{CountryProvider, LookupError};
use tw_core::speech::{Announcer, SpeechBackend, Voice};
use tw_core::{detect_language, GameConfig, Localizer, SpinController, SpinEvent};

/// Environment variable consulted by the country lookup collaborator.
const COUNTRY_ENV_VAR: &str = "TWISTER_COUNTRY";

#[derive(Parser)]
#[command(name = "twister")]
#[command(about = "Spin for a body part, a side and a color", long_about = None)]
struct Cli {
    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Two-letter language code (overrides detection)
    #[arg(long)]
    language: Option<String>,

    /// Custom game configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of spins to run
    #[arg(long, default_value = "1")]
    spins: u32,

    /// Skip real-time waits and run on a virtual clock
    #[arg(long, default_value = "false")]
    fast: bool,
}

/// Country lookup backed by the environment instead of a geolocation
/// service. Unset variable counts as a lookup failure, which the engine
/// degrades to the default language.
struct EnvCountryProvider {
    var: &'static str,
}

impl CountryProvider for EnvCountryProvider {
    fn country_code(&mut self) -> std::result::Result<String, LookupError> {
        std::env::var(self.var).map_err(|e| LookupError(e.to_string()))
    }
}

/// Console speech backend: "vocalizes" by printing the sentence.
struct ConsoleSpeech;

impl SpeechBackend for ConsoleSpeech {
    fn is_available(&self) -> bool {
        true
    }

    fn voices(&self) -> Vec<Voice> {
        vec![
            Voice { name: "Console English".to_string(), lang: "en-US".to_string() },
            Voice { name: "Console Polski".to_string(), lang: "pl-PL".to_string() },
        ]
    }

    fn speak(&mut self, text: &str, locale: &str, voice: Option<&Voice>) {
        match voice {
            Some(v) => println!("🔊 [{} · {}] {}", locale, v.name, text),
            None => println!("🔊 [{}] {}", locale, text),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load_from_path(path)?,
        None => GameConfig::default(),
    };

    let language = cli.language.clone().unwrap_or_else(|| {
        let mut provider = EnvCountryProvider { var: COUNTRY_ENV_VAR };
        detect_language(&mut provider).to_string()
    });

    let seed = cli.seed.unwrap_or_else(rand::random);

    let mut localizer = Localizer::new();
    localizer.set_language(&language);
    println!("=== {} ===", localizer.title());
    println!("🌐 Language: {} ({})", language, localizer.current_locale());
    println!("🎲 Seed: {}", seed);

    let mut controller = SpinController::from_seed(config, localizer, seed)?;
    let mut announcer = Announcer::new(ConsoleSpeech);

    let start = Instant::now();
    let mut now_ms = 0u64;

    for spin_no in 1..=cli.spins {
        if cli.spins > 1 {
            println!("--- spin {}/{} ---", spin_no, cli.spins);
        }

        let events = controller.spin(now_ms);
        print_events(&controller, &mut announcer, &events);

        while let Some(deadline) = controller.next_deadline_ms() {
            if !cli.fast {
                let elapsed = start.elapsed().as_millis() as u64;
                if deadline > elapsed {
                    thread::sleep(Duration::from_millis(deadline - elapsed));
                }
            }
            now_ms = deadline;
            let events = controller.advance(now_ms);
            print_events(&controller, &mut announcer, &events);
        }
    }

    Ok(())
}

fn print_events<R: rand::Rng>(
    controller: &SpinController<R>,
    announcer: &mut Announcer<ConsoleSpeech>,
    events: &[SpinEvent],
) {
    for event in events {
        match event {
            SpinEvent::SpinStarted => {
                println!("🌀 {}...", controller.localizer().spin_label());
            }
            SpinEvent::TickColor(color) => {
                println!("   ~ {}", controller.localizer().color_name(color.id));
            }
            SpinEvent::ResultReady { rendered, .. } => {
                println!("✅ {}", rendered.text);
                println!(
                    "   background {} · {:?} contrast · icon {}{}",
                    rendered.background,
                    rendered.contrast,
                    rendered.icon.asset,
                    if rendered.icon.mirrored { " (mirrored)" } else { "" }
                );
            }
            SpinEvent::Announce { text, language } => {
                announcer.announce(text, language);
            }
            SpinEvent::DisplayCleared
            | SpinEvent::AnimationStopped
            | SpinEvent::SettleCleared => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_country_provider_reads_variable() {
        std::env::set_var("TWISTER_COUNTRY_TEST", "PL");
        let mut provider = EnvCountryProvider { var: "TWISTER_COUNTRY_TEST" };
        assert_eq!(provider.country_code().unwrap(), "PL");
        assert_eq!(detect_language(&mut provider), "pl");
        std::env::remove_var("TWISTER_COUNTRY_TEST");
    }

    #[test]
    fn test_unset_variable_falls_back_to_default() {
        let mut provider = EnvCountryProvider { var: "TWISTER_COUNTRY_UNSET" };
        assert_eq!(detect_language(&mut provider), "en");
    }

    #[test]
    fn test_console_speech_has_supported_voices() {
        let backend = ConsoleSpeech;
        assert!(backend.is_available());
        assert!(backend.voices().iter().any(|v| v.lang == "pl-PL"));
    }
}
