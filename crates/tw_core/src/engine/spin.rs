//! Spin Lifecycle Controller
//!
//! Explicit state machine for one spin cycle:
//!
//! ```text
//! Idle --spin()--> Spinning --8 ticks--> finalize --safety stop--> Idle
//! ```
//!
//! While spinning, a repeating tick timer cycles the background color at
//! `animation_duration / 4` cadence, purely for visual effect. The 8th tick
//! cancels the interval and finalizes: the selection engine draws the result,
//! presentation renders it, and an announce event carries the sentence to
//! speech. An independent safety timer at `2 x animation_duration` stops the
//! animation and clears the spinning flag; under a validated configuration it
//! lands exactly on the 8th tick and is delivered right after it. A fixed
//! settle delay then clears residual pulse styling.
//!
//! Re-entrant `spin()` calls during a cycle are silent no-ops. Finalization
//! happens exactly once per cycle.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ColorDef, GameConfig};
use crate::engine::scheduler::{Scheduler, TimerId};
use crate::engine::selection::{Selection, Selector};
use crate::error::Result;
use crate::i18n::Localizer;
use crate::render::{render, RenderedResult};

/// Ticks per spin cycle.
pub const TICKS_PER_SPIN: u8 = 8;

/// Settle delay after finalization. Fixed, not derived from configuration.
pub const SETTLE_DELAY_MS: u64 = 500;

/// Spin lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    Idle,
    Spinning,
}

/// Timer tags used by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpinTimer {
    Tick,
    SafetyStop,
    Settle,
}

/// Events emitted by the controller for the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinEvent {
    /// Previous result and icon cleared.
    DisplayCleared,
    /// Cycle entered the spinning state.
    SpinStarted,
    /// Visual background color step, independent of the final color.
    TickColor(ColorDef),
    /// Final selection with its render directives.
    ResultReady { selection: Selection, rendered: RenderedResult },
    /// Sentence to vocalize, with the active language code.
    Announce { text: String, language: String },
    /// Animation styling stopped (safety bound reached).
    AnimationStopped,
    /// Residual pulse styling cleared.
    SettleCleared,
}

/// Spin lifecycle controller. One instance per game surface; owns the spin
/// state, the last-selection memory and the timers. Never a global.
pub struct SpinController<R: Rng> {
    config: GameConfig,
    localizer: Localizer,
    selector: Selector,
    scheduler: Scheduler<SpinTimer>,
    rng: R,
    state: SpinState,
    tick_count: u8,
    tick_timer: Option<TimerId>,
    safety_timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    current_spin: Option<Selection>,
    events: Vec<SpinEvent>,
}

impl SpinController<ChaCha8Rng> {
    /// Controller with a deterministic RNG. Same seed, same spin sequence.
    pub fn from_seed(config: GameConfig, localizer: Localizer, seed: u64) -> Result<Self> {
        use rand::SeedableRng;
        Self::new(config, localizer, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpinController<R> {
    /// Create a controller, validating the configuration.
    pub fn new(config: GameConfig, localizer: Localizer, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            localizer,
            selector: Selector::new(),
            scheduler: Scheduler::new(),
            rng,
            state: SpinState::Idle,
            tick_count: 0,
            tick_timer: None,
            safety_timer: None,
            settle_timer: None,
            current_spin: None,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    /// Selection of the most recently finished spin.
    pub fn current_spin(&self) -> Option<&Selection> {
        self.current_spin.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Negotiate and activate the locale for a language code.
    pub fn set_language(&mut self, code: &str) {
        self.localizer.set_language(code);
    }

    /// Earliest pending timer deadline; `None` when fully settled.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.scheduler.next_deadline_ms()
    }

    /// Trigger a spin (button, spacebar, swipe). A trigger while a cycle is
    /// active is a silent no-op.
    pub fn spin(&mut self, now_ms: u64) -> Vec<SpinEvent> {
        if self.state == SpinState::Spinning {
            log::trace!("spin trigger ignored: cycle already active");
            return Vec::new();
        }

        self.state = SpinState::Spinning;
        self.tick_count = 0;
        self.current_spin = None;

        // A settle timer still pending from the previous cycle would clear
        // styling of this one; the new cycle owns its own settle.
        if let Some(id) = self.settle_timer.take() {
            self.scheduler.cancel(id);
        }

        self.events.push(SpinEvent::DisplayCleared);
        self.events.push(SpinEvent::SpinStarted);

        self.tick_timer =
            Some(self.scheduler.schedule_repeating(now_ms, self.config.tick_interval_ms(), SpinTimer::Tick));
        self.safety_timer =
            Some(self.scheduler.schedule_once(now_ms, self.config.safety_timeout_ms(), SpinTimer::SafetyStop));

        self.drain()
    }

    /// Advance the controller's clock, delivering every timer due at or
    /// before `now_ms` and returning the resulting events.
    pub fn advance(&mut self, now_ms: u64) -> Vec<SpinEvent> {
        while let Some(fire) = self.scheduler.poll_next(now_ms) {
            match fire.kind {
                SpinTimer::Tick => self.on_tick(fire.deadline_ms),
                SpinTimer::SafetyStop => self.on_safety_stop(),
                SpinTimer::Settle => self.on_settle(),
            }
        }
        self.drain()
    }

    fn on_tick(&mut self, at_ms: u64) {
        self.tick_count += 1;

        let idx = self.rng.gen_range(0..self.config.colors.len());
        self.events.push(SpinEvent::TickColor(self.config.colors[idx].clone()));

        if self.tick_count >= TICKS_PER_SPIN {
            if let Some(id) = self.tick_timer.take() {
                self.scheduler.cancel(id);
            }
            self.finalize(at_ms);
        }
    }

    /// Draw and publish the result. Runs exactly once per cycle: only the
    /// 8th tick calls it, and that tick cancels the interval first.
    fn finalize(&mut self, at_ms: u64) {
        let selection = self.selector.next_selection(&self.config, &mut self.rng);
        let rendered = render(&selection, &self.localizer, &self.config);

        self.events.push(SpinEvent::ResultReady {
            selection: selection.clone(),
            rendered: rendered.clone(),
        });
        self.events.push(SpinEvent::Announce {
            text: rendered.text,
            language: self.localizer.language_code(),
        });

        self.current_spin = Some(selection);
        self.settle_timer =
            Some(self.scheduler.schedule_once(at_ms, SETTLE_DELAY_MS, SpinTimer::Settle));
    }

    fn on_safety_stop(&mut self) {
        self.safety_timer = None;
        if let Some(id) = self.tick_timer.take() {
            self.scheduler.cancel(id);
        }
        self.events.push(SpinEvent::AnimationStopped);
        self.state = SpinState::Idle;
    }

    fn on_settle(&mut self) {
        self.settle_timer = None;
        self.events.push(SpinEvent::SettleCleared);
        self.state = SpinState::Idle;
    }

    fn drain(&mut self) -> Vec<SpinEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BodyPartId, SideId};

    fn controller(seed: u64) -> SpinController<ChaCha8Rng> {
        SpinController::from_seed(GameConfig::default(), Localizer::new(), seed).unwrap()
    }

    fn count<F: Fn(&SpinEvent) -> bool>(events: &[SpinEvent], pred: F) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    fn is_tick(e: &SpinEvent) -> bool {
        matches!(e, SpinEvent::TickColor(_))
    }

    fn is_result(e: &SpinEvent) -> bool {
        matches!(e, SpinEvent::ResultReady { .. })
    }

    #[test]
    fn test_spin_starts_cycle() {
        let mut ctrl = controller(1);
        let events = ctrl.spin(0);

        assert_eq!(events, vec![SpinEvent::DisplayCleared, SpinEvent::SpinStarted]);
        assert!(ctrl.is_spinning());
        assert_eq!(ctrl.next_deadline_ms(), Some(75));
    }

    #[test]
    fn test_full_cycle_event_sequence() {
        // Default config: tick every 75ms, safety at 600ms, settle at 1100ms.
        let mut ctrl = controller(1);
        ctrl.spin(0);

        assert!(ctrl.advance(74).is_empty());

        let first = ctrl.advance(75);
        assert_eq!(first.len(), 1);
        assert!(is_tick(&first[0]));

        let rest = ctrl.advance(600);
        assert_eq!(count(&rest, is_tick), 7);
        assert_eq!(count(&rest, is_result), 1);

        // The 8th tick finalizes before the coincident safety stop lands.
        let tail: Vec<_> = rest.iter().rev().take(3).collect();
        assert!(matches!(tail[0], SpinEvent::AnimationStopped));
        assert!(matches!(tail[1], SpinEvent::Announce { .. }));
        assert!(matches!(tail[2], SpinEvent::ResultReady { .. }));

        assert!(!ctrl.is_spinning());
        assert!(ctrl.current_spin().is_some());

        let settle = ctrl.advance(1100);
        assert_eq!(settle, vec![SpinEvent::SettleCleared]);
        assert_eq!(ctrl.next_deadline_ms(), None);
    }

    #[test]
    fn test_exactly_eight_ticks_and_one_finalize() {
        let mut ctrl = controller(2);
        ctrl.spin(0);

        // Jump far past every deadline in a single advance.
        let events = ctrl.advance(1_000_000);
        assert_eq!(count(&events, is_tick), 8);
        assert_eq!(count(&events, is_result), 1);
        assert_eq!(count(&events, |e| matches!(e, SpinEvent::Announce { .. })), 1);
        assert_eq!(count(&events, |e| matches!(e, SpinEvent::AnimationStopped)), 1);
        assert_eq!(count(&events, |e| matches!(e, SpinEvent::SettleCleared)), 1);
    }

    #[test]
    fn test_reentrant_spin_is_noop() {
        let mut ctrl = controller(3);
        ctrl.spin(0);

        assert!(ctrl.spin(100).is_empty());
        assert!(ctrl.spin(300).is_empty());

        let events = ctrl.advance(2000);
        assert_eq!(count(&events, is_result), 1, "re-entrant triggers must not add finalizes");
        assert_eq!(count(&events, is_tick), 8);
    }

    #[test]
    fn test_new_spin_after_safety_cancels_stale_settle() {
        let mut ctrl = controller(4);
        ctrl.spin(0);
        ctrl.advance(600);

        // Idle again at 600; settle from the first cycle pends at 1100.
        assert!(!ctrl.is_spinning());
        let events = ctrl.spin(700);
        assert_eq!(events, vec![SpinEvent::DisplayCleared, SpinEvent::SpinStarted]);

        // The old settle never fires; only the new cycle's does (at 1900).
        let all = ctrl.advance(5000);
        assert_eq!(count(&all, |e| matches!(e, SpinEvent::SettleCleared)), 1);
        assert_eq!(count(&all, is_result), 1);
    }

    #[test]
    fn test_consecutive_results_never_repeat_pair() {
        let mut ctrl = controller(5);
        let mut last: Option<(BodyPartId, SideId)> = None;
        let mut now = 0;

        for _ in 0..50 {
            ctrl.spin(now);
            let events = ctrl.advance(now + 2000);
            let pair = events
                .iter()
                .find_map(|e| match e {
                    SpinEvent::ResultReady { selection, .. } => {
                        Some((selection.body_part.id, selection.side.id))
                    }
                    _ => None,
                })
                .expect("cycle must produce a result");
            if let Some(previous) = last {
                assert_ne!(pair, previous);
            }
            last = Some(pair);
            now += 2000;
        }
    }

    #[test]
    fn test_announce_follows_active_language() {
        let mut ctrl = controller(6);
        ctrl.set_language("pl");
        ctrl.spin(0);

        let events = ctrl.advance(2000);
        let announce = events
            .iter()
            .find_map(|e| match e {
                SpinEvent::Announce { text, language } => Some((text.clone(), language.clone())),
                _ => None,
            })
            .unwrap();

        assert_eq!(announce.1, "pl");
        assert!(announce.0.contains(" na "), "polish template joins with 'na': {}", announce.0);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let run = |seed| {
            let mut ctrl = controller(seed);
            ctrl.spin(0);
            ctrl.advance(2000)
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.animation_duration_ms = 10; // not a multiple of 4
        assert!(SpinController::from_seed(config, Localizer::new(), 0).is_err());
    }
}
