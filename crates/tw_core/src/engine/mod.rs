//! Spin Engine
//!
//! The stateful half of the crate: timer scheduling, the non-repeat
//! selection draw, and the spin lifecycle controller that ties them to
//! presentation and speech.

pub mod scheduler;
pub mod selection;
pub mod spin;

pub use scheduler::{Scheduler, TimerFire, TimerId};
pub use selection::{Selection, Selector};
pub use spin::{SpinController, SpinEvent, SpinState, SETTLE_DELAY_MS, TICKS_PER_SPIN};
