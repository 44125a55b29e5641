//! Timer Scheduler
//!
//! Cancellable one-shot and repeating timers over an injected monotonic
//! clock. Callers pass `now` in milliseconds (a virtual clock in tests, a
//! real one in front ends) and pop due timers one at a time, so a handler can
//! cancel timers that are due but not yet delivered in the same poll window.
//!
//! Delivery order for coincident deadlines is creation order: the timer
//! scheduled first fires first.

/// Opaque timer handle.
pub type TimerId = u64;

#[derive(Debug, Clone)]
struct Timer<K> {
    id: TimerId,
    deadline_ms: u64,
    /// `Some` for repeating timers; the deadline advances by one period per
    /// delivery.
    period_ms: Option<u64>,
    kind: K,
}

/// A delivered timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFire<K> {
    pub id: TimerId,
    pub kind: K,
    /// The logical instant this fire was due, independent of poll timing.
    pub deadline_ms: u64,
}

/// Timer scheduler. `K` tags each timer with a caller-defined kind.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    next_id: TimerId,
    timers: Vec<Timer<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Scheduler<K> {
    pub fn new() -> Self {
        Self { next_id: 1, timers: Vec::new() }
    }

    /// Schedule a one-shot timer firing at `now_ms + delay_ms`.
    pub fn schedule_once(&mut self, now_ms: u64, delay_ms: u64, kind: K) -> TimerId {
        self.push(now_ms + delay_ms, None, kind)
    }

    /// Schedule a repeating timer first firing at `now_ms + period_ms`.
    pub fn schedule_repeating(&mut self, now_ms: u64, period_ms: u64, kind: K) -> TimerId {
        debug_assert!(period_ms > 0, "repeating timer needs a positive period");
        self.push(now_ms + period_ms, Some(period_ms), kind)
    }

    /// Cancel a pending timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Whether a timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.deadline_ms).min()
    }

    /// Pop the earliest timer due at or before `now_ms`.
    ///
    /// Returns `None` when nothing is due. Repeating timers are re-armed one
    /// period ahead of the delivered deadline, so a clock jump delivers one
    /// fire per elapsed period boundary.
    pub fn poll_next(&mut self, now_ms: u64) -> Option<TimerFire<K>>
    where
        K: Clone,
    {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= now_ms)
            .min_by_key(|(_, t)| (t.deadline_ms, t.id))
            .map(|(idx, _)| idx)?;

        let deadline_ms = self.timers[idx].deadline_ms;
        let id = self.timers[idx].id;
        let kind = self.timers[idx].kind.clone();

        match self.timers[idx].period_ms {
            Some(period) => self.timers[idx].deadline_ms = deadline_ms + period,
            None => {
                self.timers.swap_remove(idx);
            }
        }

        Some(TimerFire { id, kind, deadline_ms })
    }

    fn push(&mut self, deadline_ms: u64, period_ms: Option<u64>, kind: K) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer { id, deadline_ms, period_ms, kind });
        id
    }
}
