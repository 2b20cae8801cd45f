use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Delays the engine schedules its deferred work with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Pause between dealing a board and the clock starting.
    pub settle: Duration,
    /// How long a compared pair stays face up.
    pub clear: Duration,
    /// Period of the session clock.
    pub tick: Duration,
}

impl Timing {
    pub const DEFAULT_SETTLE: Duration = Duration::from_millis(800);
    pub const DEFAULT_CLEAR: Duration = Duration::from_millis(1000);
    pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

    /// Default delays, but the clock starts as soon as a board is dealt.
    pub const fn immediate_start() -> Self {
        Self {
            settle: Duration::ZERO,
            ..Self::DEFAULT
        }
    }

    pub const DEFAULT: Self = Self {
        settle: Self::DEFAULT_SETTLE,
        clear: Self::DEFAULT_CLEAR,
        tick: Self::DEFAULT_TICK,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Settle delay elapsed, start the clock
    Start,
    /// One second of play elapsed
    Tick,
    /// Flip the compared pair back down
    Clear,
}

/// What a timer delivers back to the engine when it fires.
///
/// Events are tagged with the session they were scheduled under; the engine drops any event whose session has since
/// been replaced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerEvent {
    pub session: SessionId,
    pub kind: TimerKind,
}

impl TimerEvent {
    pub const fn new(session: SessionId, kind: TimerKind) -> Self {
        Self { session, kind }
    }
}

/// Host-provided timer source.
///
/// Fired events must be handed back to [`Engine::handle_timer`]. Cancelling consumes the handle, after which the
/// event must not be delivered.
pub trait Scheduler {
    type Handle;

    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> Self::Handle;

    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug, PartialEq)]
struct PendingTimer {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    event: TimerEvent,
}

/// Deterministic scheduler driven by explicit calls instead of wall time.
///
/// Timers due at the same instant fire in the order they were scheduled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VirtualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl VirtualClock {
    const MIN_PERIOD: Duration = Duration::from_millis(1);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|timer| timer.event.kind == kind)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.due).min()
    }

    /// Fires the earliest timer due no later than `deadline`, moving the clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerEvent> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= deadline)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;

        let timer = &mut self.pending[index];
        self.now = self.now.max(timer.due);
        let event = timer.event;
        // a periodic timer whose next due time overflows is retired
        match timer.period.and_then(|period| timer.due.checked_add(period)) {
            Some(next) => timer.due = next,
            None => {
                self.pending.swap_remove(index);
            }
        }
        Some(event)
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }

    fn push(&mut self, due: Duration, period: Option<Duration>, event: TimerEvent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            due,
            period,
            event,
        });
        id
    }
}

impl Scheduler for VirtualClock {
    type Handle = TimerId;

    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TimerId {
        self.push(self.now.saturating_add(delay), None, event)
    }

    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TimerId {
        let period = period.max(Self::MIN_PERIOD);
        self.push(self.now.saturating_add(period), Some(period), event)
    }

    fn cancel(&mut self, handle: TimerId) {
        self.pending.retain(|timer| timer.id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: TimerKind) -> TimerEvent {
        TimerEvent::new(SessionId(1), kind)
    }

    #[test]
    fn once_timer_fires_a_single_time() {
        let mut clock = VirtualClock::new();
        clock.schedule_once(Duration::from_millis(800), event(TimerKind::Start));

        assert_eq!(clock.pop_due(Duration::from_millis(799)), None);
        assert_eq!(
            clock.pop_due(Duration::from_millis(800)),
            Some(event(TimerKind::Start))
        );
        assert_eq!(clock.pop_due(Duration::from_secs(10)), None);
        assert_eq!(clock.now(), Duration::from_millis(800));
    }

    #[test]
    fn repeating_timer_reschedules_itself() {
        let mut clock = VirtualClock::new();
        clock.schedule_repeating(Duration::from_secs(1), event(TimerKind::Tick));

        let deadline = Duration::from_millis(3500);
        let mut fired = 0;
        while clock.pop_due(deadline).is_some() {
            fired += 1;
        }

        assert_eq!(fired, 3);
        assert_eq!(clock.next_due(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut clock = VirtualClock::new();
        clock.schedule_once(Duration::from_secs(1), event(TimerKind::Clear));
        clock.schedule_repeating(Duration::from_secs(1), event(TimerKind::Tick));

        let deadline = Duration::from_secs(1);
        assert_eq!(clock.pop_due(deadline), Some(event(TimerKind::Clear)));
        assert_eq!(clock.pop_due(deadline), Some(event(TimerKind::Tick)));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut clock = VirtualClock::new();
        let handle = clock.schedule_once(Duration::from_secs(1), event(TimerKind::Clear));

        clock.cancel(handle);
        clock.cancel(handle);

        assert_eq!(clock.pending_count(), 0);
        assert!(!clock.is_pending(TimerKind::Clear));
        assert_eq!(clock.pop_due(Duration::from_secs(5)), None);
    }

    #[test]
    fn far_future_timers_saturate_instead_of_overflowing() {
        let mut clock = VirtualClock::new();
        clock.advance_to(Duration::from_secs(5));
        clock.schedule_once(Duration::MAX, event(TimerKind::Clear));
        clock.schedule_repeating(Duration::MAX, event(TimerKind::Tick));

        assert_eq!(clock.next_due(), Some(Duration::MAX));
        assert_eq!(clock.pop_due(Duration::MAX), Some(event(TimerKind::Clear)));
        assert_eq!(clock.pop_due(Duration::MAX), Some(event(TimerKind::Tick)));
        assert_eq!(clock.pop_due(Duration::MAX), None);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn immediate_start_keeps_other_delays() {
        let timing = Timing::immediate_start();

        assert_eq!(timing.settle, Duration::ZERO);
        assert_eq!(timing.clear, Timing::DEFAULT_CLEAR);
        assert_eq!(Timing::default().settle, Duration::from_millis(800));
    }
}
