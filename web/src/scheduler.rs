use concentration_core::{Scheduler, TimerEvent};
use gloo::timers::callback::{Interval, Timeout};
use std::time::Duration;
use yew::Callback;

/// Browser-backed timer source, firing engine timers back into the component as messages.
pub(crate) struct GlooScheduler {
    callback: Callback<TimerEvent>,
}

impl GlooScheduler {
    pub(crate) fn new(callback: Callback<TimerEvent>) -> Self {
        Self { callback }
    }
}

/// Live browser timer, cleared when dropped.
pub(crate) enum GlooTimer {
    Once(Timeout),
    Repeating(Interval),
}

fn to_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for GlooScheduler {
    type Handle = GlooTimer;

    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> GlooTimer {
        let callback = self.callback.clone();
        GlooTimer::Once(Timeout::new(to_millis(delay), move || {
            callback.emit(event)
        }))
    }

    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> GlooTimer {
        let callback = self.callback.clone();
        GlooTimer::Repeating(Interval::new(to_millis(period), move || {
            callback.emit(event)
        }))
    }

    fn cancel(&mut self, handle: GlooTimer) {
        match handle {
            GlooTimer::Once(timeout) => drop(timeout),
            GlooTimer::Repeating(interval) => drop(interval),
        }
    }
}
