use core::fmt;
use core::time::Duration;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::RngCore;

use crate::*;

/// Handles of the timers scheduled for the current session, one slot each.
struct SessionTimers<H> {
    start: Option<H>,
    tick: Option<H>,
    clear: Option<H>,
}

impl<H> Default for SessionTimers<H> {
    fn default() -> Self {
        Self {
            start: None,
            tick: None,
            clear: None,
        }
    }
}

/// Owns the current session and the timers driving it.
///
/// Intents from the renderer come in through [`configure`](Self::configure), [`reveal_tile`](Self::reveal_tile) and
/// [`restart`](Self::restart); timers the engine scheduled come back through [`handle_timer`](Self::handle_timer).
/// Calls that make no sense in the current state are ignored rather than reported. The engine is not `Sync`-aware: a
/// multi-threaded host keeps it behind a single lock, since reveals and ticks both rewrite the session.
pub struct Engine<S: Scheduler> {
    scheduler: S,
    timing: Timing,
    pool: SymbolPool,
    rng: SmallRng,
    last_session: SessionId,
    session: Session,
    timers: SessionTimers<S::Handle>,
}

impl<S: Scheduler> Engine<S> {
    pub fn new(scheduler: S, seed: u64) -> Self {
        Self::with_options(scheduler, seed, Timing::default(), SymbolPool::default())
    }

    pub fn with_options(scheduler: S, seed: u64, timing: Timing, pool: SymbolPool) -> Self {
        Self {
            scheduler,
            timing,
            pool,
            rng: SmallRng::seed_from_u64(seed),
            last_session: SessionId::default(),
            session: Session::idle(),
            timers: SessionTimers::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&self.session)
    }

    /// Deals a random board for `config` and schedules the clock to start.
    pub fn configure(&mut self, config: SessionConfig) -> ConfigureOutcome {
        let generator = RandomBoardGenerator::new(self.rng.next_u64(), self.pool.clone());
        self.configure_with(config, generator)
    }

    pub fn configure_label(&mut self, label: &str, time_limit_secs: Seconds) -> ConfigureOutcome {
        match SessionConfig::from_label(label, time_limit_secs) {
            Ok(config) => self.configure(config),
            Err(err) => {
                log::warn!("ignoring configure with {:?}: {}", label, err);
                ConfigureOutcome::Ignored
            }
        }
    }

    /// Like [`configure`](Self::configure), dealing the board from `generator` instead.
    pub fn configure_with<G: BoardGenerator>(
        &mut self,
        config: SessionConfig,
        generator: G,
    ) -> ConfigureOutcome {
        if !self.session.status().accepts_configure() {
            log::debug!("ignoring configure while {:?}", self.session.status());
            return ConfigureOutcome::Ignored;
        }

        let board = match generator.generate(config.grid.pair_count()) {
            Ok(board) => board,
            Err(err) => {
                log::error!("could not deal a {} board: {}", config.grid, err);
                return ConfigureOutcome::Ignored;
            }
        };

        self.cancel_all();
        let id = self.next_session_id();
        self.session = Session::dealt(id, config, board);
        log::debug!(
            "session {} dealt {} tiles, limit {}s",
            id,
            self.session.board().len(),
            config.time_limit_secs
        );

        if self.timing.settle.is_zero() {
            self.begin();
            ConfigureOutcome::Started
        } else {
            let event = TimerEvent::new(id, TimerKind::Start);
            self.timers.start = Some(self.scheduler.schedule_once(self.timing.settle, event));
            ConfigureOutcome::Dealt
        }
    }

    pub fn reveal_tile(&mut self, id: TileId) -> RevealOutcome {
        let outcome = self.session.reveal(id);

        if outcome.is_comparison() {
            Self::cancel(&mut self.scheduler, &mut self.timers.clear);
            let event = TimerEvent::new(self.session.id(), TimerKind::Clear);
            self.timers.clear = Some(self.scheduler.schedule_once(self.timing.clear, event));
        }
        if self.session.status().is_finished() {
            self.finish();
        }

        outcome
    }

    /// Advances the session clock by one second.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        if self.session.status().is_finished() {
            self.finish();
        }
        outcome
    }

    /// Flips the compared pair back down.
    pub fn clear_revealed(&mut self) -> bool {
        Self::cancel(&mut self.scheduler, &mut self.timers.clear);
        self.session.clear_revealed()
    }

    /// Abandons the current session and goes back to picking a grid.
    pub fn restart(&mut self) -> bool {
        let status = self.session.status();
        let restartable = match status {
            SessionStatus::Idle => false,
            SessionStatus::Configuring => self.session.is_start_pending(),
            SessionStatus::Running | SessionStatus::Won | SessionStatus::Lost => true,
        };
        if !restartable {
            log::debug!("ignoring restart while {:?}", status);
            return false;
        }

        self.cancel_all();
        let id = self.next_session_id();
        log::debug!("session {} restarted from {:?} as {}", self.session.id(), status, id);
        self.session = Session::configuring(id);
        true
    }

    /// Applies a fired timer; events from a replaced session are dropped.
    pub fn handle_timer(&mut self, event: TimerEvent) -> bool {
        if event.session != self.session.id() {
            log::trace!("dropping stale {:?} for {}", event.kind, event.session);
            return false;
        }

        match event.kind {
            TimerKind::Start => {
                self.timers.start = None;
                self.begin()
            }
            TimerKind::Tick => self.tick().has_update(),
            TimerKind::Clear => {
                self.timers.clear = None;
                self.session.clear_revealed()
            }
        }
    }

    fn begin(&mut self) -> bool {
        if !self.session.begin() {
            return false;
        }
        Self::cancel(&mut self.scheduler, &mut self.timers.tick);
        let event = TimerEvent::new(self.session.id(), TimerKind::Tick);
        self.timers.tick = Some(self.scheduler.schedule_repeating(self.timing.tick, event));
        true
    }

    /// Leaves `Running`: stops every timer and releases tiles the cancelled clear would have flipped.
    fn finish(&mut self) {
        self.cancel_all();
        self.session.clear_revealed();
    }

    fn cancel_all(&mut self) {
        let Self {
            scheduler, timers, ..
        } = self;
        Self::cancel(scheduler, &mut timers.start);
        Self::cancel(scheduler, &mut timers.tick);
        Self::cancel(scheduler, &mut timers.clear);
    }

    fn cancel(scheduler: &mut S, slot: &mut Option<S::Handle>) {
        if let Some(handle) = slot.take() {
            scheduler.cancel(handle);
        }
    }

    fn next_session_id(&mut self) -> SessionId {
        self.last_session = self.last_session.next();
        self.last_session
    }
}

impl Engine<VirtualClock> {
    /// Moves the virtual clock forward by `by`, delivering every timer that comes due on the way.
    ///
    /// Returns how many events were delivered, stale ones included.
    pub fn advance(&mut self, by: Duration) -> usize {
        let deadline = self.scheduler.now().saturating_add(by);
        let mut delivered = 0;
        while let Some(event) = self.scheduler.pop_due(deadline) {
            self.handle_timer(event);
            delivered += 1;
        }
        self.scheduler.advance_to(deadline);
        delivered
    }
}

impl<S: Scheduler> fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("timing", &self.timing)
            .field("session", &self.session)
            .field("start_scheduled", &self.timers.start.is_some())
            .field("tick_scheduled", &self.timers.tick.is_some())
            .field("clear_scheduled", &self.timers.clear.is_some())
            .finish_non_exhaustive()
    }
}
