use alloc::collections::BTreeSet;
use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Idle -> Configuring
/// - Configuring -> Running
/// - Running -> Won
/// - Running -> Lost
/// - Running | Won | Lost -> Configuring
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Nothing picked yet
    Idle,
    /// Picking a grid, or dealt and waiting out the settle delay
    Configuring,
    /// Clock running, tiles accept reveals
    Running,
    /// Every tile matched in time
    Won,
    /// Clock ran out first
    Lost,
}

impl SessionStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn accepts_configure(self) -> bool {
        matches!(self, Self::Idle | Self::Configuring)
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Ids face up right now, in the order they were revealed.
pub type RevealedIds = SmallVec<[TileId; 2]>;

/// One play-through, from dealing the board to winning or losing.
///
/// All rule transitions live here and are applied in one step each; scheduling the timers that drive them is the
/// engine's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    status: SessionStatus,
    config: Option<SessionConfig>,
    board: Board,
    revealed: RevealedIds,
    matched: BTreeSet<TileId>,
    move_count: Saturating<u32>,
    elapsed_secs: Saturating<Seconds>,
    final_elapsed_secs: Option<Seconds>,
}

impl Session {
    pub fn idle() -> Self {
        Self::blank(SessionId::default(), SessionStatus::Idle)
    }

    /// Fresh session with no board, waiting for the player to pick a grid.
    pub fn configuring(id: SessionId) -> Self {
        Self::blank(id, SessionStatus::Configuring)
    }

    /// Session with a dealt board, waiting to be started.
    pub fn dealt(id: SessionId, config: SessionConfig, board: Board) -> Self {
        Self {
            config: Some(config),
            board,
            ..Self::configuring(id)
        }
    }

    fn blank(id: SessionId, status: SessionStatus) -> Self {
        Self {
            id,
            status,
            config: None,
            board: Board::default(),
            revealed: SmallVec::new(),
            matched: BTreeSet::new(),
            move_count: Saturating(0),
            elapsed_secs: Saturating(0),
            final_elapsed_secs: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn config(&self) -> Option<SessionConfig> {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn revealed(&self) -> &[TileId] {
        &self.revealed
    }

    pub fn matched(&self) -> &BTreeSet<TileId> {
        &self.matched
    }

    pub fn move_count(&self) -> u32 {
        self.move_count.0
    }

    pub fn elapsed_secs(&self) -> Seconds {
        self.elapsed_secs.0
    }

    pub fn time_limit_secs(&self) -> Seconds {
        self.config.map_or(UNLIMITED, |config| config.time_limit_secs)
    }

    /// Seconds left on the clock, `None` when the session has no time limit.
    pub fn remaining_secs(&self) -> Option<Seconds> {
        match self.time_limit_secs() {
            UNLIMITED => None,
            limit => Some(limit.saturating_sub(self.elapsed_secs())),
        }
    }

    /// Elapsed time captured at the moment of winning.
    pub fn final_elapsed_secs(&self) -> Option<Seconds> {
        self.final_elapsed_secs
    }

    /// Dealt but not yet running.
    pub fn is_start_pending(&self) -> bool {
        self.status == SessionStatus::Configuring && !self.board.is_empty()
    }

    pub fn is_fully_matched(&self) -> bool {
        !self.board.is_empty() && self.matched.len() == self.board.len()
    }

    pub fn is_revealed(&self, id: TileId) -> bool {
        self.revealed.contains(&id)
    }

    pub fn is_matched(&self, id: TileId) -> bool {
        self.matched.contains(&id)
    }

    pub fn face_of(&self, id: TileId) -> TileFace {
        if self.is_matched(id) {
            TileFace::Matched
        } else if self.is_revealed(id) {
            TileFace::Revealed
        } else {
            TileFace::Hidden
        }
    }

    pub(crate) fn begin(&mut self) -> bool {
        if !self.is_start_pending() {
            return false;
        }
        self.status = SessionStatus::Running;
        log::debug!("session {} running", self.id);
        true
    }

    pub(crate) fn reveal(&mut self, id: TileId) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.status.is_running() {
            return NoChange;
        }
        let Some(symbol) = self.board.symbol_of(id) else {
            log::debug!("ignoring reveal of unknown tile {}", id);
            return NoChange;
        };
        if self.is_matched(id) || self.is_revealed(id) || self.revealed.len() >= 2 {
            return NoChange;
        }

        self.revealed.push(id);
        log::trace!("revealed {} ({:?})", id, symbol);

        let first = match self.revealed.as_slice() {
            &[first, _] => first,
            _ => return Revealed,
        };

        self.move_count += 1;
        if self.board.symbol_of(first) != Some(symbol) {
            return Mismatched;
        }

        self.matched.insert(first);
        self.matched.insert(id);
        if self.check_win() { Won } else { Matched }
    }

    /// Flips every revealed tile back down; matched tiles stay visible through the matched set.
    pub(crate) fn clear_revealed(&mut self) -> bool {
        if self.revealed.is_empty() {
            return false;
        }
        self.revealed.clear();
        true
    }

    pub(crate) fn tick(&mut self) -> TickOutcome {
        if !self.status.is_running() {
            return TickOutcome::NoChange;
        }

        self.elapsed_secs += 1;

        // a finished board never times out
        if self.check_win() {
            return TickOutcome::Ticked;
        }

        let limit = self.time_limit_secs();
        if limit != UNLIMITED && self.elapsed_secs() >= limit {
            self.status = SessionStatus::Lost;
            log::debug!(
                "session {} lost after {}s, {} of {} tiles matched",
                self.id,
                self.elapsed_secs(),
                self.matched.len(),
                self.board.len()
            );
            return TickOutcome::TimedOut;
        }

        TickOutcome::Ticked
    }

    fn check_win(&mut self) -> bool {
        if !self.status.is_running() || !self.is_fully_matched() {
            return false;
        }
        self.final_elapsed_secs = Some(self.elapsed_secs());
        self.status = SessionStatus::Won;
        log::debug!(
            "session {} won in {}s with {} moves",
            self.id,
            self.elapsed_secs(),
            self.move_count()
        );
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::idle()
    }
}
