#![no_std]

extern crate alloc;

pub use board::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use schedule::*;
pub use session::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod board;
mod config;
mod engine;
mod error;
mod generator;
mod schedule;
mod session;
mod snapshot;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// Not accepted in the current state
    Ignored,
    /// Board dealt, start deferred by the settle delay
    Dealt,
    /// Board dealt and the clock already running
    Started,
}

impl ConfigureOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// First tile of a pair turned face up
    Revealed,
    /// Second tile turned up and the pair matched
    Matched,
    /// Second tile turned up and the pair did not match
    Mismatched,
    /// Matched the last pair on the board
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether this reveal completed a two-tile comparison.
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Matched | Self::Mismatched | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
    TimedOut,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
