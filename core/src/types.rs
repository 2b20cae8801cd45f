use core::fmt;
use serde::{Deserialize, Serialize};

/// Whole seconds, used for the session clock and time limits.
pub type Seconds = u32;

/// Count type used for pairs and tile totals.
pub type TileCount = u16;

/// Stable ordinal of a tile within one board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub TileCount);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque symbol identifier shared by the two tiles of a pair.
///
/// The engine only compares keys; mapping a key to something drawable is up to the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolKey(pub u16);

/// Generation number of a session, bumped on every configure and restart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}
