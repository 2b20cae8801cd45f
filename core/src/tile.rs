use serde::{Deserialize, Serialize};

use crate::*;

/// One card on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub symbol: SymbolKey,
}

impl Tile {
    pub const fn new(id: TileId, symbol: SymbolKey) -> Self {
        Self { id, symbol }
    }
}

/// Player-visible state of a tile, derived from the session's revealed and matched sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileFace {
    Hidden,
    Revealed,
    Matched,
}

impl TileFace {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

impl Default for TileFace {
    fn default() -> Self {
        Self::Hidden
    }
}
