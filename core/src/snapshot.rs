use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub symbol: SymbolKey,
    pub revealed: bool,
    pub matched: bool,
}

impl TileSnapshot {
    pub const fn is_face_up(&self) -> bool {
        self.revealed || self.matched
    }
}

/// Read-only view of a session handed to the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: SessionId,
    pub status: SessionStatus,
    pub grid: Option<GridSize>,
    pub tiles: Vec<TileSnapshot>,
    pub move_count: u32,
    pub elapsed_secs: Seconds,
    pub time_limit_secs: Seconds,
    pub remaining_secs: Option<Seconds>,
    /// Only set once the session is won.
    pub final_elapsed_secs: Option<Seconds>,
    pub start_pending: bool,
}

impl SessionSnapshot {
    pub fn matched_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.matched).count()
    }
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        let tiles = session
            .board()
            .iter()
            .map(|tile| TileSnapshot {
                id: tile.id,
                symbol: tile.symbol,
                revealed: session.is_revealed(tile.id),
                matched: session.is_matched(tile.id),
            })
            .collect();

        Self {
            session: session.id(),
            status: session.status(),
            grid: session.config().map(|config| config.grid),
            tiles,
            move_count: session.move_count(),
            elapsed_secs: session.elapsed_secs(),
            time_limit_secs: session.time_limit_secs(),
            remaining_secs: session.remaining_secs(),
            final_elapsed_secs: session.final_elapsed_secs(),
            start_pending: session.is_start_pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn snapshot_derives_flags_from_sets() {
        let board = Board::from_tiles(vec![
            Tile::new(TileId(1), SymbolKey(4)),
            Tile::new(TileId(0), SymbolKey(4)),
        ])
        .unwrap();
        let session = Session::dealt(SessionId(2), SessionConfig::new(GridSize::Small, 15), board);

        let snapshot = SessionSnapshot::from(&session);

        assert_eq!(snapshot.session, SessionId(2));
        assert_eq!(snapshot.status, SessionStatus::Configuring);
        assert_eq!(snapshot.grid, Some(GridSize::Small));
        assert_eq!(snapshot.tiles[0].id, TileId(1));
        assert!(snapshot.tiles.iter().all(|tile| !tile.is_face_up()));
        assert_eq!(snapshot.remaining_secs, Some(15));
        assert_eq!(snapshot.matched_count(), 0);
        assert!(snapshot.start_pending);
    }

    #[test]
    fn idle_snapshot_is_empty() {
        let snapshot = SessionSnapshot::from(&Session::idle());

        assert_eq!(snapshot.status, SessionStatus::Idle);
        assert!(snapshot.tiles.is_empty());
        assert_eq!(snapshot.grid, None);
        assert_eq!(snapshot.remaining_secs, None);
        assert!(!snapshot.start_pending);
    }
}
