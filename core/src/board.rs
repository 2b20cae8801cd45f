use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered sequence of tiles dealt for one session.
///
/// Positions carry no meaning to the rules: two tiles match by symbol, never by where they sit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Builds a board from externally arranged tiles, checking ids are unique and every symbol is paired.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(GameError::NoPairs);
        }
        if TileCount::try_from(tiles.len()).is_err() {
            return Err(GameError::TooManyTiles);
        }

        let mut ids = BTreeSet::new();
        let mut symbol_counts: BTreeMap<SymbolKey, usize> = BTreeMap::new();
        for tile in &tiles {
            if !ids.insert(tile.id) {
                return Err(GameError::DuplicateTileId);
            }
            *symbol_counts.entry(tile.symbol).or_default() += 1;
        }

        if symbol_counts.values().any(|&count| count % 2 != 0) {
            return Err(GameError::UnpairedSymbol);
        }

        Ok(Self::new_unchecked(tiles))
    }

    pub(crate) fn new_unchecked(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub fn symbol_of(&self, id: TileId) -> Option<SymbolKey> {
        self.tile(id).map(|tile| tile.symbol)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tile(id).is_some()
    }

    /// Ids of every tile carrying `symbol`, in board order.
    pub fn ids_with_symbol(&self, symbol: SymbolKey) -> impl Iterator<Item = TileId> + '_ {
        self.tiles
            .iter()
            .filter(move |tile| tile.symbol == symbol)
            .map(|tile| tile.id)
    }
}

impl Index<usize> for Board {
    type Output = Tile;

    fn index(&self, position: usize) -> &Self::Output {
        &self.tiles[position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn tile(id: TileCount, symbol: u16) -> Tile {
        Tile::new(TileId(id), SymbolKey(symbol))
    }

    #[test]
    fn from_tiles_accepts_shuffled_pairs() {
        let board = Board::from_tiles(vec![tile(3, 1), tile(0, 0), tile(2, 1), tile(1, 0)]).unwrap();

        assert_eq!(board.len(), 4);
        assert_eq!(board.pair_count(), 2);
        assert_eq!(board.symbol_of(TileId(2)), Some(SymbolKey(1)));
        assert_eq!(board[0].id, TileId(3));
        assert_eq!(
            board.ids_with_symbol(SymbolKey(0)).collect::<Vec<_>>(),
            vec![TileId(0), TileId(1)]
        );
    }

    #[test]
    fn from_tiles_rejects_duplicate_ids() {
        let result = Board::from_tiles(vec![tile(0, 0), tile(0, 0)]);

        assert_eq!(result, Err(GameError::DuplicateTileId));
    }

    #[test]
    fn from_tiles_rejects_unpaired_symbol() {
        let result = Board::from_tiles(vec![tile(0, 0), tile(1, 0), tile(2, 5)]);

        assert_eq!(result, Err(GameError::UnpairedSymbol));
    }

    #[test]
    fn from_tiles_rejects_empty_board() {
        assert_eq!(Board::from_tiles(Vec::new()), Err(GameError::NoPairs));
    }

    #[test]
    fn unknown_tile_has_no_symbol() {
        let board = Board::from_tiles(vec![tile(0, 0), tile(1, 0)]).unwrap();

        assert_eq!(board.symbol_of(TileId(9)), None);
        assert!(!board.contains(TileId(9)));
    }
}
