use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, pair_count: TileCount) -> Result<Board>;
}

/// Deduplicated, non-empty set of symbol keys boards are dealt from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolPool {
    keys: Vec<SymbolKey>,
}

impl SymbolPool {
    /// Size of the default pool, one key per icon the shell knows how to draw.
    pub const DEFAULT_SIZE: u16 = 15;

    pub fn new(keys: impl IntoIterator<Item = SymbolKey>) -> Result<Self> {
        let keys: Vec<SymbolKey> = keys
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if keys.is_empty() {
            return Err(GameError::EmptySymbolPool);
        }
        Ok(Self { keys })
    }

    /// Pool of keys `0..count`.
    pub fn range(count: u16) -> Result<Self> {
        Self::new((0..count).map(SymbolKey))
    }

    pub fn keys(&self) -> &[SymbolKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self {
            keys: (0..Self::DEFAULT_SIZE).map(SymbolKey).collect(),
        }
    }
}

/// Deals `2 * pair_count` tiles from `pool` and shuffles them.
///
/// Symbols are drawn without replacement. When the pool holds fewer distinct keys than `pair_count`, the rest are
/// padded by drawing from the pool again with replacement, so a padded symbol ends up on four (or more) tiles. Ids are
/// assigned in pair order before the shuffle.
pub fn generate_board<R: Rng + ?Sized>(
    pair_count: TileCount,
    pool: &SymbolPool,
    rng: &mut R,
) -> Result<Board> {
    if pair_count == 0 {
        return Err(GameError::NoPairs);
    }
    pair_count.checked_mul(2).ok_or(GameError::TooManyTiles)?;

    let wanted = usize::from(pair_count);
    let distinct = wanted.min(pool.len());

    let mut keys = pool.keys().to_vec();
    let (picked, _) = keys.partial_shuffle(&mut *rng, distinct);
    let mut symbols: Vec<SymbolKey> = picked.to_vec();

    if distinct < wanted {
        log::warn!(
            "symbol pool too small, reusing symbols, requested {} pairs but only {} distinct symbols",
            wanted,
            distinct
        );
        symbols.extend((distinct..wanted).filter_map(|_| pool.keys().choose(&mut *rng).copied()));
    }

    let mut tiles: Vec<Tile> = symbols
        .iter()
        .enumerate()
        .flat_map(|(pair, &symbol)| {
            let first = (pair as TileCount) * 2;
            [
                Tile::new(TileId(first), symbol),
                Tile::new(TileId(first + 1), symbol),
            ]
        })
        .collect();
    tiles.shuffle(&mut *rng);

    Ok(Board::new_unchecked(tiles))
}

/// Generator that hands out a board arranged ahead of time.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetBoardGenerator {
    board: Board,
}

impl PresetBoardGenerator {
    pub fn new(board: Board) -> Self {
        Self { board }
    }
}

impl BoardGenerator for PresetBoardGenerator {
    fn generate(self, pair_count: TileCount) -> Result<Board> {
        if self.board.pair_count() != usize::from(pair_count) {
            log::warn!(
                "preset board size mismatch, requested {} pairs, preset has {}",
                pair_count,
                self.board.pair_count()
            );
        }
        Ok(self.board)
    }
}
