use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown grid size, expected one of 4x4, 5x4 or 6x4")]
    UnknownGridSize,
    #[error("A board needs at least one pair")]
    NoPairs,
    #[error("Symbol pool is empty")]
    EmptySymbolPool,
    #[error("Too many tiles for one board")]
    TooManyTiles,
    #[error("Tile ids on the board are not unique")]
    DuplicateTileId,
    #[error("A symbol appears on an odd number of tiles")]
    UnpairedSymbol,
}

pub type Result<T> = core::result::Result<T, GameError>;
