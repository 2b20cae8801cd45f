use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every grid is four tiles wide; only the row count varies.
pub const COLUMNS: u8 = 4;

/// Time limit value meaning the clock never runs out.
pub const UNLIMITED: Seconds = 0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridSize {
    /// 4x4
    Small,
    /// 5x4
    Medium,
    /// 6x4
    Large,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [Self::Small, Self::Medium, Self::Large];

    pub const fn label(self) -> &'static str {
        use GridSize::*;
        match self {
            Small => "4x4",
            Medium => "5x4",
            Large => "6x4",
        }
    }

    pub const fn rows(self) -> u8 {
        use GridSize::*;
        match self {
            Small => 4,
            Medium => 5,
            Large => 6,
        }
    }

    pub const fn columns(self) -> u8 {
        COLUMNS
    }

    /// Number of tiles dealt, rounded down to an even count so every tile has a partner.
    pub const fn tile_count(self) -> TileCount {
        let total = self.rows() as TileCount * COLUMNS as TileCount;
        total - total % 2
    }

    pub const fn pair_count(self) -> TileCount {
        self.tile_count() / 2
    }

    /// Time limits offered by the picker for this size, in seconds.
    pub const fn time_limits(self) -> [Seconds; 3] {
        use GridSize::*;
        match self {
            Small => [15, 30, 60],
            Medium => [30, 60, 120],
            Large => [60, 120, 180],
        }
    }

    pub fn offers_time_limit(self, secs: Seconds) -> bool {
        self.time_limits().contains(&secs)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GridSize {
    type Err = GameError;

    fn from_str(label: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.label() == label.trim())
            .ok_or(GameError::UnknownGridSize)
    }
}

/// What the player picked before a session is dealt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub grid: GridSize,
    pub time_limit_secs: Seconds,
}

impl SessionConfig {
    pub const fn new(grid: GridSize, time_limit_secs: Seconds) -> Self {
        Self {
            grid,
            time_limit_secs,
        }
    }

    pub const fn unlimited(grid: GridSize) -> Self {
        Self::new(grid, UNLIMITED)
    }

    pub fn from_label(label: &str, time_limit_secs: Seconds) -> Result<Self> {
        Ok(Self::new(label.parse()?, time_limit_secs))
    }

    pub const fn is_unlimited(&self) -> bool {
        self.time_limit_secs == UNLIMITED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back_to_sizes() {
        for size in GridSize::ALL {
            assert_eq!(size.label().parse::<GridSize>(), Ok(size));
        }
        assert_eq!("6x6".parse::<GridSize>(), Err(GameError::UnknownGridSize));
    }

    #[test]
    fn pair_counts_follow_rows() {
        assert_eq!(GridSize::Small.tile_count(), 16);
        assert_eq!(GridSize::Small.pair_count(), 8);
        assert_eq!(GridSize::Medium.pair_count(), 10);
        assert_eq!(GridSize::Large.pair_count(), 12);
    }

    #[test]
    fn time_limits_match_picker_table() {
        assert_eq!(GridSize::Small.time_limits(), [15, 30, 60]);
        assert_eq!(GridSize::Medium.time_limits(), [30, 60, 120]);
        assert_eq!(GridSize::Large.time_limits(), [60, 120, 180]);
        assert!(GridSize::Large.offers_time_limit(180));
        assert!(!GridSize::Small.offers_time_limit(180));
    }

    #[test]
    fn from_label_keeps_time_limit() {
        let config = SessionConfig::from_label("5x4", 60).unwrap();

        assert_eq!(config.grid, GridSize::Medium);
        assert_eq!(config.time_limit_secs, 60);
        assert!(!config.is_unlimited());
        assert!(SessionConfig::unlimited(GridSize::Small).is_unlimited());
    }
}
