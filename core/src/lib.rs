//! Game-state engine for Minesweeper: mine placement, flood-fill reveal, flag bookkeeping and win/loss detection.
//!
//! A presentation layer owns a [`Board`], forwards player input as [`Board::reveal`] and [`Board::toggle_flag`]
//! commands and renders the result through the read-only queries.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod config;
mod error;
mod generator;
mod tile;
mod types;

/// Fixed placement of mines on a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutSnapshot")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct MineLayoutSnapshot {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<MineLayoutSnapshot> for MineLayout {
    type Error = GameError;

    fn try_from(snapshot: MineLayoutSnapshot) -> Result<Self> {
        let (size_x, size_y) = snapshot.mine_mask.dim();
        let layout = Self::from_mine_mask(snapshot.mine_mask);
        let fits = Coord::try_from(size_x).is_ok() && Coord::try_from(size_y).is_ok();
        if !fits || layout.mine_count != snapshot.mine_count {
            let (width, height) = layout.size();
            return Err(GameError::InvalidConfiguration {
                width,
                height,
                mines: snapshot.mine_count,
            });
        }
        layout.config().validate()?;
        Ok(layout)
    }
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines exactly at `mine_coords`, repeated coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds {
                    x: coords.0,
                    y: coords.1,
                });
            }
            if core::mem::replace(&mut mine_mask[coords.to_nd_index()], true) {
                log::warn!("Duplicate mine coordinates {:?} ignored", coords);
            }
        }

        let layout = Self::from_mine_mask(mine_mask);
        layout.config().validate()?;
        Ok(layout)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (
            x.try_into().unwrap_or(Coord::MAX),
            y.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Safe cell opened, together with any zero-count region around it.
    Opened,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Exploded | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_from_coords_counts_unique_mines() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(0, 0), (2, 1), (0, 0)]).unwrap();

        assert_eq!(layout.size(), (3, 2));
        assert_eq!(layout.mine_count(), 2);
        assert!(layout[(0, 0)]);
        assert!(layout.contains_mine((2, 1)));
        assert!(!layout.contains_mine((1, 1)));
        assert!(!layout.contains_mine((9, 9)));
        assert_eq!(layout.config(), GameConfig::new((3, 2), 2).unwrap());
    }

    #[test]
    fn layout_rejects_out_of_range_coords() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds { x: 2, y: 0 })
        );
    }

    #[test]
    fn layout_rejects_full_board() {
        assert!(matches!(
            MineLayout::from_mine_coords((2, 1), &[(0, 0), (1, 0)]),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn layout_serializes_to_json() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 0)]).unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        let back: MineLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn layout_with_wrong_mine_count_is_rejected() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 0)]).unwrap();
        let mut json = serde_json::to_value(&layout).unwrap();
        json["mine_count"] = 3.into();

        assert!(serde_json::from_value::<MineLayout>(json).is_err());
    }

    #[test]
    fn outcomes_report_updates() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Opened.has_update());
        assert!(RevealOutcome::Won.is_over());
        assert!(!RevealOutcome::Opened.is_over());
        assert!(MarkOutcome::Changed.has_update());
        assert!(!MarkOutcome::NoChange.has_update());
    }
}
