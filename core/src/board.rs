use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Exploded
/// - InProgress -> Won
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    /// A mine was revealed
    Exploded,
    /// Every safe cell is open
    Won,
}

impl GameState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Exploded | Self::Won)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game, from the first click until it ends in a win or an explosion.
///
/// Cells are addressed by `(x, y)` with `0 <= x < width` and `0 <= y < height`. Once the game is over every command
/// is rejected with [`GameError::GameAlreadyOver`], a new game needs a new board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct BoardSnapshot {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(BoardSnapshot { cells, mine_count }: BoardSnapshot) -> Result<Self> {
        let (size_x, size_y) = cells.dim();
        let invalid = GameError::InvalidConfiguration {
            width: size_x.try_into().unwrap_or(Coord::MAX),
            height: size_y.try_into().unwrap_or(Coord::MAX),
            mines: mine_count,
        };
        let (Ok(width), Ok(height)) = (Coord::try_from(size_x), Coord::try_from(size_y)) else {
            return Err(invalid);
        };
        GameConfig::new((width, height), mine_count)?;

        let mined = cells.iter().filter(|cell| cell.mined).count();
        if mined != usize::from(mine_count) {
            log::warn!(
                "Rejected board snapshot declaring {} mines with {} mined cells",
                mine_count,
                mined
            );
            return Err(invalid);
        }
        if cells.iter().any(|cell| cell.opened && cell.flagged) {
            log::warn!("Rejected board snapshot with a flagged open cell");
            return Err(invalid);
        }

        Ok(Self { cells, mine_count })
    }
}

/// Moore neighborhood offsets in row-major order.
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Board {
    /// New game with a fresh random layout.
    pub fn new(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        Self::with_config(GameConfig::new((width, height), mine_count)?)
    }

    pub fn with_config(config: GameConfig) -> Result<Self> {
        Self::generate(config, RandomMineLayoutGenerator::from_entropy())
    }

    /// Same seed and config always give the same layout.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::generate(config, RandomMineLayoutGenerator::new(seed))
    }

    pub fn generate(config: GameConfig, generator: impl MineLayoutGenerator) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_layout(generator.generate(config)))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let cells = layout.mine_mask().map(|&mined| Cell {
            mined,
            ..Default::default()
        });
        let mine_count = layout.mine_count();
        let (width, height) = layout.size();
        log::debug!(
            "New {}x{} board with {} mines",
            width,
            height,
            mine_count
        );

        Self { cells, mine_count }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (
            x.try_into().unwrap_or(Coord::MAX),
            y.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Mines left to flag as shown on the counter, may go below zero.
    pub fn remaining_mines(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count() as isize)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cells(|cell| cell.flagged)
    }

    pub fn opened_count(&self) -> CellCount {
        self.count_cells(|cell| cell.opened)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                x: coords.0,
                y: coords.1,
            })
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// What the player should see at `coords`.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        use CellView::*;

        let cell = self.cell(coords)?;
        Ok(match cell {
            Cell {
                opened: true,
                mined: true,
                ..
            } => Exploded,
            Cell { opened: true, .. } => Revealed(self.count_mines_around(coords)),
            Cell {
                flagged: true,
                mined: false,
                ..
            } if self.is_over() => IncorrectFlag,
            Cell { flagged: true, .. } => Flagged,
            _ => Hidden,
        })
    }

    /// All positions on the board, `x` major.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (size_x, size_y) = self.size();
        (0..size_x).flat_map(move |x| (0..size_y).map(move |y| (x, y)))
    }

    /// In-bounds neighbors of `coords`, in row-major offset order.
    /// Positions outside the board are never produced, even for an out-of-range `coords`.
    pub fn coords_around(&self, (x, y): Coord2) -> impl Iterator<Item = Coord2> + use<> {
        let (size_x, size_y) = self.size();
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let next_x = x.checked_add_signed(dx).filter(|&next_x| next_x < size_x)?;
            let next_y = y.checked_add_signed(dy).filter(|&next_y| next_y < size_y)?;
            Some((next_x, next_y))
        })
    }

    pub fn mines_around_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_mines_around(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_over()?;

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.opened {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        let flagged = cell.flagged;
        log::debug!(
            "Flag at {:?} set to {}, {} mines remaining",
            coords,
            flagged,
            self.remaining_mines()
        );
        Ok(MarkOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_over()?;

        if !self.cells[coords.to_nd_index()].can_open() {
            return Ok(RevealOutcome::NoChange);
        }

        let opened = self.open_region(coords);

        Ok(if self.cells[coords.to_nd_index()].mined {
            log::debug!("Mine hit at {:?}", coords);
            RevealOutcome::Exploded
        } else if self.has_won() {
            log::debug!("Won after opening {} cells at {:?}", opened, coords);
            RevealOutcome::Won
        } else {
            log::debug!("Opened {} cells at {:?}", opened, coords);
            RevealOutcome::Opened
        })
    }

    /// Position of a revealed mine, if any.
    pub fn explosion_position(&self) -> Option<Coord2> {
        self.cells
            .indexed_iter()
            .find(|(_, cell)| cell.opened && cell.mined)
            .and_then(|((x, y), _)| Some((x.try_into().ok()?, y.try_into().ok()?)))
    }

    pub fn is_exploded(&self) -> bool {
        self.explosion_position().is_some()
    }

    pub fn has_won(&self) -> bool {
        self.cells.iter().all(|cell| cell.mined || cell.opened) && !self.is_exploded()
    }

    pub fn is_over(&self) -> bool {
        self.is_exploded() || self.has_won()
    }

    pub fn state(&self) -> GameState {
        if self.is_exploded() {
            GameState::Exploded
        } else if self.has_won() {
            GameState::Won
        } else {
            GameState::InProgress
        }
    }

    /// Opens `start` and flood-fills through zero-count cells, returning how many cells were opened.
    fn open_region(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.cells[coords.to_nd_index()];
            // queued more than once, or flagged
            if !cell.can_open() {
                continue;
            }
            cell.opened = true;
            opened += 1;
            if cell.mined {
                // only reachable for `start`, zero-count cells have no mined neighbors
                continue;
            }

            let count = self.count_mines_around(coords);
            log::trace!("Opened cell at {:?}, mine count: {}", coords, count);
            if count == 0 {
                to_visit.extend(
                    self.coords_around(coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].can_open()),
                );
            }
        }

        opened
    }

    fn count_mines_around(&self, coords: Coord2) -> u8 {
        // at most 8
        self.coords_around(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].mined)
            .count() as u8
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    fn check_not_over(&self) -> Result<()> {
        if self.is_over() {
            Err(GameError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

impl core::ops::Index<Coord2> for Board {
    type Output = Cell;

    /// Panics when `coords` is outside the board.
    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
