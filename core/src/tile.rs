use serde::{Deserialize, Serialize};

/// State of a single board position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub opened: bool,
    pub mined: bool,
    pub flagged: bool,
}

impl Cell {
    /// Whether a reveal would open this cell.
    pub const fn can_open(self) -> bool {
        !self.opened && !self.flagged
    }
}

/// Player-visible rendering of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    /// Only shown once the game is over.
    IncorrectFlag,
    Revealed(u8),
    Exploded,
}

impl CellView {
    /// Whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::IncorrectFlag)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
