use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Dimensions and mine count of a single game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Parses a config such as:
    ///
    /// ```toml
    /// difficulty = "expert"
    /// ```
    ///
    /// or, for a custom board:
    ///
    /// ```toml
    /// size = [12, 8]
    /// mines = 20
    /// ```
    ///
    /// Explicit `size` and `mines` override the values of the chosen preset.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(source).map_err(|err| {
            log::warn!("Rejected game config: {}", err.message());
            GameError::InvalidConfigFile
        })?;
        let preset = file.difficulty.unwrap_or_default().config();
        Self::new(
            file.size.unwrap_or(preset.size),
            file.mines.unwrap_or(preset.mines),
        )
    }

    /// Board must be non-empty and keep at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width == 0 || height == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration {
                width,
                height,
                mines: self.mines,
            });
        }
        Ok(())
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    difficulty: Option<Difficulty>,
    size: Option<Coord2>,
    mines: Option<CellCount>,
}

/// The classic presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 9x9, 10 mines
    Easy,
    /// 16x16, 40 mines
    #[default]
    Normal,
    /// 30x16, 99 mines
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((9, 9), 10),
            Self::Normal => GameConfig::new_unchecked((16, 16), 40),
            Self::Expert => GameConfig::new_unchecked((30, 16), 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.config().validate(), Ok(()));
        }
        assert_eq!(Difficulty::Expert.config().total_cells(), 480);
        assert_eq!(GameConfig::default(), Difficulty::Normal.config());
    }

    #[test]
    fn rejects_full_and_empty_boards() {
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(GameError::InvalidConfiguration {
                width: 3,
                height: 3,
                mines: 9
            })
        );
        assert!(GameConfig::new((0, 3), 0).is_err());
        assert!(GameConfig::new((3, 0), 0).is_err());
        assert!(GameConfig::new((3, 3), 8).is_ok());
        assert!(GameConfig::new((1, 1), 0).is_ok());
    }

    #[test]
    fn difficulty_round_trips_through_its_name() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse(), Ok(difficulty));
        }
        assert_eq!("Expert".parse(), Ok(Difficulty::Expert));
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty)
        );
    }

    #[test]
    fn toml_preset() {
        let config = GameConfig::from_toml_str(r#"difficulty = "expert""#).unwrap();
        assert_eq!(config, Difficulty::Expert.config());
    }

    #[test]
    fn toml_custom_board_overrides_preset() {
        let config = GameConfig::from_toml_str("size = [12, 8]\nmines = 20\n").unwrap();
        assert_eq!(config, GameConfig::new((12, 8), 20).unwrap());

        let config =
            GameConfig::from_toml_str("difficulty = \"easy\"\nmines = 5\n").unwrap();
        assert_eq!(config.size, (9, 9));
        assert_eq!(config.mines, 5);
    }

    #[test]
    fn toml_empty_uses_default() {
        assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
    }

    #[test]
    fn toml_errors() {
        assert_eq!(
            GameConfig::from_toml_str("size = [\"wide\", 8]"),
            Err(GameError::InvalidConfigFile)
        );
        assert_eq!(
            GameConfig::from_toml_str("colour = \"red\""),
            Err(GameError::InvalidConfigFile)
        );
        assert!(matches!(
            GameConfig::from_toml_str("size = [2, 2]\nmines = 4"),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }
}
