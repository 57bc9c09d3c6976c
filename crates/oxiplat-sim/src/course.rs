/// A single cell of a course strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Walkable ground.
    Ground,
    /// A gap that must be cleared airborne.
    Gap,
    /// A coin, collected by passing through.
    Coin,
    /// An enemy; stomp it airborne or take a hit.
    Enemy,
    /// A mushroom granting one extra hit point.
    Mushroom,
    /// A fire flower enabling ranged kills.
    FireFlower,
}

impl Tile {
    /// Parses a single course character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self::Ground),
            'G' => Some(Self::Gap),
            'o' => Some(Self::Coin),
            'E' => Some(Self::Enemy),
            'M' => Some(Self::Mushroom),
            'F' => Some(Self::FireFlower),
            _ => None,
        }
    }
}

/// The level descriptor handed to a [`SimulationOracle`](crate::SimulationOracle).
///
/// A course is parsed once from a one-line ASCII strip and is read-only
/// afterwards, so a single instance can be shared by any number of parallel
/// evaluations. The search core treats it as opaque; only oracle
/// implementations interpret the tiles.
///
/// Tile characters: `-` ground, `G` gap, `o` coin, `E` enemy, `M` mushroom,
/// `F` fire flower. The goal is implicit at the end of the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    name: String,
    tiles: Vec<Tile>,
}

impl Course {
    /// Parses a course from its ASCII strip form.
    ///
    /// Leading and trailing whitespace is ignored; anything else that is not
    /// a tile character is an error.
    pub fn parse(name: &str, text: &str) -> Result<Self, CourseParseError> {
        let text = text.trim();
        let mut tiles = Vec::with_capacity(text.len());
        for (cell, c) in text.chars().enumerate() {
            let tile = Tile::from_char(c).ok_or(CourseParseError::InvalidTile { tile: c, cell })?;
            tiles.push(tile);
        }
        if tiles.is_empty() {
            return Err(CourseParseError::Empty);
        }
        Ok(Self {
            name: name.to_owned(),
            tiles,
        })
    }

    /// Returns the course name (for artifacts and logs).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of cells in the strip.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns whether the strip has no cells. Never true for a parsed course.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns the tile at the given cell, or `None` past the end.
    #[must_use]
    pub fn tile(&self, cell: usize) -> Option<Tile> {
        self.tiles.get(cell).copied()
    }
}

/// Errors from parsing a course strip.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CourseParseError {
    #[display("course contains no tiles")]
    Empty,
    #[display("invalid course tile {tile:?} at cell {cell}")]
    InvalidTile { tile: char, cell: usize },
}
