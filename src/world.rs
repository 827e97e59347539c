use std::path::Path;

use thiserror::Error;

/// Tile code for open floor.
pub const EMPTY: u8 = 0;

/// Marker for the spawn cell in map files.
const SPAWN_MARKER: char = 'P';

/// Player start used when a map does not name one.
pub const DEFAULT_SPAWN: [f64; 2] = [3.0, 6.0];

/// Built-in level, outer index is grid x.
const BUILT_IN: &str = "\
1111111111111111
1000000000000001
1002200000330001
1002000000030001
1000000400000001
1000004440000001
1000000400000501
1000000000005501
1033000000000001
1030000022220001
1000000000000001
1111111111111111
";

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected tile {ch:?} at row {row}, column {col}")]
    BadTile { row: usize, col: usize, ch: char },
    #[error("more than one spawn marker (second at row {row}, column {col})")]
    DuplicateSpawn { row: usize, col: usize },
    #[error("map has no open cell to spawn in")]
    NoOpenCell,
}

/// Static tile grid.
///
/// Tiles are addressed `[x][y]`: `x` selects a row of the source text and `y` a
/// character within it. Code `0` is open floor, anything else is a wall whose code
/// picks its material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    tiles: Vec<u8>,
    width: usize,
    height: usize,
}

/// A map together with the spawn point its file asked for, if any.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    pub map: GridMap,
    pub spawn: Option<[f64; 2]>,
}

impl GridMap {
    /// Builds a map from `[x][y]` rows. Rows must be non-empty and equally long.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, MapError> {
        let width = rows.len();
        let height = rows.first().map(Vec::len).ok_or(MapError::Empty)?;
        if height == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != height {
                return Err(MapError::Ragged {
                    row,
                    expected: height,
                    found: cells.len(),
                });
            }
            tiles.extend(cells);
        }

        Ok(Self {
            tiles,
            width,
            height,
        })
    }

    /// Parses the text map format: digits are tile codes, `.` is open floor and `P`
    /// is an open spawn cell. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<ParsedMap, MapError> {
        let mut rows = Vec::new();
        let mut spawn = None;

        let lines = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        for (x, line) in lines.enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (y, ch) in line.chars().enumerate() {
                let code = match ch {
                    '.' => EMPTY,
                    SPAWN_MARKER => {
                        if spawn.is_some() {
                            return Err(MapError::DuplicateSpawn { row: x, col: y });
                        }
                        spawn = Some([x as f64 + 0.5, y as f64 + 0.5]);
                        EMPTY
                    }
                    _ => ch
                        .to_digit(10)
                        .map(|d| d as u8)
                        .ok_or(MapError::BadTile { row: x, col: y, ch })?,
                };
                row.push(code);
            }
            rows.push(row);
        }

        Ok(ParsedMap {
            map: Self::from_rows(rows)?,
            spawn,
        })
    }

    pub fn load(path: &Path) -> Result<ParsedMap, MapError> {
        let text = std::fs::read_to_string(path)?;
        let parsed = Self::parse(&text)?;
        log::debug!(
            "loaded {}x{} map from {}",
            parsed.map.width,
            parsed.map.height,
            path.display()
        );
        Ok(parsed)
    }

    pub fn built_in() -> Self {
        Self::parse(BUILT_IN).expect("built-in map parses").map
    }

    /// Extent along x (number of text rows).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent along y (tiles per text row).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile code at a cell, `None` outside the grid.
    #[inline]
    pub fn tile(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.tiles[x as usize * self.height + y as usize])
    }

    /// Whether a world position lies in an open cell. Positions off the grid are
    /// treated as solid.
    pub fn is_open_at(&self, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.tile(x.floor() as i64, y.floor() as i64) == Some(EMPTY)
    }

    /// Centre of the first open cell in storage order.
    pub fn first_open_cell(&self) -> Option<[f64; 2]> {
        self.tiles.iter().position(|&t| t == EMPTY).map(|i| {
            let x = i / self.height;
            let y = i % self.height;
            [x as f64 + 0.5, y as f64 + 0.5]
        })
    }

    /// Resolves where the player starts: the requested point if open, else the
    /// default start, else the first open cell.
    pub fn resolve_spawn(&self, requested: Option<[f64; 2]>) -> Result<[f64; 2], MapError> {
        requested
            .into_iter()
            .chain(std::iter::once(DEFAULT_SPAWN))
            .find(|p| self.is_open_at(p[0], p[1]))
            .or_else(|| self.first_open_cell())
            .ok_or(MapError::NoOpenCell)
    }
}
