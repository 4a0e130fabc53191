use std::path::Path;

use once_cell::sync::Lazy;
use thiserror::Error;

/// Things that can go wrong while parsing a map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} is {got} cells wide, expected {want}")]
    Ragged { row: usize, got: usize, want: usize },

    #[error("unknown map character `{ch}` at row {row}, column {col}")]
    BadChar { ch: char, row: usize, col: usize },

    #[error("failed to read map file")]
    Io(#[from] std::io::Error),
}

/// Immutable grid of solid/empty cells (authored once per session).
///
/// Coordinates are `(x, y)` with x growing east and y growing south; one
/// cell is one map unit.
#[derive(Clone, Debug)]
pub struct TileMap {
    width: i32,
    height: i32,
    solid: Vec<bool>,
}

impl TileMap {
    /// Parse an ASCII grid: `#` solid, `.` empty, one row per line.
    pub fn parse(src: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = src.lines().map(str::trim_end).filter(|l| !l.is_empty()).collect();
        if rows.is_empty() {
            return Err(MapError::Empty);
        }
        let width = rows[0].chars().count();
        let mut solid = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(MapError::Ragged { row, got, want: width });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => solid.push(true),
                    '.' => solid.push(false),
                    ch => return Err(MapError::BadChar { ch, row, col }),
                }
            }
        }
        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            solid,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// The 16×16 demo arena.
    pub fn demo() -> &'static TileMap {
        static DEMO: Lazy<TileMap> = Lazy::new(|| {
            TileMap::parse(concat!(
                "################\n",
                "#..............#\n",
                "#........####..#\n",
                "#..............#\n",
                "#...#.....#....#\n",
                "#...#..........#\n",
                "#...####.......#\n",
                "#..............#\n",
                "#..............#\n",
                "#..............#\n",
                "#......##.##...#\n",
                "#......#...#...#\n",
                "#......#...#...#\n",
                "#.......###....#\n",
                "#..............#\n",
                "################\n",
            ))
            .expect("demo map is well formed")
        });
        &DEMO
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Solid query; anything outside the grid reads as empty.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.solid[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_map_shape_and_border() {
        let m = TileMap::demo();
        assert_eq!((m.width(), m.height()), (16, 16));
        for i in 0..16 {
            assert!(m.is_solid(i, 0));
            assert!(m.is_solid(i, 15));
            assert!(m.is_solid(0, i));
            assert!(m.is_solid(15, i));
        }
        assert!(!m.is_solid(1, 1));
    }

    #[test]
    fn out_of_bounds_reads_empty() {
        let m = TileMap::demo();
        assert!(!m.is_solid(-1, 0));
        assert!(!m.is_solid(0, 16));
        assert!(!m.in_bounds(16, 0));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = TileMap::parse("##\n#\n").unwrap_err();
        assert!(matches!(err, MapError::Ragged { row: 1, got: 1, want: 2 }));
    }

    #[test]
    fn unknown_character_rejected() {
        let err = TileMap::parse("#.\n#x\n").unwrap_err();
        assert!(matches!(err, MapError::BadChar { ch: 'x', row: 1, col: 1 }));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(TileMap::parse("\n\n"), Err(MapError::Empty)));
    }
}
