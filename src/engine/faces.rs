use glam::{IVec2, Vec2, ivec2, vec2};

/// One of the four compass-aligned sides of a solid tile.
///
/// East is the +x boundary of the cell, South the +y boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    East,
    South,
    West,
    North,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::East, Side::South, Side::West, Side::North];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::East => 0,
            Side::South => 1,
            Side::West => 2,
            Side::North => 3,
        }
    }

    /// World corner of this side's left or right vertical edge.
    ///
    /// Winding is fixed throughout the pipeline: viewed from outside the
    /// solid cell, left to right as the player would scan the face.
    pub fn corner(self, tile: IVec2, left: bool) -> Vec2 {
        let (x, y) = (tile.x as f32, tile.y as f32);
        match self {
            Side::East => {
                if left {
                    vec2(x + 1.0, y + 1.0)
                } else {
                    vec2(x + 1.0, y)
                }
            }
            Side::South => {
                if left {
                    vec2(x, y + 1.0)
                } else {
                    vec2(x + 1.0, y + 1.0)
                }
            }
            Side::West => {
                if left {
                    vec2(x, y)
                } else {
                    vec2(x, y + 1.0)
                }
            }
            Side::North => {
                if left {
                    vec2(x + 1.0, y)
                } else {
                    vec2(x, y)
                }
            }
        }
    }

    /// Grid step towards the neighbouring cell this side borders.
    pub fn neighbour(self) -> IVec2 {
        match self {
            Side::East => ivec2(1, 0),
            Side::South => ivec2(0, 1),
            Side::West => ivec2(-1, 0),
            Side::North => ivec2(0, -1),
        }
    }

    /// Flat-shading base intensity, one fixed grey level per side.
    pub fn base_intensity(self) -> u8 {
        match self {
            Side::East => 200,
            Side::South => 120,
            Side::West => 80,
            Side::North => 160,
        }
    }
}

/// One vertical edge of a face.
#[derive(Clone, Copy, Debug, Default)]
pub struct Column {
    /// Projected screen column; may lie outside `[0, width)`, callers clip.
    pub screen_x: i32,
    /// World angle from the player, radians `[0, 2π)`.
    pub angle: f32,
    /// Fisheye-corrected distance; drives projected wall height.
    pub dist: f32,
    /// Raw Euclidean distance; drives sorting and shading.
    pub dist_raw: f32,
}

/// One renderable side of a solid tile, with both edge columns populated.
/// Rebuilt from scratch every frame.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub tile: IVec2,
    pub side: Side,
    /// Transient per-frame flag, set when the face passes classification.
    pub visible: bool,
    pub left: Column,
    pub right: Column,
}

impl Face {
    /// Mean raw distance of the two columns: the sort key and shading input.
    #[inline]
    pub fn mean_dist_raw(&self) -> f32 {
        (self.left.dist_raw + self.right.dist_raw) * 0.5
    }
}
