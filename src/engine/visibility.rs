use bitflags::bitflags;
use glam::{IVec2, Vec2, ivec2};

use crate::engine::faces::{Column, Face, Side};
use crate::engine::projection::Projection;
use crate::geom::{angle_in_sector, angle_to_point, distance_to_point};
use crate::world::{Player, TileMap};

bitflags! {
    /// Half-plane components of the view cone, derived from its boundary
    /// angles. A face is only a candidate when the cone has some component
    /// pointing back at its outward normal.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ViewDirs: u8 {
        const RIGHT = 1 << 0;
        const UP    = 1 << 1;
        const DOWN  = 1 << 2;
        const LEFT  = 1 << 3;
    }
}

impl ViewDirs {
    /// Classify the cone via sector-membership tests on its boundary
    /// angles. Plain min/max comparison on the boundaries breaks when the
    /// cone straddles the 0/2π seam.
    pub fn classify(player: &Player) -> Self {
        use std::f32::consts::PI;
        let (l, r) = player.fov_bounds_rad();
        let either = |lo: f32, hi: f32| angle_in_sector(l, lo, hi) || angle_in_sector(r, lo, hi);

        let mut dirs = ViewDirs::empty();
        if either(1.5 * PI, 0.5 * PI) {
            dirs |= ViewDirs::RIGHT;
        }
        if either(PI, 2.0 * PI) {
            dirs |= ViewDirs::UP;
        }
        if either(0.0, PI) {
            dirs |= ViewDirs::DOWN;
        }
        if either(0.5 * PI, 1.5 * PI) {
            dirs |= ViewDirs::LEFT;
        }
        dirs
    }
}

/// True if any of the tile's four face corners (the left column of each
/// side) falls inside the view cone.
///
/// Corner sampling is an approximation: a tile whose visible extent lies
/// between the sampled corners is misclassified. Downstream stages tolerate
/// the over-inclusion this produces elsewhere, so the test must never be
/// tightened into one that can report false negatives.
pub fn tile_in_fov(player: &Player, tile: IVec2) -> bool {
    let (left, right) = player.fov_bounds_rad();
    Side::ALL.iter().any(|side| {
        let corner = side.corner(tile, true);
        angle_in_sector(angle_to_point(player.pos(), corner), left, right)
    })
}

/// The four conditions a face must meet to be a rendering candidate:
/// a neighbouring cell exists (map-boundary sides are never exposed), that
/// neighbour is empty, the view cone has a component against the face's
/// outward normal, and the player stands strictly on the outward side of
/// the face's plane.
pub fn face_visible(
    map: &TileMap,
    player: &Player,
    dirs: ViewDirs,
    tile: IVec2,
    side: Side,
) -> bool {
    let n = tile + side.neighbour();
    if !map.in_bounds(n.x, n.y) || map.is_solid(n.x, n.y) {
        return false;
    }
    let p = player.pos();
    match side {
        Side::East => dirs.contains(ViewDirs::LEFT) && p.x > (tile.x + 1) as f32,
        Side::West => dirs.contains(ViewDirs::RIGHT) && p.x < tile.x as f32,
        Side::South => dirs.contains(ViewDirs::UP) && p.y > (tile.y + 1) as f32,
        Side::North => dirs.contains(ViewDirs::DOWN) && p.y < tile.y as f32,
    }
}

/// Solid tiles with at least one face corner inside the view cone, in map
/// scan order.
pub fn visible_tiles(map: &TileMap, player: &Player) -> Vec<IVec2> {
    let mut tiles = Vec::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            if map.is_solid(x, y) && tile_in_fov(player, ivec2(x, y)) {
                tiles.push(ivec2(x, y));
            }
        }
    }
    tiles
}

fn column(player: &Player, proj: &Projection, corner: Vec2) -> Column {
    let angle = angle_to_point(player.pos(), corner);
    let raw = distance_to_point(player.pos(), corner);
    Column {
        screen_x: proj.screen_column(player, angle),
        angle,
        dist: Projection::corrected_dist(player, raw, angle),
        dist_raw: raw,
    }
}

/// Build the frame's candidate face list: every visible face of every
/// candidate tile, both columns fully populated, sorted near-to-far by mean
/// raw distance. The sort is stable, so faces at equal distance keep their
/// scan order.
pub fn collect_faces(
    map: &TileMap,
    player: &Player,
    proj: &Projection,
    tiles: &[IVec2],
) -> Vec<Face> {
    let dirs = ViewDirs::classify(player);
    let mut faces = Vec::new();

    for &tile in tiles {
        for side in Side::ALL {
            if !face_visible(map, player, dirs, tile, side) {
                continue;
            }
            let left = column(player, proj, side.corner(tile, true));
            let right = column(player, proj, side.corner(tile, false));
            if left.screen_x > right.screen_x {
                // projection inversion: should not happen for a correctly
                // wound face inside a sane FOV, tolerated when it does
                eprintln!(
                    "WARNING: {side:?} face of tile ({}, {}) projects inverted (left {} > right {})",
                    tile.x, tile.y, left.screen_x, right.screen_x
                );
            }
            faces.push(Face {
                tile,
                side,
                visible: true,
                left,
                right,
            });
        }
    }

    faces.sort_by(|a, b| a.mean_dist_raw().total_cmp(&b.mean_dist_raw()));
    faces
}
