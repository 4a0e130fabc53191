//! Top-down map overlay: the debug view of the visibility classifier.

use glam::{IVec2, ivec2};

use crate::engine::{Side, ViewDirs, face_visible, tile_in_fov};
use crate::renderer::software::renderer::Software;
use crate::world::{Player, TileMap};

const GRID: u32 = 0xFF_28_28_28;
const SOLID: u32 = 0xFF_C8_C8_C8;
const SOLID_IN_FOV: u32 = 0xFF_40_C8_C8;
const FACE_EDGE: u32 = 0xFF_E0_30_30;
const PLAYER: u32 = 0xFF_30_C0_30;
const HEADING: u32 = 0xFF_E0_E0_30;
const FOV_RAY: u32 = 0xFF_C0_30_C0;

impl Software {
    /// Draw the map grid at `origin` with `tile_px` pixels per cell, marking
    /// solid tiles, tiles passing the FOV test, the visible faces of those
    /// tiles and the player's cone.
    pub fn draw_map_overlay(&mut self, map: &TileMap, player: &Player, origin: IVec2, tile_px: i32) {
        let dirs = ViewDirs::classify(player);
        let at = |x: i32, y: i32| ivec2(origin.x + x * tile_px, origin.y + y * tile_px);

        for y in 0..map.height() {
            for x in 0..map.width() {
                let px = at(x, y);
                if map.is_solid(x, y) {
                    let fill = if tile_in_fov(player, ivec2(x, y)) {
                        SOLID_IN_FOV
                    } else {
                        SOLID
                    };
                    self.fill_rect(px.x, px.y, tile_px, tile_px, fill);
                } else {
                    self.draw_rect(px.x, px.y, tile_px + 1, tile_px + 1, GRID);
                }
            }
        }

        // face edges go over the grid so cell borders never mask them
        for y in 0..map.height() {
            for x in 0..map.width() {
                if map.is_solid(x, y) {
                    self.mark_visible_faces(map, player, dirs, ivec2(x, y), at(x, y), tile_px);
                }
            }
        }

        // player marker, heading finger and the two cone boundary rays
        let scale = tile_px as f32;
        let pp = ivec2(
            origin.x + (player.pos().x * scale) as i32,
            origin.y + (player.pos().y * scale) as i32,
        );
        let ray = |angle: f32, len: f32| {
            ivec2(
                pp.x + (angle.cos() * len) as i32,
                pp.y + (angle.sin() * len) as i32,
            )
        };
        let (l, r) = player.fov_bounds_rad();
        let reach = scale * map.width().max(map.height()) as f32;
        let lt = ray(l, reach);
        let rt = ray(r, reach);
        self.draw_line(pp.x, pp.y, lt.x, lt.y, FOV_RAY);
        self.draw_line(pp.x, pp.y, rt.x, rt.y, FOV_RAY);

        let tip = ray(player.angle_rad(), scale * 0.8);
        self.draw_line(pp.x, pp.y, tip.x, tip.y, HEADING);
        self.fill_circle(pp.x, pp.y, (scale * 0.2).max(2.0) as i32, PLAYER);
    }

    fn mark_visible_faces(
        &mut self,
        map: &TileMap,
        player: &Player,
        dirs: ViewDirs,
        tile: IVec2,
        px: IVec2,
        tile_px: i32,
    ) {
        for side in Side::ALL {
            if !face_visible(map, player, dirs, tile, side) {
                continue;
            }
            let (x0, y0, x1, y1) = match side {
                Side::East => (px.x + tile_px, px.y, px.x + tile_px, px.y + tile_px),
                Side::West => (px.x, px.y, px.x, px.y + tile_px),
                Side::South => (px.x, px.y + tile_px, px.x + tile_px, px.y + tile_px),
                Side::North => (px.x, px.y, px.x + tile_px, px.y),
            };
            self.draw_line(x0, y0, x1, y1, FACE_EDGE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Framebuffer;
    use glam::vec2;

    #[test]
    fn overlay_marks_solids_and_visible_faces() {
        let map = TileMap::parse(concat!(
            "#####\n",
            "#...#\n",
            "##.##\n",
            "#...#\n",
            "#####\n",
        ))
        .unwrap();
        let player = Player::new(vec2(2.5, 2.5), 180.0, 60.0);

        let mut fb = Software::default();
        fb.begin_frame(64, 64);
        fb.draw_map_overlay(&map, &player, ivec2(0, 0), 10);

        let scratch: Vec<u32> = fb.scratch.clone();
        assert!(scratch.contains(&SOLID));
        // (1, 2) lies inside the cone and its east face is exposed
        assert!(scratch.contains(&SOLID_IN_FOV));
        assert_eq!(scratch[26 * 64 + 20], FACE_EDGE);
        assert!(scratch.contains(&PLAYER));
    }
}
