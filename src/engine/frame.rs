//! One frame, front to back: classify tiles, collect and sort faces, then
//! paint them near-to-far while the occlusion set hands out the still-free
//! screen columns.

use crate::engine::occlusion::SpanSet;
use crate::engine::projection::Projection;
use crate::engine::visibility::{collect_faces, visible_tiles};
use crate::renderer::Software;
use crate::world::{Player, TextureBank, TextureId, TileMap};

/// How faces get filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Flat { wireframe: bool },
    Textured,
}

/// Everything a frame reads, borrowed for its duration.
pub struct Scene<'a> {
    pub map: &'a TileMap,
    pub player: &'a Player,
    pub bank: &'a TextureBank,
    /// Wall texture per side, indexed by `Side::index()`.
    pub walls: [TextureId; 4],
}

#[derive(Clone, Copy, Debug)]
pub struct FrameSettings {
    pub mode: RenderMode,
    /// Distance at which the fade-to-black shading bottoms out.
    pub max_dist: f32,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Flat { wireframe: false },
            max_dist: 20.0,
        }
    }
}

/// Per-frame counters, printed by the viewers on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Solid tiles passing the FOV test.
    pub tiles: usize,
    /// Faces that survived classification.
    pub faces: usize,
    /// Faces that actually contributed pixels.
    pub faces_drawn: usize,
    /// Occlusion spans left at the end of the paint loop.
    pub spans: usize,
}

/// Render one frame into `fb` (between the caller's `begin_frame` and
/// `end_frame`). `occ` is caller-owned so its storage persists across
/// frames; it is reset here.
pub fn render_frame(
    fb: &mut Software,
    scene: &Scene,
    proj: &Projection,
    occ: &mut SpanSet,
    settings: FrameSettings,
) -> FrameStats {
    let (w, h) = (fb.width() as i32, fb.height() as i32);
    let horizon = h / 2;

    // sky fades from zenith blue to haze at the horizon, the floor from
    // haze back out to its own colour
    fb.fill_gradient_v(0, horizon - 1, 0xFF_30_60_B0, 0xFF_C8_D8_E8);
    fb.fill_gradient_v(horizon, h - 1, 0xFF_38_20_20, 0xFF_90_38_30);

    let tiles = visible_tiles(scene.map, scene.player);
    let faces = collect_faces(scene.map, scene.player, proj, &tiles);

    occ.reset(w);
    let mut drawn = 0;
    for face in &faces {
        if occ.fully_occluded() {
            break;
        }
        let Some(clip) = occ.insert(face.left.screen_x, face.right.screen_x) else {
            continue;
        };
        match settings.mode {
            RenderMode::Flat { wireframe } => {
                fb.draw_flat_quad(face, clip, proj, settings.max_dist, wireframe);
            }
            RenderMode::Textured => {
                let tex = scene.bank.texture_or_missing(scene.walls[face.side.index()]);
                fb.draw_textured_quad(face, clip, proj, settings.max_dist, tex);
            }
        }
        drawn += 1;
    }

    FrameStats {
        tiles: tiles.len(),
        faces: faces.len(),
        faces_drawn: drawn,
        spans: occ.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Framebuffer;
    use crate::world::NO_TEXTURE;
    use glam::vec2;

    fn scene<'a>(map: &'a TileMap, player: &'a Player, bank: &'a TextureBank) -> Scene<'a> {
        Scene {
            map,
            player,
            bank,
            walls: [NO_TEXTURE; 4],
        }
    }

    #[test]
    fn frame_inside_demo_map_draws_walls() {
        let map = TileMap::demo();
        let player = Player::new(vec2(2.0, 2.0), 45.0, 60.0);
        let bank = TextureBank::default_with_checker();
        let proj = Projection::new(320, player.fov_rad());
        let mut occ = SpanSet::new(320);

        let mut fb = Software::default();
        fb.begin_frame(320, 200);
        let stats = render_frame(
            &mut fb,
            &scene(map, &player, &bank),
            &proj,
            &mut occ,
            FrameSettings::default(),
        );

        assert!(stats.tiles > 0);
        assert!(stats.faces > 0);
        assert!(stats.faces_drawn > 0);
        assert!(stats.faces_drawn <= stats.faces);
    }

    #[test]
    fn textured_mode_draws_too() {
        let map = TileMap::demo();
        let player = Player::new(vec2(2.0, 2.0), 45.0, 60.0);
        let bank = TextureBank::default_with_checker();
        let proj = Projection::new(320, player.fov_rad());
        let mut occ = SpanSet::new(320);

        let mut fb = Software::default();
        fb.begin_frame(320, 200);
        let stats = render_frame(
            &mut fb,
            &scene(map, &player, &bank),
            &proj,
            &mut occ,
            FrameSettings {
                mode: RenderMode::Textured,
                max_dist: 20.0,
            },
        );
        assert!(stats.faces_drawn > 0);
    }

    #[test]
    fn enclosed_view_fully_occludes_the_screen() {
        // hallway one tile wide: the facing wall must close the span set
        let map = TileMap::parse(concat!(
            "#####\n",
            "#...#\n",
            "#####\n",
        ))
        .unwrap();
        let player = Player::new(vec2(1.5, 1.5), 0.0, 60.0);
        let bank = TextureBank::default_with_checker();
        let proj = Projection::new(320, player.fov_rad());
        let mut occ = SpanSet::new(320);

        let mut fb = Software::default();
        fb.begin_frame(320, 200);
        render_frame(
            &mut fb,
            &scene(&map, &player, &bank),
            &proj,
            &mut occ,
            FrameSettings::default(),
        );
        assert!(occ.fully_occluded());
    }
}
