//! Player movement: turn and translate from an input snapshot, with a
//! probe-ahead collision test against the tile grid.

use glam::Vec2;

use crate::world::{Player, TileMap};

/// Degrees per second.
pub const SPEED_ROTATE: f32 = 60.0;
/// Cells per second.
pub const SPEED_MOVE: f32 = 5.0;
pub const SPEED_STRAFE: f32 = 5.0;
/// How far ahead of the new position the collision probe reaches, in cells.
pub const COLLIDE_MARGIN: f32 = 0.25;

/// One tick's worth of input, sampled from the window each frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    /// Forward/backward axis in `[-1, 1]`.
    pub forward: f32,
    /// Strafe axis in `[-1, 1]`, positive to the player's right.
    pub strafe: f32,
    /// Turn axis in `[-1, 1]`, positive clockwise (screen right).
    pub turn: f32,
    pub run: bool,
    pub creep: bool,
}

/// Advance the player by `dt` seconds of `cmd`.
///
/// Rotation always applies; translation is cancelled outright when a probe
/// point `COLLIDE_MARGIN` past the new position lands in a solid or
/// out-of-bounds cell. No sliding along walls.
pub fn apply_input(player: &mut Player, map: &TileMap, cmd: &InputCmd, dt: f32) {
    let scale = if cmd.run {
        4.0
    } else if cmd.creep {
        0.25
    } else {
        1.0
    };

    player.rotate_deg(cmd.turn * SPEED_ROTATE * scale * dt);

    let step = player.forward() * (cmd.forward * SPEED_MOVE * scale * dt)
        + player.right() * (cmd.strafe * SPEED_STRAFE * scale * dt);
    if step == Vec2::ZERO {
        return;
    }

    let new_pos = player.pos() + step;
    let probe = new_pos + step.normalize() * COLLIDE_MARGIN;
    let (cx, cy) = (probe.x.floor() as i32, probe.y.floor() as i32);
    if map.in_bounds(cx, cy) && !map.is_solid(cx, cy) {
        player.set_pos(new_pos);
    }
}
