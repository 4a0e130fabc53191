use glam::Vec2;

use crate::geom::{normalize_degrees, normalize_radians};

/// Player pose: position on the map plus facing and field of view.
///
/// The facing angle is authored in degrees and always held in `[0, 360)`.
/// The radian value and its sine/cosine are cached; `set_angle_deg` is the
/// only mutation path for the angle and recomputes all three together, so
/// the derived fields can never drift from the degree value.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    pos: Vec2, // map-cell units, continuous
    angle_deg: f32,
    fov_deg: f32,
    eye_height: f32, // fraction of wall height; projection centres walls regardless

    // derived, kept in sync by set_angle_deg
    angle_rad: f32,
    sin: f32,
    cos: f32,
}

impl Player {
    pub fn new(pos: Vec2, angle_deg: f32, fov_deg: f32) -> Self {
        let mut p = Self {
            pos,
            angle_deg: 0.0,
            fov_deg,
            eye_height: 0.5,
            angle_rad: 0.0,
            sin: 0.0,
            cos: 1.0,
        };
        p.set_angle_deg(angle_deg);
        p
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    #[inline]
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    #[inline]
    pub fn angle_rad(&self) -> f32 {
        self.angle_rad
    }

    #[inline]
    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }

    #[inline]
    pub fn fov_rad(&self) -> f32 {
        self.fov_deg.to_radians()
    }

    #[inline]
    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }

    /// Set the facing angle, renormalizing and refreshing the cached
    /// radians/sin/cos in one step.
    pub fn set_angle_deg(&mut self, deg: f32) {
        self.angle_deg = normalize_degrees(deg);
        self.angle_rad = normalize_radians(self.angle_deg.to_radians());
        self.sin = self.angle_rad.sin();
        self.cos = self.angle_rad.cos();
    }

    /// Turn by `delta` degrees (positive turns towards +y).
    pub fn rotate_deg(&mut self, delta: f32) {
        self.set_angle_deg(self.angle_deg + delta);
    }

    /// Unit vector the player faces, from the cached sin/cos.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }

    /// Unit vector to the player's right.
    #[inline]
    pub fn right(&self) -> Vec2 {
        Vec2::new(-self.sin, self.cos)
    }

    /// Left and right boundary angles of the view cone, radians `[0, 2π)`.
    /// `left > right` when the cone straddles the angle origin.
    pub fn fov_bounds_rad(&self) -> (f32, f32) {
        let half = self.fov_rad() * 0.5;
        (
            normalize_radians(self.angle_rad - half),
            normalize_radians(self.angle_rad + half),
        )
    }
}
