use std::f32::consts::{PI, TAU};

use crate::geom::{angle_in_sector, normalize_radians};
use crate::world::Player;

/// Viewport constants derived once from screen width and field of view.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    screen_w: i32,
    dist_to_plane: f32,
}

impl Projection {
    /// `dist_to_plane = (w/2) / tan(fov/2)`: the distance at which a wall of
    /// height 1 projects to exactly `w/2` pixels.
    pub fn new(screen_w: usize, fov_rad: f32) -> Self {
        Self {
            screen_w: screen_w as i32,
            dist_to_plane: (screen_w as f32 * 0.5) / (fov_rad * 0.5).tan(),
        }
    }

    #[inline]
    pub fn screen_w(&self) -> i32 {
        self.screen_w
    }

    #[inline]
    pub fn dist_to_plane(&self) -> f32 {
        self.dist_to_plane
    }

    /// Map a world angle from the player to a screen column.
    ///
    /// The angle's offset from the cone's left boundary, as a fraction of
    /// the full FOV, scales to screen width. Two wrap cases need care:
    /// the left boundary itself may sit across the 0/2π seam from the input
    /// angle, and angles more than π past the facing direction must read as
    /// *negative* offsets so geometry just behind the player does not alias
    /// to the far side of the cone.
    ///
    /// The result may be negative or beyond the screen width; callers clip.
    pub fn screen_column(&self, player: &Player, angle_from_player: f32) -> i32 {
        let half_fov = player.fov_rad() * 0.5;
        let left_bound = normalize_radians(player.angle_rad() - half_fov);

        let mut view = if left_bound > angle_from_player {
            angle_from_player + TAU - left_bound
        } else {
            angle_from_player - left_bound
        };
        if angle_in_sector(view, PI + half_fov, TAU) {
            view -= TAU;
        }

        let fov_frac = view / (2.0 * half_fov);
        (fov_frac * self.screen_w as f32) as i32
    }

    /// Fisheye correction: scale a raw distance by the cosine of the offset
    /// from straight ahead, keeping projected heights flat across the
    /// screen. Used for wall height only, never for sort order.
    #[inline]
    pub fn corrected_dist(player: &Player, raw: f32, angle_from_player: f32) -> f32 {
        raw * (player.angle_rad() - angle_from_player).cos().abs()
    }

    /// Projected wall height in pixels at a corrected distance.
    #[inline]
    pub fn wall_height(&self, corrected_dist: f32) -> f32 {
        self.dist_to_plane / corrected_dist.max(f32::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn player(angle_deg: f32, fov_deg: f32) -> Player {
        Player::new(vec2(0.0, 0.0), angle_deg, fov_deg)
    }

    #[test]
    fn plane_distance_at_90_deg_fov() {
        let proj = Projection::new(640, 90f32.to_radians());
        assert!((proj.dist_to_plane() - 320.0).abs() < 1e-3);
    }

    #[test]
    fn straight_ahead_hits_screen_centre() {
        let proj = Projection::new(1024, 60f32.to_radians());
        let p = player(0.0, 60.0);
        let col = proj.screen_column(&p, p.angle_rad());
        assert!((col - 512).abs() <= 1, "got {col}");
    }

    #[test]
    fn cone_boundaries_map_to_screen_edges() {
        let proj = Projection::new(800, 60f32.to_radians());
        for facing in [0.0, 90.0, 345.0] {
            let p = player(facing, 60.0);
            let (l, r) = p.fov_bounds_rad();
            assert_eq!(proj.screen_column(&p, l), 0, "facing {facing}");
            assert!((proj.screen_column(&p, r) - 800).abs() <= 1, "facing {facing}");
        }
    }

    #[test]
    fn monotonic_across_the_seam() {
        // facing 350°: the cone [320°, 20°] wraps through 0
        let proj = Projection::new(1024, 60f32.to_radians());
        let p = player(350.0, 60.0);
        let (l, _) = p.fov_bounds_rad();
        let mut prev = i32::MIN;
        for step in 0..=600 {
            let a = normalize_radians(l + step as f32 * (60f32.to_radians() / 600.0));
            let col = proj.screen_column(&p, a);
            assert!(col >= prev, "step {step}: {col} < {prev}");
            prev = col;
        }
    }

    #[test]
    fn monotonic_for_varied_fov_widths() {
        for fov in [30.0f32, 60.0, 90.0, 110.0] {
            let proj = Projection::new(640, fov.to_radians());
            let p = player(10.0, fov);
            let (l, _) = p.fov_bounds_rad();
            let mut prev = i32::MIN;
            for step in 0..=200 {
                let a = normalize_radians(l + step as f32 * (fov.to_radians() / 200.0));
                let col = proj.screen_column(&p, a);
                assert!(col >= prev, "fov {fov}, step {step}");
                prev = col;
            }
        }
    }

    #[test]
    fn angles_just_behind_left_edge_go_negative() {
        // facing 0°, cone [330°, 30°]; 310° is 20° outside the left edge
        let proj = Projection::new(1024, 60f32.to_radians());
        let p = player(0.0, 60.0);
        let col = proj.screen_column(&p, 310f32.to_radians());
        assert!(col < 0, "got {col}");
    }

    #[test]
    fn fisheye_identity_straight_ahead() {
        let p = player(42.0, 60.0);
        let raw = 7.5;
        let corrected = Projection::corrected_dist(&p, raw, p.angle_rad());
        assert!((corrected - raw).abs() < 1e-5);
    }

    #[test]
    fn fisheye_shrinks_off_axis() {
        let p = player(0.0, 120.0);
        let raw = 10.0;
        let corrected = Projection::corrected_dist(&p, raw, 60f32.to_radians());
        assert!((corrected - 5.0).abs() < 1e-4); // cos 60° = 0.5
    }

    #[test]
    fn wall_height_inverse_to_distance() {
        let proj = Projection::new(640, 90f32.to_radians());
        let near = proj.wall_height(1.0);
        let far = proj.wall_height(4.0);
        assert!((near / far - 4.0).abs() < 1e-4);
    }
}
