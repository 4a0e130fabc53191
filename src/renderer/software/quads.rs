//! Quad rasterisation: flat-shaded trapezoids and the inverse-bilinear
//! textured variant.
//!
//! A projected face is a trapezoid in screen space with vertical left and
//! right edges. Interpolation always runs over the face's *full* projected
//! extent; the clip range from the occlusion set and the screen bounds only
//! select which columns get painted, so partially hidden faces keep the same
//! geometry they would have unobstructed.

use glam::{DVec2, dvec2};

use crate::engine::{Face, Projection};
use crate::renderer::software::renderer::Software;
use crate::renderer::{grey, shade};
use crate::world::Texture;

const NEAR_ZERO: f64 = 1e-6;

impl Software {
    /// Flat-shaded fill of a projected face, restricted to `clip`.
    pub fn draw_flat_quad(
        &mut self,
        face: &Face,
        clip: (i32, i32),
        proj: &Projection,
        max_dist: f32,
        wireframe: bool,
    ) {
        let (lx, rx) = (face.left.screen_x, face.right.screen_x);
        if lx == rx {
            // degenerate edge-on projection
            return;
        }

        let h = self.height as f32;
        let ph_l = proj.wall_height(face.left.dist);
        let ph_r = proj.wall_height(face.right.dist);
        let (y_top_l, y_bot_l) = ((h - ph_l) * 0.5, (h + ph_l) * 0.5);
        let (y_top_r, y_bot_r) = ((h - ph_r) * 0.5, (h + ph_r) * 0.5);

        let x0 = lx.max(0).max(clip.0);
        let x1 = rx.min(self.width as i32 - 1).min(clip.1);
        if x0 > x1 {
            return;
        }

        let col = shade(grey(face.side.base_intensity()), dist_fade(face, max_dist));
        let span = (rx - lx) as f32;
        for x in x0..=x1 {
            let t = (x - lx) as f32 / span;
            let y_top = y_top_l + (y_top_r - y_top_l) * t;
            let y_bot = y_bot_l + (y_bot_r - y_bot_l) * t;
            self.vline(x, y_top, y_bot, col);
        }

        if wireframe {
            let edge = |t: f32| {
                (
                    (y_top_l + (y_top_r - y_top_l) * t) as i32,
                    (y_bot_l + (y_bot_r - y_bot_l) * t) as i32,
                )
            };
            let (t0, b0) = edge((x0 - lx) as f32 / span);
            let (t1, b1) = edge((x1 - lx) as f32 / span);
            let black = 0xFF_00_00_00;
            self.draw_line(x0, t0, x1, t1, black);
            self.draw_line(x0, b0, x1, b1, black);
            self.draw_line(x0, t0, x0, b0, black);
            self.draw_line(x1, t1, x1, b1, black);
        }
    }

    /// Textured fill of a projected face, restricted to `clip`.
    ///
    /// Each pixel in the quad's bounding box is mapped back to `(u, v)` by
    /// inverting the bilinear patch through the four screen-space corners;
    /// pixels whose inverse falls outside the unit square belong to a
    /// neighbouring face or the background and are left alone.
    pub fn draw_textured_quad(
        &mut self,
        face: &Face,
        clip: (i32, i32),
        proj: &Projection,
        max_dist: f32,
        tex: &Texture,
    ) {
        let (lx, rx) = (face.left.screen_x, face.right.screen_x);
        if lx == rx {
            return;
        }

        let h = self.height as f64;
        let ph_l = proj.wall_height(face.left.dist) as f64;
        let ph_r = proj.wall_height(face.right.dist) as f64;
        let ll = dvec2(lx as f64, (h + ph_l) * 0.5);
        let lr = dvec2(rx as f64, (h + ph_r) * 0.5);
        let ul = dvec2(lx as f64, (h - ph_l) * 0.5);
        let ur = dvec2(rx as f64, (h - ph_r) * 0.5);

        // bilinear patch P(u, v) = ll + b1·u + b2·v + b3·u·v
        let b1 = lr - ll;
        let b2 = ul - ll;
        let b3 = ur - lr - ul + ll;

        let x0 = lx.max(0).max(clip.0);
        let x1 = rx.min(self.width as i32 - 1).min(clip.1);
        let y0 = (ul.y.min(ur.y).floor() as i32).max(0);
        let y1 = (ll.y.max(lr.y).ceil() as i32).min(self.height as i32 - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let fade = dist_fade(face, max_dist);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let q = dvec2(x as f64, y as f64) - ll;
                if let Some(uv) = invert_bilinear(q, b1, b2, b3) {
                    let texel = tex.sample(uv.x as f32, 1.0 - uv.y as f32);
                    self.put(x, y, shade(texel, fade));
                }
            }
        }
    }
}

fn dist_fade(face: &Face, max_dist: f32) -> f32 {
    1.0 - (face.mean_dist_raw() / max_dist).min(1.0)
}

#[inline]
fn wedge(a: DVec2, b: DVec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Invert the bilinear patch `q = b1·u + b2·v + b3·u·v` (Inigo Quilez /
/// Reed's formulation). Returns `None` for points outside the patch; `u`
/// lives in `[0, 1)` and `v` in `(0, 1]` so adjoining quads never paint the
/// same pixel twice.
fn invert_bilinear(q: DVec2, b1: DVec2, b2: DVec2, b3: DVec2) -> Option<DVec2> {
    let a = wedge(b2, b3);
    let b = wedge(b3, q) - wedge(b1, b2);
    let c = wedge(b1, q);

    let v = if a.abs() < NEAR_ZERO {
        // parallelogram: the quadratic degenerates to a linear solve
        if b.abs() < NEAR_ZERO {
            return None;
        }
        -c / b
    } else {
        let d = b * b - 4.0 * a * c;
        if d <= 0.0 {
            return None;
        }
        let sq = d.sqrt();
        let v0 = (-b + sq) / (2.0 * a);
        let v1 = (-b - sq) / (2.0 * a);
        if (0.0..=1.0).contains(&v0) { v0 } else { v1 }
    };

    // solve for u along the v-interpolated base, from whichever component
    // is better conditioned
    let denom = b1 + b3 * v;
    let u = if denom.x.abs() >= denom.y.abs() {
        if denom.x.abs() < NEAR_ZERO {
            return None;
        }
        (q.x - b2.x * v) / denom.x
    } else {
        (q.y - b2.y * v) / denom.y
    };

    ((0.0..1.0).contains(&u) && v > 0.0 && v <= 1.0).then_some(dvec2(u, v))
}
