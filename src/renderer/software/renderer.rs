use crate::renderer::{Framebuffer, Rgba, mix};

/// CPU frame-buffer with the 2-D primitives the quad pipeline and the map
/// overlay draw with.
#[derive(Default)]
pub struct Software {
    pub(super) scratch: Vec<Rgba>,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl Framebuffer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        // near-black clear
        self.scratch.fill(0xFF_10_10_10);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

impl Software {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn put(&mut self, x: i32, y: i32, col: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = col;
        }
    }

    /// Vertical run from `y0` to `y1` in screen rows.
    ///
    /// The endpoints arrive unclamped from the projection; clipping to the
    /// viewport happens here and only here, so interpolation upstream always
    /// runs on the true quad geometry.
    pub fn vline(&mut self, x: i32, y0: f32, y1: f32, col: Rgba) {
        if !(0..self.width as i32).contains(&x) {
            return;
        }
        let top = y0.max(0.0) as usize;
        let bot = (y1.min(self.height as f32 - 1.0)) as usize;
        if y1 < 0.0 || y0 >= self.height as f32 || top > bot {
            return;
        }
        for y in top..=bot {
            self.scratch[y * self.width + x as usize] = col;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, col: Rgba) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.put(xx, yy, col);
            }
        }
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, col: Rgba) {
        self.draw_line(x, y, x + w - 1, y, col);
        self.draw_line(x, y + h - 1, x + w - 1, y + h - 1, col);
        self.draw_line(x, y, x, y + h - 1, col);
        self.draw_line(x + w - 1, y, x + w - 1, y + h - 1, col);
    }

    /// Bresenham line, clipped per pixel.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgba) {
        let mut x0 = x0;
        let mut y0 = y0;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, col);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Full-width horizontal band with a vertical colour ramp, `top` at row
    /// `y0` blending to `bottom` at row `y1`. Sky and floor backgrounds.
    pub fn fill_gradient_v(&mut self, y0: i32, y1: i32, top: Rgba, bottom: Rgba) {
        let from = y0.max(0);
        let to = y1.min(self.height as i32 - 1);
        let range = (y1 - y0).max(1) as f32;
        for y in from..=to {
            let col = mix(top, bottom, (y - y0) as f32 / range);
            let row = y as usize * self.width;
            self.scratch[row..row + self.width].fill(col);
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, col: Rgba) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.put(cx + dx, cy + dy, col);
                }
            }
        }
    }
}
