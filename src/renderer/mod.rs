//! Pixel-buffer abstraction.
//!
//! The render core produces faces and clip ranges; everything that touches
//! actual pixels lives behind this module. The software back-end owns a
//! scratch buffer for the whole frame and loans it out in `end_frame`, so
//! the caller (typically a `minifb` window) never copies it twice.

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Opaque grey of the given intensity.
#[inline]
pub fn grey(intensity: u8) -> Rgba {
    let i = intensity as u32;
    0xFF_00_00_00 | (i << 16) | (i << 8) | i
}

/// Scale each colour channel by `f` in `[0, 1]`; alpha is preserved.
pub fn shade(c: Rgba, f: f32) -> Rgba {
    let f = f.clamp(0.0, 1.0);
    let r = (((c >> 16) & 0xFF) as f32 * f) as u32;
    let g = (((c >> 8) & 0xFF) as f32 * f) as u32;
    let b = ((c & 0xFF) as f32 * f) as u32;
    (c & 0xFF_00_00_00) | (r << 16) | (g << 8) | b
}

/// Channel-wise linear blend from `a` (t = 0) to `b` (t = 1).
pub fn mix(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let ch = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t) as u32) << shift
    };
    ch(24) | ch(16) | ch(8) | ch(0)
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure, run
/// exactly once per frame; window callers typically forward it to
/// `update_with_buffer`.
pub trait Framebuffer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

pub mod software;

pub use software::Software;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_scales_channels_and_keeps_alpha() {
        assert_eq!(shade(0xFF_80_40_20, 0.5), 0xFF_40_20_10);
        assert_eq!(shade(0xFF_FF_FF_FF, 0.0), 0xFF_00_00_00);
        assert_eq!(shade(0xFF_12_34_56, 1.0), 0xFF_12_34_56);
        // factor is clamped, never brightens past the input
        assert_eq!(shade(0xFF_10_10_10, 2.0), 0xFF_10_10_10);
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(mix(0xFF_00_00_00, 0xFF_FF_FF_FF, 0.0), 0xFF_00_00_00);
        assert_eq!(mix(0xFF_00_00_00, 0xFF_FF_FF_FF, 1.0), 0xFF_FF_FF_FF);
    }

    #[test]
    fn grey_packs_all_channels() {
        assert_eq!(grey(0x80), 0xFF_80_80_80);
    }
}
