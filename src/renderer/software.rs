//! ---------------------------------------------------------------------------
//! Software (CPU) quad renderer
//!
//! * Fills an internal `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Relies on the occlusion set to feed non-overlapping clip ranges, so no
//!   Z-buffer is needed.
//! ---------------------------------------------------------------------------

mod overlay;
mod quads;
mod renderer;

pub use renderer::Software;
