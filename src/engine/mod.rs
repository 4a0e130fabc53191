//! The per-frame render core: visibility classification, projection,
//! occlusion accounting and the frame pipeline tying them together.

pub mod faces;
pub mod frame;
pub mod occlusion;
pub mod projection;
pub mod visibility;

pub use faces::{Column, Face, Side};
pub use frame::{FrameSettings, FrameStats, RenderMode, Scene, render_frame};
pub use occlusion::{Span, SpanSet};
pub use projection::Projection;
pub use visibility::{ViewDirs, collect_faces, face_visible, tile_in_fov, visible_tiles};
