//! Software 3D-illusion renderer for grid maps.
//!
//! Instead of marching one ray per screen column, each frame works on whole
//! wall *faces*: the visibility classifier picks the solid tiles inside the
//! view cone and the faces turned towards the player, the projection engine
//! maps their vertical edges onto screen columns, and the faces are painted
//! near-to-far as screen-space quads. A sorted set of occlusion intervals
//! records which columns are already covered, so every column is painted by
//! at most the nearest unoccluded face, without a depth buffer.

pub mod engine;
pub mod geom;
pub mod renderer;
pub mod sim;
pub mod world;
