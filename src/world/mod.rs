mod map;
mod player;
mod texture;

pub use map::{MapError, TileMap};
pub use player::Player;
pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
