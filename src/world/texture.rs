// Store of wall textures; the render pipeline refers to walls through
// `TextureId` only and never owns pixel data.

use std::collections::HashMap;

use crate::renderer::Rgba;

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// CPU-side storage: 32-bit ARGB (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

impl Texture {
    /// Sample at normalized `(u, v)`, both clamped to `[0, 1]`; nearest
    /// texel, v grows downwards.
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let x = ((u.clamp(0.0, 1.0) * self.w as f32) as usize).min(self.w - 1);
        let y = ((v.clamp(0.0, 1.0) * self.h as f32) as usize).min(self.h - 1);
        self.pixels[y * self.w + x]
    }

    /// Checkerboard in two colours, `cell` texels per square.
    pub fn checker(name: &str, size: usize, cell: usize, a: Rgba, b: Rgba) -> Self {
        let mut pixels = vec![0; size * size];
        for y in 0..size {
            for x in 0..size {
                pixels[y * size + x] = if ((x / cell) ^ (y / cell)) & 1 == 0 { a } else { b };
            }
        }
        Texture {
            name: name.to_string(),
            w: size,
            h: size,
            pixels,
        }
    }

    /// Procedural running-bond brick pattern with mortar lines, so the crate
    /// needs no image assets.
    pub fn bricks(name: &str, w: usize, h: usize) -> Self {
        const MORTAR: Rgba = 0xFF_AE_A4_96;
        const BRICK: [Rgba; 2] = [0xFF_A8_4A_38, 0xFF_92_3E_30];
        const BRICK_W: usize = 16;
        const BRICK_H: usize = 8;

        let mut pixels = vec![0; w * h];
        for y in 0..h {
            let row = y / BRICK_H;
            let offset = if row % 2 == 0 { 0 } else { BRICK_W / 2 };
            for x in 0..w {
                let xx = x + offset;
                let col = if y % BRICK_H == 0 || xx % BRICK_W == 0 {
                    MORTAR
                } else {
                    BRICK[(xx / BRICK_W + row) & 1]
                };
                pixels[y * w + x] = col;
            }
        }
        Texture {
            name: name.to_string(),
            w,
            h,
            pixels,
        }
    }
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        Texture::checker("CHECKER", 8, 1, 0xFF_70_70_70, 0xFF_30_30_30)
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),
}

/// A cache of textures keyed by name.
///
/// * Stores exactly one copy of every name.
/// * ID **0** is always the "missing" checkerboard.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback. The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Number of textures stored (including the "missing" one).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1 // only the fallback
    }

    /// Obtain the id for a *loaded* texture by name.
    /// Returns `None` if the name is unknown.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Fallback-safe query: unknown names resolve to the checkerboard id.
    pub fn id_or_missing(&self, name: &str) -> TextureId {
        self.id(name).unwrap_or(NO_TEXTURE)
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Borrow by id with the checkerboard as fallback; never fails because
    /// the constructor seeds slot 0.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data.get(id as usize).unwrap_or(&self.data[0])
    }

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tex(color: Rgba) -> Texture {
        Texture {
            name: "Dummy".to_string(),
            w: 2,
            h: 2,
            pixels: vec![color; 4],
        }
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::default_with_checker();
        let red = bank.insert("RED", dummy_tex(0xFF_FF_00_00)).unwrap();
        let blue = bank.insert("BLUE", dummy_tex(0xFF_00_00_FF)).unwrap();

        assert_ne!(red, NO_TEXTURE);
        assert_ne!(blue, red);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("BLUE"), Some(blue));
        assert_eq!(bank.id("NOPE"), None);
        assert_eq!(bank.id_or_missing("NOPE"), NO_TEXTURE);

        assert_eq!(bank.texture(red).unwrap().pixels[0], 0xFF_FF_00_00);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("WOOD", dummy_tex(1)).unwrap();
        let err = bank.insert("WOOD", dummy_tex(2)).unwrap_err();
        assert_eq!(err, TextureError::Duplicate("WOOD".into()));
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn bad_id_guard() {
        let bank = TextureBank::default_with_checker();
        let bad = TextureId::MAX;
        assert_eq!(bank.texture(bad).unwrap_err(), TextureError::BadId(bad));
        // fallback variant degrades to the checkerboard instead
        assert_eq!(bank.texture_or_missing(bad).name, "CHECKER");
    }

    #[test]
    fn sample_is_clamped_nearest() {
        let t = Texture::checker("T", 2, 1, 0xFF_FF_FF_FF, 0xFF_00_00_00);
        assert_eq!(t.sample(0.0, 0.0), 0xFF_FF_FF_FF);
        assert_eq!(t.sample(0.99, 0.0), 0xFF_00_00_00);
        // out-of-range coordinates clamp instead of wrapping
        assert_eq!(t.sample(-5.0, 0.0), t.sample(0.0, 0.0));
        assert_eq!(t.sample(5.0, 5.0), t.sample(1.0, 1.0));
    }
}
