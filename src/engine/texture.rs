// Texture decoding and surface-fit math.
//
// Decoding happens off the event loop, so the result is a plain RGBA pixel
// buffer that can be shipped across threads and uploaded later. The repeat
// factors stretch or tile the image over the revolved surface based on the
// object's bounding size.

use glam::{Vec2, Vec3};

/// Decoded RGBA8 image ready for GPU upload.
pub struct TexturePixels {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA rows, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl TexturePixels {
    /// Decode an encoded image (PNG, JPEG) into RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }
}

/// UV repeat counts fitting an image of `width` x `height` texels onto an
/// object of the given bounding size. Images larger than the object stretch
/// to cover it once; smaller images tile, floored at one repeat per axis.
pub fn repeat_factors(object_size: Vec3, width: u32, height: u32) -> Vec2 {
    if width == 0 || height == 0 {
        return Vec2::ONE;
    }
    Vec2::new(
        (object_size.x / width as f32).max(1.0),
        (object_size.y / height as f32).max(1.0),
    )
}
