use crate::backend::{Backend, TextureFilter, TextureParameter, TextureWrap};
use crate::error::{Error, ResourceKind, Result};

/// Returns `true` when `value` is a non-zero power of two.
#[inline]
pub fn is_power_of_two(value: u32) -> bool {
    value.is_power_of_two()
}

/// Creates a 2D texture from tightly packed RGBA8 `pixels`.
///
/// Power-of-two textures get a full mipmap chain. Anything else is clamped
/// to the edge and sampled with nearest filtering, since mipmaps and
/// repeat wrapping are unavailable for such sizes on WebGL 1 class targets.
pub fn create_texture<B: Backend>(
    backend: &B,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<B::Texture> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(Error::TextureData { expected, actual: pixels.len() });
    }

    let texture = backend
        .create_texture()
        .ok_or(Error::Allocation(ResourceKind::Texture))?;

    backend.bind_texture_2d(Some(texture));
    backend.tex_image_2d_rgba8(width, height, pixels);

    if is_power_of_two(width) && is_power_of_two(height) {
        backend.generate_mipmap_2d();
    } else {
        backend.tex_parameter_2d(TextureParameter::WrapS(TextureWrap::ClampToEdge));
        backend.tex_parameter_2d(TextureParameter::WrapT(TextureWrap::ClampToEdge));
        backend.tex_parameter_2d(TextureParameter::MinFilter(TextureFilter::Nearest));
        backend.tex_parameter_2d(TextureParameter::MagFilter(TextureFilter::Nearest));
    }

    Ok(texture)
}

/// Creates a texture from a decoded image.
pub fn create_texture_from_image<B: Backend>(
    backend: &B,
    image: &image::RgbaImage,
) -> Result<B::Texture> {
    create_texture(backend, image.width(), image.height(), image.as_raw())
}
