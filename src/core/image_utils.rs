use std::path::{Path, PathBuf};

use super::texture::{Color, Texture};

/**
 * Clamps a single channel into the displayable range `[0, 1]`. NaN, which can only
 * come from a degenerate configuration (e.g. a negative weight raised to a
 * fractional power), is treated as black.
 */
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub fn clamp_color(color: &Color) -> Color {
    color.map(clamp_unit)
}

/// `floor(255 c)` after clamping `c` into `[0, 1]`.
pub fn quantize_channel(value: f64) -> u8 {
    (255.0 * clamp_unit(value)).floor() as u8
}

/**
 * Converts a texture with normalized channels into an 8-bit RGB image of the same
 * dimensions. Out-of-range channels are clamped rather than wrapped.
 */
pub fn texture_to_rgb_image(texture: &Texture) -> image::RgbImage {
    image::RgbImage::from_fn(texture.width(), texture.height(), |x, y| {
        let color = &texture[(x, y)];
        image::Rgb([
            quantize_channel(color[0]),
            quantize_channel(color[1]),
            quantize_channel(color[2]),
        ])
    })
}

/**
 * Quantizes `texture` and writes it to `path`, deducing the format from the
 * file extension.
 */
pub fn write_texture_to_file(
    texture: &Texture,
    path: &Path,
) -> Result<PathBuf, image::ImageError> {
    texture_to_rgb_image(texture).save(path)?;
    log::info!("Wrote image file to: {}", path.display());
    Ok(path.to_path_buf())
}
