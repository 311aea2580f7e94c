//! Conversions between discrete image pixels and normalized texture coordinates.
//!
//! Texture coordinates live in the unit square with the vertical axis flipped
//! relative to pixel rows: row 0 (the top of the image) sits just below `v = 1`.
//! The sampleable region is `u in [0, 1)` and `v in (0, 1]`.

/**
 * Maps the center of pixel `(x, y)` into texture coordinates.
 *
 * Pixel centers never land on exactly `0` or `1`, which keeps every result
 * strictly inside the open unit square.
 */
pub fn image_to_texture(
    pixel: (u32, u32),
    resolution: &nalgebra::Vector2<u32>,
) -> nalgebra::Vector2<f64> {
    let (x, y) = pixel;
    let u = (x as f64 + 0.5) / (resolution[0] as f64);
    let v = (y as f64 + 0.5) / (resolution[1] as f64);
    nalgebra::Vector2::new(u, 1.0 - v)
}

/**
 * Maps texture coordinates to the pixel cell that contains them.
 *
 * This floors to the containing cell rather than inverting `image_to_texture`
 * exactly: the sub-pixel offset is lost. The caller must keep `uv` inside the
 * sampleable region; anything else yields an index outside the image.
 */
pub fn texture_to_image(
    uv: &nalgebra::Vector2<f64>,
    resolution: &nalgebra::Vector2<u32>,
) -> (i32, i32) {
    let x = (uv[0] * (resolution[0] as f64)).floor();
    let y = ((1.0 - uv[1]) * (resolution[1] as f64)).floor();
    (x as i32, y as i32)
}

/// Largest value strictly below one.
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

/// Smallest `v` for which `1 - v` still rounds below one.
const V_MIN: f64 = f64::EPSILON / 2.0;

fn clamp_or_center(t: f64, low: f64, high: f64) -> f64 {
    if t.is_nan() {
        0.5
    } else {
        t.clamp(low, high)
    }
}

/**
 * Forces a texture coordinate into the sampleable region.
 *
 * `plane_to_texture` rounds to exactly `0.0` or `1.0` for very large plane
 * coordinates, so every coordinate computed from the plane passes through here
 * before it reaches the sampler. Points inside the region are returned unchanged.
 */
pub fn clamp_texture_coordinate(uv: &nalgebra::Vector2<f64>) -> nalgebra::Vector2<f64> {
    nalgebra::Vector2::new(
        clamp_or_center(uv[0], 0.0, ONE_BELOW),
        clamp_or_center(uv[1], V_MIN, 1.0),
    )
}
