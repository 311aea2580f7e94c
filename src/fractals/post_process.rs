use serde::{Deserialize, Serialize};

use crate::core::{
    coordinate_map::{clamp_texture_coordinate, image_to_texture},
    image_utils::clamp_color,
    projection::Projection,
    texture::{Color, Texture},
};
use crate::error::ConfigError;

/**
 * How the converged texture is turned into the final image: the view window
 * `[-scale, scale] x [-scale, scale]` on the plane, and the display gamma.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PostProcessParams {
    pub scale: f64,
    pub gamma: f64,
}

impl PostProcessParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        Ok(())
    }
}

/// `color^(1 / gamma)`, per channel.
pub fn gamma_correct(color: &Color, gamma: f64) -> Color {
    let exponent = 1.0 / gamma;
    color.map(|channel| channel.powf(exponent))
}

/**
 * Re-samples `texture` so that the output pixels span the plane window
 * `[-scale, scale]^2` linearly, instead of the whole (projected) plane.
 */
pub fn reproject(texture: &Texture, scale: f64, projection: &Projection) -> Texture {
    let resolution = *texture.resolution();
    Texture::from_fn(resolution, |pixel| {
        let uv = image_to_texture(pixel, &resolution);
        let point = uv.map(|t| (2.0 * t - 1.0) * scale);
        let view_uv = clamp_texture_coordinate(&projection.plane_to_texture(&point));
        texture.sample(&view_uv)
    })
}

/**
 * Produces the final image buffer: re-projection, then gamma correction, then
 * clamping into `[0, 1]` so that the result is ready for quantization.
 */
pub fn finalize(
    texture: &Texture,
    params: &PostProcessParams,
    projection: &Projection,
) -> Texture {
    let view = reproject(texture, params.scale, projection);
    Texture::from_fn(*view.resolution(), |pixel| {
        clamp_color(&gamma_correct(&view[pixel], params.gamma))
    })
}
