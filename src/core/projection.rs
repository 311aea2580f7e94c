//! Bijections between the infinite plane and the unit texture square.

use serde::{Deserialize, Serialize};

/**
 * Selects how the (infinite) plane is squeezed into the finite texture.
 * Both directions are applied independently per axis.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// `t = p / (2 sqrt(1 + p^2)) + 0.5`
    #[default]
    ReciprocalSqrt,
}

impl Projection {
    pub fn plane_to_texture(&self, point: &nalgebra::Vector2<f64>) -> nalgebra::Vector2<f64> {
        match self {
            Projection::ReciprocalSqrt => point.map(rsqrt_plane_to_texture),
        }
    }

    pub fn texture_to_plane(&self, uv: &nalgebra::Vector2<f64>) -> nalgebra::Vector2<f64> {
        match self {
            Projection::ReciprocalSqrt => uv.map(rsqrt_texture_to_plane),
        }
    }
}

/**
 * Maps all of the real line monotonically into `(0, 1)`, with `0 -> 0.5`.
 *
 * `hypot` keeps the denominator finite for huge inputs, where `1 + p^2` would
 * overflow. The infinities map to the closed ends `0` and `1`, which makes this
 * the exact inverse of `rsqrt_texture_to_plane` on the extended line.
 */
pub fn rsqrt_plane_to_texture(p: f64) -> f64 {
    if p.is_infinite() {
        return if p > 0.0 { 1.0 } else { 0.0 };
    }
    p / (2.0 * 1.0_f64.hypot(p)) + 0.5
}

/**
 * Inverse of `rsqrt_plane_to_texture`: `p = (2t - 1) / sqrt(1 - (2t - 1)^2)`.
 *
 * The radicand is factored as `4 t (1 - t)`, which stays accurate near the
 * edges of the texture. At exactly `t = 0` and `t = 1` the result is `-inf`
 * and `+inf` respectively; outside `[0, 1]` it is NaN.
 */
pub fn rsqrt_texture_to_plane(t: f64) -> f64 {
    (2.0 * t - 1.0) / (2.0 * (t * (1.0 - t)).sqrt())
}
