use serde::{Deserialize, Serialize};

use crate::core::{
    coordinate_map::clamp_texture_coordinate,
    projection::Projection,
    texture::{Color, Texture},
};

/**
 * Nonlinear point transform applied after the affine part of an inverse map.
 * New variations are added here as new variants.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    Linear,
    Swirl,
    Sinusoidal,
}

impl Variation {
    pub fn apply(&self, point: &nalgebra::Vector2<f64>) -> nalgebra::Vector2<f64> {
        let (x, y) = (point[0], point[1]);
        match self {
            Variation::Linear => *point,
            Variation::Swirl => {
                let r_squared = x * x + y * y;
                let (sin_r2, cos_r2) = r_squared.sin_cos();
                nalgebra::Vector2::new(x * sin_r2 + y * cos_r2, -x * cos_r2 + y * sin_r2)
            }
            Variation::Sinusoidal => nalgebra::Vector2::new(x.sin(), y.sin()),
        }
    }
}

/**
 * One inverse branch of the IFS. Applied to a point on the plane, it yields the
 * point of the previous generation whose color flows into this one, scaled by
 * `weight_rgb`.
 *
 * Each affine row `[a, b, c]` evaluates to `a x + b y + c`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InverseMap {
    pub x_affine: nalgebra::Vector3<f64>,
    pub y_affine: nalgebra::Vector3<f64>,
    pub variation: Variation,
    pub weight_rgb: Color,
}

impl InverseMap {
    pub fn new(
        x_affine: [f64; 3],
        y_affine: [f64; 3],
        variation: Variation,
        weight_rgb: [f64; 3],
    ) -> InverseMap {
        InverseMap {
            x_affine: x_affine.into(),
            y_affine: y_affine.into(),
            variation,
            weight_rgb: weight_rgb.into(),
        }
    }

    /// Maps every point to itself and passes colors through unchanged.
    pub fn identity() -> InverseMap {
        InverseMap::new(
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            Variation::Linear,
            [1.0, 1.0, 1.0],
        )
    }

    pub fn affine(&self, point: &nalgebra::Vector2<f64>) -> nalgebra::Vector2<f64> {
        let homogeneous = nalgebra::Vector3::new(point[0], point[1], 1.0);
        nalgebra::Vector2::new(
            self.x_affine.dot(&homogeneous),
            self.y_affine.dot(&homogeneous),
        )
    }

    /// Affine transform followed by the variation.
    pub fn pre_image(&self, point: &nalgebra::Vector2<f64>) -> nalgebra::Vector2<f64> {
        self.variation.apply(&self.affine(point))
    }

    /**
     * Color this map pulls into `point` from the previous generation:
     * `weight * sample(source, plane_to_texture(variation(affine(point))))`.
     */
    pub fn contribution(
        &self,
        point: &nalgebra::Vector2<f64>,
        source: &Texture,
        projection: &Projection,
    ) -> Color {
        let uv = projection.plane_to_texture(&self.pre_image(point));
        source
            .sample(&clamp_texture_coordinate(&uv))
            .component_mul(&self.weight_rgb)
    }

    pub fn is_finite(&self) -> bool {
        self.x_affine
            .iter()
            .chain(self.y_affine.iter())
            .chain(self.weight_rgb.iter())
            .all(|value| value.is_finite())
    }
}
