//! Iterates an IFS backwards over a texture of the (projected) plane.
//!
//! Every pass pulls color from the previous generation through each inverse map
//! and sums the weighted contributions. After enough passes the texture converges
//! toward the attractor of the forward system.

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::core::{
    coordinate_map::image_to_texture,
    projection::Projection,
    texture::{Color, Texture},
};
use crate::error::ConfigError;

use super::ifs_map::InverseMap;

/**
 * Ordered, non-empty list of inverse maps. Contributions are summed in list
 * order, so a given system always produces bit-identical textures.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Vec<InverseMap>", into = "Vec<InverseMap>")]
pub struct IfsSystem {
    maps: Vec<InverseMap>,
}

impl IfsSystem {
    pub fn new(maps: Vec<InverseMap>) -> Result<IfsSystem, ConfigError> {
        if maps.is_empty() {
            return Err(ConfigError::EmptySystem);
        }
        if let Some(index) = maps.iter().position(|map| !map.is_finite()) {
            return Err(ConfigError::NonFiniteMap { index });
        }
        Ok(IfsSystem { maps })
    }

    pub fn maps(&self) -> &[InverseMap] {
        &self.maps
    }

    /**
     * Color of one destination pixel for the next generation. This is a pure
     * function of its arguments, which is what lets a pass run rows in parallel.
     */
    pub fn pixel_color(
        &self,
        pixel: (u32, u32),
        source: &Texture,
        projection: &Projection,
    ) -> Color {
        let point = projection.texture_to_plane(&image_to_texture(pixel, source.resolution()));
        self.maps.iter().fold(Color::zeros(), |accumulator, map| {
            accumulator + map.contribution(&point, source, projection)
        })
    }

    /**
     * Runs one full pass: reads `source`, returns a freshly allocated texture of
     * the same size. Colors are not clamped.
     */
    pub fn render_pass(&self, source: &Texture, projection: &Projection) -> Texture {
        Texture::from_fn(*source.resolution(), |pixel| {
            self.pixel_color(pixel, source, projection)
        })
    }
}

impl TryFrom<Vec<InverseMap>> for IfsSystem {
    type Error = ConfigError;

    fn try_from(maps: Vec<InverseMap>) -> Result<Self, Self::Error> {
        IfsSystem::new(maps)
    }
}

impl From<IfsSystem> for Vec<InverseMap> {
    fn from(system: IfsSystem) -> Self {
        system.maps
    }
}

/**
 * Indicator function of the bi-unit square: white wherever the pixel center
 * lies strictly inside `(-1, 1) x (-1, 1)` on the plane, black elsewhere.
 */
pub fn seed_texture(resolution: nalgebra::Vector2<u32>, projection: &Projection) -> Texture {
    Texture::from_fn(resolution, |pixel| {
        let point = projection.texture_to_plane(&image_to_texture(pixel, &resolution));
        if point.iter().all(|coordinate| coordinate.abs() < 1.0) {
            Color::repeat(1.0)
        } else {
            Color::zeros()
        }
    })
}

/**
 * Drives a render from the seed texture through a fixed number of passes.
 *
 * Construction validates the configuration and builds the seed (nothing is
 * rendered for an invalid configuration). Each call to `step` then consumes the
 * current texture completely and replaces it with the next generation. There is
 * no convergence check: exactly `pass_count` passes run.
 */
pub struct IfsEngine {
    system: IfsSystem,
    projection: Projection,
    pass_count: u32,
    completed_passes: u32,
    texture: Texture,
}

impl IfsEngine {
    pub fn new(
        system: IfsSystem,
        projection: Projection,
        resolution: nalgebra::Vector2<u32>,
        pass_count: u32,
    ) -> Result<IfsEngine, ConfigError> {
        if resolution[0] == 0 || resolution[1] == 0 {
            return Err(ConfigError::EmptyResolution {
                width: resolution[0],
                height: resolution[1],
            });
        }
        if pass_count == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        Ok(IfsEngine {
            texture: seed_texture(resolution, &projection),
            system,
            projection,
            pass_count,
            completed_passes: 0,
        })
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn completed_passes(&self) -> u32 {
        self.completed_passes
    }

    pub fn is_finished(&self) -> bool {
        self.completed_passes >= self.pass_count
    }

    /// Runs the next pass, returning the new texture, or `None` once every pass is done.
    pub fn step(&mut self) -> Option<&Texture> {
        if self.is_finished() {
            return None;
        }
        self.texture = self.system.render_pass(&self.texture, &self.projection);
        self.completed_passes += 1;
        Some(&self.texture)
    }

    /// Runs all remaining passes and hands back the converged texture.
    pub fn run(mut self) -> Texture {
        while self.step().is_some() {}
        self.into_texture()
    }

    pub fn into_texture(self) -> Texture {
        self.texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractals::ifs_map::Variation;
    use approx::assert_relative_eq;

    fn sierpinski_swirl_system() -> IfsSystem {
        IfsSystem::new(vec![
            InverseMap::new(
                [2.1, 0.0, 2.1 * 0.5],
                [0.0, 2.1, 2.1 * 0.5],
                Variation::Swirl,
                [0.5, 0.5, 1.0],
            ),
            InverseMap::new(
                [2.1, 0.0, -2.1 * 0.5],
                [0.0, 2.1, 2.1 * 0.5],
                Variation::Linear,
                [0.5, 1.0, 0.5],
            ),
            InverseMap::new(
                [2.1, 0.0, 0.0],
                [0.0, 2.1, -2.1 * 0.5],
                Variation::Linear,
                [1.0, 0.5, 0.5],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_seed_texture_is_bi_unit_square_indicator() {
        let resolution = nalgebra::Vector2::new(4, 4);
        let projection = Projection::ReciprocalSqrt;
        let seed = seed_texture(resolution, &projection);

        // Pixel centers sit at +-0.258 and +-1.134 on the plane along each axis.
        for x in 0..4 {
            for y in 0..4 {
                let inside = (1..=2).contains(&x) && (1..=2).contains(&y);
                let expected = if inside {
                    Color::repeat(1.0)
                } else {
                    Color::zeros()
                };
                assert_eq!(seed[(x, y)], expected, "pixel ({}, {})", x, y);

                let point = projection.texture_to_plane(&image_to_texture((x, y), &resolution));
                assert_eq!(inside, point[0].abs() < 1.0 && point[1].abs() < 1.0);
            }
        }
    }

    #[test]
    fn test_identity_system_reproduces_source() {
        let resolution = nalgebra::Vector2::new(9, 6);
        let source = Texture::from_fn(resolution, |(x, y)| {
            Color::new(x as f64 / 9.0, y as f64 / 6.0, ((x + 2 * y) % 5) as f64)
        });
        let system = IfsSystem::new(vec![InverseMap::identity()]).unwrap();
        let result = system.render_pass(&source, &Projection::ReciprocalSqrt);
        assert_eq!(result, source);
    }

    #[test]
    fn test_constant_source_sums_weights() {
        let resolution = nalgebra::Vector2::new(8, 8);
        let source = Texture::new(resolution, Color::repeat(1.0));
        let result = sierpinski_swirl_system().render_pass(&source, &Projection::ReciprocalSqrt);
        for color in result.pixels() {
            assert_eq!(*color, Color::new(2.0, 2.0, 2.0));
        }
    }

    #[test]
    fn test_map_order_does_not_change_result() {
        let resolution = nalgebra::Vector2::new(16, 16);
        let projection = Projection::ReciprocalSqrt;
        let source = seed_texture(resolution, &projection);

        let forward = sierpinski_swirl_system();
        let mut reversed_maps = forward.maps().to_vec();
        reversed_maps.reverse();
        let reversed = IfsSystem::new(reversed_maps).unwrap();

        let a = forward.render_pass(&source, &projection);
        let b = reversed.render_pass(&source, &projection);
        for (lhs, rhs) in a.pixels().iter().zip(b.pixels()) {
            assert_relative_eq!(*lhs, *rhs, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pixel_color_matches_render_pass() {
        let resolution = nalgebra::Vector2::new(12, 10);
        let projection = Projection::ReciprocalSqrt;
        let source = seed_texture(resolution, &projection);
        let system = sierpinski_swirl_system();
        let result = system.render_pass(&source, &projection);
        for (x, y) in [(0, 0), (5, 4), (11, 9), (3, 7)] {
            assert_eq!(result[(x, y)], system.pixel_color((x, y), &source, &projection));
        }
    }

    #[test]
    fn test_engine_runs_exactly_pass_count_passes() {
        let resolution = nalgebra::Vector2::new(8, 8);
        let mut engine = IfsEngine::new(
            sierpinski_swirl_system(),
            Projection::ReciprocalSqrt,
            resolution,
            3,
        )
        .unwrap();

        assert_eq!(engine.completed_passes(), 0);
        assert_eq!(engine.texture(), &seed_texture(resolution, &Projection::ReciprocalSqrt));

        let mut passes = 0;
        while engine.step().is_some() {
            passes += 1;
        }
        assert_eq!(passes, 3);
        assert!(engine.is_finished());
        assert!(engine.step().is_none());
        assert_eq!(engine.completed_passes(), 3);
    }

    #[test]
    fn test_engine_passes_chain_generations() {
        let resolution = nalgebra::Vector2::new(10, 10);
        let projection = Projection::ReciprocalSqrt;
        let system = sierpinski_swirl_system();

        let mut expected = seed_texture(resolution, &projection);
        for _ in 0..2 {
            expected = system.render_pass(&expected, &projection);
        }

        let engine = IfsEngine::new(system, projection, resolution, 2).unwrap();
        assert_eq!(engine.run(), expected);
    }

    #[test]
    fn test_engine_rejects_invalid_configuration() {
        let system = sierpinski_swirl_system();
        let projection = Projection::ReciprocalSqrt;

        assert_eq!(
            IfsEngine::new(system.clone(), projection, nalgebra::Vector2::new(0, 5), 1).err(),
            Some(ConfigError::EmptyResolution {
                width: 0,
                height: 5
            })
        );
        assert_eq!(
            IfsEngine::new(system, projection, nalgebra::Vector2::new(5, 5), 0).err(),
            Some(ConfigError::ZeroIterations)
        );
        assert_eq!(IfsSystem::new(Vec::new()), Err(ConfigError::EmptySystem));

        let mut bad_map = InverseMap::identity();
        bad_map.x_affine[2] = f64::INFINITY;
        assert_eq!(
            IfsSystem::new(vec![InverseMap::identity(), bad_map]),
            Err(ConfigError::NonFiniteMap { index: 1 })
        );
    }

    #[test]
    fn test_system_json_rejects_empty_list() {
        let parsed: Result<IfsSystem, _> = serde_json::from_str("[]");
        assert!(parsed.is_err());
    }
}
