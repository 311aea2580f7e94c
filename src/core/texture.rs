use more_asserts::{assert_ge, assert_lt, debug_assert_ge, debug_assert_lt};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

use super::coordinate_map::texture_to_image;

/// Linear RGB triple. Channels are not clamped while a render is in progress.
pub type Color = nalgebra::Vector3<f64>;

/**
 * Fixed-size grid of colors, stored row-major with row 0 at the top of the image.
 *
 * Every pass of a render reads one `Texture` and writes a fresh one; the two
 * never alias.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    resolution: nalgebra::Vector2<u32>,
    data: Vec<Color>,
}

impl Texture {
    pub fn new(resolution: nalgebra::Vector2<u32>, fill: Color) -> Texture {
        Texture {
            resolution,
            data: vec![fill; (resolution[0] as usize) * (resolution[1] as usize)],
        }
    }

    /**
     * Builds a texture by evaluating `pixel_color` at every pixel `(x, y)`.
     *
     * Rows are filled in parallel. `pixel_color` must be a pure function of the
     * pixel: nothing is shared between pixels, and each is written exactly once.
     */
    pub fn from_fn<F>(resolution: nalgebra::Vector2<u32>, pixel_color: F) -> Texture
    where
        F: Fn((u32, u32)) -> Color + Sync,
    {
        let mut texture = Texture::new(resolution, Color::zeros());
        let width = resolution[0] as usize;
        texture
            .data
            .par_chunks_mut(width.max(1))
            .enumerate()
            .for_each(|(y, row)| {
                for (x, elem) in row.iter_mut().enumerate() {
                    *elem = pixel_color((x as u32, y as u32));
                }
            });
        texture
    }

    pub fn resolution(&self) -> &nalgebra::Vector2<u32> {
        &self.resolution
    }

    pub fn width(&self) -> u32 {
        self.resolution[0]
    }

    pub fn height(&self) -> u32 {
        self.resolution[1]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    /**
     * Nearest-neighbor lookup at texture coordinates `uv`.
     *
     * Callers must keep `uv` in the sampleable region (see
     * `coordinate_map::clamp_texture_coordinate`); sampling outside it is a bug.
     */
    pub fn sample(&self, uv: &nalgebra::Vector2<f64>) -> Color {
        let (x, y) = texture_to_image(uv, &self.resolution);
        debug_assert_ge!(x, 0);
        debug_assert_ge!(y, 0);
        debug_assert_lt!(x, self.resolution[0] as i32);
        debug_assert_lt!(y, self.resolution[1] as i32);
        self[(x as u32, y as u32)]
    }

    /// Per-channel maximum, used for diagnostics.
    pub fn channel_max(&self) -> Color {
        self.data
            .iter()
            .fold(Color::zeros(), |max, color| max.sup(color))
    }

    fn flat_index(&self, pixel: (u32, u32)) -> usize {
        let (x, y) = pixel;
        assert!(
            x < self.resolution[0] && y < self.resolution[1],
            "pixel ({}, {}) is outside of the {}x{} texture",
            x,
            y,
            self.resolution[0],
            self.resolution[1]
        );
        (y as usize) * (self.resolution[0] as usize) + (x as usize)
    }
}

impl std::ops::Index<(u32, u32)> for Texture {
    type Output = Color;

    fn index(&self, pixel: (u32, u32)) -> &Color {
        &self.data[self.flat_index(pixel)]
    }
}

impl std::ops::IndexMut<(u32, u32)> for Texture {
    fn index_mut(&mut self, pixel: (u32, u32)) -> &mut Color {
        let index = self.flat_index(pixel);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate_map::image_to_texture;

    fn gradient_texture(resolution: nalgebra::Vector2<u32>) -> Texture {
        Texture::from_fn(resolution, |(x, y)| Color::new(x as f64, y as f64, (x * y) as f64))
    }

    #[test]
    fn test_texture_is_row_major_from_the_top() {
        let texture = gradient_texture(nalgebra::Vector2::new(3, 2));
        assert_eq!(texture.pixels().len(), 6);
        assert_eq!(texture.pixels()[1], Color::new(1.0, 0.0, 0.0));
        assert_eq!(texture.pixels()[3], Color::new(0.0, 1.0, 0.0));
        assert_eq!(texture[(2, 1)], Color::new(2.0, 1.0, 2.0));
    }

    #[test]
    fn test_sample_at_pixel_centers_returns_that_pixel() {
        let resolution = nalgebra::Vector2::new(5, 7);
        let texture = gradient_texture(resolution);
        for x in 0..resolution[0] {
            for y in 0..resolution[1] {
                let uv = image_to_texture((x, y), &resolution);
                assert_eq!(texture.sample(&uv), texture[(x, y)]);
            }
        }
    }

    #[test]
    fn test_sample_is_nearest_neighbor() {
        let texture = gradient_texture(nalgebra::Vector2::new(4, 4));
        // Anywhere inside the top-left cell:
        for uv in [[0.0, 1.0], [0.01, 0.99], [0.249, 0.751]] {
            let color = texture.sample(&nalgebra::Vector2::new(uv[0], uv[1]));
            assert_eq!(color, Color::zeros());
        }
        let color = texture.sample(&nalgebra::Vector2::new(0.26, 0.74));
        assert_eq!(color, Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_sample_below_the_texture_is_rejected() {
        let texture = gradient_texture(nalgebra::Vector2::new(4, 4));
        // v = 0 lands on row 4, one past the bottom of the image.
        let _ = texture.sample(&nalgebra::Vector2::new(0.5, 0.0));
    }

    #[test]
    fn test_channel_max() {
        let texture = gradient_texture(nalgebra::Vector2::new(3, 4));
        assert_eq!(texture.channel_max(), Color::new(2.0, 3.0, 6.0));
    }

    #[test]
    #[should_panic(expected = "outside of the")]
    fn test_index_out_of_bounds() {
        let texture = Texture::new(nalgebra::Vector2::new(2, 2), Color::repeat(1.0));
        let _ = texture[(2, 0)];
    }
}
