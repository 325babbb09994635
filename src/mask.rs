//! Mask image input and continent classification
//!
//! The mask is a color-coded raster: every continent is painted in its key
//! color and everything else is background. Samples are classified as ocean
//! or as a continent index by nearest-color matching.

use std::path::Path;

use crate::config::ContinentDefinition;
use crate::error::{MapGenError, Result};
use crate::mesh::{color_distance, color_distance_squared, from_rgba8, RegionColor};

/// Samples closer than this (RGB distance) to an ocean color are ocean
pub const OCEAN_DISTANCE: f32 = 0.2;
/// All channels below this count as a black background
pub const BLACK_LEVEL: f32 = 0.15;
/// All channels above this count as a white background
pub const WHITE_LEVEL: f32 = 0.85;
/// Alpha below this counts as a transparent background
pub const ALPHA_CUTOFF: f32 = 0.2;

/// An RGBA8 raster with top-left origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl MaskImage {
    /// Wrap a raw RGBA8 buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidMask` if the image is empty or the buffer length is not
    /// `width * height * 4`
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MapGenError::InvalidMask(format!(
                "mask must not be empty (got {}x{})",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(MapGenError::InvalidMask(format!(
                "expected {} bytes for a {}x{} RGBA mask, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Load a mask from an image file (any format the `image` crate decodes)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        Self::from(image).validated()
    }

    fn validated(self) -> Result<Self> {
        let (width, height) = (self.width, self.height);
        Self::from_rgba8(width, height, self.pixels)
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if the mask has no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA8 bytes of a pixel, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Nearest-pixel color at normalized coordinates, clamped to the image
    ///
    /// Returns transparent black for an empty mask.
    pub fn sample_uv(&self, u: f32, v: f32) -> RegionColor {
        if self.is_empty() {
            return [0.0; 4];
        }
        let max_x = self.width - 1;
        let max_y = self.height - 1;
        let x = (u * max_x as f32).round().clamp(0.0, max_x as f32) as u32;
        let y = (v * max_y as f32).round().clamp(0.0, max_y as f32) as u32;
        self.pixel(x, y).map(from_rgba8).unwrap_or([0.0; 4])
    }
}

impl From<image::RgbaImage> for MaskImage {
    fn from(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }
}

/// Classifies mask samples as ocean (`None`) or a continent index
///
/// The background color is auto-detected once from the image's top-left
/// pixel so that a black or colored background is not claimed by whichever
/// continent color happens to be nearest.
#[derive(Debug, Clone)]
pub struct MaskSampler<'a> {
    mask: &'a MaskImage,
    ocean_color: RegionColor,
    auto_ocean_color: RegionColor,
    continents: Vec<(RegionColor, f32)>,
}

impl<'a> MaskSampler<'a> {
    /// Create a sampler for the given mask and continent setup
    pub fn new(
        mask: &'a MaskImage,
        ocean_color: RegionColor,
        continents: &[ContinentDefinition],
    ) -> Self {
        let auto_ocean_color = mask.sample_uv(0.0, 0.0);
        tracing::debug!(?auto_ocean_color, "auto-detected ocean color");
        Self {
            mask,
            ocean_color,
            auto_ocean_color,
            continents: continents
                .iter()
                .map(|c| (c.color, c.color_tolerance))
                .collect(),
        }
    }

    /// The background color sampled from the mask corner
    #[inline]
    pub fn auto_ocean_color(&self) -> RegionColor {
        self.auto_ocean_color
    }

    /// Nearest-pixel color at normalized coordinates
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> RegionColor {
        self.mask.sample_uv(u, v)
    }

    /// Classify the mask at normalized coordinates
    #[inline]
    pub fn classify_uv(&self, u: f32, v: f32) -> Option<usize> {
        self.classify(self.sample(u, v))
    }

    /// Classify a color sample; the first matching rule wins
    pub fn classify(&self, sample: RegionColor) -> Option<usize> {
        if color_distance(sample, self.ocean_color) < OCEAN_DISTANCE
            || color_distance(sample, self.auto_ocean_color) < OCEAN_DISTANCE
            || is_background(sample)
        {
            return None;
        }

        let mut best = None;
        let mut best_dist_sq = f32::MAX;
        for (index, &(color, tolerance)) in self.continents.iter().enumerate() {
            let dist_sq = color_distance_squared(sample, color);
            if dist_sq < best_dist_sq && dist_sq < tolerance {
                best_dist_sq = dist_sq;
                best = Some(index);
            }
        }
        best
    }
}

/// Near-black, near-white or near-transparent samples
fn is_background(sample: RegionColor) -> bool {
    let [r, g, b, a] = sample;
    let black = r < BLACK_LEVEL && g < BLACK_LEVEL && b < BLACK_LEVEL;
    let white = r > WHITE_LEVEL && g > WHITE_LEVEL && b > WHITE_LEVEL;
    black || white || a < ALPHA_CUTOFF
}
