//! Color helpers shared by mask classification and region tinting

use glam::Vec3;

/// Linear RGBA color type
pub type RegionColor = [f32; 4];

/// Convert 8-bit RGBA channels to a linear 0-1 color
#[inline]
pub fn from_rgba8(rgba: [u8; 4]) -> RegionColor {
    [
        rgba[0] as f32 / 255.0,
        rgba[1] as f32 / 255.0,
        rgba[2] as f32 / 255.0,
        rgba[3] as f32 / 255.0,
    ]
}

/// RGB channels of a color as a vector (alpha dropped)
#[inline]
pub fn rgb(color: RegionColor) -> Vec3 {
    Vec3::new(color[0], color[1], color[2])
}

/// Euclidean RGB distance between two colors
#[inline]
pub fn color_distance(a: RegionColor, b: RegionColor) -> f32 {
    rgb(a).distance(rgb(b))
}

/// Squared Euclidean RGB distance between two colors
#[inline]
pub fn color_distance_squared(a: RegionColor, b: RegionColor) -> f32 {
    rgb(a).distance_squared(rgb(b))
}

/// Scale the RGB channels of a color, forcing alpha to 1
pub fn tint(base: RegionColor, brightness: f32) -> RegionColor {
    [
        base[0] * brightness,
        base[1] * brightness,
        base[2] * brightness,
        1.0,
    ]
}
