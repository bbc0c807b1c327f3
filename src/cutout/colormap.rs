//! Colormap rendering for normalized cutouts
//!
//! Colormaps are purely cosmetic: they map the normalized 8-bit
//! intensities to RGB for display and never influence the pipeline's
//! numeric output. Each map is a ramp of control points with linear
//! interpolation between them.

use std::collections::HashMap;

use image::{GrayImage, RgbImage};
use lazy_static::lazy_static;

use crate::cutout::errors::{CutoutError, CutoutResult};

/// Simple RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Create a new RGB color
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        RgbColor { r, g, b }
    }
}

/// A ramp colormap: control points over the 8-bit intensity range
#[derive(Debug, Clone)]
pub struct Colormap {
    /// Colormap name as selected on the command line
    pub name: &'static str,
    /// Control points as (intensity, color), sorted by intensity,
    /// always covering 0 and 255
    points: Vec<(u8, RgbColor)>,
}

lazy_static! {
    // Built-in ramps, approximating the familiar matplotlib palettes
    static ref COLORMAPS: HashMap<&'static str, Colormap> = {
        let mut maps = HashMap::new();
        for cmap in [
            Colormap::ramp("gray", vec![
                (0, RgbColor::new(0, 0, 0)),
                (255, RgbColor::new(255, 255, 255)),
            ]),
            Colormap::ramp("hot", vec![
                (0, RgbColor::new(0, 0, 0)),
                (85, RgbColor::new(255, 0, 0)),
                (170, RgbColor::new(255, 255, 0)),
                (255, RgbColor::new(255, 255, 255)),
            ]),
            Colormap::ramp("cool", vec![
                (0, RgbColor::new(0, 255, 255)),
                (255, RgbColor::new(255, 0, 255)),
            ]),
            Colormap::ramp("viridis", vec![
                (0, RgbColor::new(68, 1, 84)),
                (64, RgbColor::new(59, 82, 139)),
                (128, RgbColor::new(33, 145, 140)),
                (192, RgbColor::new(94, 201, 98)),
                (255, RgbColor::new(253, 231, 37)),
            ]),
            Colormap::ramp("plasma", vec![
                (0, RgbColor::new(13, 8, 135)),
                (64, RgbColor::new(126, 3, 168)),
                (128, RgbColor::new(204, 71, 120)),
                (192, RgbColor::new(248, 149, 64)),
                (255, RgbColor::new(240, 249, 33)),
            ]),
            Colormap::ramp("magma", vec![
                (0, RgbColor::new(0, 0, 4)),
                (64, RgbColor::new(81, 18, 124)),
                (128, RgbColor::new(183, 55, 121)),
                (192, RgbColor::new(252, 137, 97)),
                (255, RgbColor::new(252, 253, 191)),
            ]),
            Colormap::ramp("cividis", vec![
                (0, RgbColor::new(0, 32, 76)),
                (128, RgbColor::new(124, 123, 120)),
                (255, RgbColor::new(255, 234, 70)),
            ]),
        ] {
            maps.insert(cmap.name, cmap);
        }
        maps
    };
}

impl Colormap {
    fn ramp(name: &'static str, points: Vec<(u8, RgbColor)>) -> Self {
        Colormap { name, points }
    }

    /// Look up a built-in colormap by name
    ///
    /// # Arguments
    /// * `name` - Colormap name, e.g. "gray" or "viridis"
    ///
    /// # Returns
    /// The matching colormap or an error for unknown names
    pub fn by_name(name: &str) -> CutoutResult<Colormap> {
        COLORMAPS.get(name.to_lowercase().as_str())
            .cloned()
            .ok_or_else(|| CutoutError::GenericError(
                format!("Unknown colormap: {}", name)))
    }

    /// Names of all built-in colormaps
    pub fn available() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = COLORMAPS.keys().copied().collect();
        names.sort();
        names
    }

    /// Find the color for an intensity value via linear interpolation
    ///
    /// # Arguments
    /// * `value` - Normalized 8-bit intensity
    ///
    /// # Returns
    /// The interpolated RGB color
    pub fn color_for_value(&self, value: u8) -> RgbColor {
        let (lower, upper) = self.bracketing_points(value);

        if value <= lower.0 {
            return lower.1;
        }
        if value >= upper.0 {
            return upper.1;
        }

        let range = upper.0 as f32 - lower.0 as f32;
        let t = (value as f32 - lower.0 as f32) / range;

        let r = (lower.1.r as f32 * (1.0 - t) + upper.1.r as f32 * t) as u8;
        let g = (lower.1.g as f32 * (1.0 - t) + upper.1.g as f32 * t) as u8;
        let b = (lower.1.b as f32 * (1.0 - t) + upper.1.b as f32 * t) as u8;

        RgbColor::new(r, g, b)
    }

    /// Find the control points that bracket an intensity value
    fn bracketing_points(&self, value: u8) -> ((u8, RgbColor), (u8, RgbColor)) {
        let mut lower = self.points[0];
        let mut upper = self.points[self.points.len() - 1];

        for i in 0..self.points.len() - 1 {
            if self.points[i].0 <= value && self.points[i + 1].0 > value {
                lower = self.points[i];
                upper = self.points[i + 1];
                break;
            }
        }

        (lower, upper)
    }

    /// Apply this colormap to a normalized grayscale image
    ///
    /// # Arguments
    /// * `gray` - The normalized single-channel image
    ///
    /// # Returns
    /// An RGB image of the same dimensions
    pub fn apply(&self, gray: &GrayImage) -> RgbImage {
        let (width, height) = gray.dimensions();
        let mut rgb = RgbImage::new(width, height);

        for (x, y, pixel) in gray.enumerate_pixels() {
            let color = self.color_for_value(pixel.0[0]);
            rgb.put_pixel(x, y, image::Rgb([color.r, color.g, color.b]));
        }

        rgb
    }
}
