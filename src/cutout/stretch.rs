//! Intensity stretch transforms
//!
//! This module converts a raw cutout payload into a normalized
//! single-channel image. The stretch is a monotonic compressive function
//! applied to the pre-normalization pixel values to reveal faint
//! structure; the result is then contrast-stretched to the full 8-bit
//! range using the observed minimum and maximum.

use image::GrayImage;
use log::debug;

use crate::cutout::errors::{CutoutError, CutoutResult};

/// Output value for a constant-intensity input, where contrast
/// stretching has no range to work with.
const FLAT_FIELD_VALUE: u8 = 128;

/// Available intensity stretch modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stretch {
    /// Identity, no compression
    None,
    /// Natural log of (1 + x)
    Log,
    /// Inverse hyperbolic sine
    Asinh,
}

impl Stretch {
    /// Parse a stretch mode from its name
    ///
    /// # Arguments
    /// * `name` - One of "none", "log" or "asinh"
    ///
    /// # Returns
    /// The matching stretch mode or an error for unknown names
    pub fn parse(name: &str) -> CutoutResult<Self> {
        match name.to_lowercase().as_str() {
            "none" => Ok(Stretch::None),
            "log" => Ok(Stretch::Log),
            "asinh" => Ok(Stretch::Asinh),
            _ => Err(CutoutError::InvalidStretch(name.to_string())),
        }
    }

    /// Name of this stretch mode as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Stretch::None => "none",
            Stretch::Log => "log",
            Stretch::Asinh => "asinh",
        }
    }

    /// Apply the stretch function to a single pre-normalization value
    pub fn apply(&self, value: f32) -> f32 {
        match self {
            Stretch::None => value,
            Stretch::Log => (1.0 + value).ln(),
            Stretch::Asinh => value.asinh(),
        }
    }
}

/// Decode raw image bytes and apply an intensity stretch
///
/// Decodes the payload to a luminance image, applies the stretch to the
/// pre-normalization pixel values, then linearly rescales the observed
/// value range to [0, 255] and quantizes to 8-bit.
///
/// # Arguments
/// * `bytes` - Raw image payload as fetched from the cutout service
/// * `stretch` - Stretch mode to apply before normalization
///
/// # Returns
/// The normalized single-channel image, or a decode error if the bytes
/// are not a valid image
pub fn transform(bytes: &[u8], stretch: Stretch) -> CutoutResult<GrayImage> {
    let decoded = image::load_from_memory(bytes)?;
    let luma = decoded.to_luma8();
    let (width, height) = luma.dimensions();

    debug!("Decoded {}x{} luminance image, applying {} stretch",
           width, height, stretch.name());

    let stretched: Vec<f32> = luma.as_raw()
        .iter()
        .map(|&v| stretch.apply(v as f32))
        .collect();

    Ok(rescale_to_u8(&stretched, width, height))
}

/// Linearly rescale values to [0, 255] and quantize
///
/// Uses the observed min/max of the input (contrast stretch). A constant
/// input has no range to rescale, so it maps to a flat mid-range image
/// rather than dividing by zero.
fn rescale_to_u8(values: &[f32], width: u32, height: u32) -> GrayImage {
    let min = values.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

    let pixels: Vec<u8> = if max > min {
        let scale = 255.0 / (max - min);
        values.iter()
            .map(|&v| ((v - min) * scale).round().clamp(0.0, 255.0) as u8)
            .collect()
    } else {
        vec![FLAT_FIELD_VALUE; values.len()]
    };

    // Dimensions come straight from the decoded image, so this cannot fail
    GrayImage::from_raw(width, height, pixels)
        .unwrap_or_else(|| GrayImage::new(width, height))
}

/// Crop the central 50%-by-50%-area region of a normalized image
///
/// Selects rows [h/4, 3h/4) and columns [w/4, 3w/4) for a magnified
/// center inset. This is pure post-processing on an already normalized
/// image, not a separate fetch.
///
/// # Arguments
/// * `img` - The normalized image to crop
///
/// # Returns
/// The central crop, or a copy of the input if it is too small to crop
pub fn center_crop(img: &GrayImage) -> GrayImage {
    let (w, h) = img.dimensions();
    if w < 4 || h < 4 {
        return img.clone();
    }

    let (x0, y0) = (w / 4, h / 4);
    let (cw, ch) = (w / 2, h / 2);

    let mut crop = GrayImage::new(cw, ch);
    for y in 0..ch {
        for x in 0..cw {
            crop.put_pixel(x, y, *img.get_pixel(x0 + x, y0 + y));
        }
    }
    crop
}
