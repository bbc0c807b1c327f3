//! Tests for the intensity stretch transforms

extern crate std;

use crate::cutout::errors::CutoutError;
use crate::cutout::stretch::{self, Stretch};
use crate::cutout::tests::test_utils::{constant_image, encode_png, gradient_image};

#[test]
fn test_transform_spans_full_range() {
    let bytes = encode_png(&gradient_image());

    for stretch in [Stretch::None, Stretch::Log, Stretch::Asinh] {
        let result = stretch::transform(&bytes, stretch).unwrap();
        let min = result.as_raw().iter().min().copied().unwrap();
        let max = result.as_raw().iter().max().copied().unwrap();

        std::assert_eq!(min, 0, "{} stretch should hit 0", stretch.name());
        std::assert_eq!(max, 255, "{} stretch should hit 255", stretch.name());
    }
}

#[test]
fn test_transform_constant_input() {
    let bytes = encode_png(&constant_image(77));

    for stretch in [Stretch::None, Stretch::Log, Stretch::Asinh] {
        let result = stretch::transform(&bytes, stretch).unwrap();
        std::assert!(result.as_raw().iter().all(|&v| v == 128),
                     "{} stretch should yield a flat mid-range image", stretch.name());
    }
}

#[test]
fn test_transform_preserves_dimensions() {
    let bytes = encode_png(&gradient_image());
    let result = stretch::transform(&bytes, Stretch::Log).unwrap();
    std::assert_eq!(result.dimensions(), (8, 8));
}

#[test]
fn test_transform_is_deterministic() {
    let bytes = encode_png(&gradient_image());
    let first = stretch::transform(&bytes, Stretch::Log).unwrap();
    let second = stretch::transform(&bytes, Stretch::Log).unwrap();
    std::assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_stretch_functions_monotonic() {
    for stretch in [Stretch::Log, Stretch::Asinh] {
        let mut previous = stretch.apply(0.0);
        for v in 1..=255 {
            let current = stretch.apply(v as f32);
            std::assert!(current >= previous,
                         "{} stretch must be non-decreasing at {}", stretch.name(), v);
            previous = current;
        }
    }
}

#[test]
fn test_log_compresses_bright_end() {
    // Equal input steps should shrink at the bright end after log
    let low_step = Stretch::Log.apply(10.0) - Stretch::Log.apply(0.0);
    let high_step = Stretch::Log.apply(250.0) - Stretch::Log.apply(240.0);
    std::assert!(high_step < low_step);
}

#[test]
fn test_transform_rejects_invalid_bytes() {
    let result = stretch::transform(b"definitely not an image", Stretch::None);
    std::assert!(matches!(result, Err(CutoutError::DecodeError(_))));
}

#[test]
fn test_center_crop_dimensions() {
    let img = gradient_image();
    let crop = stretch::center_crop(&img);
    std::assert_eq!(crop.dimensions(), (4, 4));

    // Crop starts at (w/4, h/4)
    std::assert_eq!(crop.get_pixel(0, 0), img.get_pixel(2, 2));
    std::assert_eq!(crop.get_pixel(3, 3), img.get_pixel(5, 5));
}

#[test]
fn test_center_crop_tiny_image_is_identity() {
    let img = constant_image(5);
    let tiny = image::GrayImage::from_fn(2, 2, |x, y| *img.get_pixel(x, y));
    let crop = stretch::center_crop(&tiny);
    std::assert_eq!(crop.dimensions(), (2, 2));
}

#[test]
fn test_stretch_parsing() {
    std::assert_eq!(Stretch::parse("log").unwrap(), Stretch::Log);
    std::assert_eq!(Stretch::parse("ASINH").unwrap(), Stretch::Asinh);
    std::assert_eq!(Stretch::parse("none").unwrap(), Stretch::None);
    std::assert!(matches!(Stretch::parse("sqrt"),
                          Err(CutoutError::InvalidStretch(_))));
}
