//! Tests for colormap lookup and application

extern crate std;

use crate::cutout::colormap::{Colormap, RgbColor};
use crate::cutout::tests::test_utils::gradient_image;

#[test]
fn test_gray_endpoints() {
    let gray = Colormap::by_name("gray").unwrap();
    std::assert_eq!(gray.color_for_value(0), RgbColor::new(0, 0, 0));
    std::assert_eq!(gray.color_for_value(255), RgbColor::new(255, 255, 255));
}

#[test]
fn test_gray_is_neutral_midway() {
    let gray = Colormap::by_name("gray").unwrap();
    let mid = gray.color_for_value(128);
    std::assert_eq!(mid.r, mid.g);
    std::assert_eq!(mid.g, mid.b);
}

#[test]
fn test_interpolation_between_control_points() {
    let hot = Colormap::by_name("hot").unwrap();
    // Between black (0) and red (85) the green/blue channels stay at 0
    let color = hot.color_for_value(42);
    std::assert!(color.r > 0 && color.r < 255);
    std::assert_eq!(color.g, 0);
    std::assert_eq!(color.b, 0);
}

#[test]
fn test_unknown_colormap_rejected() {
    std::assert!(Colormap::by_name("jet").is_err());
}

#[test]
fn test_lookup_is_case_insensitive() {
    std::assert!(Colormap::by_name("Viridis").is_ok());
}

#[test]
fn test_apply_preserves_dimensions() {
    let gray = Colormap::by_name("gray").unwrap();
    let img = gradient_image();
    let rgb = gray.apply(&img);
    std::assert_eq!(rgb.dimensions(), img.dimensions());

    // Gray mapping keeps the channels neutral and close to the source
    // value (interpolation may truncate by one)
    let source = img.get_pixel(3, 3).0[0];
    let [r, g, b] = rgb.get_pixel(3, 3).0;
    std::assert_eq!(r, g);
    std::assert_eq!(g, b);
    std::assert!(r.abs_diff(source) <= 1);
}

#[test]
fn test_available_contains_builtins() {
    let names = Colormap::available();
    for expected in ["cividis", "cool", "gray", "hot", "magma", "plasma", "viridis"] {
        std::assert!(names.contains(&expected), "missing {}", expected);
    }
}
