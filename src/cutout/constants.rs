//! Cutout service constants
//!
//! This module defines constants for the remote cutout endpoint and the
//! operator-adjustable viewing parameters, replacing magic numbers with
//! descriptive names.

/// Remote cutout endpoint
pub mod endpoint {
    /// Base URL of the Legacy Survey JPEG cutout service
    pub const CUTOUT_BASE: &str = "https://www.legacysurvey.org/viewer/jpeg-cutout";
}

/// Bounds and defaults for the viewing parameters
pub mod view {
    /// Minimum zoom level accepted by the cutout service
    pub const MIN_ZOOM: u32 = 5;

    /// Maximum zoom level accepted by the cutout service
    pub const MAX_ZOOM: u32 = 20;

    /// Default zoom level
    pub const DEFAULT_ZOOM: u32 = 10;

    /// Minimum image edge length in pixels
    pub const MIN_SIZE: u32 = 128;

    /// Maximum image edge length in pixels
    pub const MAX_SIZE: u32 = 512;

    /// Default image edge length in pixels
    pub const DEFAULT_SIZE: u32 = 256;
}
