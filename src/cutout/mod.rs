//! Cutout acquisition and enhancement
//!
//! This module retrieves rendered sky-survey cutouts from the remote
//! service and normalizes them for display: fetch, stretch, rescale,
//! and memoize, with cosmetic colormap rendering on top.

pub mod errors;
pub mod descriptor;
pub mod stretch;
pub mod fetcher;
pub mod pipeline;
pub mod colormap;
pub(crate) mod constants;
#[cfg(test)]
mod tests;

pub use errors::{CutoutError, CutoutResult};
pub use descriptor::{CutoutDescriptor, SurveyLayer};
pub use stretch::Stretch;
pub use fetcher::{CutoutFetcher, HttpFetcher};
pub use pipeline::{CutoutPipeline, LayerView, RenderedCutout};
pub use colormap::{Colormap, RgbColor};
