//! Cutout acquisition-and-enhancement pipeline
//!
//! Composes the fetcher and the stretch transform into one cacheable
//! operation. Results are memoized by the full request key (coordinates,
//! layer, zoom, size, stretch); memoization is an optimization only, and
//! a cache miss simply re-fetches. Layer failures are isolated so that
//! one broken layer never blocks display of its siblings.

use std::collections::HashMap;

use image::GrayImage;
use log::{debug, info, warn};

use crate::cutout::descriptor::{CutoutDescriptor, SurveyLayer};
use crate::cutout::errors::CutoutResult;
use crate::cutout::fetcher::CutoutFetcher;
use crate::cutout::stretch::{self, Stretch};

/// Cache key covering everything that determines a pipeline result
///
/// Coordinates are stored as raw f64 bits so the key can be hashed;
/// descriptors are only ever built from the same parsed values, so
/// bit-equality is the right identity here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    ra_bits: u64,
    dec_bits: u64,
    layer: SurveyLayer,
    zoom: u32,
    size: u32,
    stretch: Stretch,
}

impl CacheKey {
    fn new(descriptor: &CutoutDescriptor, stretch: Stretch) -> Self {
        CacheKey {
            ra_bits: descriptor.ra.to_bits(),
            dec_bits: descriptor.dec.to_bits(),
            layer: descriptor.layer,
            zoom: descriptor.zoom,
            size: descriptor.size,
            stretch,
        }
    }
}

/// A normalized cutout ready for rendering
#[derive(Debug, Clone)]
pub struct RenderedCutout {
    /// Normalized single-channel image in the 8-bit range
    pub image: GrayImage,
    /// The originating request URL
    pub url: String,
}

/// Per-layer rendering outcome for one record
///
/// Each layer of the triad is fetched independently; a failed layer
/// carries its error here so the caller can show a placeholder without
/// aborting the sibling layers.
pub struct LayerView {
    /// Which layer this outcome belongs to
    pub layer: SurveyLayer,
    /// The request URL that was (or would have been) fetched
    pub url: String,
    /// The rendered cutout, or the per-layer failure
    pub result: CutoutResult<RenderedCutout>,
    /// Center 50%-by-50% crop, present when center zoom is enabled
    /// and the layer rendered successfully
    pub center_zoom: Option<GrayImage>,
}

/// Memoizing cutout pipeline
///
/// Owns the fetcher and an unbounded result cache. The keyspace is
/// bounded in practice by the records and settings actually visited in
/// a session, so no eviction policy is applied.
pub struct CutoutPipeline {
    fetcher: Box<dyn CutoutFetcher>,
    cache: HashMap<CacheKey, RenderedCutout>,
}

impl CutoutPipeline {
    /// Create a pipeline around a fetcher implementation
    pub fn new(fetcher: Box<dyn CutoutFetcher>) -> Self {
        CutoutPipeline {
            fetcher,
            cache: HashMap::new(),
        }
    }

    /// Get the normalized cutout for a descriptor and stretch mode
    ///
    /// Returns the cached result when the same key was already computed,
    /// otherwise fetches the raw payload, applies the stretch transform
    /// and caches the outcome.
    ///
    /// # Arguments
    /// * `descriptor` - The cutout request parameters
    /// * `stretch` - Stretch mode applied before normalization
    ///
    /// # Returns
    /// The normalized cutout plus its originating URL, or a fetch/decode
    /// error
    pub fn get(&mut self, descriptor: &CutoutDescriptor, stretch: Stretch)
               -> CutoutResult<RenderedCutout> {
        let key = CacheKey::new(descriptor, stretch);
        if let Some(cached) = self.cache.get(&key) {
            debug!("Cache hit for {} ({})", cached.url, stretch.name());
            return Ok(cached.clone());
        }

        let url = descriptor.url();
        let bytes = self.fetcher.fetch(&url)?;
        let image = stretch::transform(&bytes, stretch)?;

        let rendered = RenderedCutout { image, url };
        self.cache.insert(key, rendered.clone());
        Ok(rendered)
    }

    /// Render a set of layers for one sky position
    ///
    /// Fetches each layer independently and never fails as a whole: a
    /// layer that cannot be fetched or decoded carries its error in the
    /// returned view while its siblings still render.
    ///
    /// # Arguments
    /// * `ra` - Right ascension in degrees
    /// * `dec` - Declination in degrees
    /// * `layers` - Layers to render
    /// * `zoom` - Zoom level
    /// * `size` - Image edge length in pixels
    /// * `stretch` - Stretch mode
    /// * `center_zoom` - Whether to also produce the center crop inset
    ///
    /// # Returns
    /// One view per requested layer, in the given order
    pub fn render_layers(&mut self,
                         ra: f64,
                         dec: f64,
                         layers: &[SurveyLayer],
                         zoom: u32,
                         size: u32,
                         stretch: Stretch,
                         center_zoom: bool) -> Vec<LayerView> {
        layers.iter().map(|&layer| {
            let descriptor = CutoutDescriptor::new(ra, dec, layer, zoom, size);
            let url = descriptor.url();
            let result = self.get(&descriptor, stretch);

            if let Err(ref e) = result {
                warn!("Layer {} failed for ra={}, dec={}: {}",
                      layer.display_name(), ra, dec, e);
            }

            let center_zoom = match (&result, center_zoom) {
                (Ok(rendered), true) => Some(stretch::center_crop(&rendered.image)),
                _ => None,
            };

            LayerView { layer, url, result, center_zoom }
        }).collect()
    }

    /// Number of memoized results currently held
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop all memoized results
    ///
    /// Rendering after a clear is always safe, it just re-fetches.
    pub fn clear_cache(&mut self) {
        info!("Clearing cutout cache ({} entries)", self.cache.len());
        self.cache.clear();
    }
}
