//! Cutout descriptor and survey layer definitions
//!
//! A descriptor fully determines one remote cutout request: the sky
//! coordinates, the survey layer to render, and the zoom/size viewing
//! parameters. Building the request URL is a pure function of the
//! descriptor, which is what makes pipeline results cacheable.

use crate::cutout::constants::{endpoint, view};
use crate::cutout::errors::{CutoutError, CutoutResult};

/// Named rendering variants of the same sky region
///
/// The Legacy Survey serves the observed imaging, the fitted model and
/// their residual as separate layers under fixed identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyLayer {
    /// Observed imaging data
    Data,
    /// Fitted source model
    Model,
    /// Data minus model residual
    Residual,
}

impl SurveyLayer {
    /// The layer identifier used in cutout request URLs
    pub fn identifier(&self) -> &'static str {
        match self {
            SurveyLayer::Data => "ls-dr10",
            SurveyLayer::Model => "ls-dr10-model",
            SurveyLayer::Residual => "ls-dr10-resid",
        }
    }

    /// Human-readable layer name for display and logging
    pub fn display_name(&self) -> &'static str {
        match self {
            SurveyLayer::Data => "Data",
            SurveyLayer::Model => "Model",
            SurveyLayer::Residual => "Residual",
        }
    }

    /// All layers in display order
    pub fn triad() -> [SurveyLayer; 3] {
        [SurveyLayer::Data, SurveyLayer::Model, SurveyLayer::Residual]
    }

    /// Parse a layer from its name or identifier
    ///
    /// # Arguments
    /// * `name` - Layer name ("data", "model", "residual") or a full
    ///            layer identifier like "ls-dr10"
    ///
    /// # Returns
    /// The matching layer or an error for unknown names
    pub fn parse(name: &str) -> CutoutResult<Self> {
        match name.to_lowercase().as_str() {
            "data" | "ls-dr10" => Ok(SurveyLayer::Data),
            "model" | "ls-dr10-model" => Ok(SurveyLayer::Model),
            "residual" | "resid" | "ls-dr10-resid" => Ok(SurveyLayer::Residual),
            _ => Err(CutoutError::InvalidLayer(name.to_string())),
        }
    }
}

/// Descriptor for one remote cutout request
///
/// Holds everything needed to build the request URL: coordinates in
/// degrees, the survey layer, and the zoom/size viewing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutDescriptor {
    /// Right ascension in degrees (J2000)
    pub ra: f64,
    /// Declination in degrees (J2000)
    pub dec: f64,
    /// Survey layer to render
    pub layer: SurveyLayer,
    /// Zoom level, clamped to the service's accepted range
    pub zoom: u32,
    /// Image edge length in pixels, clamped to the accepted range
    pub size: u32,
}

impl CutoutDescriptor {
    /// Create a new descriptor, clamping zoom and size to service bounds
    ///
    /// # Arguments
    /// * `ra` - Right ascension in degrees
    /// * `dec` - Declination in degrees
    /// * `layer` - Survey layer to render
    /// * `zoom` - Requested zoom level
    /// * `size` - Requested image edge length in pixels
    pub fn new(ra: f64, dec: f64, layer: SurveyLayer, zoom: u32, size: u32) -> Self {
        CutoutDescriptor {
            ra,
            dec,
            layer,
            zoom: zoom.clamp(view::MIN_ZOOM, view::MAX_ZOOM),
            size: size.clamp(view::MIN_SIZE, view::MAX_SIZE),
        }
    }

    /// Build the full request URL for this descriptor
    ///
    /// # Returns
    /// The cutout service URL with ra/dec/layer/zoom/size query parameters
    pub fn url(&self) -> String {
        format!(
            "{}?ra={}&dec={}&layer={}&zoom={}&size={}",
            endpoint::CUTOUT_BASE,
            self.ra,
            self.dec,
            self.layer.identifier(),
            self.zoom,
            self.size
        )
    }
}
