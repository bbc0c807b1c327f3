use std::fs;
use std::path::Path;

use image::GrayImage;
use log::info;

use crate::catalog::table::Catalog;
use crate::cutout::colormap::Colormap;
use crate::cutout::descriptor::{CutoutDescriptor, SurveyLayer};
use crate::cutout::errors::{CutoutError, CutoutResult};
use crate::cutout::fetcher::HttpFetcher;
use crate::cutout::pipeline::{CutoutPipeline, LayerView};
use crate::cutout::stretch::Stretch;
use crate::catalog::session::ViewSettings;
use crate::utils::logger::Logger;

/// Main interface to the cutoutkit library
///
/// Owns the memoizing pipeline, so repeated requests for the same
/// coordinates and settings within one instance hit the cache.
pub struct CutoutKit {
    logger: Logger,
    pipeline: CutoutPipeline,
}

impl CutoutKit {
    /// Create a new CutoutKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "cutoutkit.log"
    ///
    /// # Returns
    /// A CutoutKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> CutoutResult<Self> {
        let log_path = log_file.unwrap_or("cutoutkit.log");
        let logger = Logger::new(log_path)?;
        Ok(CutoutKit {
            logger,
            pipeline: CutoutPipeline::new(Box::new(HttpFetcher::new())),
        })
    }

    /// Fetch a normalized cutout to memory
    ///
    /// # Arguments
    /// * `ra` - Right ascension in degrees
    /// * `dec` - Declination in degrees
    /// * `layer` - Survey layer to fetch
    /// * `settings` - Viewing parameters (zoom, size, stretch)
    ///
    /// # Returns
    /// The normalized single-channel image or an error
    pub fn fetch_cutout(&mut self,
                        ra: f64,
                        dec: f64,
                        layer: SurveyLayer,
                        settings: &ViewSettings) -> CutoutResult<GrayImage> {
        let descriptor = CutoutDescriptor::new(ra, dec, layer, settings.zoom, settings.size);
        let rendered = self.pipeline.get(&descriptor, settings.stretch)?;
        Ok(rendered.image)
    }

    /// Fetch a cutout and save it to an image file
    ///
    /// Applies the settings' colormap for the saved rendering.
    ///
    /// # Arguments
    /// * `ra` - Right ascension in degrees
    /// * `dec` - Declination in degrees
    /// * `layer` - Survey layer to fetch
    /// * `settings` - Viewing parameters including the colormap
    /// * `output_path` - Path for the saved image
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn fetch_to_file(&mut self,
                         ra: f64,
                         dec: f64,
                         layer: SurveyLayer,
                         settings: &ViewSettings,
                         output_path: &str) -> CutoutResult<()> {
        let image = self.fetch_cutout(ra, dec, layer, settings)?;
        let colormap = Colormap::by_name(&settings.colormap)?;

        colormap.apply(&image).save(Path::new(output_path))
            .map_err(|e| CutoutError::GenericError(
                format!("Could not save {}: {}", output_path, e)))?;

        self.logger.log(&format!(
            "Saved {} cutout at ra={}, dec={} to {}",
            layer.display_name(), ra, dec, output_path))?;
        Ok(())
    }

    /// Render the full layer triad for one sky position
    ///
    /// Layer failures are isolated in the returned views; this call
    /// itself never fails.
    ///
    /// # Arguments
    /// * `ra` - Right ascension in degrees
    /// * `dec` - Declination in degrees
    /// * `settings` - Viewing parameters
    ///
    /// # Returns
    /// One view per layer in Data/Model/Residual order
    pub fn render_layers(&mut self,
                         ra: f64,
                         dec: f64,
                         settings: &ViewSettings) -> Vec<LayerView> {
        self.pipeline.render_layers(
            ra, dec, &SurveyLayer::triad(),
            settings.zoom, settings.size,
            settings.stretch, settings.center_zoom)
    }

    /// Load a catalog, normalize its schema and export it
    ///
    /// # Arguments
    /// * `input_path` - Path to the input catalog CSV
    /// * `output_path` - Path for the exported snapshot
    ///
    /// # Returns
    /// The number of exported records or an error
    pub fn export_catalog(&self, input_path: &str, output_path: &str) -> CutoutResult<usize> {
        let catalog = Catalog::load(Path::new(input_path))?;
        fs::write(Path::new(output_path), catalog.to_csv())?;
        info!("Exported {} records to {}", catalog.len(), output_path);
        Ok(catalog.len())
    }

    /// Available stretch mode names
    pub fn list_stretch_modes(&self) -> Vec<&'static str> {
        vec![Stretch::None.name(), Stretch::Log.name(), Stretch::Asinh.name()]
    }

    /// Available colormap names
    pub fn list_colormaps(&self) -> Vec<&'static str> {
        Colormap::available()
    }
}
