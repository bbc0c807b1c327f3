//! One-shot cutout fetch command
//!
//! This module implements the command for fetching a single cutout for
//! explicit coordinates and saving the normalized, colormapped result
//! to an image file.

use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::view_settings_from_args;
use crate::cutout::colormap::Colormap;
use crate::cutout::descriptor::{CutoutDescriptor, SurveyLayer};
use crate::cutout::errors::{CutoutError, CutoutResult};
use crate::cutout::fetcher::HttpFetcher;
use crate::cutout::pipeline::CutoutPipeline;
use crate::cutout::stretch;
use crate::catalog::session::ViewSettings;
use crate::utils::logger::Logger;

/// Command for fetching one cutout to an image file
pub struct FetchCommand<'a> {
    /// Right ascension in degrees
    ra: f64,
    /// Declination in degrees
    dec: f64,
    /// Survey layer to fetch
    layer: SurveyLayer,
    /// Output image path
    output_file: String,
    /// Viewing parameters from the command line
    settings: ViewSettings,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> FetchCommand<'a> {
    /// Create a new fetch command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new FetchCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CutoutResult<Self> {
        let coordinate = |name: &str| -> CutoutResult<f64> {
            args.get_one::<String>(name)
                .ok_or_else(|| CutoutError::GenericError(
                    format!("--{} is required with --fetch", name)))?
                .parse::<f64>()
                .map_err(|_| CutoutError::GenericError(
                    format!("Invalid --{} value", name)))
        };

        let ra = coordinate("ra")?;
        let dec = coordinate("dec")?;

        let layer = match args.get_one::<String>("layer") {
            Some(name) => SurveyLayer::parse(name)?,
            None => SurveyLayer::Data,
        };

        let output_file = args.get_one::<String>("output")
            .cloned()
            .unwrap_or_else(|| "cutout.png".to_string());

        let settings = view_settings_from_args(args)?;

        Ok(FetchCommand {
            ra,
            dec,
            layer,
            output_file,
            settings,
            logger,
        })
    }
}

impl<'a> Command for FetchCommand<'a> {
    fn execute(&self) -> CutoutResult<()> {
        self.logger.log(&format!(
            "Fetching {} cutout at ra={}, dec={}",
            self.layer.display_name(), self.ra, self.dec))?;

        let descriptor = CutoutDescriptor::new(
            self.ra, self.dec, self.layer,
            self.settings.zoom, self.settings.size);

        let mut pipeline = CutoutPipeline::new(Box::new(HttpFetcher::new()));
        let rendered = pipeline.get(&descriptor, self.settings.stretch)?;

        let colormap = Colormap::by_name(&self.settings.colormap)?;
        let rgb = colormap.apply(&rendered.image);
        rgb.save(Path::new(&self.output_file))
            .map_err(|e| CutoutError::GenericError(
                format!("Could not save {}: {}", self.output_file, e)))?;

        info!("Saved cutout from {} to {}", rendered.url, self.output_file);
        println!("Saved {} cutout to {}", self.layer.display_name(), self.output_file);

        if self.settings.center_zoom {
            let crop = stretch::center_crop(&rendered.image);
            let crop_path = center_zoom_path(&self.output_file);
            colormap.apply(&crop).save(Path::new(&crop_path))
                .map_err(|e| CutoutError::GenericError(
                    format!("Could not save {}: {}", crop_path, e)))?;
            println!("Saved center zoom to {}", crop_path);
        }

        Ok(())
    }
}

/// Derive the center-zoom filename from the main output path
fn center_zoom_path(output_file: &str) -> String {
    match output_file.rsplit_once('.') {
        Some((stem, ext)) => format!("{}_center.{}", stem, ext),
        None => format!("{}_center.png", output_file),
    }
}
