//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod review_command;
pub mod fetch_command;
pub mod export_command;

pub use command_traits::{Command, CommandFactory};
pub use review_command::ReviewCommand;
pub use fetch_command::FetchCommand;
pub use export_command::ExportCommand;

use clap::ArgMatches;

use crate::catalog::session::ViewSettings;
use crate::cutout::errors::{CutoutError, CutoutResult};
use crate::cutout::stretch::Stretch;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct CutoutkitCommandFactory;

impl CutoutkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        CutoutkitCommandFactory
    }
}

impl Default for CutoutkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for CutoutkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> CutoutResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("fetch") {
            Ok(Box::new(FetchCommand::new(args, logger)?))
        } else if args.get_flag("export") {
            Ok(Box::new(ExportCommand::new(args, logger)?))
        } else {
            // Default to the interactive review command
            Ok(Box::new(ReviewCommand::new(args, logger)?))
        }
    }
}

/// Build viewing parameters from the shared CLI flags
///
/// # Arguments
/// * `args` - CLI argument matches from clap
///
/// # Returns
/// The parsed settings or an error for out-of-range values
pub fn view_settings_from_args(args: &ArgMatches) -> CutoutResult<ViewSettings> {
    let mut settings = ViewSettings::default();

    if let Some(zoom) = args.get_one::<String>("zoom") {
        settings.zoom = zoom.parse::<u32>()
            .map_err(|_| CutoutError::GenericError("Invalid --zoom value".to_string()))?;
    }
    if let Some(size) = args.get_one::<String>("size") {
        settings.size = size.parse::<u32>()
            .map_err(|_| CutoutError::GenericError("Invalid --size value".to_string()))?;
    }
    if let Some(stretch) = args.get_one::<String>("stretch") {
        settings.stretch = Stretch::parse(stretch)?;
    }
    if let Some(colormap) = args.get_one::<String>("colormap") {
        settings.colormap = colormap.clone();
    }
    settings.center_zoom = args.get_flag("center-zoom");

    Ok(settings)
}
