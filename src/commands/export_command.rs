//! Catalog export command
//!
//! This module implements the command for loading a catalog and writing
//! the export snapshot CSV without entering the interactive review loop.
//! Useful for normalizing a table's schema (annotation columns are
//! created empty when missing) or re-exporting an autosaved session.

use std::fs;
use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::catalog::sink::filenames;
use crate::catalog::table::Catalog;
use crate::commands::command_traits::Command;
use crate::cutout::errors::{CutoutError, CutoutResult};
use crate::utils::logger::Logger;

/// Command for exporting a catalog snapshot
pub struct ExportCommand<'a> {
    /// Path to the input catalog CSV
    input_file: String,
    /// Output snapshot path
    output_file: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExportCommand<'a> {
    /// Create a new export command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ExportCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CutoutResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| CutoutError::GenericError("Missing input file".to_string()))?
            .clone();

        let output_file = args.get_one::<String>("output")
            .cloned()
            .unwrap_or_else(|| filenames::EXPORT.to_string());

        Ok(ExportCommand {
            input_file,
            output_file,
            logger,
        })
    }
}

impl<'a> Command for ExportCommand<'a> {
    fn execute(&self) -> CutoutResult<()> {
        self.logger.log(&format!(
            "Exporting {} to {}", self.input_file, self.output_file))?;

        let catalog = Catalog::load(Path::new(&self.input_file))?;
        fs::write(Path::new(&self.output_file), catalog.to_csv())?;

        info!("Exported {} records to {}", catalog.len(), self.output_file);
        println!("Exported {} records to {}", catalog.len(), self.output_file);
        Ok(())
    }
}
