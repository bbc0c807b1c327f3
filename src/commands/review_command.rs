//! Interactive catalog review command
//!
//! This module implements the command that walks a catalog record by
//! record: it renders the current record's cutout layers to PNG files,
//! reads navigation and classification input from the terminal, and
//! autosaves the catalog after every committed label.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{info, warn};

use crate::catalog::record::Label;
use crate::catalog::session::{ReviewSession, ViewSettings};
use crate::catalog::sink::{filenames, CsvFileSink};
use crate::catalog::table::Catalog;
use crate::commands::command_traits::Command;
use crate::commands::view_settings_from_args;
use crate::cutout::errors::{CutoutError, CutoutResult};
use crate::cutout::colormap::Colormap;
use crate::cutout::descriptor::SurveyLayer;
use crate::cutout::fetcher::HttpFetcher;
use crate::cutout::pipeline::CutoutPipeline;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command for interactively reviewing and classifying a catalog
pub struct ReviewCommand<'a> {
    /// Path to the input catalog CSV
    input_file: String,
    /// Directory for rendered PNGs and the autosave file
    output_dir: PathBuf,
    /// Viewing parameters from the command line
    settings: ViewSettings,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ReviewCommand<'a> {
    /// Create a new review command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ReviewCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CutoutResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| CutoutError::GenericError("Missing input file".to_string()))?
            .clone();

        let output_dir = args.get_one::<String>("output-dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let settings = view_settings_from_args(args)?;

        Ok(ReviewCommand {
            input_file,
            output_dir,
            settings,
            logger,
        })
    }

    /// Render the current record's layers to PNG files
    ///
    /// Each layer of the triad renders independently; a failed layer
    /// prints its error while the siblings still produce files.
    fn render_current(&self,
                      session: &ReviewSession,
                      pipeline: &mut CutoutPipeline,
                      colormap: &Colormap) {
        let record = match session.current() {
            Some(r) => r,
            None => return,
        };

        println!("\nGalaxy {} of {}: {} (RA={}, Dec={})",
                 session.cursor() + 1, session.len(),
                 record.name, record.ra, record.dec);
        if !record.classification.is_empty() {
            println!("  Current classification: {}", record.classification);
        }

        let views = pipeline.render_layers(
            record.ra, record.dec,
            &SurveyLayer::triad(),
            self.settings.zoom, self.settings.size,
            self.settings.stretch, self.settings.center_zoom);

        for view in views {
            match view.result {
                Ok(rendered) => {
                    let base = format!("cutout_{:04}_{}",
                                       session.cursor() + 1,
                                       view.layer.display_name().to_lowercase());
                    let path = self.output_dir.join(format!("{}.png", base));
                    let rgb = colormap.apply(&rendered.image);
                    match rgb.save(&path) {
                        Ok(()) => println!("  {}: {}", view.layer.display_name(), path.display()),
                        Err(e) => println!("  {}: could not save ({})", view.layer.display_name(), e),
                    }

                    if let Some(crop) = view.center_zoom {
                        let crop_path = self.output_dir.join(format!("{}_center.png", base));
                        if let Err(e) = colormap.apply(&crop).save(&crop_path) {
                            warn!("Could not save center crop: {}", e);
                        } else {
                            println!("  {} center zoom: {}",
                                     view.layer.display_name(), crop_path.display());
                        }
                    }
                }
                Err(e) => {
                    println!("  {}: error loading image: {}", view.layer.display_name(), e);
                }
            }
        }
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  b  classify as barred");
        println!("  u  classify as unbarred");
        println!("  s  classify as Not Sure");
        println!("  n  next galaxy");
        println!("  p  previous galaxy");
        println!("  e  export snapshot CSV");
        println!("  h  show this help");
        println!("  q  quit");
    }

    /// Write the export snapshot next to the autosave file
    fn export(&self, session: &ReviewSession) -> CutoutResult<()> {
        let path = self.output_dir.join(filenames::EXPORT);
        fs::write(&path, session.export_snapshot())?;
        println!("Exported {} records to {}", session.len(), path.display());
        Ok(())
    }
}

impl<'a> Command for ReviewCommand<'a> {
    fn execute(&self) -> CutoutResult<()> {
        self.logger.log(&format!("Starting review of {}", self.input_file))?;

        let catalog = Catalog::load(Path::new(&self.input_file))?;
        if catalog.is_empty() {
            return Err(CutoutError::GenericError(
                "Catalog has no records to review".to_string()));
        }

        fs::create_dir_all(&self.output_dir)?;

        let mut session = ReviewSession::new(catalog);
        let mut pipeline = CutoutPipeline::new(Box::new(HttpFetcher::new()));
        let mut sink = CsvFileSink::autosave(&self.output_dir);
        let colormap = Colormap::by_name(&self.settings.colormap)?;

        let progress = ProgressTracker::new(session.len() as u64, "reviewing");
        progress.set_position(session.cursor() as u64 + 1);

        self.print_help();
        self.render_current(&session, &mut pipeline, &colormap);

        let stdin = io::stdin();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.read_line(&mut line)? == 0 {
                break;
            }

            match line.trim().to_lowercase().as_str() {
                "" => continue,
                "q" | "quit" => break,
                "h" | "help" | "?" => self.print_help(),
                "n" | "next" => {
                    session.next();
                    progress.set_position(session.cursor() as u64 + 1);
                    self.render_current(&session, &mut pipeline, &colormap);
                }
                "p" | "prev" | "previous" => {
                    session.previous();
                    progress.set_position(session.cursor() as u64 + 1);
                    self.render_current(&session, &mut pipeline, &colormap);
                }
                "e" | "export" => {
                    if let Err(e) = self.export(&session) {
                        println!("Export failed: {}", e);
                    }
                }
                input => match Label::parse(input) {
                    Ok(label) => {
                        // Autosave failure is visible but never rolls back
                        // the in-memory classification
                        match session.commit(label, &self.settings, &mut sink) {
                            Ok(()) => println!("Classified as '{}' (autosaved to {})",
                                               label.as_str(), sink.path().display()),
                            Err(e) => println!("Classified as '{}', but autosave failed: {}",
                                               label.as_str(), e),
                        }
                    }
                    Err(_) => {
                        println!("Unrecognized command '{}', type 'h' for help", input);
                    }
                },
            }
        }

        progress.finish();
        info!("Review session ended at record {} of {}",
              session.cursor() + 1, session.len());
        Ok(())
    }
}
