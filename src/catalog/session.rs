//! Review session state machine
//!
//! The session exclusively owns the catalog and the review cursor for
//! its lifetime. Navigation clamps at both ends and never errors;
//! committing a label is an unconditional side-effecting write that
//! mutates the current record and triggers the persistence sink with
//! the full record set. Loading a new catalog replaces the session
//! wholesale, there is no merge.

use log::{debug, info, warn};

use crate::catalog::record::{Label, Record};
use crate::catalog::sink::PersistenceSink;
use crate::catalog::table::Catalog;
use crate::cutout::constants::view;
use crate::cutout::descriptor::{CutoutDescriptor, SurveyLayer};
use crate::cutout::errors::{CutoutError, CutoutResult};
use crate::cutout::stretch::Stretch;

/// Operator-adjustable viewing parameters
///
/// Consumed by the pipeline when rendering and by the session when
/// deriving the committed cutout URLs. The colormap is cosmetic and
/// never affects the pipeline's numeric output.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Zoom level, within the service's accepted range
    pub zoom: u32,
    /// Image edge length in pixels
    pub size: u32,
    /// Intensity stretch mode
    pub stretch: Stretch,
    /// Colormap name for rendered output
    pub colormap: String,
    /// Whether to also produce the magnified center inset
    pub center_zoom: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewSettings {
            zoom: view::DEFAULT_ZOOM,
            size: view::DEFAULT_SIZE,
            stretch: Stretch::Log,
            colormap: "gray".to_string(),
            center_zoom: false,
        }
    }
}

/// Interactive review session over a catalog
///
/// The cursor always stays within `[0, len - 1]` for a non-empty
/// catalog; the "no table loaded" pre-state lives outside this type,
/// which only exists once a catalog has been loaded.
pub struct ReviewSession {
    catalog: Catalog,
    cursor: usize,
}

impl ReviewSession {
    /// Start a session over a loaded catalog
    ///
    /// Replaces any previous session wholesale; the cursor starts at
    /// the first record.
    ///
    /// # Arguments
    /// * `catalog` - The catalog to review
    pub fn new(catalog: Catalog) -> Self {
        info!("Starting review session over {} records", catalog.len());
        ReviewSession { catalog, cursor: 0 }
    }

    /// Current review position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of records under review
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// The record at the current cursor
    pub fn current(&self) -> Option<&Record> {
        self.catalog.records.get(self.cursor)
    }

    /// The catalog under review
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Move to the previous record
    ///
    /// No-op at the first record; the cursor never wraps.
    ///
    /// # Returns
    /// The cursor position after the move
    pub fn previous(&mut self) -> usize {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        debug!("Cursor at {}/{}", self.cursor + 1, self.catalog.len());
        self.cursor
    }

    /// Move to the next record
    ///
    /// No-op at the last record; the cursor never wraps.
    ///
    /// # Returns
    /// The cursor position after the move
    pub fn next(&mut self) -> usize {
        if self.cursor + 1 < self.catalog.len() {
            self.cursor += 1;
        }
        debug!("Cursor at {}/{}", self.cursor + 1, self.catalog.len());
        self.cursor
    }

    /// Commit a label for the current record and autosave
    ///
    /// Writes the classification and the derived cutout URLs for the
    /// current settings into the record, then hands the full record set
    /// to the sink. Committing the same label twice leaves the record
    /// in an identical state. The in-memory write always happens; a
    /// failing sink is reported through the returned error but never
    /// rolls the record back, so navigation and further classification
    /// can continue.
    ///
    /// # Arguments
    /// * `label` - The chosen classification label
    /// * `settings` - Current viewing parameters, used to derive URLs
    /// * `sink` - Persistence sink invoked with the full catalog
    ///
    /// # Returns
    /// Ok on a durable write, or the sink's error after the in-memory
    /// commit already took effect
    pub fn commit(&mut self,
                  label: Label,
                  settings: &ViewSettings,
                  sink: &mut dyn PersistenceSink) -> CutoutResult<()> {
        let cursor = self.cursor;
        let record = self.catalog.records.get_mut(cursor)
            .ok_or_else(|| CutoutError::GenericError(
                "Cannot commit on an empty catalog".to_string()))?;

        let (ra, dec) = (record.ra, record.dec);
        let url_for = |layer: SurveyLayer| {
            CutoutDescriptor::new(ra, dec, layer,
                                  settings.zoom, settings.size).url()
        };
        record.image_url = url_for(SurveyLayer::Data);
        record.model_url = url_for(SurveyLayer::Model);
        record.residual_url = url_for(SurveyLayer::Residual);
        record.classification = label.as_str().to_string();

        info!("Committed '{}' for record {} of {}",
              label.as_str(), cursor + 1, self.catalog.len());

        if let Err(e) = sink.persist(&self.catalog) {
            warn!("Autosave failed: {}", e);
            return Err(e);
        }
        Ok(())
    }

    /// Produce a full CSV serialization of the record set
    ///
    /// Does not mutate session state.
    pub fn export_snapshot(&self) -> String {
        self.catalog.to_csv()
    }
}
