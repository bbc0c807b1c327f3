//! Durable persistence of the catalog
//!
//! The review session calls the sink with the full record set after
//! every commit (autosave) and on demand for export. The sink trait is
//! the seam that lets session tests observe persistence without
//! touching the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::catalog::table::Catalog;
use crate::cutout::errors::CutoutResult;

/// Well-known output filenames
pub mod filenames {
    /// Autosave target written after every commit
    pub const AUTOSAVE: &str = "autosave_classified.csv";

    /// Export snapshot filename
    pub const EXPORT: &str = "galaxies_classified.csv";
}

/// Destination for durable catalog writes
pub trait PersistenceSink {
    /// Durably write the full catalog
    ///
    /// # Arguments
    /// * `catalog` - The complete record set to persist
    ///
    /// # Returns
    /// Result indicating success or an error
    fn persist(&mut self, catalog: &Catalog) -> CutoutResult<()>;
}

/// Sink that writes the catalog to a CSV file
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    /// Create a sink writing to the given path
    pub fn new(path: &Path) -> Self {
        CsvFileSink { path: path.to_path_buf() }
    }

    /// Create the autosave sink in a directory
    ///
    /// # Arguments
    /// * `dir` - Directory to place the autosave file in
    pub fn autosave(dir: &Path) -> Self {
        Self::new(&dir.join(filenames::AUTOSAVE))
    }

    /// Path this sink writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceSink for CsvFileSink {
    fn persist(&mut self, catalog: &Catalog) -> CutoutResult<()> {
        fs::write(&self.path, catalog.to_csv())?;
        info!("Persisted {} records to {}", catalog.len(), self.path.display());
        Ok(())
    }
}
