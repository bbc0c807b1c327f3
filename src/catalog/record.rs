//! Catalog record and classification label types

use crate::cutout::errors::{CutoutError, CutoutResult};

/// The closed set of classification labels
///
/// A record's classification is one of these or unset (stored as an
/// empty string in the table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Galaxy shows a stellar bar
    Barred,
    /// Galaxy shows no bar
    Unbarred,
    /// Reviewer could not decide
    NotSure,
}

impl Label {
    /// The label string as stored in the table
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Barred => "barred",
            Label::Unbarred => "unbarred",
            Label::NotSure => "Not Sure",
        }
    }

    /// All labels in display order
    pub fn all() -> [Label; 3] {
        [Label::Barred, Label::Unbarred, Label::NotSure]
    }

    /// Parse a label from user input
    ///
    /// # Arguments
    /// * `input` - Label text, matched case-insensitively
    ///
    /// # Returns
    /// The matching label or an error for anything outside the set
    pub fn parse(input: &str) -> CutoutResult<Self> {
        match input.trim().to_lowercase().as_str() {
            "barred" | "b" => Ok(Label::Barred),
            "unbarred" | "u" => Ok(Label::Unbarred),
            "not sure" | "notsure" | "not-sure" | "s" => Ok(Label::NotSure),
            _ => Err(CutoutError::InvalidLabel(input.to_string())),
        }
    }
}

/// One reviewable catalog row
///
/// Identifying fields (name and coordinates) are immutable once loaded;
/// the annotation fields are filled in by the review session. Columns
/// beyond the known schema are carried through untouched so the output
/// table keeps the input's full schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Display name, empty when the input table has no name column
    pub name: String,
    /// Right ascension in degrees (J2000)
    pub ra: f64,
    /// Declination in degrees (J2000)
    pub dec: f64,
    /// Cutout URL for the data layer, written on commit
    pub image_url: String,
    /// Cutout URL for the model layer, written on commit
    pub model_url: String,
    /// Cutout URL for the residual layer, written on commit
    pub residual_url: String,
    /// Committed classification label, empty when unset
    pub classification: String,
    /// Values of input columns outside the known schema, in the order
    /// of the catalog's extra-column headers
    pub extras: Vec<String>,
}

impl Record {
    /// Create a record with empty annotation fields
    pub fn new(name: String, ra: f64, dec: f64) -> Self {
        Record {
            name,
            ra,
            dec,
            image_url: String::new(),
            model_url: String::new(),
            residual_url: String::new(),
            classification: String::new(),
            extras: Vec::new(),
        }
    }

    /// The committed label, if the classification field holds one
    pub fn label(&self) -> Option<Label> {
        Label::parse(&self.classification).ok()
    }
}
