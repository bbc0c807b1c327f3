//! Catalog table loading and serialization
//!
//! The catalog is an insertion-ordered set of records read from a CSV
//! table. Coordinate columns are required and validated at load time;
//! annotation columns are created empty when the input lacks them, and
//! any columns outside the known schema are carried through unchanged
//! so the output keeps the input's full shape.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::catalog::record::Record;
use crate::cutout::errors::{CutoutError, CutoutResult};

/// Fixed catalog column names
pub mod columns {
    /// Right ascension column (required)
    pub const RA: &str = "RAJ2000";

    /// Declination column (required)
    pub const DEC: &str = "DEJ2000";

    /// Display name column (optional)
    pub const NAME: &str = "Name_x";

    /// Annotation columns, created empty when missing
    pub const IMAGE_URL: &str = "image_url";
    pub const MODEL_URL: &str = "model_url";
    pub const RESIDUAL_URL: &str = "residual_url";
    pub const CLASSIFICATION: &str = "classification";

    /// All annotation columns in output order
    pub const ANNOTATIONS: [&str; 4] = [IMAGE_URL, MODEL_URL, RESIDUAL_URL, CLASSIFICATION];
}

/// An ordered catalog of reviewable records
///
/// Order is the input table's row order and is stable for the life of
/// the catalog; nothing ever re-sorts it.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Output header order: the input headers plus any annotation
    /// columns that had to be appended
    headers: Vec<String>,
    /// Input headers outside the known schema, in input order
    extra_headers: Vec<String>,
    /// The records, in input row order
    pub records: Vec<Record>,
}

impl Catalog {
    /// Load a catalog from a CSV file
    ///
    /// # Arguments
    /// * `path` - Path to the input CSV table
    ///
    /// # Returns
    /// The parsed catalog or an error (missing file, missing required
    /// columns, unparseable coordinates)
    pub fn load(path: &Path) -> CutoutResult<Self> {
        info!("Loading catalog from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a catalog from CSV text
    ///
    /// The first row is the header. `RAJ2000` and `DEJ2000` are
    /// required; a missing annotation column is appended to the schema
    /// and defaults to an empty string on every record.
    ///
    /// # Arguments
    /// * `content` - Full CSV text including the header row
    ///
    /// # Returns
    /// The parsed catalog or a validation error
    pub fn parse(content: &str) -> CutoutResult<Self> {
        let mut rows = parse_csv(content);
        if rows.is_empty() {
            return Err(CutoutError::GenericError("Empty catalog file".to_string()));
        }

        let input_headers = rows.remove(0);

        let ra_idx = column_index(&input_headers, columns::RA)?;
        let dec_idx = column_index(&input_headers, columns::DEC)?;
        let name_idx = input_headers.iter().position(|h| h == columns::NAME);

        let known = |h: &str| {
            h == columns::RA || h == columns::DEC || h == columns::NAME
                || columns::ANNOTATIONS.contains(&h)
        };
        let extra_headers: Vec<String> = input_headers.iter()
            .filter(|h| !known(h))
            .cloned()
            .collect();
        let extra_indices: Vec<usize> = input_headers.iter()
            .enumerate()
            .filter(|(_, h)| !known(h))
            .map(|(i, _)| i)
            .collect();

        let annotation_index = |name: &str| input_headers.iter().position(|h| h == name);
        let image_idx = annotation_index(columns::IMAGE_URL);
        let model_idx = annotation_index(columns::MODEL_URL);
        let residual_idx = annotation_index(columns::RESIDUAL_URL);
        let class_idx = annotation_index(columns::CLASSIFICATION);

        // Output schema: input order, with missing annotation columns
        // appended at the end like the autosaved table
        let mut headers = input_headers.clone();
        for name in columns::ANNOTATIONS {
            if !headers.iter().any(|h| h == name) {
                headers.push(name.to_string());
            }
        }

        let mut records = Vec::with_capacity(rows.len());
        for (row_num, row) in rows.iter().enumerate() {
            if row.iter().all(|f| f.is_empty()) {
                continue;
            }
            let field = |idx: Option<usize>| {
                idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
            };

            let ra = parse_coordinate(&field(Some(ra_idx)), columns::RA, row_num + 2)?;
            let dec = parse_coordinate(&field(Some(dec_idx)), columns::DEC, row_num + 2)?;

            let mut record = Record::new(field(name_idx), ra, dec);
            record.image_url = field(image_idx);
            record.model_url = field(model_idx);
            record.residual_url = field(residual_idx);
            record.classification = field(class_idx);
            record.extras = extra_indices.iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect();
            records.push(record);
        }

        debug!("Parsed {} records, {} extra columns", records.len(), extra_headers.len());

        Ok(Catalog { headers, extra_headers, records })
    }

    /// Number of records in the catalog
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Output header order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Serialize the catalog to CSV text
    ///
    /// Produces the full output schema: the input columns in their
    /// original order plus the annotation columns.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&join_row(&self.headers));
        out.push('\n');

        for record in &self.records {
            let fields: Vec<String> = self.headers.iter()
                .map(|h| self.field_value(record, h))
                .collect();
            out.push_str(&join_row(&fields));
            out.push('\n');
        }

        out
    }

    /// Value of one output column for a record
    fn field_value(&self, record: &Record, header: &str) -> String {
        match header {
            h if h == columns::RA => format_coordinate(record.ra),
            h if h == columns::DEC => format_coordinate(record.dec),
            h if h == columns::NAME => record.name.clone(),
            h if h == columns::IMAGE_URL => record.image_url.clone(),
            h if h == columns::MODEL_URL => record.model_url.clone(),
            h if h == columns::RESIDUAL_URL => record.residual_url.clone(),
            h if h == columns::CLASSIFICATION => record.classification.clone(),
            _ => self.extra_headers.iter()
                .position(|e| e == header)
                .and_then(|i| record.extras.get(i))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

fn column_index(headers: &[String], name: &str) -> CutoutResult<usize> {
    headers.iter()
        .position(|h| h == name)
        .ok_or_else(|| CutoutError::MissingColumn(name.to_string()))
}

fn parse_coordinate(value: &str, column: &str, row: usize) -> CutoutResult<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        CutoutError::GenericError(
            format!("Row {}: invalid {} value '{}'", row, column, value))
    })
}

/// Format a coordinate for CSV output
///
/// Plain f64 display keeps the shortest round-trippable form, so values
/// like 10.684 survive a load/save cycle unchanged.
fn format_coordinate(value: f64) -> String {
    format!("{}", value)
}

/// Parse CSV text into rows of fields
///
/// Quote-aware: fields may be wrapped in double quotes, quoted fields
/// may contain commas, newlines and doubled quotes. A trailing newline
/// does not produce an empty row.
fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => {
                    row.push(std::mem::take(&mut field));
                }
                '\r' => {
                    // Swallowed here, handled by the following '\n'
                }
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Escape one field for CSV output
///
/// Fields containing commas, quotes or newlines are wrapped in double
/// quotes with embedded quotes doubled.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn join_row(fields: &[String]) -> String {
    fields.iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",")
}
