//! Custom error types for cutout processing

use std::fmt;
use std::io;

/// Cutout-specific error types
#[derive(Debug)]
pub enum CutoutError {
    /// I/O error
    IoError(io::Error),
    /// Remote endpoint answered with a non-success HTTP status
    HttpStatus(u16, String),
    /// Transport-level failure while fetching a URL
    FetchFailed(String, String),
    /// Response payload was not a decodable image
    DecodeError(String),
    /// Required catalog column is missing
    MissingColumn(String),
    /// Unknown survey layer name
    InvalidLayer(String),
    /// Unknown stretch mode name
    InvalidStretch(String),
    /// Label outside the closed classification set
    InvalidLabel(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CutoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutoutError::IoError(e) => write!(f, "I/O error: {}", e),
            CutoutError::HttpStatus(code, url) => write!(f, "HTTP status {} for {}", code, url),
            CutoutError::FetchFailed(url, cause) => write!(f, "Fetch failed for {}: {}", url, cause),
            CutoutError::DecodeError(msg) => write!(f, "Image decode error: {}", msg),
            CutoutError::MissingColumn(col) => write!(f, "Missing required column: {}", col),
            CutoutError::InvalidLayer(name) => write!(f, "Unknown survey layer: {}", name),
            CutoutError::InvalidStretch(name) => write!(f, "Unknown stretch mode: {}", name),
            CutoutError::InvalidLabel(label) => write!(f, "Label not in classification set: {}", label),
            CutoutError::GenericError(msg) => write!(f, "Cutout error: {}", msg),
        }
    }
}

impl std::error::Error for CutoutError {}

impl From<io::Error> for CutoutError {
    fn from(error: io::Error) -> Self {
        CutoutError::IoError(error)
    }
}

impl From<String> for CutoutError {
    fn from(msg: String) -> Self {
        CutoutError::GenericError(msg)
    }
}

impl From<image::ImageError> for CutoutError {
    fn from(error: image::ImageError) -> Self {
        CutoutError::DecodeError(error.to_string())
    }
}

/// Result type for cutout operations
pub type CutoutResult<T> = Result<T, CutoutError>;
