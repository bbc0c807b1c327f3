pub mod cutout;
pub mod catalog;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::CutoutKit;

pub use cutout::{CutoutDescriptor, CutoutPipeline, Stretch, SurveyLayer};
pub use catalog::{Catalog, Label, Record, ReviewSession, ViewSettings};
