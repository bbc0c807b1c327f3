//! Tests for the cutout pipeline and transforms

mod stretch_tests;
mod pipeline_tests;
mod colormap_tests;
