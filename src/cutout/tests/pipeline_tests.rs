//! Tests for the memoizing cutout pipeline

extern crate std;

use crate::cutout::descriptor::{CutoutDescriptor, SurveyLayer};
use crate::cutout::errors::CutoutError;
use crate::cutout::pipeline::CutoutPipeline;
use crate::cutout::stretch::Stretch;
use crate::cutout::tests::test_utils::{encode_png, gradient_image, PartialFetcher, StubFetcher};

fn test_descriptor() -> CutoutDescriptor {
    CutoutDescriptor::new(10.684, 41.269, SurveyLayer::Data, 10, 256)
}

#[test]
fn test_descriptor_url() {
    std::assert_eq!(
        test_descriptor().url(),
        "https://www.legacysurvey.org/viewer/jpeg-cutout\
         ?ra=10.684&dec=41.269&layer=ls-dr10&zoom=10&size=256"
    );
}

#[test]
fn test_descriptor_clamps_bounds() {
    let descriptor = CutoutDescriptor::new(0.0, 0.0, SurveyLayer::Data, 50, 16);
    std::assert_eq!(descriptor.zoom, 20);
    std::assert_eq!(descriptor.size, 128);
}

#[test]
fn test_layer_identifiers() {
    std::assert_eq!(SurveyLayer::Data.identifier(), "ls-dr10");
    std::assert_eq!(SurveyLayer::Model.identifier(), "ls-dr10-model");
    std::assert_eq!(SurveyLayer::Residual.identifier(), "ls-dr10-resid");
    std::assert_eq!(SurveyLayer::parse("model").unwrap(), SurveyLayer::Model);
    std::assert!(matches!(SurveyLayer::parse("sdss"),
                          Err(CutoutError::InvalidLayer(_))));
}

#[test]
fn test_get_memoizes_identical_requests() {
    let (fetcher, calls) = StubFetcher::new(encode_png(&gradient_image()));
    let mut pipeline = CutoutPipeline::new(Box::new(fetcher));

    let first = pipeline.get(&test_descriptor(), Stretch::Log).unwrap();
    let second = pipeline.get(&test_descriptor(), Stretch::Log).unwrap();

    std::assert_eq!(*calls.borrow(), 1, "second get must be served from cache");
    std::assert_eq!(first.image.as_raw(), second.image.as_raw());
    std::assert_eq!(first.url, second.url);
}

#[test]
fn test_get_distinguishes_stretch_modes() {
    let (fetcher, calls) = StubFetcher::new(encode_png(&gradient_image()));
    let mut pipeline = CutoutPipeline::new(Box::new(fetcher));

    pipeline.get(&test_descriptor(), Stretch::None).unwrap();
    pipeline.get(&test_descriptor(), Stretch::Log).unwrap();

    std::assert_eq!(*calls.borrow(), 2,
                    "different stretch keys must transform independently");
    std::assert_eq!(pipeline.cache_len(), 2);
}

#[test]
fn test_get_distinguishes_descriptors() {
    let (fetcher, calls) = StubFetcher::new(encode_png(&gradient_image()));
    let mut pipeline = CutoutPipeline::new(Box::new(fetcher));

    pipeline.get(&test_descriptor(), Stretch::Log).unwrap();

    let other = CutoutDescriptor::new(10.684, 41.269, SurveyLayer::Data, 12, 256);
    pipeline.get(&other, Stretch::Log).unwrap();

    std::assert_eq!(*calls.borrow(), 2, "changed zoom must not reuse the cache");
}

#[test]
fn test_clear_cache_refetches() {
    let (fetcher, calls) = StubFetcher::new(encode_png(&gradient_image()));
    let mut pipeline = CutoutPipeline::new(Box::new(fetcher));

    pipeline.get(&test_descriptor(), Stretch::Log).unwrap();
    pipeline.clear_cache();
    std::assert_eq!(pipeline.cache_len(), 0);

    pipeline.get(&test_descriptor(), Stretch::Log).unwrap();
    std::assert_eq!(*calls.borrow(), 2);
}

#[test]
fn test_render_layers_isolates_failures() {
    let fetcher = PartialFetcher::new(encode_png(&gradient_image()), "model");
    let mut pipeline = CutoutPipeline::new(Box::new(fetcher));

    let views = pipeline.render_layers(
        10.684, 41.269, &SurveyLayer::triad(), 10, 256, Stretch::Log, false);

    std::assert_eq!(views.len(), 3);
    std::assert!(views[0].result.is_ok(), "data layer should render");
    std::assert!(matches!(views[1].result,
                          Err(CutoutError::HttpStatus(404, _))),
                 "model layer should carry its 404");
    std::assert!(views[2].result.is_ok(), "residual layer should render");
}

#[test]
fn test_render_layers_center_zoom() {
    let (fetcher, _) = StubFetcher::new(encode_png(&gradient_image()));
    let mut pipeline = CutoutPipeline::new(Box::new(fetcher));

    let views = pipeline.render_layers(
        10.684, 41.269, &[SurveyLayer::Data], 10, 256, Stretch::Log, true);

    let crop = views[0].center_zoom.as_ref().unwrap();
    std::assert_eq!(crop.dimensions(), (4, 4));
}
