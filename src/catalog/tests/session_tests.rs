//! Tests for the review session state machine

extern crate std;

use crate::catalog::record::Label;
use crate::catalog::session::{ReviewSession, ViewSettings};
use crate::catalog::sink::PersistenceSink;
use crate::catalog::table::Catalog;
use crate::cutout::errors::{CutoutError, CutoutResult};

const THREE_ROWS: &str = "\
Name_x,RAJ2000,DEJ2000
NGC 224,10.684,41.269
NGC 598,23.462,30.660
NGC 5194,202.469,47.195
";

/// Sink that records every persisted snapshot in memory
struct MemorySink {
    snapshots: Vec<String>,
}

impl MemorySink {
    fn new() -> Self {
        MemorySink { snapshots: Vec::new() }
    }
}

impl PersistenceSink for MemorySink {
    fn persist(&mut self, catalog: &Catalog) -> CutoutResult<()> {
        self.snapshots.push(catalog.to_csv());
        Ok(())
    }
}

/// Sink that always fails, simulating a write-permission problem
struct BrokenSink;

impl PersistenceSink for BrokenSink {
    fn persist(&mut self, _catalog: &Catalog) -> CutoutResult<()> {
        Err(CutoutError::GenericError("disk full".to_string()))
    }
}

fn three_row_session() -> ReviewSession {
    ReviewSession::new(Catalog::parse(THREE_ROWS).unwrap())
}

#[test]
fn test_session_starts_at_first_record() {
    let session = three_row_session();
    std::assert_eq!(session.cursor(), 0);
    std::assert_eq!(session.len(), 3);
    std::assert_eq!(session.current().unwrap().name, "NGC 224");
}

#[test]
fn test_previous_at_start_is_noop() {
    let mut session = three_row_session();
    std::assert_eq!(session.previous(), 0);
    std::assert_eq!(session.previous(), 0);
}

#[test]
fn test_next_clamps_at_end() {
    let mut session = three_row_session();
    std::assert_eq!(session.next(), 1);
    std::assert_eq!(session.next(), 2);
    std::assert_eq!(session.next(), 2, "next at the last record is a no-op");
}

#[test]
fn test_cursor_stays_in_bounds() {
    let mut session = three_row_session();
    // Arbitrary walk; cursor must stay within [0, len - 1]
    for step in [1, 1, 1, 1, -1, -1, -1, -1, -1, 1] {
        let cursor = if step > 0 { session.next() } else { session.previous() };
        std::assert!(cursor < session.len());
    }
}

#[test]
fn test_commit_writes_label_and_urls() {
    let mut session = three_row_session();
    let mut sink = MemorySink::new();
    let settings = ViewSettings::default();

    session.commit(Label::Barred, &settings, &mut sink).unwrap();

    let record = session.current().unwrap();
    std::assert_eq!(record.classification, "barred");
    std::assert_eq!(
        record.image_url,
        "https://www.legacysurvey.org/viewer/jpeg-cutout\
         ?ra=10.684&dec=41.269&layer=ls-dr10&zoom=10&size=256");
    std::assert!(record.model_url.contains("layer=ls-dr10-model"));
    std::assert!(record.residual_url.contains("layer=ls-dr10-resid"));
}

#[test]
fn test_commit_is_idempotent() {
    let mut session = three_row_session();
    let mut sink = MemorySink::new();
    let settings = ViewSettings::default();

    session.commit(Label::NotSure, &settings, &mut sink).unwrap();
    let after_first = session.current().unwrap().clone();

    session.commit(Label::NotSure, &settings, &mut sink).unwrap();
    let after_second = session.current().unwrap().clone();

    std::assert_eq!(after_first, after_second);
    std::assert_eq!(sink.snapshots.len(), 2, "every commit persists");
    std::assert_eq!(sink.snapshots[0], sink.snapshots[1]);
}

#[test]
fn test_commit_persists_full_record_set() {
    let mut session = three_row_session();
    let mut sink = MemorySink::new();
    let settings = ViewSettings::default();

    session.next();
    session.next();
    session.next();
    std::assert_eq!(session.cursor(), 2, "still at the third row");

    session.commit(Label::Barred, &settings, &mut sink).unwrap();

    std::assert_eq!(session.current().unwrap().classification, "barred");
    let snapshot = &sink.snapshots[0];
    // All three rows are in the persisted snapshot
    std::assert!(snapshot.contains("NGC 224"));
    std::assert!(snapshot.contains("NGC 598"));
    std::assert!(snapshot.contains("NGC 5194"));
    std::assert!(snapshot.contains("barred"));
}

#[test]
fn test_failed_autosave_keeps_in_memory_commit() {
    let mut session = three_row_session();
    let settings = ViewSettings::default();

    let result = session.commit(Label::Unbarred, &settings, &mut BrokenSink);
    std::assert!(result.is_err(), "sink failure is surfaced");
    std::assert_eq!(session.current().unwrap().classification, "unbarred",
                    "the in-memory write survives the sink failure");

    // Navigation keeps working afterwards
    std::assert_eq!(session.next(), 1);
}

#[test]
fn test_export_snapshot_does_not_mutate() {
    let mut session = three_row_session();
    session.next();

    let first = session.export_snapshot();
    let second = session.export_snapshot();

    std::assert_eq!(first, second);
    std::assert_eq!(session.cursor(), 1);
    std::assert!(first.starts_with("Name_x,RAJ2000,DEJ2000,"));
}

#[test]
fn test_label_parsing() {
    std::assert_eq!(Label::parse("barred").unwrap(), Label::Barred);
    std::assert_eq!(Label::parse("b").unwrap(), Label::Barred);
    std::assert_eq!(Label::parse("Not Sure").unwrap(), Label::NotSure);
    std::assert_eq!(Label::parse("u").unwrap(), Label::Unbarred);
    std::assert!(matches!(Label::parse("spiral"),
                          Err(CutoutError::InvalidLabel(_))));
}

#[test]
fn test_label_round_trips_through_record() {
    let mut session = three_row_session();
    let mut sink = MemorySink::new();
    session.commit(Label::NotSure, &ViewSettings::default(), &mut sink).unwrap();
    std::assert_eq!(session.current().unwrap().label(), Some(Label::NotSure));
}
