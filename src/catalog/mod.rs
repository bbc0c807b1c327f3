//! Catalog loading, review state and persistence
//!
//! This module holds the record set read from the input table, the
//! review session state machine that walks and annotates it, and the
//! sink that durably writes it back out.

pub mod record;
pub mod table;
pub mod session;
pub mod sink;
#[cfg(test)]
mod tests;

pub use record::{Label, Record};
pub use table::Catalog;
pub use session::{ReviewSession, ViewSettings};
pub use sink::{CsvFileSink, PersistenceSink};
