//! jsongrind core - grammar-based conformance fuzzing for JSON parsers
//!
//! This crate generates random documents from the json.org grammar, pipes
//! each one into a parser executable under test, and records whether the
//! parser accepted it and how long it took. Every generated document is
//! valid JSON, so any nonzero exit from the subject is a conformance bug.
//!
//! # Main Components
//!
//! - **Grammar Generation**: seedable, budget-bounded random walk over the
//!   JSON grammar (`grammar`)
//! - **Execution Harness**: one subject process per document, fed over
//!   stdin (`harness`)
//! - **Metrics Recording**: per-run log plus mean statistics, persisted as
//!   a JSON report (`recorder`)
//! - **Sessions**: the generate-execute-record loop with failure collection
//!   (`session`)
//!
//! # Example
//!
//! ```no_run
//! use jsongrind_core::{Result, Session, SessionConfig, Subject};
//!
//! fn fuzz_parser() -> Result<()> {
//!     let subject = Subject::new("./my-json-parser")?;
//!     let config = SessionConfig {
//!         examples: 1_000,
//!         seed: 42,
//!         ..SessionConfig::default()
//!     };
//!     let summary = Session::new(subject, config)?.run()?;
//!     println!("accepted {} of {} runs", summary.recorded, summary.attempted);
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
pub mod grammar;
pub mod harness;
pub mod recorder;
pub mod session;

// Re-export main types for convenience
pub use document::Document;
pub use error::{Error, Result};
pub use grammar::{GrammarConfig, GrammarGenerator, ValueKind, ValueWeights};
pub use harness::{ExecutionHarness, Subject};
pub use recorder::{AggregateStats, MetricsRecorder, Report, RunRecord};
pub use session::{
    RunFailure, RunProgress, Session, SessionConfig, SessionSummary, DEFAULT_EXAMPLES,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Draws a fresh seed from OS entropy.
///
/// Sessions log whichever seed they run with, so a corpus started from an
/// entropy seed stays replayable afterwards.
pub fn random_seed() -> u64 {
    rand::random()
}
