//! Fuzzing session orchestration
//!
//! Copyright (c) 2025 jsongrind Team
//! Licensed under the Apache-2.0 license
//!
//! A [`Session`] wires the generator, the execution harness and the metrics
//! recorder together: generate a document, time the subject on it, record
//! the outcome, repeat. Per-run failures are collected and the session keeps
//! going, so one rejected document still leaves a full picture of the rest
//! of the corpus; fatal errors abort immediately.
//!
//! A session that recorded at least one accepted run writes its report even
//! when other runs failed. The configured seed is carried into the summary
//! so any session, failing or not, can be replayed exactly.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::grammar::{GrammarConfig, GrammarGenerator};
use crate::harness::{ExecutionHarness, Subject};
use crate::recorder::{AggregateStats, MetricsRecorder};

/// Default number of documents per session.
pub const DEFAULT_EXAMPLES: u32 = 10_000;

/// Everything a session needs beyond the subject itself.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How many documents to generate and feed.
    pub examples: u32,

    /// RNG seed; the same seed and grammar profile replay the same corpus.
    pub seed: u64,

    /// Grammar shape profile.
    pub grammar: GrammarConfig,

    /// Optional wall-clock limit per subject run.
    pub timeout: Option<Duration>,

    /// Stop at the first per-run failure instead of finishing the corpus.
    pub fail_fast: bool,

    /// Re-parse every generated document with the reference parser before
    /// feeding it, turning a generator defect into an immediate fatal error.
    pub validate_documents: bool,

    /// Directory the report file is written into.
    pub report_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            examples: DEFAULT_EXAMPLES,
            seed: 0,
            grammar: GrammarConfig::default(),
            timeout: None,
            fail_fast: false,
            validate_documents: false,
            report_dir: PathBuf::from("."),
        }
    }
}

/// One per-run failure, kept with the index of the run that produced it.
#[derive(Debug)]
pub struct RunFailure {
    /// Zero-based index of the failing run within the session.
    pub index: u32,
    /// The per-run error; its document is retrievable via
    /// [`Error::document`].
    pub error: Error,
}

/// Progress snapshot handed to the observer after each run.
#[derive(Debug, Clone, Copy)]
pub struct RunProgress {
    pub completed: u32,
    pub failed: usize,
}

/// What a finished session learned.
#[derive(Debug)]
pub struct SessionSummary {
    /// Seed the corpus was generated from.
    pub seed: u64,
    /// Runs attempted; less than configured only under fail-fast.
    pub attempted: u32,
    /// Runs the subject accepted.
    pub recorded: usize,
    /// Per-run failures, in run order.
    pub failures: Vec<RunFailure>,
    /// Aggregates over accepted runs; `None` when nothing was accepted.
    pub stats: Option<AggregateStats>,
    /// Where the report landed; `None` when nothing was accepted.
    pub report_path: Option<PathBuf>,
}

impl SessionSummary {
    /// True when every attempted run was accepted.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A complete generate-execute-record loop for one subject.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    generator: GrammarGenerator,
    harness: ExecutionHarness,
    recorder: MetricsRecorder,
}

impl Session {
    /// Builds a session over an already validated subject.
    pub fn new(subject: Subject, config: SessionConfig) -> Result<Self> {
        let generator = GrammarGenerator::new(config.grammar.clone(), config.seed)?;
        let mut harness = ExecutionHarness::new(subject);
        if let Some(limit) = config.timeout {
            harness = harness.with_timeout(limit);
        }
        Ok(Self {
            config,
            generator,
            harness,
            recorder: MetricsRecorder::new(),
        })
    }

    /// Runs the session to completion.
    pub fn run(self) -> Result<SessionSummary> {
        self.run_with(|_| {})
    }

    /// Runs the session, invoking `after_each` once per finished run.
    pub fn run_with<F>(self, mut after_each: F) -> Result<SessionSummary>
    where
        F: FnMut(RunProgress),
    {
        let Session {
            config,
            mut generator,
            harness,
            mut recorder,
        } = self;

        tracing::info!(
            subject = %harness.subject().name(),
            examples = config.examples,
            seed = config.seed,
            "starting session"
        );

        let mut failures: Vec<RunFailure> = Vec::new();
        let mut attempted = 0u32;
        for index in 0..config.examples {
            attempted = index + 1;
            let document = generator.generate();
            if config.validate_documents {
                if let Err(err) = serde_json::from_str::<serde::de::IgnoredAny>(document.as_str())
                {
                    return Err(Error::Generation {
                        message: err.to_string(),
                        document: document.into_string(),
                        source: err,
                    });
                }
            }

            // time exactly the subject, not generation or bookkeeping
            let start = Instant::now();
            let outcome = harness.run(&document);
            let duration = start.elapsed();

            match outcome {
                Ok(()) => recorder.record(document, duration),
                Err(error) if error.is_per_run() => {
                    tracing::error!(run = index, %error, "subject failed document");
                    failures.push(RunFailure { index, error });
                }
                Err(error) => return Err(error),
            }
            // the observer sees every finished run, the fail-fast one included
            after_each(RunProgress {
                completed: attempted,
                failed: failures.len(),
            });
            if config.fail_fast && !failures.is_empty() {
                break;
            }
        }

        let recorded = recorder.len();
        let (stats, report_path) = if recorder.is_empty() {
            if failures.is_empty() {
                // a session configured for zero runs has nothing to report
                return Err(Error::EmptySession);
            }
            (None, None)
        } else {
            let report = recorder.finalize()?;
            let path = config.report_dir.join(harness.subject().report_file_name());
            report.write_to(&path)?;
            tracing::info!(report = %path.display(), runs = report.runs.len(), "report written");
            (Some(report.stats), Some(path))
        };

        tracing::info!(
            attempted,
            recorded,
            failed = failures.len(),
            "session finished"
        );
        Ok(SessionSummary {
            seed: config.seed,
            attempted,
            recorded,
            failures,
            stats,
            report_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.examples, DEFAULT_EXAMPLES);
        assert_eq!(config.seed, 0);
        assert!(config.timeout.is_none());
        assert!(!config.fail_fast);
        assert!(!config.validate_documents);
        assert_eq!(config.report_dir, PathBuf::from("."));
    }

    #[test]
    fn test_summary_success_reflects_failures() {
        let clean = SessionSummary {
            seed: 1,
            attempted: 5,
            recorded: 5,
            failures: Vec::new(),
            stats: None,
            report_path: None,
        };
        assert!(clean.is_success());
    }
}
