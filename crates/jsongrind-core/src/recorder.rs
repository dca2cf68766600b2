//! Run metrics and report aggregation
//!
//! Copyright (c) 2025 jsongrind Team
//! Licensed under the Apache-2.0 license
//!
//! The recorder accumulates one [`RunRecord`] per accepted document and, at
//! finalization, folds them into aggregate statistics. The serialized
//! report has exactly two top-level keys, `runs` and `stats`, and the stats
//! keys keep their historical space-separated names, so existing tooling
//! that consumes reports keeps parsing them.
//!
//! Normalized runtime is the mean of per-run ratios, not the ratio of the
//! means: each run contributes `duration / length` and those ratios are
//! averaged. The two quantities differ whenever input sizes vary.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{Error, Result};

/// One accepted run: the document piped in and how long the subject took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(rename = "json")]
    pub document: Document,
    #[serde(rename = "duration", with = "duration_secs")]
    pub duration: Duration,
}

/// Mean statistics over a finished run log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Mean wall-clock duration, in seconds.
    #[serde(rename = "average runtime")]
    pub average_runtime: f64,

    /// Mean of per-run `duration / length` ratios, in seconds per character.
    #[serde(rename = "average normalized runtime")]
    pub average_normalized_runtime: f64,

    /// Mean document length, in Unicode scalar values.
    #[serde(rename = "average input size")]
    pub average_input_size: f64,
}

/// The persisted session artifact: every accepted run plus the aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub runs: Vec<RunRecord>,
    pub stats: AggregateStats,
}

impl Report {
    /// Writes the report as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body).map_err(|err| Error::Io {
            message: format!("failed to write report {}: {err}", path.display()),
            source: err,
        })
    }
}

/// Accumulates run records and aggregates them exactly once.
///
/// Records only enter through [`MetricsRecorder::record`], and
/// [`MetricsRecorder::finalize`] consumes the recorder, so a report cannot
/// gain runs after its statistics were computed.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    records: Vec<RunRecord>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one accepted run to the log.
    ///
    /// Generated documents always carry at least one character; an empty
    /// externally sourced document is rejected once statistics are computed.
    pub fn record(&mut self, document: Document, duration: Duration) {
        self.records.push(RunRecord { document, duration });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Folds the log into its mean statistics.
    ///
    /// Fails with [`Error::EmptySession`] when nothing was recorded and with
    /// [`Error::EmptyDocument`] when a zero-length document slipped into the
    /// log; neither admits a meaningful mean.
    pub fn compute_stats(&self) -> Result<AggregateStats> {
        if self.records.is_empty() {
            return Err(Error::EmptySession);
        }
        let count = self.records.len() as f64;
        let mut runtime_sum = 0.0;
        let mut normalized_sum = 0.0;
        let mut size_sum = 0.0;
        for (index, record) in self.records.iter().enumerate() {
            let secs = record.duration.as_secs_f64();
            let chars = record.document.char_count();
            // a zero denominator would poison the normalized mean
            if chars == 0 {
                return Err(Error::EmptyDocument { index });
            }
            let chars = chars as f64;
            runtime_sum += secs;
            normalized_sum += secs / chars;
            size_sum += chars;
        }
        Ok(AggregateStats {
            average_runtime: runtime_sum / count,
            average_normalized_runtime: normalized_sum / count,
            average_input_size: size_sum / count,
        })
    }

    /// Consumes the recorder, returning the immutable report.
    pub fn finalize(self) -> Result<Report> {
        let stats = self.compute_stats()?;
        Ok(Report {
            runs: self.records,
            stats,
        })
    }
}

/// Durations serialize as fractional seconds, matching the report format.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "duration must be a non-negative number of seconds, got {secs}"
            )));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
