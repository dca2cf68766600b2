//! Generated JSON document wrapper
//!
//! A [`Document`] is a finished text fragment produced by the grammar
//! generator. It serializes transparently as a plain JSON string so run
//! records embed the raw text, and it exposes the scalar-count length used
//! to normalize runtimes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One grammar-valid JSON document, held as its exact byte-for-byte text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(String);

impl Document {
    /// Wraps raw text as a document.
    ///
    /// The generator is the usual producer; this constructor exists so
    /// harnesses can also replay externally sourced documents.
    pub fn new(text: impl Into<String>) -> Self {
        Document(text.into())
    }

    /// The document text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The document text as bytes, ready to pipe into a subject.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Unwraps the underlying text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in Unicode scalar values, not bytes.
    ///
    /// This is the input-size measure the report statistics use, so a
    /// multi-byte character counts once no matter how it is encoded.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document(text.to_string())
    }
}
