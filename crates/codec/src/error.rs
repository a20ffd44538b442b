use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of a round-trip comparison disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchKind {
    /// A trait set on the input was not set after decoding.
    Missing,
    /// A trait not set on the input was set after decoding.
    Extra,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Extra => write!(f, "extra"),
        }
    }
}

/// Error type for codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Encoding error: {0}")]
    Encode(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Unknown trait tag: {0:?}")]
    UnknownTag(String),
    #[error("Round-trip mismatch: {kind} traits [{traits}]")]
    Mismatch { kind: MismatchKind, traits: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CodecError {
    pub(crate) fn malformed(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}
