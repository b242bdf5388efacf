//! Error taxonomy for the chunking engine.
//!
//! Only two things can go wrong here: a document missing a required
//! field, which the batch coordinator recovers from by skipping it, and
//! an invalid configuration, which is fatal before any document is
//! processed. Text shape is never an error — unusual input degrades to
//! `Other` segments or oversized chunks instead.

use thiserror::Error;

/// A document that cannot enter the pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("document is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Invalid engine configuration, rejected at initialization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_chars must be greater than zero")]
    ZeroMaxChars,
    #[error("overlap_chars ({overlap_chars}) must be smaller than max_chars ({max_chars})")]
    OverlapTooLarge {
        overlap_chars: usize,
        max_chars: usize,
    },
}
