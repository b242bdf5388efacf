//! # Docprep Core
//!
//! Dependency-light core of Docprep: data models, the chunking engine
//! (segmentation → assembly → metadata propagation), and the vector
//! store abstraction with an in-memory reference implementation.
//!
//! This crate contains no tokio runtime requirement, no sqlx, and no
//! filesystem I/O. The engine is pure and synchronous: each invocation
//! reads one document and returns freshly allocated chunks, so it is
//! safe to call concurrently across documents with no coordination.

pub mod annotate;
pub mod assemble;
pub mod chunker;
pub mod error;
pub mod models;
pub mod segment;
pub mod store;
