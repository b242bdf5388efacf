//! Core data models used throughout Docprep.
//!
//! These types represent the documents, segments, and chunks that flow
//! through the chunking engine and into the vector store.

use serde::{Deserialize, Serialize};

/// A scraped documentation page, immutable once handed to the engine.
///
/// Uniquely identified by `(source, url)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub title: String,
    /// Origin corpus, e.g. "django" or "python".
    pub source: String,
    pub url: String,
    pub doc_type: String,
    /// Timestamp recorded by the scraper; empty when unknown.
    pub scraped_at: String,
}

/// Structural classification of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Heading,
    Paragraph,
    Code,
    ListItem,
    Other,
}

/// An atomic unit of text extracted from a document.
///
/// Segments tile the document: concatenating `text` over all segments in
/// `order` reproduces the original content byte-for-byte. `text` is never
/// empty and keeps the separator whitespace that followed the unit in the
/// source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
    /// 0-based position within the document.
    pub order: usize,
}

/// Provenance metadata attached to every chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub title: String,
    pub source: String,
    pub url: String,
    pub doc_type: String,
    pub scraped_at: String,
    /// 0-based position of the chunk within its document.
    pub chunk_index: usize,
    /// Number of chunks produced for the whole document.
    pub total_chunks: usize,
    /// Deterministic identifier derived from `(source, url, chunk_index)`.
    pub id: String,
}

/// A retrieval-sized passage of a document, ready for the vector store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    pub metadata: ChunkMetadata,
    /// Mirrors `metadata.chunk_index`.
    pub sequence_index: usize,
}
