//! Chunk metadata propagation.
//!
//! Turns assembled chunk contents into [`Chunk`]s carrying provenance
//! metadata and a deterministic identifier. The id is a SHA-256 over
//! `(source, url, chunk_index)`, so re-ingesting an unchanged document
//! with the same configuration reproduces byte-identical ids and the
//! vector store can upsert instead of appending duplicates.

use sha2::{Digest, Sha256};

use crate::models::{Chunk, ChunkMetadata, Document};

/// Derive the stable chunk identifier for `(source, url, chunk_index)`.
pub fn chunk_id(source: &str, url: &str, chunk_index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(b"::");
    hasher.update(url.as_bytes());
    hasher.update(b"::");
    hasher.update(chunk_index.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Attach provenance metadata and ids to chunk contents, in order.
pub fn annotate(contents: Vec<String>, doc: &Document) -> Vec<Chunk> {
    let total_chunks = contents.len();
    contents
        .into_iter()
        .enumerate()
        .map(|(chunk_index, content)| Chunk {
            metadata: ChunkMetadata {
                title: doc.title.clone(),
                source: doc.source.clone(),
                url: doc.url.clone(),
                doc_type: doc.doc_type.clone(),
                scraped_at: doc.scraped_at.clone(),
                chunk_index,
                total_chunks,
                id: chunk_id(&doc.source, &doc.url, chunk_index),
            },
            sequence_index: chunk_index,
            content,
        })
        .collect()
}
