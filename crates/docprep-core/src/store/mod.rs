//! Vector store abstraction.
//!
//! The [`VectorStore`] trait is the contract the chunking pipeline's
//! output must satisfy: an index-aligned, upsert-by-id bulk insert plus
//! a collection statistics query. Any conforming backend — in-memory,
//! embedded, or networked — works; embedding and similarity search are
//! the backend's business, not this crate's.
//!
//! | Method | Purpose |
//! |--------|---------|
//! | [`add_documents`](VectorStore::add_documents) | Upsert chunk texts with metadata and ids |
//! | [`get_collection_stats`](VectorStore::get_collection_stats) | Totals and per-source chunk counts |

pub mod memory;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Totals reported by a vector store collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionStats {
    pub total_chunks: usize,
    /// Chunk count per origin corpus.
    pub sources: HashMap<String, usize>,
}

/// Abstract chunk storage backend.
///
/// All three argument vectors of `add_documents` are index-aligned and
/// must have the same length. Re-adding an existing id overwrites the
/// stored entry — this upsert is what makes re-ingestion idempotent.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upsert a batch of chunk texts with their metadata maps and ids.
    async fn add_documents(
        &self,
        texts: Vec<String>,
        metadatas: Vec<serde_json::Value>,
        ids: Vec<String>,
    ) -> Result<()>;

    /// Report the total chunk count and the per-source breakdown.
    async fn get_collection_stats(&self) -> Result<CollectionStats>;
}
