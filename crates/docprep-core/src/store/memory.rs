//! In-memory [`VectorStore`] implementation for tests and small corpora.
//!
//! Uses a `HashMap` behind `std::sync::RwLock` for thread safety. Upsert
//! falls out of the map semantics: inserting an existing id replaces the
//! stored entry.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::{CollectionStats, VectorStore};

struct StoredChunk {
    text: String,
    metadata: serde_json::Value,
}

/// In-memory store keyed by chunk id.
#[derive(Default)]
pub struct InMemoryVectorStore {
    chunks: RwLock<HashMap<String, StoredChunk>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.chunks.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.read().unwrap().is_empty()
    }

    /// Stored text for an id, if present.
    pub fn get_text(&self, id: &str) -> Option<String> {
        self.chunks
            .read()
            .unwrap()
            .get(id)
            .map(|c| c.text.clone())
    }

    /// Stored metadata for an id, if present.
    pub fn get_metadata(&self, id: &str) -> Option<serde_json::Value> {
        self.chunks
            .read()
            .unwrap()
            .get(id)
            .map(|c| c.metadata.clone())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_documents(
        &self,
        texts: Vec<String>,
        metadatas: Vec<serde_json::Value>,
        ids: Vec<String>,
    ) -> Result<()> {
        if texts.len() != metadatas.len() || texts.len() != ids.len() {
            bail!(
                "add_documents length mismatch: {} texts, {} metadatas, {} ids",
                texts.len(),
                metadatas.len(),
                ids.len()
            );
        }
        let mut chunks = self.chunks.write().unwrap();
        for ((text, metadata), id) in texts.into_iter().zip(metadatas).zip(ids) {
            chunks.insert(id, StoredChunk { text, metadata });
        }
        Ok(())
    }

    async fn get_collection_stats(&self) -> Result<CollectionStats> {
        let chunks = self.chunks.read().unwrap();
        let mut stats = CollectionStats {
            total_chunks: chunks.len(),
            sources: HashMap::new(),
        };
        for stored in chunks.values() {
            let source = stored
                .metadata
                .get("source")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();
            *stats.sources.entry(source).or_insert(0) += 1;
        }
        Ok(stats)
    }
}
