//! SQLite-backed [`VectorStore`] implementation.
//!
//! Embedded alternative to the in-memory store: chunks land in a single
//! `chunks` table keyed by the deterministic chunk id, so
//! `add_documents` is a true upsert (`ON CONFLICT(id) DO UPDATE`) and
//! re-ingestion overwrites instead of duplicating. The origin corpus is
//! denormalized into its own column so the stats query stays a GROUP BY.

use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use docprep_core::store::{CollectionStats, VectorStore};

/// SQLite implementation of the [`VectorStore`] trait.
pub struct SqliteVectorStore {
    pool: SqlitePool,
}

impl SqliteVectorStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the schema if it is not there yet. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chunks (
                id TEXT PRIMARY KEY,
                source TEXT NOT NULL,
                content TEXT NOT NULL,
                metadata_json TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_chunks_source ON chunks(source)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
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

        let mut tx = self.pool.begin().await?;
        for ((text, metadata), id) in texts.into_iter().zip(metadatas).zip(ids) {
            let source = metadata
                .get("source")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();
            let metadata_json = serde_json::to_string(&metadata)?;

            sqlx::query(
                r#"
                INSERT INTO chunks (id, source, content, metadata_json)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    source = excluded.source,
                    content = excluded.content,
                    metadata_json = excluded.metadata_json
                "#,
            )
            .bind(&id)
            .bind(&source)
            .bind(&text)
            .bind(&metadata_json)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn get_collection_stats(&self) -> Result<CollectionStats> {
        let total_chunks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunks")
            .fetch_one(&self.pool)
            .await?;

        let rows =
            sqlx::query("SELECT source, COUNT(*) AS chunk_count FROM chunks GROUP BY source")
                .fetch_all(&self.pool)
                .await?;

        let mut sources = HashMap::new();
        for row in &rows {
            let source: String = row.get("source");
            let count: i64 = row.get("chunk_count");
            sources.insert(source, count as usize);
        }

        Ok(CollectionStats {
            total_chunks: total_chunks as usize,
            sources,
        })
    }
}
