//! Batch ingestion coordination.
//!
//! Drives the chunking engine over a batch of documents and forwards the
//! results to the vector store: per-document failures are recorded and
//! skipped (one bad document never aborts the batch), chunking runs on a
//! bounded worker pool, and chunks are grouped by origin corpus with one
//! store call per source.
//!
//! Within one document, chunk indices always reach the store in
//! increasing order: a document's chunks are produced together and
//! appended to their source group as a unit, whatever order the workers
//! finish in.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use docprep_core::assemble::ChunkerConfig;
use docprep_core::chunker;
use docprep_core::error::DocumentError;
use docprep_core::models::{Chunk, Document};
use docprep_core::store::VectorStore;

use crate::config::Config;
use crate::loader;
use crate::progress::{IngestProgressEvent, IngestProgressReporter};

/// A document rejected during ingestion.
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    pub title: String,
    pub url: String,
    pub reason: String,
}

/// Outcome of one ingestion batch.
#[derive(Debug)]
pub struct IngestReport {
    /// Documents that made it through the engine, including empty ones.
    pub documents_processed: usize,
    /// Valid documents that produced zero chunks (whitespace-only).
    pub documents_empty: usize,
    pub chunks_added: usize,
    pub chunks_by_source: BTreeMap<String, usize>,
    pub failures: Vec<DocumentFailure>,
    pub finished_at: DateTime<Utc>,
}

impl IngestReport {
    /// Documents skipped because the engine rejected them.
    pub fn documents_skipped(&self) -> usize {
        self.failures.len()
    }
}

/// Chunk a batch of documents and upsert the results into `store`.
///
/// Documents are chunked concurrently on at most `workers` blocking
/// tasks. Invalid documents are recorded in the report's failure list
/// and skipped; only store errors abort the batch.
pub async fn ingest_documents(
    store: &dyn VectorStore,
    documents: Vec<Document>,
    config: &ChunkerConfig,
    workers: usize,
    reporter: &dyn IngestProgressReporter,
) -> Result<IngestReport> {
    let total = documents.len();
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks: JoinSet<_> = JoinSet::new();

    for (index, document) in documents.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let config = config.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            tokio::task::spawn_blocking(move || {
                let outcome = chunker::chunk_document(&document, &config);
                (index, document, outcome)
            })
            .await
        });
    }

    // Collect in completion order, then fold in input order so reports
    // and store calls stay deterministic.
    let mut outcomes: Vec<Option<(Document, Result<Vec<Chunk>, DocumentError>)>> =
        std::iter::repeat_with(|| None).take(total).collect();
    let mut completed = 0u64;
    while let Some(joined) = tasks.join_next().await {
        let (index, document, outcome) = joined
            .context("chunking task failed")?
            .context("chunking task failed")?;
        completed += 1;
        reporter.report(IngestProgressEvent::Chunking {
            n: completed,
            total: total as u64,
        });
        outcomes[index] = Some((document, outcome));
    }

    let mut documents_processed = 0usize;
    let mut documents_empty = 0usize;
    let mut failures = Vec::new();
    let mut groups: BTreeMap<String, Vec<Chunk>> = BTreeMap::new();

    for slot in outcomes {
        let Some((document, outcome)) = slot else {
            continue;
        };
        match outcome {
            Ok(chunks) if chunks.is_empty() => {
                documents_processed += 1;
                documents_empty += 1;
            }
            Ok(chunks) => {
                documents_processed += 1;
                groups
                    .entry(document.source.clone())
                    .or_default()
                    .extend(chunks);
            }
            Err(err) => failures.push(DocumentFailure {
                title: document.title,
                url: document.url,
                reason: err.to_string(),
            }),
        }
    }

    let mut chunks_added = 0usize;
    let mut chunks_by_source = BTreeMap::new();
    for (source, chunks) in groups {
        let count = chunks.len();
        let (texts, metadatas, ids) = chunk_payload(chunks)?;
        store
            .add_documents(texts, metadatas, ids)
            .await
            .with_context(|| format!("Failed to store chunks for source `{source}`"))?;
        reporter.report(IngestProgressEvent::Storing {
            source: source.clone(),
            chunks: count as u64,
        });
        chunks_added += count;
        chunks_by_source.insert(source, count);
    }

    Ok(IngestReport {
        documents_processed,
        documents_empty,
        chunks_added,
        chunks_by_source,
        failures,
        finished_at: Utc::now(),
    })
}

/// Load every configured scraped file and ingest the combined batch.
///
/// A configured file that does not exist is reported and skipped.
pub async fn run_ingest(
    config: &Config,
    store: &dyn VectorStore,
    reporter: &dyn IngestProgressReporter,
) -> Result<IngestReport> {
    let chunker_config = config.chunker_config()?;

    let mut documents = Vec::new();
    for file in &config.sources.files {
        if !file.path.exists() {
            reporter.report(IngestProgressEvent::MissingFile {
                file: file.path.display().to_string(),
            });
            continue;
        }
        reporter.report(IngestProgressEvent::Loading {
            file: file.path.display().to_string(),
            label: file.label.clone(),
        });
        documents.extend(loader::load_scraped_file(&file.path)?);
    }

    if let Some(root) = &config.sources.scan_root {
        let paths = loader::scan_scraped_dir(
            root,
            &config.sources.include_globs,
            &config.sources.exclude_globs,
        )?;
        for path in paths {
            reporter.report(IngestProgressEvent::Loading {
                file: path.display().to_string(),
                label: String::new(),
            });
            documents.extend(loader::load_scraped_file(&path)?);
        }
    }

    ingest_documents(
        store,
        documents,
        &chunker_config,
        config.ingest.workers,
        reporter,
    )
    .await
}

/// Split chunks into the index-aligned `(texts, metadatas, ids)` triple
/// the store contract expects.
fn chunk_payload(
    chunks: Vec<Chunk>,
) -> Result<(Vec<String>, Vec<serde_json::Value>, Vec<String>)> {
    let mut texts = Vec::with_capacity(chunks.len());
    let mut metadatas = Vec::with_capacity(chunks.len());
    let mut ids = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let metadata =
            serde_json::to_value(&chunk.metadata).context("Failed to serialize chunk metadata")?;
        ids.push(chunk.metadata.id.clone());
        metadatas.push(metadata);
        texts.push(chunk.content);
    }
    Ok((texts, metadatas, ids))
}
