//! Ingest scraped documentation JSON files into a SQLite vector store.
//!
//! Mirrors a nightly ingestion run: load the config, read each scraped
//! file, chunk and upsert, then print the batch report and the store's
//! collection summary.
//!
//! ```bash
//! cargo run --example ingest_scraped -- config/docprep.toml
//! ```

use std::path::Path;

use anyhow::Result;

use docprep::progress::StderrProgress;
use docprep::sqlite_store::SqliteVectorStore;
use docprep::{config, db, ingest, stats};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/docprep.toml".to_string());
    let config = config::load_config(Path::new(&config_path))?;

    let pool = db::connect(&config.db.path).await?;
    let store = SqliteVectorStore::new(pool);
    store.migrate().await?;

    let report = ingest::run_ingest(&config, &store, &StderrProgress).await?;
    println!("{}", stats::ingest_summary(&report));
    stats::run_stats(&store).await?;

    Ok(())
}
