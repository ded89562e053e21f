//! Dump orchestrator - main workflow coordinator.

mod worker;

pub use worker::TableStats;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch, Semaphore};
use tracing::{debug, error, info, warn};

use crate::config::DumpConfig;
use crate::core::traits::{DumpSink, ReadOptions, SourceReader, StatementBuilder};
use crate::core::value::Row;
use crate::error::{DumpError, Result};
use crate::sql::AnsiStatementBuilder;

use worker::TableWorker;

/// Row channel capacity. One slot is the closest tokio gets to a rendezvous
/// hand-off: the reader suspends until the worker has taken the previous row.
const ROW_CHANNEL_CAPACITY: usize = 1;

/// Dump orchestrator.
///
/// Drives a full dump for one source against one output sink: schema
/// preamble first, then one concurrent worker per table with included data.
pub struct Dumper {
    reader: Arc<dyn SourceReader>,
    sink: Arc<dyn DumpSink>,
    builder: Arc<dyn StatementBuilder>,
    config: DumpConfig,
}

/// Result of a dump run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpSummary {
    /// Unique run identifier.
    pub run_id: String,

    /// Final status: "completed" or "failed".
    pub status: String,

    /// When the dump started.
    pub started_at: DateTime<Utc>,

    /// When the dump completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Tables enumerated by the reader.
    pub tables_total: usize,

    /// Tables whose data was fully dumped.
    pub tables_dumped: usize,

    /// Tables skipped via configuration.
    pub tables_skipped: usize,

    /// Tables whose worker failed.
    pub tables_failed: usize,

    /// Total insert statements written.
    pub rows_written: i64,

    /// List of failed table names.
    pub failed_tables: Vec<String>,
}

impl DumpSummary {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Dumper {
    /// Create a new dumper with the default ANSI statement builder.
    pub fn new(reader: Arc<dyn SourceReader>, sink: Arc<dyn DumpSink>, config: DumpConfig) -> Self {
        Self {
            reader,
            sink,
            builder: Arc::new(AnsiStatementBuilder),
            config,
        }
    }

    /// Replace the statement builder.
    pub fn with_statement_builder(mut self, builder: Arc<dyn StatementBuilder>) -> Self {
        self.builder = builder;
        self
    }

    /// Run the dump.
    ///
    /// Fails fast on table enumeration or schema preamble errors. Per-table
    /// failures (unconvertible rows, reader errors mid-stream) are aggregated
    /// into the returned [`DumpSummary`] instead of aborting the run; callers
    /// decide what a partial dump is worth.
    pub async fn dump(&self) -> Result<DumpSummary> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        info!("Starting dump run: {}", run_id);

        let tables = self
            .reader
            .tables()
            .await
            .map_err(|e| DumpError::Enumeration(e.to_string()))?;
        info!("Found {} tables to dump", tables.len());

        let structure = self
            .reader
            .structure()
            .await
            .map_err(|e| DumpError::Structure(e.to_string()))?;
        self.sink
            .write(&structure)
            .await
            .map_err(|e| DumpError::Structure(e.to_string()))?;

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let (abort_tx, _abort_rx) = watch::channel(false);
        let abort = Arc::new(abort_tx);

        let mut handles = Vec::new();
        let mut tables_skipped = 0usize;

        for table in &tables {
            if *abort.borrow() {
                info!("Dump aborted, not dispatching remaining tables");
                break;
            }

            let opts = match self.config.find_table(table) {
                None => {
                    debug!(table = %table, "no configuration found for table");
                    ReadOptions::default()
                }
                Some(cfg) if cfg.ignore_data => {
                    debug!(table = %table, "ignoring data to dump");
                    tables_skipped += 1;
                    continue;
                }
                Some(cfg) => ReadOptions::from_config(cfg),
            };

            let permit = semaphore.clone().acquire_owned().await.unwrap();

            let worker = TableWorker {
                table: table.clone(),
                sink: self.sink.clone(),
                builder: self.builder.clone(),
                policy: self.config.on_unsupported,
                abort: abort.clone(),
            };
            let reader = self.reader.clone();
            let name = table.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;

                let (tx, rx) = mpsc::channel::<Row>(ROW_CHANNEL_CAPACITY);
                let worker_handle = tokio::spawn(worker.run(rx));

                // A failed read is not fatal: the channel closes when the
                // sender drops and the worker still completes normally.
                if let Err(e) = reader.read_table(&name, tx, opts).await {
                    warn!(table = %name, "error while reading table: {}", e);
                }

                match worker_handle.await {
                    Ok(result) => result,
                    Err(e) => Err(DumpError::table(name, format!("worker panicked: {}", e))),
                }
            });

            handles.push((table.clone(), handle));
        }

        // Collect one outcome per started worker.
        let mut rows_written: i64 = 0;
        let mut tables_dumped = 0usize;
        let mut failed_tables = Vec::new();

        for (table, handle) in handles {
            match handle.await {
                Ok(Ok(stats)) => {
                    info!("{}: completed ({} rows)", table, stats.rows_written);
                    rows_written += stats.rows_written;
                    tables_dumped += 1;
                }
                Ok(Err(e)) => {
                    error!("{}: failed - {}", table, e);
                    failed_tables.push(table);
                }
                Err(e) => {
                    error!("{}: task panicked - {}", table, e);
                    failed_tables.push(table);
                }
            }
        }

        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        let status = if failed_tables.is_empty() {
            "completed"
        } else {
            "failed"
        };

        info!(
            "Dump {}: {} tables ({} skipped, {} failed), {} rows in {:.1}s",
            status,
            tables.len(),
            tables_skipped,
            failed_tables.len(),
            rows_written,
            duration
        );

        Ok(DumpSummary {
            run_id,
            status: status.to_string(),
            started_at,
            completed_at,
            duration_seconds: duration,
            tables_total: tables.len(),
            tables_dumped,
            tables_skipped,
            tables_failed: failed_tables.len(),
            rows_written,
            failed_tables,
        })
    }

    /// Close the output sink, surfacing any close error.
    pub async fn close(&self) -> Result<()> {
        self.sink.close().await
    }
}
