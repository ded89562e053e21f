//! Per-table dump worker.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, warn};

use crate::config::UnsupportedPolicy;
use crate::core::traits::{DumpSink, StatementBuilder};
use crate::core::value::{serialize_row, Row};
use crate::error::{DumpError, Result};

/// Statistics from one table worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableStats {
    /// Insert statements written to the sink.
    pub rows_written: i64,
    /// Rows dropped under the skip-row policy.
    pub rows_skipped: i64,
}

/// Drains the row stream for a single table and writes one insert statement
/// per row to the shared sink.
pub(crate) struct TableWorker {
    pub(crate) table: String,
    pub(crate) sink: Arc<dyn DumpSink>,
    pub(crate) builder: Arc<dyn StatementBuilder>,
    pub(crate) policy: UnsupportedPolicy,
    pub(crate) abort: Arc<watch::Sender<bool>>,
}

impl TableWorker {
    /// Consume rows until the producer closes the stream.
    ///
    /// Returning is the worker's completion signal: `Ok` with stats when the
    /// stream drained (even with zero rows), `Err` when a row was terminal
    /// under the configured policy. Write failures are logged per row and do
    /// not stop the table.
    pub(crate) async fn run(self, mut rx: mpsc::Receiver<Row>) -> Result<TableStats> {
        let mut stats = TableStats::default();

        while let Some(row) = rx.recv().await {
            if *self.abort.borrow() {
                debug!(table = %self.table, "dump aborted, stopping early");
                break;
            }

            let columns = match serialize_row(row) {
                Ok(columns) => columns,
                Err(e) => match self.policy {
                    UnsupportedPolicy::SkipRow => {
                        warn!(table = %self.table, "skipping row: {}", e);
                        stats.rows_skipped += 1;
                        continue;
                    }
                    UnsupportedPolicy::AbortTable => {
                        return Err(DumpError::table(self.table.clone(), e.to_string()));
                    }
                    UnsupportedPolicy::AbortDump => {
                        self.abort.send_replace(true);
                        return Err(DumpError::table(self.table.clone(), e.to_string()));
                    }
                },
            };

            let statement = self.builder.insert(&self.table, &columns);
            if let Err(e) = self.sink.write_line(&statement).await {
                error!(table = %self.table, "could not write insert statement: {}", e);
                continue;
            }

            stats.rows_written += 1;
        }

        Ok(stats)
    }
}
