//! Core traits for the dump pipeline.
//!
//! This module defines the abstractions the dumper coordinates:
//!
//! - [`SourceReader`]: enumerates tables, returns schema DDL, and streams rows
//! - [`StatementBuilder`]: renders a column map into insert syntax
//! - [`DumpSink`]: the single shared output stream all workers write to

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::TableConfig;
use crate::error::Result;

use super::value::{Row, SqlColumnMap};

/// Options for reading rows from a table.
///
/// Built from the table's configuration and handed to the reader unchanged;
/// the dumper itself never interprets these fields.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Optional WHERE clause restricting which rows are read.
    pub where_clause: Option<String>,
    /// Maximum number of rows to read.
    pub limit: Option<u64>,
    /// Column to order the read by.
    pub order_by: Option<String>,
}

impl ReadOptions {
    /// Build read options from a table's configuration.
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            where_clause: config.filter.match_clause.clone(),
            limit: config.filter.limit,
            order_by: config.filter.sort_by.clone(),
        }
    }
}

/// Read schema and row data from a source database.
///
/// # Streaming
///
/// [`read_table`](SourceReader::read_table) pushes rows into the channel it
/// is given. The channel has minimal capacity, so the reader suspends until
/// the consuming worker is ready for each row — natural backpressure that
/// keeps the reader from racing ahead of serialization.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Enumerate the table names available in the source.
    async fn tables(&self) -> Result<Vec<String>>;

    /// Fetch the schema preamble (structural DDL) for the dump.
    async fn structure(&self) -> Result<String>;

    /// Stream rows for one table into `tx`.
    ///
    /// Pushes zero or more rows, then closes the stream by dropping the
    /// sender on return. Implementations must stop (and return an error or
    /// `Ok`) when the receiver has gone away — a worker that hit a fatal row
    /// drops its end of the channel.
    async fn read_table(&self, table: &str, tx: mpsc::Sender<Row>, opts: ReadOptions)
        -> Result<()>;
}

/// Render an insert statement from a table name and a column map.
///
/// Treated as a pure formatting function: for a given table and map the
/// output must be deterministic. Any escaping of the literal text is this
/// layer's responsibility.
pub trait StatementBuilder: Send + Sync {
    /// Build one insert statement for `table` from `columns`.
    fn insert(&self, table: &str, columns: &SqlColumnMap) -> String;
}

/// The shared output stream for a dump.
///
/// All table workers write concurrently with no external guard; each call to
/// [`write`](DumpSink::write) must be atomic at the sink boundary so lines
/// from different tables interleave but never tear.
#[async_trait]
pub trait DumpSink: Send + Sync {
    /// Write `text` to the output in a single atomic call.
    async fn write(&self, text: &str) -> Result<()>;

    /// Write `line` followed by a newline, as one atomic call.
    async fn write_line(&self, line: &str) -> Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        self.write(&buf).await
    }

    /// Close the output.
    ///
    /// Sinks without closable semantics return a descriptive
    /// [`DumpError::SinkClose`](crate::error::DumpError::SinkClose) rather
    /// than silently succeeding.
    async fn close(&self) -> Result<()>;
}
