//! # sqldumper
//!
//! Streaming database-dump serializer: consumes rows from a pluggable table
//! reader and emits one SQL insert statement per row to a shared output sink,
//! preceded by the schema preamble.
//!
//! - **Typed column values** with exhaustive SQL-literal coercion
//! - **One concurrent worker per table** with channel backpressure
//! - **Per-table configuration** to skip or filter a table's data
//! - **Pluggable collaborators** for the reader, statement builder, and sink
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sqldumper::{DumpConfig, Dumper, FileSink, SourceReader};
//!
//! async fn dump(reader: Arc<dyn SourceReader>) -> sqldumper::Result<()> {
//!     let config = DumpConfig::load("dump.yaml")?;
//!     let sink = Arc::new(FileSink::create("dump.sql").await?);
//!     let dumper = Dumper::new(reader, sink, config);
//!     let summary = dumper.dump().await?;
//!     println!("Dumped {} rows", summary.rows_written);
//!     dumper.close().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod dumper;
pub mod error;
pub mod sink;
pub mod sql;

// Re-exports for convenient access
pub use config::{DumpConfig, TableConfig, TableFilter, UnsupportedPolicy};
pub use crate::core::{
    serialize_row, DumpSink, ReadOptions, Row, SourceReader, SqlColumnMap, StatementBuilder, Value,
};
pub use dumper::{DumpSummary, Dumper, TableStats};
pub use error::{DumpError, Result};
pub use sink::{FileSink, MemorySink, StdoutSink};
pub use sql::AnsiStatementBuilder;
