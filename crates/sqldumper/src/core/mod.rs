//! Core data model and collaborator traits.

pub mod traits;
pub mod value;

pub use traits::{DumpSink, ReadOptions, SourceReader, StatementBuilder};
pub use value::{serialize_row, Row, SqlColumnMap, Value};
