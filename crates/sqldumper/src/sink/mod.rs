//! Output sinks for the dump stream.
//!
//! Each write call takes the sink's lock for exactly one line or blob, so
//! concurrent table workers interleave whole lines and never tear one.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use crate::core::traits::DumpSink;
use crate::error::{DumpError, Result};

/// File-backed sink with closable semantics.
pub struct FileSink {
    file: Mutex<Option<File>>,
}

impl FileSink {
    /// Create (or truncate) the output file at `path`.
    pub async fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path).await?;
        Ok(Self {
            file: Mutex::new(Some(file)),
        })
    }
}

#[async_trait]
impl DumpSink for FileSink {
    async fn write(&self, text: &str) -> Result<()> {
        let mut guard = self.file.lock().await;
        let file = guard
            .as_mut()
            .ok_or_else(|| DumpError::Sink("output file already closed".to_string()))?;
        file.write_all(text.as_bytes()).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let mut guard = self.file.lock().await;
        match guard.take() {
            Some(mut file) => {
                file.flush().await?;
                file.sync_all().await?;
                Ok(())
            }
            None => Err(DumpError::SinkClose(
                "output file already closed".to_string(),
            )),
        }
    }
}

/// Sink that writes to the process's standard output.
///
/// Stdout has no closable semantics; `close` reports that rather than
/// silently succeeding.
pub struct StdoutSink {
    out: Mutex<Stdout>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DumpSink for StdoutSink {
    async fn write(&self, text: &str) -> Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(text.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Err(DumpError::SinkClose(
            "standard output is not a closable sink".to_string(),
        ))
    }
}

/// In-memory sink for tests and embedding.
///
/// Like [`StdoutSink`], it has no closable semantics.
#[derive(Default)]
pub struct MemorySink {
    buf: std::sync::Mutex<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buf.lock().expect("sink lock poisoned").clone()
    }
}

#[async_trait]
impl DumpSink for MemorySink {
    async fn write(&self, text: &str) -> Result<()> {
        self.buf.lock().expect("sink lock poisoned").push_str(text);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Err(DumpError::SinkClose(
            "memory buffer is not a closable sink".to_string(),
        ))
    }
}
