//! Sinks accepting rendered record trees.
//!
//! A sink receives a named `serde_json::Value` (see
//! [`ToJson`](crate::convert::ToJson)) and persists it somewhere. The crate
//! ships a single implementation writing JSON files.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::error::SinkError;

/// Destination for rendered records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist `value` under `name`.
    async fn write(&self, name: &str, value: &Value) -> Result<(), SinkError>;
}

/// Options for [`JsonFileSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSinkOptions {
    /// Directory the files are written to (default: current directory).
    pub dir: PathBuf,
    /// Pretty-print with two-space indentation (default: true).
    pub pretty: bool,
}

impl Default for JsonSinkOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            pretty: true,
        }
    }
}

impl JsonSinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Enable or disable pretty printing.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Writes each record to `<dir>/<name>` as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonFileSink {
    options: JsonSinkOptions,
}

impl JsonFileSink {
    pub fn new(options: JsonSinkOptions) -> Self {
        Self { options }
    }

    /// Serialize `value` according to the sink options.
    pub fn render(&self, value: &Value) -> Result<Vec<u8>, SinkError> {
        let bytes = if self.options.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(bytes)
    }
}

#[async_trait]
impl RecordSink for JsonFileSink {
    async fn write(&self, name: &str, value: &Value) -> Result<(), SinkError> {
        let bytes = self.render(value)?;
        tokio::fs::create_dir_all(&self.options.dir).await?;
        let path = self.options.dir.join(name);
        tokio::fs::write(&path, &bytes).await?;
        info!(path = %path.display(), bytes = bytes.len(), "Data saved");
        Ok(())
    }
}
