//! Dump configuration loading and per-table overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DumpError, Result};

/// What to do when a row contains a value with no SQL text representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsupportedPolicy {
    /// Log the offending row and continue with the rest of the table.
    SkipRow,

    /// Stop dumping the table; other tables keep going.
    #[default]
    AbortTable,

    /// Stop dumping the table and signal every other worker to stop too.
    AbortDump,
}

/// Row filter applied when reading a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableFilter {
    /// WHERE clause restricting the rows read (passed through to the reader).
    #[serde(rename = "match", default)]
    pub match_clause: Option<String>,

    /// Maximum number of rows to read.
    #[serde(default)]
    pub limit: Option<u64>,

    /// Column to sort the read by.
    #[serde(default)]
    pub sort_by: Option<String>,
}

/// Per-table override settings.
///
/// A table with no configuration entry is dumped with no overrides; that is a
/// valid, distinct state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name this entry applies to.
    pub name: String,

    /// Skip the table's row data entirely (the schema preamble still covers it).
    #[serde(default)]
    pub ignore_data: bool,

    /// Row filter for this table.
    #[serde(default)]
    pub filter: TableFilter,
}

/// Root dump configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Per-table overrides.
    #[serde(default)]
    pub tables: Vec<TableConfig>,

    /// Upper bound on simultaneously active table workers.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Policy for rows containing unsupported value kinds.
    #[serde(default)]
    pub on_unsupported: UnsupportedPolicy,
}

fn default_concurrency() -> usize {
    4
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            tables: Vec::new(),
            concurrency: default_concurrency(),
            on_unsupported: UnsupportedPolicy::default(),
        }
    }
}

impl DumpConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: DumpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(DumpError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }

        for table in &self.tables {
            if table.name.is_empty() {
                return Err(DumpError::Config(
                    "table entries must have a non-empty name".to_string(),
                ));
            }
        }

        let mut names: Vec<&str> = self.tables.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.tables.len() {
            return Err(DumpError::Config(
                "duplicate table entries in configuration".to_string(),
            ));
        }

        Ok(())
    }

    /// Look up the configuration entry for a table, if any.
    #[must_use]
    pub fn find_table(&self, name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|t| t.name == name)
    }
}
