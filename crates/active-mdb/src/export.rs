//! Options for `mdb-export`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MdbError, Result};

/// Output format requested from `mdb-export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `INSERT` statements.
    #[default]
    Sql,
    /// Comma separated values.
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Sql => "sql",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = MdbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sql" => Ok(ExportFormat::Sql),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(MdbError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Export settings. Defaults to SQL without headers, sanitized names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Explicit field delimiter. Overrides whatever `format` would pick.
    pub delimiter: Option<String>,
    /// Emit a header row.
    pub headers: bool,
    /// Let mdbtools sanitize column names.
    pub sanitize: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Sql,
            delimiter: None,
            headers: false,
            sanitize: true,
        }
    }
}

impl ExportOptions {
    /// CSV with a header row, as used by [`MdbTools::table_to_csv`](crate::tools::MdbTools::table_to_csv).
    pub fn csv_with_headers() -> Self {
        Self {
            format: ExportFormat::Csv,
            headers: true,
            ..Self::default()
        }
    }

    /// Command-line flags for these options, excluding the file and table arguments.
    pub fn export_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        match (&self.delimiter, self.format) {
            (Some(delimiter), _) => {
                args.push("-d".to_string());
                args.push(delimiter.clone());
            }
            (None, ExportFormat::Sql) => args.push("-I".to_string()),
            (None, ExportFormat::Csv) => {
                args.push("-d".to_string());
                args.push(",".to_string());
            }
        }

        if !self.headers {
            args.push("-H".to_string());
        }
        if self.sanitize {
            args.push("-S".to_string());
        }
        args
    }
}
