//! Centralized configuration for active-mdb.
//!
//! Tool names and protocol constants live on [`ToolsConfig`]. Per-client
//! settings (binary directory, field delimiter, export defaults) live on
//! [`MdbConfig`], which is constructed once and handed to
//! [`MdbTools`](crate::tools::MdbTools).

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MdbError, Result};
use crate::export::ExportOptions;

/// Names and protocol constants of the mdbtools suite.
pub struct ToolsConfig;

impl ToolsConfig {
    /// Field delimiter passed to `mdb-sql`. Chosen to avoid collisions with field content.
    pub const DEFAULT_DELIMITER: &'static str = "::";
    pub const LINEBREAK: &'static str = "\n";
    /// `mdb-sql` executes the buffered statement when it reads this line.
    pub const SQL_TERMINATOR: &'static str = "go";

    pub const MDB_SQL: &'static str = "mdb-sql";
    pub const MDB_TABLES: &'static str = "mdb-tables";
    pub const MDB_VER: &'static str = "mdb-ver";
    pub const MDB_EXPORT: &'static str = "mdb-export";
    pub const MDB_SCHEMA: &'static str = "mdb-schema";
}

/// Client configuration.
///
/// Every field has a default, so a JSON file only needs the keys it overrides:
///
/// ```json
/// { "bin_dir": "/opt/mdbtools/bin", "delimiter": "||" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdbConfig {
    /// Directory holding the mdbtools binaries. `None` resolves them through `PATH`.
    pub bin_dir: Option<PathBuf>,
    /// Field delimiter requested from `mdb-sql`.
    pub delimiter: String,
    /// Defaults for [`MdbTools::export`](crate::tools::MdbTools::export).
    pub export: ExportOptions,
}

impl Default for MdbConfig {
    fn default() -> Self {
        Self {
            bin_dir: None,
            delimiter: ToolsConfig::DEFAULT_DELIMITER.to_string(),
            export: ExportOptions::default(),
        }
    }
}

impl MdbConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| MdbError::io_with_path(e, path))?;
        let config: MdbConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Use binaries from the given directory instead of `PATH`.
    pub fn with_bin_dir(mut self, bin_dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = Some(bin_dir.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_export(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }

    /// Reject settings that would make every query silently return nothing.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(MdbError::Config {
                message: "delimiter must not be empty".to_string(),
            });
        }
        if self.delimiter.contains('\n') || self.delimiter.contains('\r') {
            return Err(MdbError::Config {
                message: "delimiter must not contain line breaks".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the path of an mdbtools binary.
    pub fn binary(&self, tool: &str) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(tool),
            None => PathBuf::from(tool),
        }
    }
}

/// SQL dialects `mdb-schema` can emit DDL for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Access,
    Mysql,
    Oracle,
    Postgres,
    Sybase,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Access => "access",
            Backend::Mysql => "mysql",
            Backend::Oracle => "oracle",
            Backend::Postgres => "postgres",
            Backend::Sybase => "sybase",
        }
    }

    pub fn all() -> [Backend; 5] {
        [
            Backend::Access,
            Backend::Mysql,
            Backend::Oracle,
            Backend::Postgres,
            Backend::Sybase,
        ]
    }
}

impl FromStr for Backend {
    type Err = MdbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "access" => Ok(Backend::Access),
            "mysql" => Ok(Backend::Mysql),
            "oracle" => Ok(Backend::Oracle),
            "postgres" => Ok(Backend::Postgres),
            "sybase" => Ok(Backend::Sybase),
            _ => Err(MdbError::UnknownBackend {
                backend: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_backend_roundtrip() {
        for backend in Backend::all() {
            let parsed: Backend = backend.as_str().parse().expect("Should parse");
            assert_eq!(backend, parsed);
        }
        assert!("POSTGRES".parse::<Backend>().is_ok());
        assert!("sqlite".parse::<Backend>().is_err());
        assert_eq!(Backend::default(), Backend::Access);
    }

    #[test]
    fn test_default_config() {
        let config = MdbConfig::default();
        assert_eq!(config.delimiter, "::");
        assert!(config.bin_dir.is_none());
        assert_eq!(config.binary(ToolsConfig::MDB_SQL), PathBuf::from("mdb-sql"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bin_dir_resolution() {
        let config = MdbConfig::default().with_bin_dir("/opt/mdbtools");
        assert_eq!(
            config.binary(ToolsConfig::MDB_TABLES),
            PathBuf::from("/opt/mdbtools/mdb-tables")
        );
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let err = MdbConfig::default().with_delimiter("").validate().unwrap_err();
        assert!(err.is_configuration_error());
        assert!(MdbConfig::default().with_delimiter("a\nb").validate().is_err());
    }

    #[test]
    fn test_from_json_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mdb.json");
        std::fs::write(
            &path,
            r#"{ "bin_dir": "bin/mdbtools", "export": { "format": "csv", "headers": true } }"#,
        )
        .unwrap();

        let config = MdbConfig::from_json_file(&path).unwrap();
        assert_eq!(config.bin_dir, Some(PathBuf::from("bin/mdbtools")));
        assert_eq!(config.delimiter, "::");
        assert_eq!(config.export.format, ExportFormat::Csv);
        assert!(config.export.headers);
        assert!(config.export.sanitize);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mdb.json");
        std::fs::write(&path, r#"{ "delimiter": "" }"#).unwrap();
        assert!(matches!(
            MdbConfig::from_json_file(&path),
            Err(MdbError::Config { .. })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            MdbConfig::from_json_file(&path),
            Err(MdbError::Json { .. })
        ));

        assert!(matches!(
            MdbConfig::from_json_file(temp_dir.path().join("missing.json")),
            Err(MdbError::Io { .. })
        ));
    }
}
