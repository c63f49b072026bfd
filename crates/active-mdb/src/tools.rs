//! mdbtools client.
//!
//! [`QueryRunner`] and [`TableLister`] are the seams between the pure
//! transforms in this crate and the external binaries. [`MdbTools`] implements
//! both by spawning `mdb-sql`, `mdb-tables` and friends for one database
//! file. Anything else that can produce the same text (a fixture, a remote
//! runner) can stand in for it.

use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::{Backend, MdbConfig, ToolsConfig};
use crate::error::{MdbError, Result};
use crate::export::ExportOptions;
use crate::filter::filter_tables;
use crate::query;
use crate::stream::{reassemble, Header, Record};
use crate::types::OneOrMany;

/// Runs one SQL statement and returns the raw output lines.
pub trait QueryRunner {
    /// Execute `sql`, returning stdout split into lines. Diagnostics are discarded.
    fn run(&self, sql: &str) -> Result<Vec<String>>;

    /// Field delimiter the runner asked the tool to use.
    fn delimiter(&self) -> &str;
}

/// Lists the tables of a data source.
pub trait TableLister {
    /// All table names, in the tool's native order.
    fn list_tables(&self) -> Result<Vec<String>>;
}

/// Run a statement and reassemble its output into records.
pub fn query_records(runner: &dyn QueryRunner, sql: &str) -> Result<Vec<Record>> {
    let lines = runner.run(sql)?;
    Ok(reassemble(lines, runner.delimiter()).collect())
}

/// List tables and apply an include or exclude filter.
pub fn filtered_tables(
    lister: &dyn TableLister,
    include: &OneOrMany,
    exclude: &OneOrMany,
) -> Result<Vec<String>> {
    // Reject a bad filter before spawning anything.
    if include.is_set() && exclude.is_set() {
        return filter_tables(Vec::new(), include, exclude);
    }
    filter_tables(lister.list_tables()?, include, exclude)
}

/// Client for one `.mdb` file.
#[derive(Debug, Clone)]
pub struct MdbTools {
    config: MdbConfig,
    file: PathBuf,
    version: String,
}

impl MdbTools {
    /// Open a database file, verifying it with `mdb-ver`.
    ///
    /// # Arguments
    ///
    /// * `config` - Tool locations and delimiter
    /// * `file` - Path to the `.mdb` file
    pub fn open(config: MdbConfig, file: impl AsRef<Path>) -> Result<Self> {
        config.validate()?;
        let file = file.as_ref().to_path_buf();
        let version = Self::check_file(&config, &file)?;
        debug!("Opened {} ({})", file.display(), version);

        Ok(Self {
            config,
            file,
            version,
        })
    }

    /// Create a client without probing the file.
    pub fn new_unchecked(config: MdbConfig, file: impl Into<PathBuf>) -> Self {
        Self {
            config,
            file: file.into(),
            version: String::new(),
        }
    }

    /// Check that the file exists and that mdbtools can read it.
    ///
    /// Returns the JET version reported by `mdb-ver`.
    pub fn check_file(config: &MdbConfig, file: &Path) -> Result<String> {
        if !file.exists() {
            return Err(MdbError::FileNotFound(file.to_path_buf()));
        }

        let output = capture(
            config,
            ToolsConfig::MDB_VER,
            &[file.as_os_str().to_owned()],
            None,
        )?;
        if !output.success {
            return Err(MdbError::tool(
                ToolsConfig::MDB_VER,
                format!("mdbtools cannot access {}: {}", file.display(), output.stderr.trim()),
            ));
        }
        Ok(output.stdout.trim().to_string())
    }

    /// Version string reported by `mdb-ver`, empty when the file is unusable.
    pub fn mdb_version(config: &MdbConfig, file: &Path) -> String {
        match capture(config, ToolsConfig::MDB_VER, &[file.as_os_str().to_owned()], None) {
            Ok(output) if output.success => output.stdout.trim().to_string(),
            Ok(_) => String::new(),
            Err(e) => {
                debug!("mdb-ver unavailable: {}", e);
                String::new()
            }
        }
    }

    /// Whether `mdb-ver` recognizes the file.
    pub fn valid_file(config: &MdbConfig, file: &Path) -> bool {
        !Self::mdb_version(config, file).is_empty()
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn config(&self) -> &MdbConfig {
        &self.config
    }

    /// Version captured when the file was opened.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Table names, optionally narrowed by include or exclude patterns.
    pub fn tables(&self, include: &OneOrMany, exclude: &OneOrMany) -> Result<Vec<String>> {
        filtered_tables(self, include, exclude)
    }

    /// Fail with [`MdbError::TableNotFound`] unless the table exists.
    pub fn check_table(&self, table: &str) -> Result<()> {
        if self.list_tables()?.iter().any(|t| t == table) {
            Ok(())
        } else {
            Err(MdbError::TableNotFound {
                table: table.to_string(),
            })
        }
    }

    /// Run a single statement through `mdb-sql`.
    pub fn sql(&self, sql: &str) -> Result<Vec<Record>> {
        query_records(self, sql)
    }

    /// Select `attributes` from `table`, with an optional WHERE fragment.
    pub fn select_where(
        &self,
        table: &str,
        attributes: &OneOrMany,
        conditions: Option<&str>,
    ) -> Result<Vec<Record>> {
        self.sql(&query::select_sql(table, attributes, conditions))
    }

    /// Row count obtained by selecting the rows and counting them.
    pub fn faked_count(
        &self,
        table: &str,
        attributes: &OneOrMany,
        conditions: Option<&str>,
    ) -> Result<usize> {
        Ok(self.select_where(table, attributes, conditions)?.len())
    }

    /// Column names of a table, in table order.
    pub fn field_names(&self, table: &str) -> Result<Vec<String>> {
        let sql = query::field_names_sql(table);
        let output = capture(&self.config, ToolsConfig::MDB_SQL, &self.sql_args(), Some(&sql))?;
        let text = output.stdout.trim_start_matches(['\r', '\n']);
        let header_line = text.lines().next().unwrap_or("");
        if header_line.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Header::parse(header_line, &self.config.delimiter)
            .fields()
            .to_vec())
    }

    /// `describe table` output as records.
    pub fn describe_table(&self, table: &str) -> Result<Vec<Record>> {
        self.sql(&query::describe_table_sql(table))
    }

    /// Export a table with `mdb-export`. `None` uses the configured defaults.
    pub fn export(&self, table: &str, options: Option<&ExportOptions>) -> Result<String> {
        let options = options.unwrap_or(&self.config.export);
        let output = capture(
            &self.config,
            ToolsConfig::MDB_EXPORT,
            &self.export_args(table, options),
            None,
        )?;
        checked(ToolsConfig::MDB_EXPORT, output)
    }

    /// Export a table as CSV with a header row.
    pub fn table_to_csv(&self, table: &str) -> Result<String> {
        self.export(table, Some(&ExportOptions::csv_with_headers()))
    }

    /// DDL for a table from `mdb-schema`.
    pub fn schema(&self, table: &str, backend: Option<Backend>) -> Result<String> {
        let output = capture(
            &self.config,
            ToolsConfig::MDB_SCHEMA,
            &self.schema_args(table, backend),
            None,
        )?;
        checked(ToolsConfig::MDB_SCHEMA, output)
    }

    fn sql_args(&self) -> Vec<OsString> {
        vec![
            "-F".into(),
            "-p".into(),
            "-d".into(),
            self.config.delimiter.clone().into(),
            self.file.as_os_str().to_owned(),
        ]
    }

    fn tables_args(&self) -> Vec<OsString> {
        vec!["-1".into(), self.file.as_os_str().to_owned()]
    }

    fn export_args(&self, table: &str, options: &ExportOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = options.export_args().into_iter().map(Into::into).collect();
        args.push(self.file.as_os_str().to_owned());
        args.push(table.into());
        args
    }

    fn schema_args(&self, table: &str, backend: Option<Backend>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-T".into(), table.into(), self.file.as_os_str().to_owned()];
        if let Some(backend) = backend {
            args.push(backend.as_str().into());
        }
        args
    }
}

impl QueryRunner for MdbTools {
    fn run(&self, sql: &str) -> Result<Vec<String>> {
        let input = format!(
            "{sql}{lb}{go}{lb}",
            lb = ToolsConfig::LINEBREAK,
            go = ToolsConfig::SQL_TERMINATOR
        );
        // mdb-sql reports on stderr and exits non-zero for harmless warnings,
        // so only the text on stdout is considered.
        let output = capture(&self.config, ToolsConfig::MDB_SQL, &self.sql_args(), Some(&input))?;
        Ok(output.stdout.lines().map(str::to_string).collect())
    }

    fn delimiter(&self) -> &str {
        &self.config.delimiter
    }
}

impl TableLister for MdbTools {
    fn list_tables(&self) -> Result<Vec<String>> {
        let output = capture(&self.config, ToolsConfig::MDB_TABLES, &self.tables_args(), None)?;
        let stdout = checked(ToolsConfig::MDB_TABLES, output)?;
        Ok(stdout
            .split(ToolsConfig::LINEBREAK)
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Captured result of one tool invocation.
struct ToolOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

/// Spawn an mdbtools binary, optionally feeding `stdin`, and collect its output.
fn capture(
    config: &MdbConfig,
    tool: &str,
    args: &[OsString],
    stdin: Option<&str>,
) -> Result<ToolOutput> {
    let binary = config.binary(tool);
    debug!("Running {} {:?}", binary.display(), args);

    let mut child = Command::new(&binary)
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| MdbError::tool(tool, format!("Failed to run {}: {e}", binary.display())))?;

    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        match pipe.write_all(input.as_bytes()) {
            Ok(()) => {}
            // The tool may exit without reading everything; its output still counts.
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("{} closed stdin early", tool);
            }
            Err(e) => return Err(MdbError::tool(tool, format!("Failed to write stdin: {e}"))),
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| MdbError::tool(tool, format!("Failed to read output: {e}")))?;

    if !output.status.success() {
        debug!("{} returned {}", tool, output.status);
    }

    Ok(ToolOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Stdout of a successful run, or a [`MdbError::ToolFailed`] carrying stderr.
fn checked(tool: &str, output: ToolOutput) -> Result<String> {
    if output.success {
        Ok(output.stdout)
    } else {
        Err(MdbError::tool(tool, output.stderr.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    fn client() -> MdbTools {
        MdbTools::new_unchecked(MdbConfig::default(), "db/sample.mdb")
    }

    #[test]
    fn test_sql_args() {
        assert_eq!(
            strings(&client().sql_args()),
            vec!["-F", "-p", "-d", "::", "db/sample.mdb"]
        );
    }

    #[test]
    fn test_tables_args() {
        assert_eq!(strings(&client().tables_args()), vec!["-1", "db/sample.mdb"]);
    }

    #[test]
    fn test_export_args() {
        let options = ExportOptions {
            format: ExportFormat::Csv,
            headers: true,
            sanitize: false,
            delimiter: None,
        };
        assert_eq!(
            strings(&client().export_args("Teachers", &options)),
            vec!["-d", ",", "db/sample.mdb", "Teachers"]
        );
    }

    #[test]
    fn test_schema_args() {
        assert_eq!(
            strings(&client().schema_args("Teachers", None)),
            vec!["-T", "Teachers", "db/sample.mdb"]
        );
        assert_eq!(
            strings(&client().schema_args("Teachers", Some(Backend::Postgres))),
            vec!["-T", "Teachers", "db/sample.mdb", "postgres"]
        );
    }

    #[test]
    fn test_missing_file() {
        let err = MdbTools::open(MdbConfig::default(), "/nonexistent/never.mdb").unwrap_err();
        assert!(matches!(err, MdbError::FileNotFound(_)));
        assert!(!MdbTools::valid_file(
            &MdbConfig::default().with_bin_dir("/nonexistent/bin"),
            Path::new("/nonexistent/never.mdb")
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_probe() {
        let err = MdbTools::open(MdbConfig::default().with_delimiter(""), "x.mdb").unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_missing_binary_is_tool_failure() {
        let config = MdbConfig::default().with_bin_dir("/nonexistent/bin");
        let tools = MdbTools::new_unchecked(config, "db/sample.mdb");
        let err = tools.list_tables().unwrap_err();
        assert!(matches!(err, MdbError::ToolFailed { ref tool, .. } if tool == "mdb-tables"));
        assert!(err.is_upstream_failure());
    }
}
