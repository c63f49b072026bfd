//! Subcommand execution.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::info;

use active_mdb::{
    compile_conditions, Backend, Comparator, ExportFormat, MdbConfig, MdbTools, OneOrMany,
    Record,
};

use crate::Command;

/// WHERE-clause options shared by `select` and `count`.
#[derive(ClapArgs, Debug, Default)]
pub struct WhereArgs {
    /// Condition as column=value (repeatable, ANDed)
    #[arg(long = "where", value_parser = parse_condition)]
    pub conditions: Vec<(String, String)>,

    /// Compare with `=` instead of a `like '%value%'` substring match
    #[arg(long)]
    pub exact: bool,
}

impl WhereArgs {
    /// Compiled fragment, or `None` when no conditions were given.
    pub fn compile(&self) -> Option<String> {
        if self.conditions.is_empty() {
            return None;
        }
        let equals = |column: &str, value: &str| format!("{column} = '{value}'");
        let comparator: Option<&dyn Comparator> = if self.exact { Some(&equals) } else { None };
        Some(compile_conditions(
            self.conditions.iter().map(|(c, v)| (c, v)),
            comparator,
        ))
    }
}

fn parse_condition(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected column=value, got {s:?}")),
    }
}

/// Open the database and run one subcommand, writing results to `out`.
pub fn run(config: MdbConfig, file: &Path, command: Command, out: &mut impl Write) -> Result<()> {
    let db = MdbTools::open(config, file)
        .with_context(|| format!("Failed to open {}", file.display()))?;

    match command {
        Command::Version => writeln!(out, "{}", db.version())?,
        Command::Tables { include, exclude } => {
            let tables = db.tables(&patterns(include), &patterns(exclude))?;
            for table in tables {
                writeln!(out, "{table}")?;
            }
        }
        Command::Fields { table } => {
            for field in db.field_names(&table)? {
                writeln!(out, "{field}")?;
            }
        }
        Command::Sql { statement } => write_records(out, &db.sql(&statement)?)?,
        Command::Select {
            table,
            columns,
            filter,
        } => {
            let conditions = filter.compile();
            let records =
                db.select_where(&table, &patterns(columns), conditions.as_deref())?;
            info!("{} rows from {}", records.len(), table);
            write_records(out, &records)?;
        }
        Command::Count { table, filter } => {
            let conditions = filter.compile();
            let count = db.faked_count(&table, &OneOrMany::None, conditions.as_deref())?;
            writeln!(out, "{count}")?;
        }
        Command::Export {
            table,
            format,
            headers,
        } => {
            let mut options = db.config().export.clone();
            if let Some(format) = format {
                options.format = format.parse::<ExportFormat>()?;
                options.delimiter = None;
            }
            options.headers |= headers;
            write!(out, "{}", db.export(&table, Some(&options))?)?;
        }
        Command::Schema { table, backend } => {
            let backend = backend.map(|b| b.parse::<Backend>()).transpose()?;
            write!(out, "{}", db.schema(&table, backend)?)?;
        }
    }

    Ok(())
}

fn patterns(values: Vec<String>) -> OneOrMany {
    match values.len() {
        0 => OneOrMany::None,
        1 => OneOrMany::Single(values.into_iter().next().unwrap_or_default()),
        _ => OneOrMany::Many(values),
    }
}

fn write_records(out: &mut impl Write, records: &[Record]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    Ok(())
}
