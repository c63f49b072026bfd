//! active-mdb - Read legacy `.mdb` databases through mdbtools.
//!
//! This crate drives the external mdbtools binaries (`mdb-sql`, `mdb-tables`,
//! `mdb-export`, ...) and reshapes their delimited text output into ordered
//! records. The transforms themselves are pure and synchronous:
//!
//! - [`stream::reassemble`] rebuilds records from `mdb-sql` output, joining
//!   rows that memo-field line breaks split over several lines.
//! - [`conditions::compile_conditions`] turns column/value criteria into a
//!   WHERE fragment.
//! - [`filter::filter_tables`] narrows a table list by include or exclude
//!   patterns.
//!
//! [`MdbTools`] ties them to a database file.
//!
//! # Example
//!
//! ```rust,ignore
//! use active_mdb::{compile_conditions, MdbConfig, MdbTools, OneOrMany};
//!
//! fn main() -> active_mdb::Result<()> {
//!     let db = MdbTools::open(MdbConfig::default(), "db/sample.mdb")?;
//!
//!     let tables = db.tables(&OneOrMany::None, &"_Lookup".into())?;
//!     println!("Found {} tables", tables.len());
//!
//!     let conditions = compile_conditions([("last_name", "Cohen")], None);
//!     for record in db.select_where("Students", &OneOrMany::None, Some(&conditions))? {
//!         println!("{:?}", record.get("first_name"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod conditions;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod naming;
pub mod query;
pub mod stream;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use conditions::{compile_conditions, Comparator, LikeWildcard};
pub use config::{Backend, MdbConfig, ToolsConfig};
pub use error::{MdbError, Result};
pub use export::{ExportFormat, ExportOptions};
pub use filter::filter_tables;
pub use naming::methodize;
pub use query::{mdb_truth, select_sql, TruthValue};
pub use stream::{delimited_to_rows, reassemble, Header, Record, Records};
pub use tools::{filtered_tables, query_records, MdbTools, QueryRunner, TableLister};
pub use types::OneOrMany;
