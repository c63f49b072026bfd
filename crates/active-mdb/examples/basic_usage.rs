//! Basic usage example - list the tables of an .mdb file and dump one of them

use active_mdb::{MdbConfig, MdbTools, OneOrMany, Result};

fn main() -> Result<()> {
    // Get path from args or use the sample database
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./db/sample.mdb".to_string());

    println!("Opening {} with mdbtools", path);

    let db = MdbTools::open(MdbConfig::default(), &path)?;
    println!("JET version: {}", db.version());

    let tables = db.tables(&OneOrMany::None, &"^MSys".into())?;
    if tables.is_empty() {
        println!("No user tables found.");
        return Ok(());
    }

    println!("Found {} tables:", tables.len());
    for table in &tables {
        println!("  - {} ({})", table, active_mdb::methodize(table));
    }

    let first = &tables[0];
    let records = db.select_where(first, &OneOrMany::None, None)?;
    println!("{} rows in {}", records.len(), first);
    for record in records.iter().take(5) {
        let fields: Vec<String> = record.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("  {}", fields.join(", "));
    }

    Ok(())
}
