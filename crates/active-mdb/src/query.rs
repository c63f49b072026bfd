//! SQL text for `mdb-sql`.

use crate::types::OneOrMany;

/// Build a `select` statement for `mdb-sql`.
///
/// Column names are double-quoted. `conditions` is inserted verbatim after
/// `where`, typically the output of
/// [`compile_conditions`](crate::conditions::compile_conditions).
pub fn select_sql(table: &str, attributes: &OneOrMany, conditions: Option<&str>) -> String {
    let columns = match attributes {
        OneOrMany::None => "*".to_string(),
        OneOrMany::Single(column) => quote(column),
        OneOrMany::Many(columns) if columns.is_empty() => "*".to_string(),
        OneOrMany::Many(columns) => columns
            .iter()
            .map(|c| quote(c))
            .collect::<Vec<_>>()
            .join(", "),
    };

    match conditions {
        Some(conditions) if !conditions.is_empty() => {
            format!("select {columns} from {table} where {conditions}")
        }
        _ => format!("select {columns} from {table}"),
    }
}

/// Statement returning no rows, only the header line.
pub fn field_names_sql(table: &str) -> String {
    format!("select * from {table} where 1 = 2")
}

pub fn describe_table_sql(table: &str) -> String {
    format!("describe table \"{table}\"")
}

fn quote(column: &str) -> String {
    format!("\"{column}\"")
}

/// Inputs accepted by [`mdb_truth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthValue<'a> {
    Bool(bool),
    Int(i64),
    Text(&'a str),
}

impl From<bool> for TruthValue<'_> {
    fn from(value: bool) -> Self {
        TruthValue::Bool(value)
    }
}

impl From<i64> for TruthValue<'_> {
    fn from(value: i64) -> Self {
        TruthValue::Int(value)
    }
}

impl<'a> From<&'a str> for TruthValue<'a> {
    fn from(value: &'a str) -> Self {
        TruthValue::Text(value)
    }
}

/// mdbtools spells booleans as `1` and `0`.
///
/// Returns `None` for anything that is not a recognizable boolean.
pub fn mdb_truth<'a>(value: impl Into<TruthValue<'a>>) -> Option<u8> {
    match value.into() {
        TruthValue::Bool(true) | TruthValue::Int(1) | TruthValue::Text("1") => Some(1),
        TruthValue::Bool(false) | TruthValue::Int(0) | TruthValue::Text("0") => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all() {
        assert_eq!(
            select_sql("Students", &OneOrMany::None, None),
            "select * from Students"
        );
    }

    #[test]
    fn test_select_columns_with_conditions() {
        assert_eq!(
            select_sql(
                "Students",
                &OneOrMany::from(["first_name", "last_name"]),
                Some("last_name like '%Cohen%'")
            ),
            "select \"first_name\", \"last_name\" from Students where last_name like '%Cohen%'"
        );
        assert_eq!(
            select_sql("Students", &"Id".into(), Some("")),
            "select \"Id\" from Students"
        );
    }

    #[test]
    fn test_helper_statements() {
        assert_eq!(field_names_sql("Teachers"), "select * from Teachers where 1 = 2");
        assert_eq!(describe_table_sql("Teachers"), "describe table \"Teachers\"");
    }

    #[test]
    fn test_mdb_truth() {
        assert_eq!(mdb_truth(true), Some(1));
        assert_eq!(mdb_truth(false), Some(0));
        assert_eq!(mdb_truth(1i64), Some(1));
        assert_eq!(mdb_truth("0"), Some(0));
        assert_eq!(mdb_truth("yes"), None);
        assert_eq!(mdb_truth(7i64), None);
    }
}
