//! WHERE-clause compilation from column/value search criteria.

use std::fmt::Display;

/// Strategy turning one column and its search value into a condition fragment.
///
/// Closures of the shape `Fn(&str, &str) -> String` implement this directly:
///
/// ```
/// use active_mdb::conditions::compile_conditions;
///
/// let equals = |name: &str, value: &str| format!("{name} = {value}");
/// assert_eq!(compile_conditions([("age", 18)], Some(&equals)), "age = 18");
/// ```
pub trait Comparator {
    fn compare(&self, column: &str, value: &str) -> String;
}

impl<F> Comparator for F
where
    F: Fn(&str, &str) -> String,
{
    fn compare(&self, column: &str, value: &str) -> String {
        self(column, value)
    }
}

/// Substring match: `<column> like '%<value>%'`.
///
/// Values are inserted verbatim. Quotes inside a value are not escaped, so
/// callers must not pass untrusted input through this comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LikeWildcard;

impl Comparator for LikeWildcard {
    fn compare(&self, column: &str, value: &str) -> String {
        format!("{column} like '%{value}%'")
    }
}

/// Compile search criteria into a fragment suitable for a WHERE clause.
///
/// Columns are sorted by their string form so the same criteria always
/// produce the same string, whatever order the input iterates in. Fragments
/// are joined with `" AND "`. Without a comparator, [`LikeWildcard`] is used.
/// Empty criteria yield an empty string.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use active_mdb::conditions::compile_conditions;
///
/// let conditions = HashMap::from([("last_name", "Roberts"), ("first_name", "Summer")]);
/// assert_eq!(
///     compile_conditions(&conditions, None),
///     "first_name like '%Summer%' AND last_name like '%Roberts%'"
/// );
/// ```
pub fn compile_conditions<K, V>(
    conditions: impl IntoIterator<Item = (K, V)>,
    comparator: Option<&dyn Comparator>,
) -> String
where
    K: Display,
    V: Display,
{
    let mut pairs: Vec<(String, String)> = conditions
        .into_iter()
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let comparator = comparator.unwrap_or(&LikeWildcard);
    pairs
        .iter()
        .map(|(column, value)| comparator.compare(column, value))
        .collect::<Vec<_>>()
        .join(" AND ")
}
