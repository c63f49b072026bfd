//! Table-name selection by include or exclude patterns.

use regex::Regex;
use tracing::debug;

use crate::error::{MdbError, Result};
use crate::types::OneOrMany;

/// Filter a list of table names.
///
/// Pattern entries are ORed into one regular expression (`a|b|c`) and matched
/// anywhere in the name, case-sensitively. `exclude` drops matching names,
/// `include` keeps only matching names. With neither set the list is returned
/// unchanged. Setting both is a configuration error and nothing is filtered.
///
/// # Example
///
/// ```
/// use active_mdb::filter::filter_tables;
/// use active_mdb::OneOrMany;
///
/// let tables = vec!["A".to_string(), "B_Lookup".to_string(), "C".to_string()];
/// let kept = filter_tables(tables, &OneOrMany::None, &"_Lookup".into()).unwrap();
/// assert_eq!(kept, vec!["A", "C"]);
/// ```
pub fn filter_tables(
    tables: Vec<String>,
    include: &OneOrMany,
    exclude: &OneOrMany,
) -> Result<Vec<String>> {
    match (include.is_set(), exclude.is_set()) {
        (false, false) => Ok(tables),
        (true, true) => Err(MdbError::Config {
            message: "table filter accepts include or exclude, not both".to_string(),
        }),
        (false, true) => {
            let regex = compile_alternation(exclude)?;
            let before = tables.len();
            let kept: Vec<String> = tables.into_iter().filter(|t| !regex.is_match(t)).collect();
            debug!("Excluded {} of {} tables", before - kept.len(), before);
            Ok(kept)
        }
        (true, false) => {
            let regex = compile_alternation(include)?;
            let kept: Vec<String> = tables.into_iter().filter(|t| regex.is_match(t)).collect();
            debug!("Included {} tables", kept.len());
            Ok(kept)
        }
    }
}

/// Join pattern entries with `|` into a single regex.
fn compile_alternation(patterns: &OneOrMany) -> Result<Regex> {
    let pattern = patterns.to_vec().join("|");
    Regex::new(&pattern).map_err(|source| MdbError::InvalidPattern { pattern, source })
}
