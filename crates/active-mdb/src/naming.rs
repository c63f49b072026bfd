//! Table-name to identifier conversion.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for an acronym followed by a capitalized word ("HTMLParser").
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").unwrap());

/// Regex for a lowercase letter or digit followed by an uppercase letter.
static CAMEL_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

/// Turn a table name into a snake_case identifier.
///
/// # Rules Applied
/// 1. `::` becomes `/`
/// 2. Split acronym runs from the following word
/// 3. Split lowercase/digit to uppercase transitions
/// 4. `-` becomes `_`
/// 5. Lowercase
///
/// # Examples
///
/// ```
/// use active_mdb::naming::methodize;
///
/// assert_eq!(methodize("tblStudents"), "tbl_students");
/// assert_eq!(methodize("HTMLExport"), "html_export");
/// ```
pub fn methodize(table_name: &str) -> String {
    let mut result = table_name.replace("::", "/");
    result = ACRONYM_BOUNDARY.replace_all(&result, "${1}_${2}").to_string();
    result = CAMEL_BOUNDARY.replace_all(&result, "${1}_${2}").to_string();
    result = result.replace('-', "_");
    result.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methodize_camel_case() {
        assert_eq!(methodize("Teachers"), "teachers");
        assert_eq!(methodize("ClassRoster"), "class_roster");
        assert_eq!(methodize("tblStudents"), "tbl_students");
    }

    #[test]
    fn test_methodize_acronyms_and_digits() {
        assert_eq!(methodize("HTMLExport"), "html_export");
        assert_eq!(methodize("Room101Assignments"), "room101_assignments");
    }

    #[test]
    fn test_methodize_separators() {
        assert_eq!(methodize("Order-Details"), "order_details");
        assert_eq!(methodize("Admin::UserName"), "admin/user_name");
        assert_eq!(methodize("already_snake"), "already_snake");
    }
}
