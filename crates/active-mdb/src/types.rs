//! Shared argument types.

use serde::{Deserialize, Serialize};

/// An optional argument that may hold one string or several.
///
/// Used for column lists and table-name patterns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn is_none(&self) -> bool {
        matches!(self, OneOrMany::None)
    }

    pub fn is_set(&self) -> bool {
        !self.is_none()
    }

    /// All entries as a list. `None` yields an empty list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::None => Vec::new(),
            OneOrMany::Single(value) => vec![value.clone()],
            OneOrMany::Many(values) => values.clone(),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::Single(value.to_string())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        OneOrMany::Single(value)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<&[&str]> for OneOrMany {
    fn from(values: &[&str]) -> Self {
        OneOrMany::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany {
    fn from(values: [&str; N]) -> Self {
        OneOrMany::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<T> From<Option<T>> for OneOrMany
where
    T: Into<OneOrMany>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(OneOrMany::None, Into::into)
    }
}
