//! Reassembly of `mdb-sql` delimited output into records.
//!
//! `mdb-sql` prints one banner line, one header line, then one line per row
//! with fields separated by the configured delimiter. Memo fields may carry
//! embedded line breaks, so a single logical row can arrive split over several
//! physical lines. [`Records`] glues those pieces back together by watching
//! the token count against the header.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

/// Ordered field names of a result stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    fields: Vec<String>,
}

impl Header {
    /// Parse a header line.
    /// A blank line yields a header with no fields.
    pub fn parse(line: &str, delimiter: &str) -> Self {
        if chomp(line).is_empty() {
            return Self { fields: Vec::new() };
        }
        Self {
            fields: split_line(line, delimiter),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One complete row: field name to value, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Value of the named field. With a repeated name the last one wins.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in header order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Values in header order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Unordered view. Duplicate column names keep the last value.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.fields.iter().cloned().collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Lazy record iterator over the physical lines of one `mdb-sql` result.
///
/// Created by [`reassemble`]. The first line is discarded, the second becomes
/// the [`Header`], and every later line is merged into a pending row until the
/// row holds exactly one token per header field.
///
/// A pending row that is still short when the input ends is dropped and
/// logged, never yielded.
pub struct Records<I> {
    lines: I,
    delimiter: String,
    header: Option<Header>,
    pending: Vec<String>,
    started: bool,
}

impl<I> Records<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    fn new(lines: I, delimiter: &str) -> Self {
        Self {
            lines,
            delimiter: delimiter.to_string(),
            header: None,
            pending: Vec::new(),
            started: false,
        }
    }

    /// The stream's header, reading the banner and header lines if needed.
    ///
    /// `None` when the input ends before a header line.
    pub fn header(&mut self) -> Option<&Header> {
        self.read_header();
        self.header.as_ref()
    }

    fn read_header(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        // Banner line.
        if self.lines.next().is_none() {
            return;
        }
        self.header = self
            .lines
            .next()
            .map(|line| Header::parse(line.as_ref(), &self.delimiter));

        if let Some(header) = &self.header {
            debug!("mdb-sql header: {} fields", header.len());
        }
    }

    fn absorb(&mut self, line: &str, expected: usize) {
        let mut tokens = split_line(line, &self.delimiter).into_iter();

        if !self.pending.is_empty() && self.pending.len() < expected {
            if let (Some(last), Some(first)) = (self.pending.last_mut(), tokens.next()) {
                last.push(' ');
                last.push_str(&first);
            }
        }
        self.pending.extend(tokens);
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.read_header();
        let expected = self.header.as_ref()?.len();
        if expected == 0 {
            // No columns to fill; discard the data lines.
            self.lines.by_ref().for_each(drop);
            return None;
        }

        loop {
            let Some(line) = self.lines.next() else {
                if !self.pending.is_empty() {
                    warn!(
                        "Dropping incomplete trailing row ({} of {} fields)",
                        self.pending.len(),
                        expected
                    );
                    self.pending.clear();
                }
                return None;
            };

            self.absorb(line.as_ref(), expected);
            if self.pending.len() != expected {
                continue;
            }

            let header = self.header.as_ref()?;
            let fields = header
                .fields()
                .iter()
                .cloned()
                .zip(self.pending.drain(..))
                .collect();
            return Some(Record { fields });
        }
    }
}

/// Reassemble raw `mdb-sql` output lines into records.
///
/// # Example
///
/// ```
/// use active_mdb::stream::reassemble;
///
/// let lines = [
///     "banner",
///     "id::notes::done",
///     "1::first line",
///     "second line::yes",
///     "2::short::no",
/// ];
/// let records: Vec<_> = reassemble(lines, "::").collect();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].get("notes"), Some("first line second line"));
/// ```
pub fn reassemble<I>(lines: I, delimiter: &str) -> Records<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Records::new(lines.into_iter(), delimiter)
}

/// Split a whole delimited text blob into rows of fields in one shot.
///
/// CRLF pairs (memo line breaks) are flattened to a space first, so rows only
/// break on bare `\n`. Trailing empty lines are ignored. No header handling.
pub fn delimited_to_rows(text: &str, delimiter: &str) -> Vec<Vec<String>> {
    let text = text.replace("\r\n", " ");
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .map(|line| line.split(delimiter).map(str::to_string).collect())
        .collect()
}

/// Split one physical line on the delimiter, stripping line terminators.
fn split_line(line: &str, delimiter: &str) -> Vec<String> {
    line.split(delimiter)
        .map(|token| chomp(token).to_string())
        .collect()
}

/// Remove a single trailing `\r\n`, `\n` or `\r`.
fn chomp(token: &str) -> &str {
    token
        .strip_suffix("\r\n")
        .or_else(|| token.strip_suffix('\n'))
        .or_else(|| token.strip_suffix('\r'))
        .unwrap_or(token)
}
