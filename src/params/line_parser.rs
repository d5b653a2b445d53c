//! Line classification for parameter files
//!
//! Every line is exactly one of:
//!
//! - a comment: optional whitespace then `#` or `!`
//! - blank: whitespace only
//! - an assignment: `namespace::key = value` or `ActiveThorns = value`, where
//!   identifiers match in any case and the value is the rest of the line
//!
//! Anything else is a syntax error, and the first one aborts the whole file.

use crate::error::{ParError, Result};
use crate::params::store::ParameterStore;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[#!]").unwrap());

static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*$").unwrap());

static ASSIGNMENT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\w+::\w+|ActiveThorns)\s*=\s*(.*)$").unwrap());

/// The classification of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Blank,
    /// `key` is already lower-cased, `value` is the raw remainder of the line.
    Assignment { key: String, value: String },
}

/// Classify one line, or `None` when it matches no known form.
pub fn classify_line(line: &str) -> Option<LineKind> {
    if COMMENT_LINE.is_match(line) {
        return Some(LineKind::Comment);
    }
    if BLANK_LINE.is_match(line) {
        return Some(LineKind::Blank);
    }
    ASSIGNMENT_LINE.captures(line).map(|caps| LineKind::Assignment {
        key: caps[1].to_lowercase(),
        value: caps[2].to_string(),
    })
}

/// Parse a sequence of lines into a raw (not yet normalized) store.
pub fn parse_lines<'a, I>(lines: I) -> Result<ParameterStore>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut store = ParameterStore::new();

    for (index, line) in lines.into_iter().enumerate() {
        match classify_line(line) {
            Some(LineKind::Assignment { key, value }) => {
                trace!(line = index + 1, %key, "assignment");
                store.insert(&key, value);
            }
            Some(_) => {}
            None => {
                return Err(ParError::Syntax {
                    line_number: index + 1,
                    line: line.to_string(),
                })
            }
        }
    }

    debug!(entries = store.len(), "parsed parameter lines");
    Ok(store)
}

/// Parse a whole parameter file held in memory.
pub fn parse_source(source: &str) -> Result<ParameterStore> {
    parse_lines(source.lines())
}
