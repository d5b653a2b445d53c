//! Parameter files
//!
//! A parameter file is a flat list of `namespace::key = value` assignments plus
//! the `ActiveThorns` module list. This module turns its text into a
//! [`ParameterStore`]:
//!
//! 1. [`line_parser`] classifies every line (comment, blank, assignment) and
//!    rejects anything else.
//! 2. [`normalize`] rewrites all stored values once the whole file is read
//!    (quote removal, trimming, boolean words to `1`/`0`).
//! 3. [`accessor`] converts normalized values to typed values on demand.
//!
//! Keys are case-insensitive: they are lower-cased on insertion and on lookup.

pub mod accessor;
pub mod line_parser;
pub mod normalize;
pub mod store;

pub use accessor::FromParameter;
pub use line_parser::{classify_line, parse_lines, parse_source, LineKind};
pub use normalize::normalize_value;
pub use store::ParameterStore;
