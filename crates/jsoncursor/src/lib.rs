//! A cursor-driven pull parser and streaming printer for JSON.
//!
//! The parser walks one fully loaded, immutable buffer depth-first without
//! building a document tree: the caller queries the [`NodeKind`] under the
//! cursor, decodes the scalars it cares about, and advances. The printer is
//! the inverse, serializing announced values straight to an append-only sink.
//! Memory use is the frame stack (one entry per nesting level) plus transient
//! allocations for decoded scalars.
//!
//! Schema-aware readers dispatch on member names with
//! [`Parser::select_member`], which compares names without allocating and
//! tolerates unknown keys — unmatched members are simply skipped by the
//! normal traversal calls:
//!
//! ```
//! use jsoncursor::Parser;
//!
//! #[derive(Clone, Copy)]
//! enum Field {
//!     Name,
//!     Commit,
//! }
//! const TABLE: &[(&str, Field)] = &[("name", Field::Name), ("commit", Field::Commit)];
//!
//! let doc = r#"[{"name":"4.14.0","commit":"abc"},{"name":"4.12.0"}]"#;
//! let mut parser = Parser::new(doc);
//! let mut names = Vec::new();
//!
//! parser.start_array();
//! loop {
//!     parser.start_object();
//!     loop {
//!         if let Some(Field::Name) = parser.select_member(TABLE) {
//!             names.push(parser.string());
//!         }
//!         if !parser.next() {
//!             break;
//!         }
//!     }
//!     parser.end();
//!     if !parser.next() {
//!         break;
//!     }
//! }
//! parser.end();
//!
//! assert!(parser.error().is_none());
//! assert_eq!(names, ["4.14.0", "4.12.0"]);
//! ```
//!
//! Malformed input never needs special-casing in the traversal: the first
//! grammar violation is recorded (see [`Parser::error`]) and every later
//! query answers [`NodeKind::None`] at every depth, so the loops above fall
//! through cleanly no matter where the document breaks off.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod parser;
mod printer;
mod reader;

#[cfg(test)]
mod tests;

pub use error::{ParseError, SyntaxError};
pub use parser::{NodeKind, Parser};
pub use printer::{Printer, PrinterOptions};
