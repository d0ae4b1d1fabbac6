//! The streaming serializer.
//!
//! A [`Printer`] mirrors the JSON grammar in reverse: the driver announces
//! scalars and container boundaries and the printer appends finished text to a
//! caller-supplied sink, one chunk at a time. Nothing is buffered beyond the
//! frame stack, so the full document never exists in memory on this side
//! either.
//!
//! The member-name contract is positional: a name must be given exactly when
//! the enclosing frame is an object. Violations are driver bugs and panic.

use alloc::{format, vec::Vec};

/// Output configuration for a [`Printer`].
///
/// # Examples
///
/// ```
/// use jsoncursor::PrinterOptions;
///
/// let options = PrinterOptions {
///     pretty: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PrinterOptions {
    /// Whether to emit one child per line with indentation and a space after
    /// each colon. When `false`, no incidental whitespace is produced. Both
    /// forms decode to identical values.
    ///
    /// # Default
    ///
    /// `false`
    pub pretty: bool,

    /// Whether to escape all non-ASCII text as `\uXXXX` (surrogate pairs
    /// beyond the BMP). When `false`, non-ASCII text passes through as UTF-8.
    ///
    /// # Default
    ///
    /// `false`
    pub ascii: bool,

    /// Spaces of indentation per nesting level in pretty mode.
    ///
    /// # Default
    ///
    /// `2`
    pub indentation: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        PrinterOptions {
            pretty: false,
            ascii: false,
            indentation: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    container: Container,
    has_child: bool,
}

const SPACES: &str = "                                ";

/// A streaming JSON printer over an append-only sink.
///
/// The sink is any `FnMut(&str)`; the printer stops calling it once
/// [`end`](Self::end) returns the depth to 0. An instance emits exactly one
/// document and is discarded afterwards.
///
/// # Examples
///
/// ```
/// use jsoncursor::Printer;
///
/// let mut out = String::new();
/// let mut printer = Printer::new(|chunk| out.push_str(chunk));
/// printer.start_object(None);
/// printer.add_number(Some("a"), 1.0);
/// printer.end();
/// drop(printer);
/// assert_eq!(out, r#"{"a":1}"#);
/// ```
pub struct Printer<F: FnMut(&str)> {
    write: F,
    options: PrinterOptions,
    frames: Vec<Frame>,
}

impl<F: FnMut(&str)> Printer<F> {
    /// Creates a compact-mode printer over `write`.
    pub fn new(write: F) -> Self {
        Self::with_options(write, PrinterOptions::default())
    }

    /// Creates a printer with explicit [`PrinterOptions`].
    pub fn with_options(write: F, options: PrinterOptions) -> Self {
        Printer {
            write,
            options,
            frames: Vec::new(),
        }
    }

    /// Current nesting depth; 0 once the top-level value is closed, which is
    /// how a parse-and-reprint driver detects completion.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn raw(&mut self, text: &str) {
        (self.write)(text);
    }

    fn indent(&mut self) {
        let mut want = self.frames.len() * self.options.indentation;
        while want > 0 {
            let chunk = want.min(SPACES.len());
            self.raw(&SPACES[..chunk]);
            want -= chunk;
        }
    }

    /// Comma/newline/indent/name prefix shared by every value, and the point
    /// where the name contract is enforced.
    fn begin_value(&mut self, name: Option<&str>) {
        match self.frames.last() {
            Some(frame) if frame.container == Container::Object => {
                assert!(name.is_some(), "a member name is required inside an object");
            }
            _ => {
                assert!(
                    name.is_none(),
                    "a member name is only allowed inside an object"
                );
            }
        }
        let has_child = match self.frames.last_mut() {
            Some(frame) => core::mem::replace(&mut frame.has_child, true),
            None => false,
        };
        if has_child {
            self.raw(",");
        }
        if self.options.pretty && !self.frames.is_empty() {
            self.raw("\n");
            self.indent();
        }
        if let Some(name) = name {
            self.write_string(name);
            self.raw(if self.options.pretty { ": " } else { ":" });
        }
    }

    /// Opens an object as the next child.
    ///
    /// # Panics
    ///
    /// Panics if the name contract is violated.
    pub fn start_object(&mut self, name: Option<&str>) {
        self.begin_value(name);
        self.raw("{");
        self.frames.push(Frame {
            container: Container::Object,
            has_child: false,
        });
    }

    /// Opens an array as the next child.
    ///
    /// # Panics
    ///
    /// Panics if the name contract is violated.
    pub fn start_array(&mut self, name: Option<&str>) {
        self.begin_value(name);
        self.raw("[");
        self.frames.push(Frame {
            container: Container::Array,
            has_child: false,
        });
    }

    /// Closes the innermost open container.
    ///
    /// # Panics
    ///
    /// Panics if no container is open.
    pub fn end(&mut self) {
        let Some(frame) = self.frames.pop() else {
            panic!("end() called without a matching start_object() or start_array()")
        };
        if self.options.pretty && frame.has_child {
            self.raw("\n");
            self.indent();
        }
        self.raw(match frame.container {
            Container::Object => "}",
            Container::Array => "]",
        });
    }

    /// Writes `null` as the next child.
    ///
    /// # Panics
    ///
    /// Panics if the name contract is violated.
    pub fn add_null(&mut self, name: Option<&str>) {
        self.begin_value(name);
        self.raw("null");
    }

    /// Writes a boolean as the next child.
    ///
    /// # Panics
    ///
    /// Panics if the name contract is violated.
    pub fn add_boolean(&mut self, name: Option<&str>, value: bool) {
        self.begin_value(name);
        self.raw(if value { "true" } else { "false" });
    }

    /// Writes a number as the next child, in the shortest text form that
    /// parses back to the same `f64`.
    ///
    /// # Panics
    ///
    /// Panics if the name contract is violated or `value` is not finite —
    /// JSON has no representation for `NaN` or infinities.
    pub fn add_number(&mut self, name: Option<&str>, value: f64) {
        assert!(value.is_finite(), "JSON cannot represent {value}");
        self.begin_value(name);
        let text = format!("{value}");
        self.raw(&text);
    }

    /// Writes a string as the next child, escaping as needed.
    ///
    /// # Panics
    ///
    /// Panics if the name contract is violated.
    pub fn add_string(&mut self, name: Option<&str>, value: &str) {
        self.begin_value(name);
        self.write_string(value);
    }

    /// Quotes and escapes `value`; the escape table is the parser's decode
    /// table in reverse. Unescaped spans are forwarded as single chunks.
    fn write_string(&mut self, value: &str) {
        self.raw("\"");
        let mut start = 0;
        for (index, ch) in value.char_indices() {
            let escaped: Option<&str> = match ch {
                '"' => Some("\\\""),
                '\\' => Some("\\\\"),
                '\u{8}' => Some("\\b"),
                '\u{c}' => Some("\\f"),
                '\n' => Some("\\n"),
                '\r' => Some("\\r"),
                '\t' => Some("\\t"),
                _ if (ch as u32) < 0x20 || (self.options.ascii && !ch.is_ascii()) => None,
                _ => continue,
            };
            if start < index {
                let chunk = &value[start..index];
                self.raw(chunk);
            }
            match escaped {
                Some(text) => self.raw(text),
                None => self.write_unicode_escape(ch),
            }
            start = index + ch.len_utf8();
        }
        if start < value.len() {
            let tail = &value[start..];
            self.raw(tail);
        }
        self.raw("\"");
    }

    fn write_unicode_escape(&mut self, ch: char) {
        let mut units = [0u16; 2];
        for &unit in ch.encode_utf16(&mut units).iter() {
            let text = format!("\\u{unit:04x}");
            self.raw(&text);
        }
    }
}
