//! The cursor traversal engine.
//!
//! A [`Parser`] walks one JSON document depth-first, pull-style: the driver
//! asks for the current [`NodeKind`], decodes the value if it wants it, and
//! advances with [`next`](Parser::next), [`start_object`](Parser::start_object)
//! / [`start_array`](Parser::start_array) and [`end`](Parser::end). Values the
//! driver never asks about are skipped over without decoding.
//!
//! Grammar violations set a *sticky* fault: the first one is recorded with its
//! location and every later query answers [`NodeKind::None`] at every depth,
//! so drain loops (`while parser.next() {}` then `parser.end()`) terminate
//! without per-call error checks. Misusing the API — calling an accessor
//! against the wrong node kind, or `end()` with no open container — is a bug
//! in the driver, not a data error, and panics.

use alloc::{string::String, vec::Vec};

use crate::{
    error::{ParseError, SyntaxError},
    reader::Reader,
};

/// Classification of the parser's current cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// No node: before the first query on an empty frame, after the enclosing
    /// container's last child, and permanently after a fault.
    None,
    /// The literal `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number.
    Number,
    /// A string.
    String,
    /// An object; enter it with [`Parser::start_object`].
    Object,
    /// An array; enter it with [`Parser::start_array`].
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Toplevel,
    Object,
    Array,
}

/// One open container: the byte offset of the value the cursor is on, and for
/// object frames the offset of the pending member name.
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: FrameKind,
    value: Option<usize>,
    member_name: Option<usize>,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Frame {
            kind,
            value: None,
            member_name: None,
        }
    }
}

/// A pull parser over one fully loaded JSON document.
///
/// The parser borrows the buffer for its whole lifetime and never copies it
/// wholesale; decoded scalars are the only transient allocations. An instance
/// drives exactly one traversal and is discarded afterwards.
///
/// # Examples
///
/// ```
/// use jsoncursor::{NodeKind, Parser};
///
/// let mut parser = Parser::new(r#"{"name":"4.14.0","commit":"abc"}"#);
/// parser.start_object();
/// assert_eq!(parser.member_name().as_deref(), Some("name"));
/// assert_eq!(parser.string(), "4.14.0");
/// assert!(parser.next());
/// assert!(!parser.next());
/// parser.end();
/// assert!(parser.error().is_none());
/// ```
#[derive(Debug)]
pub struct Parser<'doc> {
    reader: Reader<'doc>,
    frames: Vec<Frame>,
    error: Option<ParseError>,
}

impl<'doc> Parser<'doc> {
    /// Creates a parser over `data` and positions the cursor on the first
    /// value.
    ///
    /// An empty or all-whitespace buffer faults immediately, as does one whose
    /// first significant byte cannot start a JSON value.
    pub fn new<T: AsRef<[u8]> + ?Sized>(data: &'doc T) -> Self {
        let mut parser = Parser {
            reader: Reader::new(data.as_ref()),
            frames: alloc::vec![Frame::new(FrameKind::Toplevel)],
            error: None,
        };
        parser.reader.skip_whitespace();
        if parser.reader.is_eof() {
            parser.set_error(SyntaxError::EmptyDocument);
        } else {
            parser.top_mut().value = Some(parser.reader.offset());
            if parser.node() == NodeKind::None {
                parser.set_error(SyntaxError::UnexpectedCharacter);
            }
        }
        parser
    }

    fn top(&self) -> &Frame {
        match self.frames.last() {
            Some(frame) => frame,
            // the stack always holds at least the top-level frame
            None => unreachable!(),
        }
    }

    fn top_mut(&mut self) -> &mut Frame {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => unreachable!(),
        }
    }

    fn set_error(&mut self, kind: SyntaxError) {
        if self.error.is_none() {
            let (line, column) = self.reader.location();
            self.error = Some(ParseError::new(kind, self.reader.offset(), line, column));
        }
    }

    fn check(&mut self, result: Result<(), SyntaxError>) -> bool {
        match result {
            Ok(()) => true,
            Err(kind) => {
                self.set_error(kind);
                false
            }
        }
    }

    fn classify(byte: u8) -> NodeKind {
        match byte {
            b'"' => NodeKind::String,
            b'{' => NodeKind::Object,
            b'[' => NodeKind::Array,
            b'-' | b'0'..=b'9' => NodeKind::Number,
            b't' | b'f' => NodeKind::Boolean,
            b'n' => NodeKind::Null,
            _ => NodeKind::None,
        }
    }

    /// The kind of node the cursor is on, without consuming input.
    ///
    /// [`NodeKind::None`] before the first child of an empty container, after
    /// the last child of the enclosing container, and permanently after a
    /// fault.
    #[must_use]
    pub fn node(&self) -> NodeKind {
        if self.error.is_some() {
            return NodeKind::None;
        }
        match self.top().value.and_then(|offset| self.reader.byte_at(offset)) {
            Some(byte) => Self::classify(byte),
            None => NodeKind::None,
        }
    }

    /// The sticky fault, if one has been recorded.
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Whether the read head has already moved past the start of the current
    /// value.
    fn has_skipped_value(&self) -> bool {
        match self.top().value {
            Some(offset) => self.reader.offset() != offset,
            None => true,
        }
    }

    /// Moves the read head past the current value, validating it, without
    /// decoding. Containers are skipped wholesale. Returns `false` on fault.
    fn skip_value(&mut self) -> bool {
        if self.has_skipped_value() {
            return true;
        }
        match self.reader.peek() {
            None => {
                self.set_error(SyntaxError::UnexpectedEnd);
                false
            }
            Some(b'"') => {
                let scanned = self.reader.skip_string();
                self.check(scanned)
            }
            Some(b'-' | b'0'..=b'9') => {
                let scanned = self.reader.skip_number();
                self.check(scanned)
            }
            Some(b't') => self.skip_literal(b"true"),
            Some(b'f') => self.skip_literal(b"false"),
            Some(b'n') => self.skip_literal(b"null"),
            Some(b'{') => {
                self.open(FrameKind::Object);
                self.end();
                self.error.is_none()
            }
            Some(b'[') => {
                self.open(FrameKind::Array);
                self.end();
                self.error.is_none()
            }
            Some(_) => {
                self.set_error(SyntaxError::UnexpectedCharacter);
                false
            }
        }
    }

    fn skip_literal(&mut self, ident: &'static [u8]) -> bool {
        if self.reader.try_identifier(ident) {
            true
        } else {
            self.set_error(SyntaxError::UnexpectedCharacter);
            false
        }
    }

    /// Records the member name offset, validates the name string and the `:`
    /// after it, and leaves the read head on the value.
    fn read_member_name(&mut self) -> bool {
        self.top_mut().member_name = Some(self.reader.offset());
        let scanned = self.reader.skip_string();
        if !self.check(scanned) {
            return false;
        }
        self.reader.skip_whitespace();
        if !self.reader.try_byte(b':') {
            self.set_error(SyntaxError::MissingColon);
            return false;
        }
        self.reader.skip_whitespace();
        true
    }

    /// Marks the read head position as the current value and faults if no
    /// value can start there.
    fn begin_value(&mut self) {
        let offset = self.reader.offset();
        self.top_mut().value = Some(offset);
        let starts_value = self
            .reader
            .byte_at(offset)
            .is_some_and(|byte| Self::classify(byte) != NodeKind::None);
        if !starts_value {
            self.set_error(SyntaxError::MissingValue);
        }
    }

    /// Consumes the opening bracket, pushes a frame, and positions the cursor
    /// on the first child (or leaves it on [`NodeKind::None`] for an empty
    /// container). Callers have already checked the bracket byte.
    fn open(&mut self, kind: FrameKind) {
        let bracket = if kind == FrameKind::Object { b'{' } else { b'[' };
        let opened = self.reader.try_byte(bracket);
        debug_assert!(opened);
        self.frames.push(Frame::new(kind));
        self.reader.skip_whitespace();
        if self.reader.is_eof() {
            self.set_error(SyntaxError::UnexpectedEnd);
            return;
        }
        match kind {
            FrameKind::Object => {
                if self.reader.has_byte(b'}') {
                    return;
                }
                if self.read_member_name() {
                    self.begin_value();
                }
            }
            FrameKind::Array => {
                if self.reader.has_byte(b']') {
                    return;
                }
                self.begin_value();
            }
            FrameKind::Toplevel => unreachable!(),
        }
    }

    /// Enters the object the cursor is on.
    ///
    /// # Panics
    ///
    /// Panics if [`node`](Self::node) is not [`NodeKind::Object`].
    pub fn start_object(&mut self) {
        match self.node() {
            NodeKind::Object => self.open(FrameKind::Object),
            kind => panic!("start_object() called on {kind:?} node"),
        }
    }

    /// Enters the array the cursor is on.
    ///
    /// # Panics
    ///
    /// Panics if [`node`](Self::node) is not [`NodeKind::Array`].
    pub fn start_array(&mut self) {
        match self.node() {
            NodeKind::Array => self.open(FrameKind::Array),
            kind => panic!("start_array() called on {kind:?} node"),
        }
    }

    /// Advances to the next sibling within the current frame, skipping the
    /// current value if it was never consumed.
    ///
    /// Returns `true` when positioned on a value. Returns `false` at the
    /// enclosing closing bracket, at the end of the document, and after any
    /// fault; the bracket itself is consumed by [`end`](Self::end).
    pub fn next(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        if !self.skip_value() {
            return false;
        }
        match self.top().kind {
            FrameKind::Toplevel => {
                self.reader.skip_whitespace();
                self.top_mut().value = None;
                if !self.reader.is_eof() {
                    self.set_error(SyntaxError::TrailingData);
                }
                false
            }
            FrameKind::Object => {
                self.reader.skip_whitespace();
                if self.reader.is_eof() {
                    let top = self.top_mut();
                    top.member_name = None;
                    top.value = None;
                    self.set_error(SyntaxError::UnexpectedEnd);
                    return false;
                }
                if self.reader.has_byte(b'}') {
                    let top = self.top_mut();
                    top.member_name = None;
                    top.value = None;
                    return false;
                }
                if !self.reader.try_byte(b',') {
                    self.set_error(SyntaxError::ExpectedObjectComma);
                    return false;
                }
                self.reader.skip_whitespace();
                if !self.read_member_name() {
                    return false;
                }
                self.begin_value();
                self.error.is_none()
            }
            FrameKind::Array => {
                self.reader.skip_whitespace();
                if self.reader.is_eof() {
                    self.top_mut().value = None;
                    self.set_error(SyntaxError::UnexpectedEnd);
                    return false;
                }
                if self.reader.has_byte(b']') {
                    self.top_mut().value = None;
                    return false;
                }
                if !self.reader.try_byte(b',') {
                    self.set_error(SyntaxError::ExpectedArrayComma);
                    return false;
                }
                self.reader.skip_whitespace();
                self.begin_value();
                self.error.is_none()
            }
        }
    }

    /// Leaves the current container, consuming its closing bracket.
    ///
    /// Any children not yet consumed are skipped first, so a schema-driven
    /// caller can stop reading an object early and resynchronize with the
    /// outer sibling stream. Under a sticky fault one frame is still popped
    /// per call, letting drain loops unwind.
    ///
    /// # Panics
    ///
    /// Panics if no `start_object()`/`start_array()` frame is open.
    pub fn end(&mut self) {
        let bracket = match self.top().kind {
            FrameKind::Object => b'}',
            FrameKind::Array => b']',
            FrameKind::Toplevel => {
                panic!("end() called without a matching start_object() or start_array()")
            }
        };
        if self.error.is_none() {
            loop {
                if self.reader.try_byte(bracket) {
                    break;
                }
                if !self.next() && self.error.is_some() {
                    break;
                }
            }
        }
        self.frames.pop();
    }

    /// Resolves the pending member name against a dispatch table of
    /// `(name, tag)` pairs, comparing without allocating.
    ///
    /// Returns the tag of the first matching entry, or `None` when the name
    /// matches no entry or the cursor is not on an object member. A
    /// non-matching member is *not* skipped; advance past its value with the
    /// normal traversal calls, which is what makes unknown keys harmless.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsoncursor::Parser;
    ///
    /// #[derive(Clone, Copy, PartialEq, Debug)]
    /// enum Field {
    ///     Name,
    ///     Commit,
    /// }
    /// const TABLE: &[(&str, Field)] = &[("name", Field::Name), ("commit", Field::Commit)];
    ///
    /// let mut parser = Parser::new(r#"{"commit":"abc"}"#);
    /// parser.start_object();
    /// assert_eq!(parser.select_member(TABLE), Some(Field::Commit));
    /// ```
    #[must_use]
    pub fn select_member<T: Copy>(&self, table: &[(&str, T)]) -> Option<T> {
        if self.error.is_some() {
            return None;
        }
        let frame = self.top();
        if frame.kind != FrameKind::Object {
            return None;
        }
        let name = frame.member_name?;
        table
            .iter()
            .find(|(candidate, _)| self.reader.string_matches(name, candidate))
            .map(|&(_, tag)| tag)
    }

    /// Decodes the pending member name.
    ///
    /// `None` outside object frames, on an empty object, and after a fault,
    /// so parse-and-reprint drivers can call this unconditionally.
    #[must_use]
    pub fn member_name(&self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        let frame = self.top();
        if frame.kind != FrameKind::Object {
            return None;
        }
        self.reader.decode_string_at(frame.member_name?)
    }

    fn expect_node(&self, expected: NodeKind, accessor: &str) -> usize {
        let kind = self.node();
        assert!(kind == expected, "{accessor} called on {kind:?} node");
        match self.top().value {
            Some(offset) => offset,
            // node() only matched because a value offset is recorded
            None => unreachable!(),
        }
    }

    /// Decodes the boolean the cursor is on.
    ///
    /// # Panics
    ///
    /// Panics if [`node`](Self::node) is not [`NodeKind::Boolean`].
    #[must_use]
    pub fn boolean(&mut self) -> bool {
        let offset = self.expect_node(NodeKind::Boolean, "boolean()");
        if !self.skip_value() {
            return false;
        }
        self.reader.byte_at(offset) == Some(b't')
    }

    /// Decodes the number the cursor is on via the standard textual
    /// conversion to `f64`.
    ///
    /// A value overflowing to infinity sets the sticky fault and yields `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if [`node`](Self::node) is not [`NodeKind::Number`].
    #[must_use]
    pub fn number(&mut self) -> f64 {
        let start = self.expect_node(NodeKind::Number, "number()");
        if !self.skip_value() {
            return 0.0;
        }
        let end = self.reader.offset();
        let Ok(text) = core::str::from_utf8(self.reader.bytes(start, end)) else {
            // number spans are pure ASCII
            unreachable!()
        };
        let Ok(value) = text.parse::<f64>() else {
            // the span was just validated against the number grammar
            unreachable!()
        };
        if value.is_finite() {
            value
        } else {
            self.set_error(SyntaxError::NumberOutOfRange);
            0.0
        }
    }

    /// Decodes the string the cursor is on, resolving escapes.
    ///
    /// A malformed literal sets the sticky fault and yields an empty string.
    ///
    /// # Panics
    ///
    /// Panics if [`node`](Self::node) is not [`NodeKind::String`].
    #[must_use]
    pub fn string(&mut self) -> String {
        let start = self.expect_node(NodeKind::String, "string()");
        if self.has_skipped_value() {
            // already validated on the first pass; re-decode from the offset
            return self.reader.decode_string_at(start).unwrap_or_default();
        }
        match self.reader.decode_string() {
            Ok(value) => value,
            Err(kind) => {
                self.set_error(kind);
                String::new()
            }
        }
    }
}
