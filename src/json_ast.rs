//! Generic JSON syntax tree with source spans.
//!
//! `serde_json::Value` drops positions, and every diagnostic the normalizer
//! raises has to point back into the source text, so the document is read by a
//! small recursive-descent parser instead. Scalar decoding (string escapes,
//! number grammar) is still delegated to `serde_json`, except that numbers too
//! large for a double saturate instead of failing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Number;

/// Maximum nesting of arrays/objects, same limit `serde_json` applies.
const MAX_DEPTH: usize = 128;

static NUMBER_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").expect("number grammar is valid")
});

/// Well-formed numbers beyond the range of a double saturate to its largest
/// finite value; underflow already rounds to zero inside `serde_json`.
fn out_of_range(text: &str) -> Option<Number> {
    if !NUMBER_GRAMMAR.is_match(text) {
        return None;
    }
    let value = text.parse::<f64>().ok()?;
    let clamped = if value.is_infinite() { f64::MAX.copysign(value) } else { value };
    Number::from_f64(clamped)
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Byte range `start..end` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Properties in source order; duplicate keys are kept.
    Object(Vec<Property>),
    Array(Vec<Node>),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub key_span: Span,
    pub value: Node,
    /// From the opening quote of the key to the end of the value.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

// ————————————————————————————————————————————————————————————————————————————
// NODE HELPERS
// ————————————————————————————————————————————————————————————————————————————

impl Node {
    /// Human name of the JSON kind, used in type-mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Object(_) => "object",
            NodeKind::Array(_) => "array",
            NodeKind::Literal(Literal::String(_)) => "string",
            NodeKind::Literal(Literal::Number(_)) => "number",
            NodeKind::Literal(Literal::Bool(_)) => "boolean",
            NodeKind::Literal(Literal::Null) => "null",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match &self.kind {
            NodeKind::Literal(Literal::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.kind {
            NodeKind::Literal(Literal::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[Property]> {
        match &self.kind {
            NodeKind::Object(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Drop positions and produce the equivalent `serde_json::Value`.
    pub fn to_value(&self) -> serde_json::Value {
        use serde_json::Value;
        match &self.kind {
            NodeKind::Object(props) => {
                let mut map = serde_json::Map::new();
                for prop in props {
                    map.insert(prop.key.clone(), prop.value.to_value());
                }
                Value::Object(map)
            }
            NodeKind::Array(items) => Value::Array(items.iter().map(Node::to_value).collect()),
            NodeKind::Literal(Literal::String(s)) => Value::String(s.clone()),
            NodeKind::Literal(Literal::Number(n)) => Value::Number(n.clone()),
            NodeKind::Literal(Literal::Bool(b)) => Value::Bool(*b),
            NodeKind::Literal(Literal::Null) => Value::Null,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PARSER
// ————————————————————————————————————————————————————————————————————————————

pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut parser = Parser { src: source, bytes: source.as_bytes(), pos: 0, depth: 0 };
    parser.skip_ws();
    let root = parser.value()?;
    parser.skip_ws();
    if parser.pos < parser.bytes.len() {
        return Err(parser.error_here("unexpected trailing characters after JSON value"));
    }
    Ok(Document { root })
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn error_here(&self, message: &str) -> ParseError {
        let end = (self.pos + 1).min(self.bytes.len());
        ParseError { message: message.to_string(), span: Span::new(self.pos, end) }
    }

    fn expect(&mut self, byte: u8, what: &str) -> Result<(), ParseError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error_here(&format!("expected {what}")))
        }
    }

    fn value(&mut self) -> Result<Node, ParseError> {
        match self.peek() {
            Some(b'{') => self.nested(Self::object),
            Some(b'[') => self.nested(Self::array),
            Some(b'"') => {
                let (s, span) = self.string()?;
                Ok(Node { kind: NodeKind::Literal(Literal::String(s)), span })
            }
            Some(b't') => self.keyword("true", Literal::Bool(true)),
            Some(b'f') => self.keyword("false", Literal::Bool(false)),
            Some(b'n') => self.keyword("null", Literal::Null),
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(_) => Err(self.error_here("unexpected character")),
            None => Err(self.error_here("unexpected end of input")),
        }
    }

    fn nested(
        &mut self,
        inner: fn(&mut Self) -> Result<Node, ParseError>,
    ) -> Result<Node, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_here("recursion limit exceeded"));
        }
        self.depth += 1;
        let node = inner(self);
        self.depth -= 1;
        node
    }

    fn keyword(&mut self, word: &str, literal: Literal) -> Result<Node, ParseError> {
        let start = self.pos;
        if self.bytes[start..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            Ok(Node { kind: NodeKind::Literal(literal), span: Span::new(start, self.pos) })
        } else {
            Err(self.error_here(&format!("expected `{word}`")))
        }
    }

    fn number(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        while let Some(b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        let span = Span::new(start, self.pos);
        let text = &self.src[start..self.pos];
        let number = serde_json::from_str::<Number>(text)
            .ok()
            .or_else(|| out_of_range(text))
            .ok_or_else(|| ParseError { message: format!("invalid number `{text}`"), span })?;
        Ok(Node { kind: NodeKind::Literal(Literal::Number(number)), span })
    }

    /// Scan to the closing quote, then let `serde_json` decode the escapes.
    fn string(&mut self) -> Result<(String, Span), ParseError> {
        let start = self.pos;
        self.expect(b'"', "string")?;
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => self.pos += 2,
                Some(b) if b < 0x20 => {
                    return Err(self.error_here("control character in string"));
                }
                Some(_) => self.pos += 1,
                None => {
                    return Err(ParseError {
                        message: "unterminated string".to_string(),
                        span: Span::new(start, self.bytes.len()),
                    });
                }
            }
        }
        let span = Span::new(start, self.pos);
        let raw = &self.src[start..self.pos];
        let decoded = serde_json::from_str::<String>(raw).map_err(|error| ParseError {
            message: format!("invalid string: {error}"),
            span,
        })?;
        Ok((decoded, span))
    }

    fn array(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        self.expect(b'[', "`[`")?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Node { kind: NodeKind::Array(items), span: Span::new(start, self.pos) });
        }
        loop {
            self.skip_ws();
            items.push(self.value()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error_here("expected `,` or `]`")),
            }
        }
        Ok(Node { kind: NodeKind::Array(items), span: Span::new(start, self.pos) })
    }

    fn object(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        self.expect(b'{', "`{`")?;
        let mut props = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Node { kind: NodeKind::Object(props), span: Span::new(start, self.pos) });
        }
        loop {
            self.skip_ws();
            if self.peek() != Some(b'"') {
                return Err(self.error_here("expected property name"));
            }
            let (key, key_span) = self.string()?;
            self.skip_ws();
            self.expect(b':', "`:`")?;
            self.skip_ws();
            let value = self.value()?;
            let span = Span::new(key_span.start, value.span.end);
            props.push(Property { key, key_span, value, span });
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error_here("expected `,` or `}`")),
            }
        }
        Ok(Node { kind: NodeKind::Object(props), span: Span::new(start, self.pos) })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// POSITIONS
// ————————————————————————————————————————————————————————————————————————————

/// 1-based `(line, column)` of a byte offset; columns count chars.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut line_start = 0;
    for (i, b) in source.bytes().enumerate().take(offset) {
        if b == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    let column = source
        .get(line_start..offset)
        .map(|s| s.chars().count())
        .unwrap_or(offset - line_start)
        + 1;
    (line, column)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
