//! Validation-Expression tree: the target-agnostic combinator algebra.
//!
//! A pure owned tree; no node is shared between two parents. Built top-down by
//! [`crate::translate`], rewritten only by [`crate::optimize`].

use indexmap::IndexMap;
use serde_json::{Number, Value};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub defines: Vec<Define>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    pub name: String,
    pub body: Call,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: Func,
    pub args: Vec<Arg>,
}

/// Call argument slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Call(Call),
    Constant(Constant),
    Record(Record),
    Array(ArrayExpr),
}

/// Record value / array element slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Call(Call),
    Constant(Constant),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub entries: IndexMap<String, Item>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayExpr {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Undefined,
    Null,
    /// No translation rule builds this yet; the emitter still renders it.
    Bool(bool),
    Number(Number),
    /// No translation rule builds this yet; the emitter still renders it.
    String(String),
    /// Regular-expression source text.
    Regex(String),
    /// Structured data passed through verbatim.
    Json(Value),
}

/// Functions of the target runtime the compiler emits calls against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    // generic combinators
    Unknown,
    Never,
    Intersection,
    Union,
    Optional,
    Type,
    Object,
    String,
    Size,
    Pattern,
    Number,
    Integer,
    Max,
    Min,
    Array,
    Boolean,
    Literal,

    // standard helpers
    Keys,
    DependentProperties,
    MinProperties,
    MaxProperties,
    PatternObject,
    PatternType,
    OneOf,
    Not,
    Unique,
    MultipleOf,
}

/// Module a call resolves against in the emitted source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Generic combinator library (`ss`).
    Combinator,
    /// Standard keyword helpers (`std`).
    Standard,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Func {
    /// The helper set shipped by the standard module. Changing it requires a
    /// matching change in the runtime library.
    pub const STANDARD_HELPERS: [Func; 10] = [
        Func::Keys,
        Func::DependentProperties,
        Func::MinProperties,
        Func::MaxProperties,
        Func::PatternObject,
        Func::PatternType,
        Func::OneOf,
        Func::Not,
        Func::Unique,
        Func::MultipleOf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Func::Unknown => "unknown",
            Func::Never => "never",
            Func::Intersection => "intersection",
            Func::Union => "union",
            Func::Optional => "optional",
            Func::Type => "type",
            Func::Object => "object",
            Func::String => "string",
            Func::Size => "size",
            Func::Pattern => "pattern",
            Func::Number => "number",
            Func::Integer => "integer",
            Func::Max => "max",
            Func::Min => "min",
            Func::Array => "array",
            Func::Boolean => "boolean",
            Func::Literal => "literal",
            Func::Keys => "keys",
            Func::DependentProperties => "dependentProperties",
            Func::MinProperties => "minProperties",
            Func::MaxProperties => "maxProperties",
            Func::PatternObject => "patternObject",
            Func::PatternType => "patternType",
            Func::OneOf => "oneOf",
            Func::Not => "not",
            Func::Unique => "unique",
            Func::MultipleOf => "multipleOf",
        }
    }

    pub fn namespace(self) -> Namespace {
        if Self::STANDARD_HELPERS.contains(&self) {
            Namespace::Standard
        } else {
            Namespace::Combinator
        }
    }

    /// `union` / `intersection`: variadic over an array of arms.
    pub fn is_set_combinator(self) -> bool {
        matches!(self, Func::Union | Func::Intersection)
    }
}

impl Call {
    pub fn new(func: Func, args: Vec<Arg>) -> Self {
        Self { func, args }
    }

    /// The single element of a one-armed `union`/`intersection`.
    pub fn single_arm(&self) -> Option<&Item> {
        if !self.func.is_set_combinator() {
            return None;
        }
        match self.args.as_slice() {
            [Arg::Array(arr)] if arr.items.len() == 1 => arr.items.first(),
            _ => None,
        }
    }

    /// Number of nodes in the tree rooted here, constants included.
    pub fn size(&self) -> usize {
        1 + self.args.iter().map(Arg::size).sum::<usize>()
    }
}

impl Arg {
    fn size(&self) -> usize {
        match self {
            Arg::Call(call) => call.size(),
            Arg::Constant(_) => 1,
            Arg::Record(record) => 1 + record.entries.values().map(Item::size).sum::<usize>(),
            Arg::Array(arr) => 1 + arr.items.iter().map(Item::size).sum::<usize>(),
        }
    }
}

impl Item {
    fn size(&self) -> usize {
        match self {
            Item::Call(call) => call.size(),
            Item::Constant(_) => 1,
        }
    }
}

impl From<Call> for Arg {
    fn from(call: Call) -> Self {
        Arg::Call(call)
    }
}

impl From<Constant> for Arg {
    fn from(constant: Constant) -> Self {
        Arg::Constant(constant)
    }
}

impl From<Record> for Arg {
    fn from(record: Record) -> Self {
        Arg::Record(record)
    }
}

impl From<ArrayExpr> for Arg {
    fn from(arr: ArrayExpr) -> Self {
        Arg::Array(arr)
    }
}

impl From<Item> for Arg {
    fn from(item: Item) -> Self {
        match item {
            Item::Call(call) => Arg::Call(call),
            Item::Constant(constant) => Arg::Constant(constant),
        }
    }
}

impl From<Call> for Item {
    fn from(call: Call) -> Self {
        Item::Call(call)
    }
}

impl From<Constant> for Item {
    fn from(constant: Constant) -> Self {
        Item::Constant(constant)
    }
}

impl From<Number> for Constant {
    fn from(n: Number) -> Self {
        Constant::Number(n)
    }
}

impl From<u64> for Constant {
    fn from(n: u64) -> Self {
        Constant::Number(n.into())
    }
}

impl<T: Into<Constant>> From<Option<T>> for Constant {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Constant::Undefined)
    }
}

impl<K: Into<String>, V: Into<Item>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// BUILDERS
// ————————————————————————————————————————————————————————————————————————————

/// `func(args...)`
pub fn call(func: Func, args: impl IntoIterator<Item = Arg>) -> Call {
    Call::new(func, args.into_iter().collect())
}

pub fn unknown() -> Call {
    call(Func::Unknown, [])
}

pub fn never() -> Call {
    call(Func::Never, [])
}

pub fn union(arms: impl IntoIterator<Item = Call>) -> Call {
    call(Func::Union, [array(arms).into()])
}

pub fn intersection(arms: impl IntoIterator<Item = Call>) -> Call {
    call(Func::Intersection, [array(arms).into()])
}

pub fn not(inner: Call) -> Call {
    call(Func::Not, [inner.into()])
}

pub fn array<T: Into<Item>>(items: impl IntoIterator<Item = T>) -> ArrayExpr {
    ArrayExpr { items: items.into_iter().map(Into::into).collect() }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
