//! Schema IR: one typed node per JSON Schema keyword.
//!
//! Built once by [`crate::normalize`] and never mutated. Nested schemas are
//! owned by the keyword that contains them.

use serde_json::Number;

use crate::json_ast::{Node, Span};

// ————————————————————————————————————————————————————————————————————————————
// SCHEMA
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub keywords: Vec<KeywordNode>,
    /// Keyword occurrences kept out of `keywords` (reported, not rejected).
    pub unsupported: Vec<UnsupportedKeyword>,
    /// `None` for schemas synthesized by the translator.
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordNode {
    pub keyword: Keyword,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedKeyword {
    pub name: String,
    pub value: Node,
    pub span: Span,
    pub reason: UnsupportedReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// Not a JSON Schema keyword this compiler knows.
    Unknown,
    /// Recognized (`$schema`, `$vocabulary`) but not acted upon yet.
    NotYetSupported,
}

/// A keyed sub-schema: `properties`, `patternProperties`, `$defs`,
/// `dependentSchemas` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub key: String,
    pub schema: Schema,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DependentRequiredItem {
    pub key: String,
    pub required: Vec<String>,
    pub span: Span,
}

// ————————————————————————————————————————————————————————————————————————————
// KEYWORDS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub enum Keyword {
    // core
    Id(String),
    Anchor(String),
    DynamicAnchor(String),
    Ref(String),
    DynamicRef(String),
    Comment(String),
    Defs(Vec<SchemaEntry>),

    // applicators
    Not(Box<Schema>),
    If(Box<Schema>),
    Then(Box<Schema>),
    Else(Box<Schema>),
    AllOf(Vec<Schema>),
    AnyOf(Vec<Schema>),
    OneOf(Vec<Schema>),
    DependentSchemas(Vec<SchemaEntry>),
    PrefixItems(Vec<Schema>),
    Items(Box<Schema>),
    Contains(Box<Schema>),
    Properties(Vec<SchemaEntry>),
    PatternProperties(Vec<SchemaEntry>),
    AdditionalProperties(Box<Schema>),
    PropertyNames(Box<Schema>),
    UnevaluatedItems(Box<Schema>),
    UnevaluatedProperties(Box<Schema>),

    // validation
    Type(Vec<PrimitiveType>),
    /// Raw values; data, not schema.
    Enum(Vec<Node>),
    Const(Node),
    MultipleOf(Number),
    Maximum(Number),
    ExclusiveMaximum(Number),
    Minimum(Number),
    ExclusiveMinimum(Number),
    MaxLength(u64),
    MinLength(u64),
    Pattern(String),
    MaxItems(u64),
    MinItems(u64),
    UniqueItems(bool),
    MaxContains(u64),
    MinContains(u64),
    MaxProperties(u64),
    MinProperties(u64),
    Required(Vec<String>),
    DependentRequired(Vec<DependentRequiredItem>),

    // meta-data
    Title(String),
    Description(String),
    Default(Node),
    Deprecated(bool),
}

/// Every keyword name the normalizer recognizes.
///
/// `Schema` and `Vocabulary` have no [`Keyword`] variant: they are recognized
/// but land in [`Schema::unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordKind {
    Schema,
    Vocabulary,
    Id,
    Anchor,
    DynamicAnchor,
    Ref,
    DynamicRef,
    Comment,
    Defs,
    Not,
    If,
    Then,
    Else,
    AllOf,
    AnyOf,
    OneOf,
    DependentSchemas,
    PrefixItems,
    Items,
    Contains,
    Properties,
    PatternProperties,
    AdditionalProperties,
    PropertyNames,
    UnevaluatedItems,
    UnevaluatedProperties,
    Type,
    Enum,
    Const,
    MultipleOf,
    Maximum,
    ExclusiveMaximum,
    Minimum,
    ExclusiveMinimum,
    MaxLength,
    MinLength,
    Pattern,
    MaxItems,
    MinItems,
    UniqueItems,
    MaxContains,
    MinContains,
    MaxProperties,
    MinProperties,
    Required,
    DependentRequired,
    Title,
    Description,
    Default,
    Deprecated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// Identification, referencing and sub-schema plumbing.
    Core,
    /// Constrains the instance.
    Validation,
    /// Annotation only.
    Meta,
}

impl KeywordKind {
    pub const ALL: [KeywordKind; 50] = [
        Self::Schema, Self::Vocabulary, Self::Id, Self::Anchor, Self::DynamicAnchor,
        Self::Ref, Self::DynamicRef, Self::Comment, Self::Defs, Self::Not, Self::If,
        Self::Then, Self::Else, Self::AllOf, Self::AnyOf, Self::OneOf,
        Self::DependentSchemas, Self::PrefixItems, Self::Items, Self::Contains,
        Self::Properties, Self::PatternProperties, Self::AdditionalProperties,
        Self::PropertyNames, Self::UnevaluatedItems, Self::UnevaluatedProperties,
        Self::Type, Self::Enum, Self::Const, Self::MultipleOf, Self::Maximum,
        Self::ExclusiveMaximum, Self::Minimum, Self::ExclusiveMinimum, Self::MaxLength,
        Self::MinLength, Self::Pattern, Self::MaxItems, Self::MinItems, Self::UniqueItems,
        Self::MaxContains, Self::MinContains, Self::MaxProperties, Self::MinProperties,
        Self::Required, Self::DependentRequired, Self::Title, Self::Description,
        Self::Default, Self::Deprecated,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Schema => "$schema",
            Self::Vocabulary => "$vocabulary",
            Self::Id => "$id",
            Self::Anchor => "$anchor",
            Self::DynamicAnchor => "$dynamicAnchor",
            Self::Ref => "$ref",
            Self::DynamicRef => "$dynamicRef",
            Self::Comment => "$comment",
            Self::Defs => "$defs",
            Self::Not => "not",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
            Self::DependentSchemas => "dependentSchemas",
            Self::PrefixItems => "prefixItems",
            Self::Items => "items",
            Self::Contains => "contains",
            Self::Properties => "properties",
            Self::PatternProperties => "patternProperties",
            Self::AdditionalProperties => "additionalProperties",
            Self::PropertyNames => "propertyNames",
            Self::UnevaluatedItems => "unevaluatedItems",
            Self::UnevaluatedProperties => "unevaluatedProperties",
            Self::Type => "type",
            Self::Enum => "enum",
            Self::Const => "const",
            Self::MultipleOf => "multipleOf",
            Self::Maximum => "maximum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
            Self::Minimum => "minimum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::MaxLength => "maxLength",
            Self::MinLength => "minLength",
            Self::Pattern => "pattern",
            Self::MaxItems => "maxItems",
            Self::MinItems => "minItems",
            Self::UniqueItems => "uniqueItems",
            Self::MaxContains => "maxContains",
            Self::MinContains => "minContains",
            Self::MaxProperties => "maxProperties",
            Self::MinProperties => "minProperties",
            Self::Required => "required",
            Self::DependentRequired => "dependentRequired",
            Self::Title => "title",
            Self::Description => "description",
            Self::Default => "default",
            Self::Deprecated => "deprecated",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn class(self) -> KeywordClass {
        use KeywordClass::*;
        match self {
            Self::Schema | Self::Vocabulary | Self::Id | Self::Anchor | Self::DynamicAnchor
            | Self::Ref | Self::DynamicRef | Self::Comment | Self::Defs | Self::PrefixItems => Core,

            Self::Not | Self::If | Self::Then | Self::Else | Self::AllOf | Self::AnyOf
            | Self::OneOf | Self::DependentSchemas | Self::Items | Self::Contains
            | Self::Properties | Self::PatternProperties | Self::AdditionalProperties
            | Self::PropertyNames | Self::UnevaluatedItems | Self::UnevaluatedProperties
            | Self::Type | Self::Const | Self::Enum | Self::MultipleOf | Self::Maximum
            | Self::ExclusiveMaximum | Self::Minimum | Self::ExclusiveMinimum
            | Self::MaxLength | Self::MinLength | Self::Pattern | Self::MaxItems
            | Self::MinItems | Self::UniqueItems | Self::MaxContains | Self::MinContains
            | Self::MaxProperties | Self::MinProperties | Self::Required
            | Self::DependentRequired => Validation,

            Self::Title | Self::Description | Self::Default | Self::Deprecated => Meta,
        }
    }
}

impl Keyword {
    pub fn kind(&self) -> KeywordKind {
        match self {
            Self::Id(_) => KeywordKind::Id,
            Self::Anchor(_) => KeywordKind::Anchor,
            Self::DynamicAnchor(_) => KeywordKind::DynamicAnchor,
            Self::Ref(_) => KeywordKind::Ref,
            Self::DynamicRef(_) => KeywordKind::DynamicRef,
            Self::Comment(_) => KeywordKind::Comment,
            Self::Defs(_) => KeywordKind::Defs,
            Self::Not(_) => KeywordKind::Not,
            Self::If(_) => KeywordKind::If,
            Self::Then(_) => KeywordKind::Then,
            Self::Else(_) => KeywordKind::Else,
            Self::AllOf(_) => KeywordKind::AllOf,
            Self::AnyOf(_) => KeywordKind::AnyOf,
            Self::OneOf(_) => KeywordKind::OneOf,
            Self::DependentSchemas(_) => KeywordKind::DependentSchemas,
            Self::PrefixItems(_) => KeywordKind::PrefixItems,
            Self::Items(_) => KeywordKind::Items,
            Self::Contains(_) => KeywordKind::Contains,
            Self::Properties(_) => KeywordKind::Properties,
            Self::PatternProperties(_) => KeywordKind::PatternProperties,
            Self::AdditionalProperties(_) => KeywordKind::AdditionalProperties,
            Self::PropertyNames(_) => KeywordKind::PropertyNames,
            Self::UnevaluatedItems(_) => KeywordKind::UnevaluatedItems,
            Self::UnevaluatedProperties(_) => KeywordKind::UnevaluatedProperties,
            Self::Type(_) => KeywordKind::Type,
            Self::Enum(_) => KeywordKind::Enum,
            Self::Const(_) => KeywordKind::Const,
            Self::MultipleOf(_) => KeywordKind::MultipleOf,
            Self::Maximum(_) => KeywordKind::Maximum,
            Self::ExclusiveMaximum(_) => KeywordKind::ExclusiveMaximum,
            Self::Minimum(_) => KeywordKind::Minimum,
            Self::ExclusiveMinimum(_) => KeywordKind::ExclusiveMinimum,
            Self::MaxLength(_) => KeywordKind::MaxLength,
            Self::MinLength(_) => KeywordKind::MinLength,
            Self::Pattern(_) => KeywordKind::Pattern,
            Self::MaxItems(_) => KeywordKind::MaxItems,
            Self::MinItems(_) => KeywordKind::MinItems,
            Self::UniqueItems(_) => KeywordKind::UniqueItems,
            Self::MaxContains(_) => KeywordKind::MaxContains,
            Self::MinContains(_) => KeywordKind::MinContains,
            Self::MaxProperties(_) => KeywordKind::MaxProperties,
            Self::MinProperties(_) => KeywordKind::MinProperties,
            Self::Required(_) => KeywordKind::Required,
            Self::DependentRequired(_) => KeywordKind::DependentRequired,
            Self::Title(_) => KeywordKind::Title,
            Self::Description(_) => KeywordKind::Description,
            Self::Default(_) => KeywordKind::Default,
            Self::Deprecated(_) => KeywordKind::Deprecated,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PRIMITIVE TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    String,
    Integer,
}

impl PrimitiveType {
    /// Effective type set of a schema without `type`, in branch order.
    pub const ALL: [PrimitiveType; 7] = [
        Self::String,
        Self::Number,
        Self::Integer,
        Self::Object,
        Self::Array,
        Self::Boolean,
        Self::Null,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Number => "number",
            Self::String => "string",
            Self::Integer => "integer",
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// QUERIES
// ————————————————————————————————————————————————————————————————————————————

impl Schema {
    /// The always-valid schema (`true`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Schema built outside of normalization, without source positions.
    pub fn from_keywords(keywords: impl IntoIterator<Item = Keyword>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|keyword| KeywordNode { keyword, span: None }).collect(),
            unsupported: Vec::new(),
            span: None,
        }
    }

    /// First keyword `pick` accepts.
    pub fn find_map<'s, T>(&'s self, pick: impl FnMut(&'s Keyword) -> Option<T>) -> Option<T> {
        self.keywords.iter().map(|node| &node.keyword).find_map(pick)
    }

    pub fn has(&self, kind: KeywordKind) -> bool {
        self.keywords.iter().any(|node| node.keyword.kind() == kind)
    }

    /// True if any keyword constrains the instance.
    pub fn has_validation_keyword(&self) -> bool {
        self.keywords.iter().any(|node| node.keyword.kind().class() == KeywordClass::Validation)
    }

    pub fn anchor(&self) -> Option<&str> {
        self.find_map(|k| match k {
            Keyword::Anchor(a) => Some(a.as_str()),
            _ => None,
        })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
