//! Keyword validator / normalizer: generic JSON AST → Schema IR.
//!
//! Each recognized keyword is checked for the shape of its value and mapped to
//! a [`Keyword`]. The first structural problem aborts with `Err(Diagnostic)`;
//! warnings are pushed into the caller's [`Diagnostics`] and normalization
//! carries on.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Number;
use url::Url;

use crate::diagnostics::{Diagnostic, Diagnostics, Rule, Stage};
use crate::json_ast::{Literal, Node, NodeKind, Property, Span};
use crate::schema::{
    DependentRequiredItem, Keyword, KeywordKind, KeywordNode, PrimitiveType, Schema, SchemaEntry,
    UnsupportedKeyword, UnsupportedReason,
};

static ANCHOR_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][-_.0-9a-zA-Z]*$").expect("anchor pattern is valid")
});

/// Base against which URI-references are resolved to check their syntax.
static REFERENCE_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://schema.invalid/root.json").expect("base URL is valid"));

/// Largest integer an IEEE double represents exactly (`Number.MAX_SAFE_INTEGER`).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

type Result<T> = std::result::Result<T, Diagnostic>;

// ————————————————————————————————————————————————————————————————————————————
// FRONT API
// ————————————————————————————————————————————————————————————————————————————

/// Normalize a schema node (object or boolean).
pub fn normalize(node: &Node, diagnostics: &mut Diagnostics) -> Result<Schema> {
    Normalizer { diagnostics }.schema(node)
}

struct Normalizer<'d> {
    diagnostics: &'d mut Diagnostics,
}

/// Outcome of mapping one property of a schema object.
enum Mapped {
    Active(Keyword),
    /// Recognized but parked in `Schema::unsupported`.
    Deferred,
}

fn fail(rule: Rule, message: impl Into<String>, span: Span) -> Diagnostic {
    Diagnostic::fail(Stage::Normalize, rule, message, span)
}

// ————————————————————————————————————————————————————————————————————————————
// SCHEMAS
// ————————————————————————————————————————————————————————————————————————————

impl Normalizer<'_> {
    fn warn(&mut self, rule: Rule, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::message(Stage::Normalize, rule, message, span));
    }

    fn schema(&mut self, node: &Node) -> Result<Schema> {
        match &node.kind {
            NodeKind::Literal(Literal::Bool(true)) => Ok(Schema { span: Some(node.span), ..Schema::empty() }),
            NodeKind::Literal(Literal::Bool(false)) => Ok(Schema {
                keywords: vec![KeywordNode {
                    keyword: Keyword::Not(Box::new(Schema::empty())),
                    span: Some(node.span),
                }],
                unsupported: Vec::new(),
                span: Some(node.span),
            }),
            NodeKind::Object(props) => self.object_schema(node, props),
            _ => Err(fail(
                Rule::TypeMismatch,
                format!("JSON-Schema is neither an object nor a boolean, got {}", node.kind_name()),
                node.span,
            )),
        }
    }

    fn object_schema(&mut self, node: &Node, props: &[Property]) -> Result<Schema> {
        let mut keywords = Vec::with_capacity(props.len());
        let mut unsupported = Vec::new();

        for prop in props {
            let parked = |reason| UnsupportedKeyword {
                name: prop.key.clone(),
                value: prop.value.clone(),
                span: prop.span,
                reason,
            };
            let Some(kind) = KeywordKind::from_name(&prop.key) else {
                self.warn(Rule::Unsupported, format!("Unsupported keyword \"{}\"", prop.key), prop.span);
                unsupported.push(parked(UnsupportedReason::Unknown));
                continue;
            };
            match self.keyword(kind, prop)? {
                Mapped::Active(keyword) => {
                    tracing::trace!(keyword = kind.name(), "mapped keyword");
                    keywords.push(KeywordNode { keyword, span: Some(prop.span) });
                }
                Mapped::Deferred => unsupported.push(parked(UnsupportedReason::NotYetSupported)),
            }
        }

        let schema = Schema { keywords, unsupported, span: Some(node.span) };
        if schema.has(KeywordKind::Anchor) && schema.has(KeywordKind::DynamicAnchor) {
            return Err(fail(
                Rule::SemanticViolation,
                "\"$anchor\" and \"$dynamicAnchor\" on one schema",
                node.span,
            ));
        }
        Ok(schema)
    }

    fn sub_schema(&mut self, node: &Node) -> Result<Box<Schema>> {
        self.schema(node).map(Box::new)
    }

    fn schema_list(&mut self, kind: KeywordKind, node: &Node) -> Result<Vec<Schema>> {
        expect_array(kind, node)?.iter().map(|item| self.schema(item)).collect()
    }

    fn schema_entries(&mut self, kind: KeywordKind, node: &Node) -> Result<Vec<SchemaEntry>> {
        expect_object(kind, node)?
            .iter()
            .map(|prop| -> Result<_> {
                Ok(SchemaEntry { key: prop.key.clone(), schema: self.schema(&prop.value)?, span: prop.span })
            })
            .collect()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// KEYWORDS
// ————————————————————————————————————————————————————————————————————————————

impl Normalizer<'_> {
    fn keyword(&mut self, kind: KeywordKind, prop: &Property) -> Result<Mapped> {
        let value = &prop.value;
        let keyword = match kind {
            KeywordKind::Schema => {
                expect_string(kind, value)?;
                self.warn(Rule::NotYetSupported, "\"$schema\" directive not yet supported", prop.span);
                return Ok(Mapped::Deferred);
            }
            KeywordKind::Vocabulary => {
                self.warn(Rule::NotYetSupported, "\"$vocabulary\" keyword not yet supported", prop.span);
                return Ok(Mapped::Deferred);
            }
            KeywordKind::Id => Keyword::Id(self.id(value)?),
            KeywordKind::Ref => Keyword::Ref(uri_reference(kind, value)?),
            KeywordKind::DynamicRef => Keyword::DynamicRef(uri_reference(kind, value)?),
            KeywordKind::Anchor => Keyword::Anchor(anchor(kind, value)?),
            KeywordKind::DynamicAnchor => Keyword::DynamicAnchor(anchor(kind, value)?),
            KeywordKind::Comment => Keyword::Comment(expect_string(kind, value)?.to_string()),
            KeywordKind::Defs => Keyword::Defs(self.schema_entries(kind, value)?),

            KeywordKind::Not => Keyword::Not(self.sub_schema(value)?),
            KeywordKind::If => Keyword::If(self.sub_schema(value)?),
            KeywordKind::Then => Keyword::Then(self.sub_schema(value)?),
            KeywordKind::Else => Keyword::Else(self.sub_schema(value)?),
            KeywordKind::AllOf => Keyword::AllOf(self.schema_list(kind, value)?),
            KeywordKind::AnyOf => Keyword::AnyOf(self.schema_list(kind, value)?),
            KeywordKind::OneOf => Keyword::OneOf(self.schema_list(kind, value)?),
            KeywordKind::DependentSchemas => Keyword::DependentSchemas(self.schema_entries(kind, value)?),
            KeywordKind::PrefixItems => Keyword::PrefixItems(self.schema_list(kind, value)?),
            KeywordKind::Items => Keyword::Items(self.sub_schema(value)?),
            KeywordKind::Contains => Keyword::Contains(self.sub_schema(value)?),
            KeywordKind::Properties => Keyword::Properties(self.schema_entries(kind, value)?),
            KeywordKind::PatternProperties => Keyword::PatternProperties(self.schema_entries(kind, value)?),
            KeywordKind::AdditionalProperties => Keyword::AdditionalProperties(self.sub_schema(value)?),
            KeywordKind::PropertyNames => Keyword::PropertyNames(self.sub_schema(value)?),
            KeywordKind::UnevaluatedItems => Keyword::UnevaluatedItems(self.sub_schema(value)?),
            KeywordKind::UnevaluatedProperties => Keyword::UnevaluatedProperties(self.sub_schema(value)?),

            KeywordKind::Type => Keyword::Type(types(value)?),
            KeywordKind::Enum => Keyword::Enum(expect_array(kind, value)?.to_vec()),
            KeywordKind::Const => Keyword::Const(value.clone()),
            KeywordKind::MultipleOf => Keyword::MultipleOf(multiple_of(value)?),
            KeywordKind::Maximum => Keyword::Maximum(expect_number(kind, value)?.clone()),
            KeywordKind::ExclusiveMaximum => Keyword::ExclusiveMaximum(expect_number(kind, value)?.clone()),
            KeywordKind::Minimum => Keyword::Minimum(expect_number(kind, value)?.clone()),
            KeywordKind::ExclusiveMinimum => Keyword::ExclusiveMinimum(expect_number(kind, value)?.clone()),
            KeywordKind::MaxLength => Keyword::MaxLength(count(kind, value)?),
            KeywordKind::MinLength => Keyword::MinLength(count(kind, value)?),
            KeywordKind::Pattern => Keyword::Pattern(self.pattern(value)?),
            KeywordKind::MaxItems => Keyword::MaxItems(count(kind, value)?),
            KeywordKind::MinItems => Keyword::MinItems(count(kind, value)?),
            KeywordKind::UniqueItems => Keyword::UniqueItems(expect_bool(kind, value)?),
            KeywordKind::MaxContains => Keyword::MaxContains(count(kind, value)?),
            KeywordKind::MinContains => Keyword::MinContains(count(kind, value)?),
            KeywordKind::MaxProperties => Keyword::MaxProperties(count(kind, value)?),
            KeywordKind::MinProperties => Keyword::MinProperties(count(kind, value)?),
            KeywordKind::Required => Keyword::Required(string_list(kind, value)?),
            KeywordKind::DependentRequired => Keyword::DependentRequired(dependent_required(value)?),

            KeywordKind::Title => Keyword::Title(expect_string(kind, value)?.to_string()),
            KeywordKind::Description => Keyword::Description(expect_string(kind, value)?.to_string()),
            KeywordKind::Default => Keyword::Default(value.clone()),
            KeywordKind::Deprecated => Keyword::Deprecated(expect_bool(kind, value)?),
        };
        Ok(Mapped::Active(keyword))
    }

    /// `$id` must be an absolute URI; a fragment is an error unless empty,
    /// and an empty one is deprecated.
    fn id(&mut self, node: &Node) -> Result<String> {
        let raw = expect_string(KeywordKind::Id, node)?;
        let url = Url::parse(raw).map_err(|_| {
            fail(Rule::SemanticViolation, format!("URI expected, got \"{raw}\""), node.span)
        })?;
        match url.fragment() {
            Some("") => self.warn(Rule::Deprecated, "\"$id\" directive empty fragments are deprecated", node.span),
            Some(_) => {
                return Err(fail(
                    Rule::SemanticViolation,
                    "\"$id\" directive contains non-empty fragment",
                    node.span,
                ));
            }
            None => {}
        }
        Ok(raw.to_string())
    }

    fn pattern(&mut self, node: &Node) -> Result<String> {
        let raw = expect_string(KeywordKind::Pattern, node)?;
        let trailing = raw.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            return Err(fail(Rule::ShapeViolation, "\"pattern\" ends with a dangling escape", node.span));
        }
        if let Err(error) = Regex::new(raw) {
            // ECMA-262 accepts constructs (lookaround, backreferences) the
            // `regex` crate does not, so this stays a warning.
            self.warn(
                Rule::PatternPortability,
                format!("pattern is not understood by the local regex engine: {error}"),
                node.span,
            );
        }
        Ok(raw.to_string())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// VALUE CHECKS
// ————————————————————————————————————————————————————————————————————————————

fn mismatch(kind: KeywordKind, expected: &str, node: &Node) -> Diagnostic {
    fail(
        Rule::TypeMismatch,
        format!("\"{}\" expected {expected}, got {}", kind.name(), node.kind_name()),
        node.span,
    )
}

fn expect_string(kind: KeywordKind, node: &Node) -> Result<&str> {
    node.as_str().ok_or_else(|| mismatch(kind, "string", node))
}

fn expect_bool(kind: KeywordKind, node: &Node) -> Result<bool> {
    node.as_bool().ok_or_else(|| mismatch(kind, "boolean", node))
}

fn expect_number(kind: KeywordKind, node: &Node) -> Result<&Number> {
    node.as_number().ok_or_else(|| mismatch(kind, "number", node))
}

fn expect_array(kind: KeywordKind, node: &Node) -> Result<&[Node]> {
    node.as_array().ok_or_else(|| mismatch(kind, "array", node))
}

fn expect_object(kind: KeywordKind, node: &Node) -> Result<&[Property]> {
    node.as_object().ok_or_else(|| mismatch(kind, "object", node))
}

fn string_list(kind: KeywordKind, node: &Node) -> Result<Vec<String>> {
    expect_array(kind, node)?
        .iter()
        .map(|item| expect_string(kind, item).map(str::to_string))
        .collect()
}

fn uri_reference(kind: KeywordKind, node: &Node) -> Result<String> {
    let raw = expect_string(kind, node)?;
    REFERENCE_BASE.join(raw).map_err(|_| {
        fail(Rule::SemanticViolation, format!("URI reference expected, got \"{raw}\""), node.span)
    })?;
    Ok(raw.to_string())
}

fn anchor(kind: KeywordKind, node: &Node) -> Result<String> {
    let raw = expect_string(kind, node)?;
    if !ANCHOR_NAME.is_match(raw) {
        return Err(fail(Rule::SemanticViolation, format!("Anchor expected, got \"{raw}\""), node.span));
    }
    Ok(raw.to_string())
}

/// A single type name or an array of them; order kept, duplicates allowed.
fn types(node: &Node) -> Result<Vec<PrimitiveType>> {
    let one = |item: &Node| -> Result<PrimitiveType> {
        let name = expect_string(KeywordKind::Type, item)?;
        PrimitiveType::parse(name).ok_or_else(|| {
            fail(Rule::ShapeViolation, format!("Expected type string, got \"{name}\""), item.span)
        })
    };
    match node.as_array() {
        Some(items) => items.iter().map(one).collect(),
        None => Ok(vec![one(node)?]),
    }
}

fn multiple_of(node: &Node) -> Result<Number> {
    let number = expect_number(KeywordKind::MultipleOf, node)?;
    if number.as_f64().is_none_or(|n| n <= 0.0) {
        return Err(fail(
            Rule::ShapeViolation,
            format!("\"multipleOf\" requires a number > 0, got {number}"),
            node.span,
        ));
    }
    Ok(number.clone())
}

/// Non-negative safe integer; `2.0` counts as `2`.
fn count(kind: KeywordKind, node: &Node) -> Result<u64> {
    let number = expect_number(kind, node)?;
    let as_count = number.as_u64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= MAX_SAFE_INTEGER as f64)
            .map(|f| f as u64)
    });
    match as_count {
        Some(n) if n <= MAX_SAFE_INTEGER => Ok(n),
        _ => Err(fail(
            Rule::ShapeViolation,
            format!("\"{}\" expected integer >= 0, got {number}", kind.name()),
            node.span,
        )),
    }
}

fn dependent_required(node: &Node) -> Result<Vec<DependentRequiredItem>> {
    let kind = KeywordKind::DependentRequired;
    expect_object(kind, node)?
        .iter()
        .map(|prop| -> Result<_> {
            let required = string_list(kind, &prop.value)?;
            let mut seen = std::collections::HashSet::new();
            if !required.iter().all(|name| seen.insert(name)) {
                return Err(fail(Rule::ShapeViolation, "Elements in array are not unique", prop.value.span));
            }
            Ok(DependentRequiredItem { key: prop.key.clone(), required, span: prop.span })
        })
        .collect()
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::json_ast;
    use serde_json::{json, Value};

    fn run(value: Value) -> (std::result::Result<Schema, Diagnostic>, Diagnostics, String) {
        let source = serde_json::to_string(&value).unwrap();
        let doc = json_ast::parse(&source).unwrap();
        let mut diags = Diagnostics::new();
        let result = normalize(&doc.root, &mut diags);
        (result, diags, source)
    }

    fn ok(value: Value) -> Schema {
        let (result, _, _) = run(value);
        result.unwrap()
    }

    fn err(value: Value) -> (Diagnostic, String) {
        let (result, _, source) = run(value);
        (result.unwrap_err(), source)
    }

    fn kinds(schema: &Schema) -> Vec<KeywordKind> {
        schema.keywords.iter().map(|k| k.keyword.kind()).collect()
    }

    #[test]
    fn boolean_schemas() {
        assert!(ok(json!(true)).keywords.is_empty());
        let never = ok(json!(false));
        assert_eq!(never.keywords.len(), 1);
        assert!(matches!(&never.keywords[0].keyword, Keyword::Not(inner) if inner.keywords.is_empty()));
    }

    #[test]
    fn non_schema_root_is_fatal() {
        let (diag, _) = err(json!([1]));
        assert_eq!(diag.origin.rule, Rule::TypeMismatch);
        assert!(diag.message.contains("neither an object nor a boolean"));
    }

    #[test]
    fn keywords_keep_source_order() {
        let schema = ok(json!({"type": "string", "minLength": 1, "title": "t", "$comment": "c"}));
        assert_eq!(
            kinds(&schema),
            [KeywordKind::Type, KeywordKind::MinLength, KeywordKind::Title, KeywordKind::Comment]
        );
    }

    #[test]
    fn unknown_keywords_are_reported_and_parked() {
        let (result, diags, _) = run(json!({"type": "string", "foo": 1, "$schema": "https://json-schema.org/draft/2020-12/schema"}));
        let schema = result.unwrap();
        assert_eq!(kinds(&schema), [KeywordKind::Type]);
        assert_eq!(schema.unsupported.len(), 2);
        assert_eq!(schema.unsupported[0].name, "foo");
        assert_eq!(schema.unsupported[0].reason, UnsupportedReason::Unknown);
        assert_eq!(schema.unsupported[1].reason, UnsupportedReason::NotYetSupported);
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.severity == Severity::Message));
    }

    #[test]
    fn multiple_of_must_be_positive() {
        let (diag, source) = err(json!({"multipleOf": -1}));
        assert!(diag.is_fatal());
        assert_eq!(diag.origin.rule, Rule::ShapeViolation);
        assert_eq!(&source[diag.span.start..diag.span.end], "-1");
        assert!(err(json!({"multipleOf": 0})).0.message.contains("> 0"));
        assert!(matches!(ok(json!({"multipleOf": 0.5})).keywords[0].keyword, Keyword::MultipleOf(_)));
    }

    #[test]
    fn counts_are_non_negative_safe_integers() {
        assert!(matches!(ok(json!({"maxLength": 3})).keywords[0].keyword, Keyword::MaxLength(3)));
        assert!(matches!(ok(json!({"minItems": 2.0})).keywords[0].keyword, Keyword::MinItems(2)));
        for bad in [json!(-1), json!(1.5), json!(9007199254740992u64), json!("3")] {
            let (diag, _) = err(json!({"maxProperties": bad.clone()}));
            assert!(diag.is_fatal(), "{bad}");
        }
    }

    #[test]
    fn type_accepts_string_or_array() {
        let schema = ok(json!({"type": ["string", "null", "string"]}));
        assert_eq!(
            schema.keywords[0].keyword,
            Keyword::Type(vec![PrimitiveType::String, PrimitiveType::Null, PrimitiveType::String])
        );
        let (diag, source) = err(json!({"type": ["string", "any"]}));
        assert_eq!(&source[diag.span.start..diag.span.end], "\"any\"");
        assert_eq!(err(json!({"type": 1})).0.origin.rule, Rule::TypeMismatch);
    }

    #[test]
    fn nested_schemas_recurse() {
        let schema = ok(json!({
            "properties": {"a": {"type": "string"}, "b": false},
            "items": {"minimum": 1},
            "allOf": [true, {"title": "x"}],
            "$defs": {"pos": {"type": "integer"}},
        }));
        let Keyword::Properties(props) = &schema.keywords[0].keyword else { panic!() };
        assert_eq!(props[0].key, "a");
        assert_eq!(kinds(&props[0].schema), [KeywordKind::Type]);
        assert_eq!(kinds(&props[1].schema), [KeywordKind::Not]);
        let Keyword::Defs(defs) = &schema.keywords[3].keyword else { panic!() };
        assert_eq!(kinds(&defs[0].schema), [KeywordKind::Type]);

        let (diag, _) = err(json!({"properties": {"a": {"not": 3}}}));
        assert!(diag.message.contains("neither an object nor a boolean"));
    }

    #[test]
    fn anchors_and_uris() {
        assert!(matches!(&ok(json!({"$anchor": "my-anchor"})).keywords[0].keyword, Keyword::Anchor(a) if a == "my-anchor"));
        assert!(err(json!({"$anchor": "1abc"})).0.is_fatal());
        assert!(err(json!({"$dynamicAnchor": "has space"})).0.is_fatal());

        let (diag, _) = err(json!({"$anchor": "a", "$dynamicAnchor": "b"}));
        assert_eq!(diag.origin.rule, Rule::SemanticViolation);

        assert!(ok(json!({"$id": "https://example.com/schema"})).keywords.len() == 1);
        assert!(err(json!({"$id": "not a uri"})).0.message.contains("URI expected"));
        assert!(err(json!({"$id": "https://example.com/s#frag"})).0.message.contains("non-empty fragment"));
        let (result, diags, _) = run(json!({"$id": "https://example.com/s#"}));
        assert!(result.is_ok());
        assert_eq!(diags.iter().next().unwrap().origin.rule, Rule::Deprecated);

        assert!(ok(json!({"$ref": "#/$defs/pos"})).keywords.len() == 1);
        assert!(ok(json!({"$dynamicRef": "other.json#meta"})).keywords.len() == 1);
        assert!(err(json!({"$ref": "http://[::1"})).0.is_fatal());
    }

    #[test]
    fn required_and_dependent_required() {
        assert_eq!(
            ok(json!({"required": ["a", "b"]})).keywords[0].keyword,
            Keyword::Required(vec!["a".into(), "b".into()])
        );
        assert_eq!(err(json!({"required": ["a", 1]})).0.origin.rule, Rule::TypeMismatch);

        let schema = ok(json!({"dependentRequired": {"card": ["billing", "name"]}}));
        let Keyword::DependentRequired(items) = &schema.keywords[0].keyword else { panic!() };
        assert_eq!(items[0].key, "card");
        assert_eq!(items[0].required, ["billing", "name"]);

        let (diag, _) = err(json!({"dependentRequired": {"card": ["billing", "billing"]}}));
        assert!(diag.message.contains("not unique"));
    }

    #[test]
    fn data_keywords_are_kept_verbatim() {
        let schema = ok(json!({"enum": [1, "a", null], "const": {"x": [1]}, "default": 5}));
        let Keyword::Enum(items) = &schema.keywords[0].keyword else { panic!() };
        assert_eq!(items.iter().map(Node::to_value).collect::<Vec<_>>(), [json!(1), json!("a"), Value::Null]);
        let Keyword::Const(node) = &schema.keywords[1].keyword else { panic!() };
        assert_eq!(node.to_value(), json!({"x": [1]}));
        assert!(err(json!({"enum": "a"})).0.is_fatal());
    }

    #[test]
    fn non_portable_pattern_only_warns() {
        let (result, diags, _) = run(json!({"pattern": "^(?=a)b$"}));
        assert!(matches!(&result.unwrap().keywords[0].keyword, Keyword::Pattern(p) if p == "^(?=a)b$"));
        assert_eq!(diags.iter().next().unwrap().origin.rule, Rule::PatternPortability);
        assert!(err(json!({"pattern": 3})).0.is_fatal());
    }

    #[test]
    fn dangling_escape_in_pattern_is_fatal() {
        let (diag, source) = err(json!({"type": "string", "pattern": "a\\"}));
        assert_eq!(diag.origin.rule, Rule::ShapeViolation);
        assert_eq!(&source[diag.span.start..diag.span.end], r#""a\\""#);
        assert!(matches!(&ok(json!({"pattern": "a\\\\"})).keywords[0].keyword, Keyword::Pattern(p) if p == "a\\\\"));
    }
}
