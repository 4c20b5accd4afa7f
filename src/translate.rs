//! Schema IR → Validation-Expression tree.
//!
//! Total over normalized input: keywords a builder does not understand simply
//! contribute nothing. Compositional keywords (`allOf`, `$ref`, `if`, ...) are
//! validated upstream but not lowered here.

use indexmap::IndexSet;
use serde_json::{json, Map, Value};

use crate::expr::{call, intersection, never, not, union, unknown, Call, Constant, Define, Func, Record, Root};
use crate::schema::{Keyword, PrimitiveType, Schema, SchemaEntry};

// ————————————————————————————————————————————————————————————————————————————
// FRONT API
// ————————————————————————————————————————————————————————————————————————————

/// Wrap the translated schema in a single exported definition.
///
/// The name is the PascalCase form of `$anchor`, else of `fallback_name`.
pub fn translate_root(schema: &Schema, fallback_name: &str) -> Root {
    let name = pascal_case(schema.anchor().unwrap_or(fallback_name));
    let body = translate(schema);
    tracing::debug!(%name, nodes = body.size(), "translated schema");
    Root { defines: vec![Define { name, body }] }
}

pub fn translate(schema: &Schema) -> Call {
    if !schema.has_validation_keyword() {
        return unknown();
    }

    let types = schema
        .find_map(|k| match k {
            Keyword::Type(types) => Some(types.as_slice()),
            _ => None,
        })
        .unwrap_or(&PrimitiveType::ALL);

    let mut branches: Vec<Call> = types.iter().map(|ty| type_branch(schema, *ty)).collect();
    let typed = match branches.len() {
        0 => never(),
        1 => branches.remove(0),
        _ => union(branches),
    };

    match schema.find_map(|k| match k {
        Keyword::Not(sub) => Some(sub),
        _ => None,
    }) {
        Some(sub) => intersection([typed, not(translate(sub))]),
        None => typed,
    }
}

fn type_branch(schema: &Schema, ty: PrimitiveType) -> Call {
    match ty {
        PrimitiveType::Object => ObjectKeywords::collect(schema).build(),
        PrimitiveType::String => string_branch(schema),
        PrimitiveType::Number => number_branch(schema, Func::Number),
        PrimitiveType::Integer => number_branch(schema, Func::Integer),
        PrimitiveType::Array => array_branch(schema),
        PrimitiveType::Boolean => call(Func::Boolean, []),
        PrimitiveType::Null => call(Func::Literal, [Constant::Null.into()]),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// OBJECT
// ————————————————————————————————————————————————————————————————————————————

/// The object-relevant keywords of one schema, first occurrence of each.
#[derive(Default)]
struct ObjectKeywords<'s> {
    required: &'s [String],
    properties: &'s [SchemaEntry],
    pattern_properties: Option<&'s [SchemaEntry]>,
    additional_properties: Option<&'s Schema>,
    property_names: Option<&'s Schema>,
    dependent_required: Option<Value>,
    min_properties: Option<u64>,
    max_properties: Option<u64>,
}

impl<'s> ObjectKeywords<'s> {
    fn collect(schema: &'s Schema) -> Self {
        let mut out = ObjectKeywords::default();
        let mut seen = IndexSet::new();
        for node in &schema.keywords {
            if !seen.insert(node.keyword.kind()) {
                continue;
            }
            match &node.keyword {
                Keyword::Required(names) => out.required = names.as_slice(),
                Keyword::Properties(entries) => out.properties = entries.as_slice(),
                Keyword::PatternProperties(entries) => out.pattern_properties = Some(entries.as_slice()),
                Keyword::AdditionalProperties(sub) => out.additional_properties = Some(sub.as_ref()),
                Keyword::PropertyNames(sub) => out.property_names = Some(sub.as_ref()),
                Keyword::MinProperties(n) => out.min_properties = Some(*n),
                Keyword::MaxProperties(n) => out.max_properties = Some(*n),
                Keyword::DependentRequired(items) => {
                    let map: Map<String, Value> = items
                        .iter()
                        .map(|item| (item.key.clone(), Value::from(item.required.clone())))
                        .collect();
                    out.dependent_required = Some(Value::Object(map));
                }
                _ => {}
            }
        }
        out
    }

    fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    fn build(self) -> Call {
        let mut shape = Record::default();
        for name in self.required {
            if !self.properties.iter().any(|p| &p.key == name) {
                shape.entries.insert(name.clone(), unknown().into());
            }
        }
        for prop in self.properties {
            let value = translate(&prop.schema);
            let value = if self.is_required(&prop.key) {
                value
            } else {
                call(Func::Optional, [value.into()])
            };
            shape.entries.insert(prop.key.clone(), value.into());
        }

        let mut e = call(Func::Type, [shape.into()]);
        if let Some(n) = self.min_properties {
            e = call(Func::MinProperties, [e.into(), Constant::from(n).into()]);
        }
        if let Some(n) = self.max_properties {
            e = call(Func::MaxProperties, [e.into(), Constant::from(n).into()]);
        }
        if let Some(deps) = &self.dependent_required {
            e = call(Func::DependentProperties, [e.into(), Constant::Json(deps.clone()).into()]);
        }

        let mut arms = Vec::new();
        if let Some(patterns) = self.pattern_properties {
            let record: Record = patterns.iter().map(|p| (p.key.clone(), translate(&p.schema))).collect();
            arms.push(call(Func::PatternType, [record.into()]));
        }
        if let Some(additional) = self.additional_properties {
            arms.push(intersection([not(union(self.known_keys())), translate(additional)]));
        }
        if let Some(names) = self.property_names {
            let key_schema = Schema::from_keywords([Keyword::AllOf(vec![
                Schema::from_keywords([Keyword::Type(vec![PrimitiveType::String])]),
                names.clone(),
            ])]);
            e = call(Func::Keys, [e.into(), translate(&key_schema).into()]);
        }

        if arms.is_empty() { e } else { intersection([e, union(arms)]) }
    }

    /// Matchers for every key `additionalProperties` must not apply to.
    fn known_keys(&self) -> Vec<Call> {
        let literal: IndexSet<&str> = self
            .properties
            .iter()
            .map(|p| p.key.as_str())
            .chain(self.required.iter().map(String::as_str))
            .collect();
        let patterns = self.pattern_properties.unwrap_or_default();

        let mut known = Vec::new();
        if !literal.is_empty() {
            let record: Record = literal.into_iter().map(|k| (k, unknown())).collect();
            known.push(call(Func::Object, [record.into()]));
        }
        if !patterns.is_empty() {
            let record: Record = patterns.iter().map(|p| (p.key.as_str(), unknown())).collect();
            known.push(call(Func::PatternObject, [record.into()]));
        }
        if known.is_empty() {
            known.push(never());
        }
        known
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SCALARS / ARRAY
// ————————————————————————————————————————————————————————————————————————————

fn string_branch(schema: &Schema) -> Call {
    let (mut min, mut max, mut pattern) = (None, None, None);
    for node in &schema.keywords {
        match &node.keyword {
            Keyword::MinLength(n) if min.is_none() => min = Some(*n),
            Keyword::MaxLength(n) if max.is_none() => max = Some(*n),
            Keyword::Pattern(p) if pattern.is_none() => pattern = Some(p),
            _ => {}
        }
    }

    let mut e = call(Func::String, []);
    if min.is_some() || max.is_some() {
        e = call(Func::Size, [e.into(), Constant::from(min).into(), Constant::from(max).into()]);
    }
    if let Some(p) = pattern {
        e = call(Func::Pattern, [e.into(), Constant::Regex(p.clone()).into()]);
    }
    e
}

fn number_branch(schema: &Schema, base: Func) -> Call {
    let (mut multiple_of, mut maximum, mut exclusive_maximum, mut minimum, mut exclusive_minimum) =
        (None, None, None, None, None);
    for node in &schema.keywords {
        let (slot, n) = match &node.keyword {
            Keyword::MultipleOf(n) => (&mut multiple_of, n),
            Keyword::Maximum(n) => (&mut maximum, n),
            Keyword::ExclusiveMaximum(n) => (&mut exclusive_maximum, n),
            Keyword::Minimum(n) => (&mut minimum, n),
            Keyword::ExclusiveMinimum(n) => (&mut exclusive_minimum, n),
            _ => continue,
        };
        slot.get_or_insert_with(|| Constant::Number(n.clone()));
    }

    let exclusive = || Constant::Json(json!({"exclusive": true}));
    let mut e = call(base, []);
    if let Some(d) = multiple_of {
        e = call(Func::MultipleOf, [e.into(), d.into()]);
    }
    if let Some(v) = maximum {
        e = call(Func::Max, [e.into(), v.into()]);
    }
    if let Some(v) = exclusive_maximum {
        e = call(Func::Max, [e.into(), v.into(), exclusive().into()]);
    }
    if let Some(v) = minimum {
        e = call(Func::Min, [e.into(), v.into()]);
    }
    if let Some(v) = exclusive_minimum {
        e = call(Func::Min, [e.into(), v.into(), exclusive().into()]);
    }
    e
}

fn array_branch(schema: &Schema) -> Call {
    let items = schema
        .find_map(|k| match k {
            Keyword::Items(sub) => Some(translate(sub)),
            _ => None,
        })
        .unwrap_or_else(unknown);
    call(Func::Array, [items.into()])
}

// ————————————————————————————————————————————————————————————————————————————
// NAMES
// ————————————————————————————————————————————————————————————————————————————

/// `"my-anchor"` → `"MyAnchor"`, `"fooBar_baz"` → `"FooBarBaz"`.
///
/// Words split on any non-alphanumeric character and on lower→upper case
/// changes. A word starting with a digit is joined with `_` so `v1.2` stays
/// readable as `V1_2`.
pub fn pascal_case(input: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for ch in input.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = matches!(prev, Some(p) if p.is_lowercase() && ch.is_uppercase());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
        prev = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut out = String::new();
    for word in &words {
        let mut chars = word.chars();
        let Some(first) = chars.next() else { continue };
        if first.is_ascii_digit() && !out.is_empty() {
            out.push('_');
        }
        out.extend(first.to_uppercase());
        out.extend(chars.flat_map(char::to_lowercase));
    }
    if out.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::expr::{Arg, Item};
    use crate::json_ast;
    use crate::normalize::normalize;
    use serde_json::{json, Value};

    fn schema(value: Value) -> Schema {
        let doc = json_ast::parse(&value.to_string()).unwrap();
        normalize(&doc.root, &mut Diagnostics::new()).unwrap()
    }

    fn tr(value: Value) -> Call {
        translate(&schema(value))
    }

    fn record(call: &Call) -> &Record {
        match call.args.as_slice() {
            [Arg::Record(record)] => record,
            other => panic!("expected a single record argument, got {other:?}"),
        }
    }

    fn item_call(item: &Item) -> &Call {
        match item {
            Item::Call(call) => call,
            Item::Constant(c) => panic!("expected call, got {c:?}"),
        }
    }

    fn arms(call: &Call) -> Vec<&Call> {
        match call.args.as_slice() {
            [Arg::Array(arr)] => arr.items.iter().map(item_call).collect(),
            other => panic!("expected arms, got {other:?}"),
        }
    }

    fn string() -> Call {
        call(Func::String, [])
    }

    #[test]
    fn annotation_only_accepts_anything() {
        assert_eq!(tr(json!(true)), unknown());
        assert_eq!(tr(json!({"title": "x", "$comment": "y", "prefixItems": [true]})), unknown());
    }

    #[test]
    fn false_is_intersection_with_negated_unknown() {
        let e = tr(json!(false));
        assert_eq!(e.func, Func::Intersection);
        let parts = arms(&e);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].func, Func::Union);
        assert_eq!(arms(parts[0]).len(), 7);
        assert_eq!(*parts[1], not(unknown()));
    }

    #[test]
    fn single_type_skips_union() {
        assert_eq!(tr(json!({"type": "boolean"})), call(Func::Boolean, []));
        assert_eq!(tr(json!({"type": []})), never());
        let both = tr(json!({"type": ["null", "string"]}));
        assert_eq!(both, union([call(Func::Literal, [Constant::Null.into()]), string()]));
    }

    #[test]
    fn untyped_schema_branches_in_fixed_order() {
        let e = tr(json!({"minLength": 1}));
        let funcs: Vec<Func> = arms(&e).iter().map(|c| c.func).collect();
        assert_eq!(
            funcs,
            [Func::Size, Func::Number, Func::Integer, Func::Type, Func::Array, Func::Boolean, Func::Literal]
        );
    }

    #[test]
    fn required_property_is_not_optional() {
        let e = tr(json!({"type": "object", "properties": {"a": {"type": "string"}}, "required": ["a"]}));
        assert_eq!(e.func, Func::Type);
        assert_eq!(record(&e).entries["a"], Item::Call(string()));

        let e = tr(json!({"type": "object", "properties": {"a": {"type": "string"}}, "required": []}));
        assert_eq!(record(&e).entries["a"], Item::Call(call(Func::Optional, [string().into()])));
    }

    #[test]
    fn required_without_property_is_unknown_first() {
        let e = tr(json!({"type": "object", "properties": {"a": {}}, "required": ["b", "a"]}));
        let keys: Vec<&str> = record(&e).entries.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(record(&e).entries["b"], Item::Call(unknown()));
        assert_eq!(record(&e).entries["a"], Item::Call(unknown()));
    }

    #[test]
    fn object_refinements_wrap_in_order() {
        let e = tr(json!({
            "type": "object",
            "maxProperties": 4,
            "minProperties": 1,
            "dependentRequired": {"card": ["billing"]},
        }));
        assert_eq!(e.func, Func::DependentProperties);
        assert_eq!(e.args[1], Arg::Constant(Constant::Json(json!({"card": ["billing"]}))));
        let Arg::Call(inner) = &e.args[0] else { panic!() };
        assert_eq!(inner.func, Func::MaxProperties);
        let Arg::Call(inner) = &inner.args[0] else { panic!() };
        assert_eq!(inner.func, Func::MinProperties);
        assert_eq!(inner.args[1], Arg::Constant(Constant::from(1u64)));
    }

    #[test]
    fn closed_object_negates_known_keys() {
        let e = tr(json!({"type": "object", "additionalProperties": false, "properties": {"a": {}}}));
        assert_eq!(e.func, Func::Intersection);
        let [_, extra] = arms(&e)[..] else { panic!() };
        let [additional] = arms(extra)[..] else { panic!() };
        let [negated, _false] = arms(additional)[..] else { panic!() };
        assert_eq!(negated.func, Func::Not);
        let Arg::Call(known) = &negated.args[0] else { panic!() };
        let known = arms(known);
        assert_eq!(known.len(), 1);
        assert_eq!(known[0].func, Func::Object);
        assert_eq!(record(known[0]).entries["a"], Item::Call(unknown()));
    }

    #[test]
    fn additional_properties_without_known_keys_negates_never() {
        let e = tr(json!({"type": "object", "additionalProperties": {"type": "string"}}));
        let [_, extra] = arms(&e)[..] else { panic!() };
        let [additional] = arms(extra)[..] else { panic!() };
        assert_eq!(*additional, intersection([not(union([never()])), string()]));
    }

    #[test]
    fn pattern_properties_add_two_arms() {
        let e = tr(json!({
            "type": "object",
            "patternProperties": {"^x-": {"type": "string"}},
            "additionalProperties": true,
            "required": ["id"],
        }));
        let [_, extra] = arms(&e)[..] else { panic!() };
        let [pattern_type, additional] = arms(extra)[..] else { panic!() };
        assert_eq!(pattern_type.func, Func::PatternType);
        assert_eq!(record(pattern_type).entries["^x-"], Item::Call(string()));

        let [negated, accept] = arms(additional)[..] else { panic!() };
        assert_eq!(*accept, unknown());
        let Arg::Call(known) = &negated.args[0] else { panic!() };
        let funcs: Vec<Func> = arms(known).iter().map(|c| c.func).collect();
        assert_eq!(funcs, [Func::Object, Func::PatternObject]);
    }

    #[test]
    fn property_names_wrap_with_keys() {
        let e = tr(json!({"type": "object", "propertyNames": {"maxLength": 3}}));
        assert_eq!(e.func, Func::Keys);
        // `allOf` is not lowered, so the key schema constrains nothing beyond its type set.
        let Arg::Call(key) = &e.args[1] else { panic!() };
        assert_eq!(key.func, Func::Union);
    }

    #[test]
    fn string_size_and_pattern() {
        let e = tr(json!({"minLength": 2, "maxLength": 5, "type": "string"}));
        assert_eq!(e, call(Func::Size, [string().into(), Constant::from(2u64).into(), Constant::from(5u64).into()]));

        let e = tr(json!({"maxLength": 5, "type": "string", "pattern": "^a+$"}));
        let expected = call(
            Func::Pattern,
            [
                call(Func::Size, [string().into(), Constant::Undefined.into(), Constant::from(5u64).into()]).into(),
                Constant::Regex("^a+$".into()).into(),
            ],
        );
        assert_eq!(e, expected);
    }

    #[test]
    fn numeric_bounds_stack_in_fixed_order() {
        let e = tr(json!({"type": "integer", "exclusiveMinimum": 0, "maximum": 10, "exclusiveMaximum": 11, "multipleOf": 2}));
        let mut funcs = Vec::new();
        let mut cur = &e;
        loop {
            funcs.push(cur.func);
            match cur.args.first() {
                Some(Arg::Call(inner)) => cur = inner,
                _ => break,
            }
        }
        assert_eq!(funcs, [Func::Min, Func::Max, Func::Max, Func::MultipleOf, Func::Integer]);
        assert_eq!(e.args.len(), 3);
        assert_eq!(e.args[2], Arg::Constant(Constant::Json(json!({"exclusive": true}))));
    }

    #[test]
    fn array_items() {
        assert_eq!(tr(json!({"type": "array"})), call(Func::Array, [unknown().into()]));
        assert_eq!(tr(json!({"type": "array", "items": {"type": "string"}})), call(Func::Array, [string().into()]));
    }

    #[test]
    fn not_intersects_with_negation() {
        let e = tr(json!({"type": "string", "not": {"type": "string", "maxLength": 0}}));
        let expected = intersection([
            string(),
            not(call(Func::Size, [string().into(), Constant::Undefined.into(), Constant::from(0u64).into()])),
        ]);
        assert_eq!(e, expected);
    }

    #[test]
    fn root_name_from_anchor_or_fallback() {
        let root = translate_root(&schema(json!({"$anchor": "my-anchor"})), "root");
        assert_eq!(root.defines[0].name, "MyAnchor");
        let root = translate_root(&schema(json!({"type": "null"})), "root");
        assert_eq!(root.defines[0].name, "Root");
    }

    #[test]
    fn pascal_case_words() {
        assert_eq!(pascal_case("my-anchor"), "MyAnchor");
        assert_eq!(pascal_case("fooBar_baz"), "FooBarBaz");
        assert_eq!(pascal_case("USER.id"), "UserId");
        assert_eq!(pascal_case("v1.2"), "V1_2");
        assert_eq!(pascal_case("2fa"), "_2fa");
        assert_eq!(pascal_case(""), "_");
    }
}
