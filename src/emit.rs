//! Validation-Expression tree → TypeScript module text targeting superstruct.

use serde_json::Value;

use crate::expr::{Arg, ArrayExpr, Call, Constant, Define, Item, Namespace, Record, Root};
use crate::normalize::MAX_SAFE_INTEGER;

/// Module specifiers for the two import bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub superstruct_module: String,
    pub std_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            superstruct_module: "superstruct".to_string(),
            std_module: "@schema-to-superstruct/std".to_string(),
        }
    }
}

pub fn render(root: &Root, options: &EmitOptions) -> String {
    let body: Vec<String> = root.defines.iter().map(render_define).collect();
    format!("{}{}\n", preamble(options), body.join("\n\n"))
}

fn preamble(options: &EmitOptions) -> String {
    format!(
        "import * as ss from {}\nimport * as std from {}\n\n",
        single_quoted(&options.superstruct_module),
        single_quoted(&options.std_module),
    )
}

fn single_quoted(module: &str) -> String {
    format!("'{}'", module.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn render_define(define: &Define) -> String {
    format!("export const {} = {};", define.name, render_call(&define.body))
}

fn render_call(call: &Call) -> String {
    let ns = match call.func.namespace() {
        Namespace::Combinator => "ss",
        Namespace::Standard => "std",
    };
    let args: Vec<String> = call.args.iter().map(render_arg).collect();
    format!("{ns}.{}({})", call.func.name(), args.join(", "))
}

fn render_arg(arg: &Arg) -> String {
    match arg {
        Arg::Call(call) => render_call(call),
        Arg::Constant(constant) => render_constant(constant),
        Arg::Record(record) => render_record(record),
        Arg::Array(arr) => render_array(arr),
    }
}

fn render_item(item: &Item) -> String {
    match item {
        Item::Call(call) => render_call(call),
        Item::Constant(constant) => render_constant(constant),
    }
}

fn render_record(record: &Record) -> String {
    if record.entries.is_empty() {
        return "{}".to_string();
    }
    let entries: Vec<String> = record
        .entries
        .iter()
        .map(|(key, value)| format!("{}: {}", quoted(key), render_item(value)))
        .collect();
    format!("{{\n{}\n}}", entries.join(",\n"))
}

fn render_array(arr: &ArrayExpr) -> String {
    let items: Vec<String> = arr.items.iter().map(render_item).collect();
    format!("[{}]", items.join(", "))
}

fn quoted(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn render_constant(constant: &Constant) -> String {
    match constant {
        Constant::Undefined => "undefined".to_string(),
        Constant::Null => "null".to_string(),
        Constant::Bool(b) => b.to_string(),
        Constant::Number(n) => {
            let beyond_safe = n.as_u64().is_some_and(|v| v > MAX_SAFE_INTEGER)
                || n.as_i64().is_some_and(|v| v.unsigned_abs() > MAX_SAFE_INTEGER);
            if beyond_safe { format!("{n}n") } else { n.to_string() }
        }
        Constant::String(s) => quoted(s),
        Constant::Regex(source) => regex_literal(source),
        Constant::Json(value) => value.to_string(),
    }
}

/// `/source/`, escaping what would terminate the literal early.
fn regex_literal(source: &str) -> String {
    if source.is_empty() {
        return "/(?:)/".to_string();
    }
    let mut out = String::with_capacity(source.len() + 2);
    out.push('/');
    let mut escaped = false;
    let mut in_class = false;
    for ch in source.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '/' if !escaped && !in_class => out.push_str("\\/"),
            _ => out.push(ch),
        }
        if !escaped {
            match ch {
                '[' => in_class = true,
                ']' => in_class = false,
                _ => {}
            }
        }
        escaped = ch == '\\' && !escaped;
    }
    if escaped {
        out.push('\\');
    }
    out.push('/');
    out
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{call, intersection, not, unknown, Func};
    use serde_json::json;

    fn root(body: Call) -> Root {
        Root { defines: vec![Define { name: "Root".into(), body }] }
    }

    #[test]
    fn preamble_and_single_define() {
        let out = render(&root(unknown()), &EmitOptions::default());
        assert_eq!(
            out,
            "import * as ss from 'superstruct'\n\
             import * as std from '@schema-to-superstruct/std'\n\
             \n\
             export const Root = ss.unknown();\n"
        );
    }

    #[test]
    fn namespaces_follow_helper_set() {
        let e = intersection([call(Func::String, []), not(unknown())]);
        assert_eq!(render_call(&e), "ss.intersection([ss.string(), std.not(ss.unknown())])");
    }

    #[test]
    fn records_quote_keys_one_per_line() {
        let record: Record = [("a", unknown()), ("we\"ird", call(Func::Optional, [unknown().into()]))]
            .into_iter()
            .collect();
        assert_eq!(
            render_call(&call(Func::Type, [record.into()])),
            "ss.type({\n\"a\": ss.unknown(),\n\"we\\\"ird\": ss.optional(ss.unknown())\n})"
        );
        assert_eq!(render_record(&Record::default()), "{}");
    }

    #[test]
    fn constants() {
        assert_eq!(render_constant(&Constant::Undefined), "undefined");
        assert_eq!(render_constant(&Constant::Null), "null");
        assert_eq!(render_constant(&Constant::Bool(true)), "true");
        assert_eq!(render_constant(&Constant::from(5u64)), "5");
        assert_eq!(render_constant(&Constant::Number(serde_json::Number::from_f64(0.5).unwrap())), "0.5");
        assert_eq!(render_constant(&Constant::from(9007199254740992u64)), "9007199254740992n");
        assert_eq!(render_constant(&Constant::Number((-9007199254740993i64).into())), "-9007199254740993n");
        assert_eq!(render_constant(&Constant::from(9007199254740991u64)), "9007199254740991");
        assert_eq!(render_constant(&Constant::String("a\"b".into())), "\"a\\\"b\"");
        assert_eq!(render_constant(&Constant::Json(json!({"exclusive": true}))), "{\"exclusive\":true}");
    }

    #[test]
    fn regex_literals() {
        assert_eq!(regex_literal("^a+$"), "/^a+$/");
        assert_eq!(regex_literal("a/b"), "/a\\/b/");
        assert_eq!(regex_literal("a\\/b"), "/a\\/b/");
        assert_eq!(regex_literal("[/]"), "/[/]/");
        assert_eq!(regex_literal(""), "/(?:)/");
    }

    #[test]
    fn regex_literals_stay_on_one_line_and_terminated() {
        assert_eq!(regex_literal("a\u{2028}b\u{2029}c"), "/a\\u2028b\\u2029c/");
        assert_eq!(regex_literal("a\nb"), "/a\\nb/");
        assert_eq!(regex_literal("a\\"), "/a\\\\/");
        assert_eq!(regex_literal("a\\\\"), "/a\\\\/");
    }

    #[test]
    fn custom_module_names() {
        let options = EmitOptions { superstruct_module: "ss-fork".into(), std_module: "./std".into() };
        assert!(render(&root(unknown()), &options).starts_with("import * as ss from 'ss-fork'\nimport * as std from './std'\n\n"));
    }
}
