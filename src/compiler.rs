//! Pipeline driver: parse → normalize → translate → optimize → render.

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::emit::{render, EmitOptions};
use crate::json_ast;
use crate::normalize::normalize;
use crate::optimize::optimize;
use crate::schema::Schema;
use crate::translate::translate_root;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub optimize: bool,
    /// Export name source when the root schema has no `$anchor`.
    pub root_name: String,
    pub emit: EmitOptions,
}

/// Result of one compilation. `output` is `None` whenever a fatal
/// diagnostic was recorded.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub output: Option<String>,
    pub diagnostics: Diagnostics,
}

impl Default for Options {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Options {
    fn from(config: &Config) -> Self {
        Self {
            optimize: config.optimize,
            root_name: config.root_name.clone(),
            emit: config.emit_options(),
        }
    }
}

impl Compilation {
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.has_fatal()
    }
}

pub fn compile(source: &str, options: &Options) -> Compilation {
    let mut diagnostics = Diagnostics::new();
    let output = analyze(source, &mut diagnostics).map(|schema| {
        let root = translate_root(&schema, &options.root_name);
        tracing::trace!("expression tree: {root:#?}");
        let root = if options.optimize { optimize(root) } else { root };
        render(&root, &options.emit)
    });
    Compilation { output, diagnostics }
}

/// Parse and normalize only.
pub fn check(source: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    analyze(source, &mut diagnostics);
    diagnostics
}

fn analyze(source: &str, diagnostics: &mut Diagnostics) -> Option<Schema> {
    let document = match json_ast::parse(source) {
        Ok(document) => document,
        Err(error) => {
            diagnostics.push(error.into());
            return None;
        }
    };
    match normalize(&document.root, diagnostics) {
        Ok(schema) => {
            tracing::debug!(
                keywords = schema.keywords.len(),
                unsupported = schema.unsupported.len(),
                "normalized schema"
            );
            tracing::trace!("schema: {schema:#?}");
            Some(schema)
        }
        Err(fatal) => {
            diagnostics.push(fatal);
            None
        }
    }
}
