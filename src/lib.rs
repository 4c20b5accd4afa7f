//! JSON Schema (2020-12) → superstruct validator compiler.
//!
//! ```text
//! source ─parse─▶ json_ast ─normalize─▶ schema ─translate─▶ expr ─optimize─▶ expr ─emit─▶ TypeScript
//! ```
//!
//! [`compiler::compile`] runs the whole pipeline; the stages are public for
//! callers that want an intermediate tree.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod expr;
pub mod json_ast;
pub mod normalize;
pub mod optimize;
pub mod path_de;
pub mod schema;
pub mod translate;

pub use compiler::{compile, Compilation, Options};
