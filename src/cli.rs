//! CLI: compile | check
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::compiler::{self, Options};
use crate::config::Config;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile a JSON Schema (2020-12) into superstruct validators
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CommandLineInterface {
    /// verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile a schema and emit a TypeScript module
    Compile(CompileOut),
    /// validate a schema and report diagnostics, without emitting code
    Check(CheckIn),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Schema file
    input: PathBuf,
}

#[derive(clap::Parser, Debug)]
struct CompileOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .ts file (stdout if omitted)
    out: Option<PathBuf>,

    /// JSON config file (see `Config`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// skip the single-arm combinator collapse
    #[arg(long)]
    no_optimize: bool,

    /// export name used when the root schema has no `$anchor`
    #[arg(long)]
    root_name: Option<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckIn {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read schema file {}", self.input.display()))
    }

    fn display_name(&self) -> String {
        self.input.to_string_lossy().to_string()
    }
}

impl CompileOut {
    fn options(&self) -> anyhow::Result<Options> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if self.no_optimize {
            config.optimize = false;
        }
        if let Some(root_name) = &self.root_name {
            config.root_name = root_name.clone();
        }
        Ok(Options::from(&config))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Diagnostics always go to stderr; a fatal one yields exit status 1.
    pub fn run(&self) -> anyhow::Result<ExitCode> {
        match &self.cmd {
            Command::Compile(target) => {
                let options = target.options()?;
                let source = target.input_settings.load()?;
                tracing::info!(input = %target.input_settings.display_name(), "compiling");

                let compilation = compiler::compile(&source, &options);
                eprint!("{}", compilation.diagnostics.report(&target.input_settings.display_name(), &source));
                let Some(output) = compilation.output else {
                    return Ok(ExitCode::FAILURE);
                };

                match target.out.as_ref() {
                    Some(out) => write_output(out, &output)?,
                    None => print!("{output}"),
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Check(target) => {
                let source = target.input_settings.load()?;
                let diagnostics = compiler::check(&source);
                eprint!("{}", diagnostics.report(&target.input_settings.display_name(), &source));
                if diagnostics.has_fatal() {
                    Ok(ExitCode::FAILURE)
                } else {
                    Ok(ExitCode::SUCCESS)
                }
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
