//! Compile BlockScript files and render the result

use super::{CliError, program_to_json, tokens_to_json};
use crate::{Block, CompileError, Parser, Token, lexer, output};
use std::fs;
use std::path::{Path, PathBuf};

/// What to print after a successful compile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Emit {
    /// The syntax tree as JSON
    #[default]
    Ast,
    /// The program regenerated as BlockScript source
    Source,
    /// The token stream as JSON
    Tokens,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Path of the source file
    pub file: PathBuf,
    pub emit: Emit,
    /// Pretty-print the output
    pub pretty: bool,
    /// Write token and tree dumps next to the source file
    pub debug: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub struct CheckResult {
    pub output: String,
    /// Debug artifacts written to disk
    pub artifacts: Vec<PathBuf>,
}

/// Both stages of a successful compile.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub tokens: Vec<Token>,
    pub program: Block,
}

/// Lexes and parses `source`; `file` names it in diagnostics.
pub fn compile(source: &str, file: &str) -> Result<Compiled, CliError> {
    let tokens = lex(source, file)?;
    parse_tokens(tokens, source, file)
}

fn compile_error(error: CompileError, source: &str, file: &str) -> CliError {
    CliError::Compile {
        error,
        source: source.to_string(),
        file: file.to_string(),
    }
}

fn lex(source: &str, file: &str) -> Result<Vec<Token>, CliError> {
    lexer::tokenize(source).map_err(|e| compile_error(e, source, file))
}

fn parse_tokens(tokens: Vec<Token>, source: &str, file: &str) -> Result<Compiled, CliError> {
    let program = Parser::from_tokens(tokens.clone())
        .parse()
        .map_err(|e| compile_error(e, source, file))?;

    Ok(Compiled { tokens, program })
}

pub fn render_output(compiled: &Compiled, emit: Emit, pretty: bool) -> Result<String, CliError> {
    let json = match emit {
        Emit::Source if pretty => return Ok(output::to_source(&compiled.program)),
        Emit::Source => return Ok(output::to_source_compact(&compiled.program)),
        Emit::Ast => program_to_json(&compiled.program),
        Emit::Tokens => tokens_to_json(&compiled.tokens),
    };
    let text = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(text)
}

/// Execute a blockscript check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let source = fs::read_to_string(&options.file)?;
    let file = options.file.display().to_string();
    tracing::info!(file = %file, bytes = source.len(), "compiling");

    let tokens = lex(&source, &file)?;

    let mut artifacts = vec![];
    if options.debug {
        // Written before parsing so the dump survives a parse error.
        let path = artifact_path(&options.file, "tokens");
        write_json(&path, &tokens_to_json(&tokens))?;
        artifacts.push(path);
    }

    let compiled = parse_tokens(tokens, &source, &file)?;

    if options.debug {
        let path = artifact_path(&options.file, "ast");
        write_json(&path, &program_to_json(&compiled.program))?;
        artifacts.push(path);
    }

    let output = render_output(&compiled, options.emit, options.pretty)?;
    tracing::debug!(artifacts = artifacts.len(), "compile finished");
    Ok(CheckResult { output, artifacts })
}

/// `dir/name.bs` -> `dir/name.<kind>.json`
fn artifact_path(file: &Path, kind: &str) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "program".to_string());
    file.with_file_name(format!("{}.{}.json", stem, kind))
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    tracing::debug!(path = %path.display(), "wrote debug artifact");
    Ok(())
}
