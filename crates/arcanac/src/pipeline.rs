//! The compiler pipeline driver: `compile_source`/`compile_file` glue
//! the four stage crates together and normalize their errors into one
//! `CompileError`.

use std::fmt;
use std::fs;
use std::path::Path;

use arcana_common::Span;
use arcana_parser::ParseError;
use arcana_semantic::{SemanticError, SemanticResult};

/// Either stage's failure, carrying through its own code/message/span.
#[derive(Debug)]
pub enum CompileError {
    Parse(ParseError),
    Semantic(SemanticError),
}

impl CompileError {
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Parse(e) => e.code.code(),
            CompileError::Semantic(e) => e.code.code(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CompileError::Parse(e) => e.span,
            CompileError::Semantic(e) => e.span,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CompileError::Parse(e) => &e.message,
            CompileError::Semantic(e) => &e.message,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Parse(e) => e.fmt(f),
            CompileError::Semantic(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

impl From<SemanticError> for CompileError {
    fn from(e: SemanticError) -> Self {
        CompileError::Semantic(e)
    }
}

/// Lex, parse, and semantically analyze `text`, returning the normalized
/// `Program` and any warnings. Does not emit: call [`arcana_emit::emit`]
/// on `result.program` to get runnable Python source.
pub fn compile_source(text: &str, max_loop_depth: u32) -> Result<SemanticResult, CompileError> {
    let tokens = arcana_lexer::lex(text);
    let program = arcana_parser::parse(tokens)?;
    Ok(arcana_semantic::analyze(program, max_loop_depth)?)
}

/// Read `path` as UTF-8 and delegate to [`compile_source`]. Any I/O
/// failure is wrapped as a `P0099_INTERNAL` parse error, matching the
/// pipeline's policy of never letting a non-Arcana error escape raw.
pub fn compile_file(path: &Path, max_loop_depth: u32) -> Result<SemanticResult, CompileError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CompileError::Parse(ParseError::internal(format!("{}: {e}", path.display()))))?;
    compile_source(&text, max_loop_depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_source_emits_python_for_hello_arkhe() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              indicant() <- ("hello arkhe");
            };
            </DOCTRINA>
        "#;
        let result = compile_source(src, 3).unwrap();
        let out = arcana_emit::emit(&result.program);
        assert!(out.contains(r#"print("hello arkhe")"#));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn compile_source_surfaces_semantic_error_code() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> { effigium; };
            </DOCTRINA>
        "#;
        let err = compile_source(src, 3).unwrap_err();
        assert_eq!(err.code(), "E0101_BREAK_OUTSIDE_LOOP");
    }

    #[test]
    fn compile_file_wraps_missing_file_as_internal() {
        let err = compile_file(Path::new("/nonexistent/arcana/file.arkhe"), 3).unwrap_err();
        assert_eq!(err.code(), "P0099_INTERNAL");
    }
}
