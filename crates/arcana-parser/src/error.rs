use std::fmt;

use arcana_common::{format_diagnostic, Span};

/// One of the stable `P`-family parse error codes from the error model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorCode {
    ExpectedToken,
    UnexpectedToken,
    MainSubjectoRequired,
    MainNihilRequired,
    UnsupportedSyntax,
    InvalidMove,
    UnknownLoopHeader,
    LoopPropositioRequired,
    NihilNotExpr,
    Internal,
}

impl ParseErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorCode::ExpectedToken => "P0001_EXPECTED_TOKEN",
            ParseErrorCode::UnexpectedToken => "P0002_UNEXPECTED_TOKEN",
            ParseErrorCode::MainSubjectoRequired => "P0010_MAIN_SUBJECTO_REQUIRED",
            ParseErrorCode::MainNihilRequired => "P0011_MAIN_NIHIL_REQUIRED",
            ParseErrorCode::UnsupportedSyntax => "P0020_UNSUPPORTED_SYNTAX",
            ParseErrorCode::InvalidMove => "P0021_INVALID_MOVE",
            ParseErrorCode::UnknownLoopHeader => "P0030_UNKNOWN_LOOP_HEADER",
            ParseErrorCode::LoopPropositioRequired => "P0031_LOOP_PROPOSITIO_REQUIRED",
            ParseErrorCode::NihilNotExpr => "P0040_NIHIL_NOT_EXPR",
            ParseErrorCode::Internal => "P0099_INTERNAL",
        }
    }
}

/// A parse-time failure: a stable code, a human message, and the
/// approximate span where it was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(code: ParseErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }

    /// Wrap an arbitrary failure as `P0099_INTERNAL`, preserving the
    /// original message, the way the pipeline driver does for anything
    /// that escapes a stage as a non-Arcana error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ParseErrorCode::Internal, message, Span::unknown())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_diagnostic(self.code.code(), &self.message, self.span))
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_span() {
        let e = ParseError::new(ParseErrorCode::UnexpectedToken, "boom", Span::new(2, 4));
        assert_eq!(e.to_string(), "[P0002_UNEXPECTED_TOKEN] boom (at 2:4)");
    }

    #[test]
    fn internal_has_no_span() {
        let e = ParseError::internal("leaked error");
        assert_eq!(e.to_string(), "[P0099_INTERNAL] leaked error");
    }
}
