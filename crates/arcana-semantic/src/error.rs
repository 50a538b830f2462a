use std::fmt;

use arcana_common::{format_diagnostic, Span};

/// One of the stable `E`-family semantic error codes, plus the two
/// bare-string codes (`ARG_COUNT_MISMATCH`, `TYPE_MISMATCH`) the error
/// model table lists without a numbered `E` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorCode {
    BreakOutsideLoop,
    ContinueOutsideLoop,
    LoopNestTooDeep,
    LoopStepNotPositive,
    LoopQuotaInvalid,
    ArgCountMismatch,
    TypeMismatch,
}

impl SemanticErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SemanticErrorCode::BreakOutsideLoop => "E0101_BREAK_OUTSIDE_LOOP",
            SemanticErrorCode::ContinueOutsideLoop => "E0102_CONTINUE_OUTSIDE_LOOP",
            SemanticErrorCode::LoopNestTooDeep => "E0103_LOOP_NEST_TOO_DEEP",
            SemanticErrorCode::LoopStepNotPositive => "E0110_LOOP_STEP_NOT_POSITIVE",
            SemanticErrorCode::LoopQuotaInvalid => "E0111_LOOP_QUOTA_INVALID",
            SemanticErrorCode::ArgCountMismatch => "ARG_COUNT_MISMATCH",
            SemanticErrorCode::TypeMismatch => "TYPE_MISMATCH",
        }
    }
}

/// A semantic-analysis failure: a stable code, a human message, and the
/// offending node's span.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticError {
    pub code: SemanticErrorCode,
    pub message: String,
    pub span: Span,
}

impl SemanticError {
    pub fn new(code: SemanticErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_diagnostic(self.code.code(), &self.message, self.span))
    }
}

impl std::error::Error for SemanticError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_span() {
        let e = SemanticError::new(SemanticErrorCode::TypeMismatch, "boom", Span::new(1, 1));
        assert_eq!(e.to_string(), "[TYPE_MISMATCH] boom (at 1:1)");
    }
}
