use std::fmt;

use crate::span::Span;

/// Render an error the way every surfaced Arcana error must print:
/// `[<CODE>] <message> (at <line>:<col>)` when the span is known, else
/// `[<CODE>] <message>`.
///
/// Shared by `ParseError`, `SemanticError`, and the emitted program's
/// runtime error type so all three stages agree on one wire format.
pub fn format_diagnostic(code: &str, message: &str, span: Span) -> String {
    if span.is_known() {
        format!("[{code}] {message} (at {}:{})", span.line, span.col)
    } else {
        format!("[{code}] {message}")
    }
}

/// Helper for implementing `Display` on an error type that carries
/// `{ code, message, span }`.
pub struct Diagnostic<'a> {
    pub code: &'a str,
    pub message: &'a str,
    pub span: Span,
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_diagnostic(self.code, self.message, self.span))
    }
}
