//! `--vestigium` diagnostic rendering via `ariadne`.
//!
//! `ariadne` wants byte ranges; Arcana's `Span` is `(line, col)`, so we
//! resolve a span back to a byte offset by walking the source once.
//! This is CLI sugar only — the stable `[<CODE>] <message> (at L:C)`
//! line from `CompileError`'s `Display` impl is always printed too.

use ariadne::{Label, Report, ReportKind, Source};
use arcana_common::Span;

use crate::pipeline::CompileError;

fn byte_offset(source: &str, span: Span) -> Option<usize> {
    if !span.is_known() {
        return None;
    }
    let mut offset = 0usize;
    for (line_no, line) in source.split('\n').enumerate() {
        if line_no as u32 + 1 == span.line {
            let col = (span.col.saturating_sub(1)) as usize;
            return Some(offset + col.min(line.len()));
        }
        offset += line.len() + 1;
    }
    None
}

/// Print a caret diagnostic for `err` against `source` to stderr. Falls
/// back to the plain `Display` line when the span can't be resolved to
/// a byte offset (unknown span, or line out of range).
pub fn report(source: &str, file_name: &str, err: &CompileError) {
    let span = err.span();
    let Some(start) = byte_offset(source, span) else {
        eprintln!("{err}");
        return;
    };
    let end = (start + 1).min(source.len().max(1));

    let result = Report::<(&str, std::ops::Range<usize>)>::build(ReportKind::Error, (file_name, start..end))
        .with_message(err.code())
        .with_label(Label::new((file_name, start..end)).with_message(err.message()))
        .finish()
        .eprint((file_name, Source::from(source)));

    if result.is_err() {
        eprintln!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_first_line_first_column() {
        assert_eq!(byte_offset("abc\ndef", Span::new(1, 1)), Some(0));
    }

    #[test]
    fn resolves_second_line() {
        assert_eq!(byte_offset("abc\ndef", Span::new(2, 2)), Some(5));
    }

    #[test]
    fn unknown_span_resolves_to_none() {
        assert_eq!(byte_offset("abc", Span::unknown()), None);
    }
}
