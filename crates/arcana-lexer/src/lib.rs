// Arcana lexer -- tokenizer for the Arcana language.

mod cursor;

use cursor::Cursor;

use arcana_common::{classify_ident, Span, Token, TokenKind};

/// The section-tag literals, longest first so a prefix never shadows a
/// longer match (`</FONS>` before `<FONS>` would also work here since
/// they differ at the second character, but longest-first keeps the
/// invariant obvious if more tags are ever added).
const SECTION_TAGS: &[&str] = &[
    "</INTRODUCTIO>",
    "<INTRODUCTIO>",
    "</DOCTRINA>",
    "<DOCTRINA>",
    "</FONS>",
    "<FONS>",
    "</cmt>",
    "<cmt>",
];

/// The Arcana lexer. Converts source text into a stream of tokens.
///
/// Wraps a [`Cursor`] for character-level iteration and implements
/// `Iterator<Item = Token>` so callers can consume tokens lazily or
/// collect them into a `Vec`.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    emitted_eof: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            emitted_eof: false,
        }
    }

    /// Tokenize the entire source into a `Vec<Token>`, including the
    /// trailing `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    fn span(&self) -> Span {
        let (line, col) = self.cursor.pos();
        Span::new(line, col)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(c) if c == ' ' || c == '\t' || c == '\n' => {
                    self.cursor.advance();
                }
                Some('/') if self.cursor.peek_next() == Some('/') && self.cursor.peek_at(2) == Some('/') => {
                    // "///" line comment, discarded to end of line.
                    while let Some(c) = self.cursor.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Try to consume `lit` at the current position by peeking ahead
    /// char-by-char; only advances the cursor on a full match.
    fn match_literal(&mut self, lit: &str) -> bool {
        for (i, expected) in lit.chars().enumerate() {
            if self.cursor.peek_at(i) != Some(expected) {
                return false;
            }
        }
        for _ in lit.chars() {
            self.cursor.advance();
        }
        true
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        let start = self.span();

        let Some(c) = self.cursor.peek() else {
            return Token::eof(start);
        };

        // Section tags are scanned as whole literals before the generic
        // `<`/`>` single-character operators get a chance at them.
        if c == '<' {
            for tag in SECTION_TAGS {
                if self.match_literal(tag) {
                    return Token::new(section_tag_kind(tag), start, *tag);
                }
            }
        }

        // Multi-character operators before their single-character prefixes.
        for (lit, kind) in MULTI_CHAR_OPS {
            if self.match_literal(lit) {
                return Token::new(kind.clone(), start, *lit);
            }
        }

        if c == '"' || c == '\'' {
            return self.lex_string(c, start);
        }

        if c.is_ascii_digit() {
            return self.lex_number(start);
        }

        if is_ident_start(c) {
            return self.lex_ident(start);
        }

        if let Some(kind) = single_char_kind(c) {
            self.cursor.advance();
            return Token::new(kind, start, c.to_string());
        }

        // Unmatched character: emitted as Mismatch so the parser can
        // report it positionally. The lexer itself never fails.
        self.cursor.advance();
        Token::new(TokenKind::Mismatch, start, c.to_string())
    }

    fn lex_string(&mut self, quote: char, start: Span) -> Token {
        self.cursor.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.cursor.peek() {
                None => break,
                Some(c) if c == quote => {
                    self.cursor.advance();
                    break;
                }
                Some(c) => {
                    value.push(c);
                    self.cursor.advance();
                }
            }
        }
        Token::new(TokenKind::StringLit, start, value)
    }

    fn lex_number(&mut self, start: Span) -> Token {
        let mut text = String::new();
        while let Some(c) = self.cursor.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }
        let mut is_real = false;
        if self.cursor.peek() == Some('.') && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_real = true;
            text.push('.');
            self.cursor.advance();
            while let Some(c) = self.cursor.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.cursor.advance();
                } else {
                    break;
                }
            }
        }
        let kind = if is_real { TokenKind::RealLit } else { TokenKind::IntLit };
        Token::new(kind, start, text)
    }

    fn lex_ident(&mut self, start: Span) -> Token {
        let mut text = String::new();
        while let Some(c) = self.cursor.peek() {
            if is_ident_continue(c) {
                text.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }
        let kind = classify_ident(&text);
        Token::new(kind, start, text)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let tok = self.next_token();
        if tok.kind == TokenKind::Eof {
            self.emitted_eof = true;
        }
        Some(tok)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn section_tag_kind(tag: &str) -> TokenKind {
    match tag {
        "<FONS>" => TokenKind::FonsOpen,
        "</FONS>" => TokenKind::FonsClose,
        "<INTRODUCTIO>" => TokenKind::IntroOpen,
        "</INTRODUCTIO>" => TokenKind::IntroClose,
        "<DOCTRINA>" => TokenKind::DoctrinaOpen,
        "</DOCTRINA>" => TokenKind::DoctrinaClose,
        "<cmt>" => TokenKind::CmtOpen,
        "</cmt>" => TokenKind::CmtClose,
        _ => unreachable!("section tag list is exhaustive"),
    }
}

fn single_char_kind(c: char) -> Option<TokenKind> {
    Some(match c {
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        ':' => TokenKind::Colon,
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        '=' => TokenKind::Assign,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        _ => return None,
    })
}

/// Multi-character operators, longest first, each checked before the
/// single-character fallback in [`single_char_kind`] ever runs.
const MULTI_CHAR_OPS: &[(&str, TokenKind)] = &[
    ("->", TokenKind::Arrow),
    ("<-", TokenKind::Flow),
    ("><", TokenKind::Ne),
    ("==", TokenKind::EqEq),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("**", TokenKind::Pow),
];

/// Normalize line endings to `\n` and tokenize.
///
/// This is the entry point the parser and pipeline driver call; it is the
/// only place line-ending normalization happens.
pub fn lex(source: &str) -> Vec<Token> {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
    Lexer::tokenize(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn ends_with_exactly_one_eof_and_no_mismatch() {
        let toks = lex("<FONS></FONS>");
        assert_eq!(toks.last().unwrap().kind, TokenKind::Eof);
        assert!(toks.iter().all(|t| !t.kind.is_mismatch()));
    }

    #[test]
    fn section_tags_before_generic_angle_brackets() {
        let k = kinds("<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA></DOCTRINA>");
        assert_eq!(
            k,
            vec![
                TokenKind::FonsOpen,
                TokenKind::FonsClose,
                TokenKind::IntroOpen,
                TokenKind::IntroClose,
                TokenKind::DoctrinaOpen,
                TokenKind::DoctrinaClose,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn multi_char_operators_before_single_char_prefixes() {
        let k = kinds("<- -> >< >= <= == **");
        assert_eq!(
            k,
            vec![
                TokenKind::Flow,
                TokenKind::Arrow,
                TokenKind::Ne,
                TokenKind::Ge,
                TokenKind::Le,
                TokenKind::EqEq,
                TokenKind::Pow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn bare_angle_and_equals_still_lex_as_single_char() {
        let k = kinds("< > =");
        assert_eq!(k, vec![TokenKind::Lt, TokenKind::Gt, TokenKind::Assign, TokenKind::Eof]);
    }

    #[test]
    fn string_literal_strips_quotes() {
        let toks = lex(r#""hello arkhe""#);
        assert_eq!(toks[0].kind, TokenKind::StringLit);
        assert_eq!(toks[0].text, "hello arkhe");
    }

    #[test]
    fn line_comment_is_discarded() {
        let toks = lex("/// a comment\nVCON");
        assert_eq!(toks.len(), 2); // VCON, EOF
        assert_eq!(toks[0].text, "VCON");
    }

    #[test]
    fn block_comment_tags_are_tokenized_not_stripped() {
        let k = kinds("<cmt> VCON </cmt>");
        assert_eq!(k[0], TokenKind::CmtOpen);
        assert_eq!(*k.last().unwrap(), TokenKind::Eof);
        assert!(k.contains(&TokenKind::CmtClose));
    }

    #[test]
    fn unknown_character_is_mismatch() {
        let toks = lex("@");
        assert_eq!(toks[0].kind, TokenKind::Mismatch);
    }

    #[test]
    fn integer_and_real_literals() {
        let toks = lex("42 3.14");
        assert_eq!(toks[0].kind, TokenKind::IntLit);
        assert_eq!(toks[0].text, "42");
        assert_eq!(toks[1].kind, TokenKind::RealLit);
        assert_eq!(toks[1].text, "3.14");
    }

    #[test]
    fn identifiers_reclassify_keywords_types_and_ctrl() {
        let k = kinds("VCON inte propositio subjecto");
        assert!(matches!(k[0], TokenKind::Keyword(_)));
        assert!(matches!(k[1], TokenKind::Type(_)));
        assert!(matches!(k[2], TokenKind::Ctrl(_)));
        assert_eq!(k[3], TokenKind::Ident);
    }

    #[test]
    fn spans_track_line_and_col_monotonically() {
        let toks = lex("VCON\ni");
        assert_eq!(toks[0].span.line, 1);
        assert_eq!(toks[0].span.col, 1);
        assert_eq!(toks[1].span.line, 2);
        assert_eq!(toks[1].span.col, 1);
    }

    #[test]
    fn whitespace_and_comments_still_advance_position() {
        let toks = lex("   \n/// skip\nVCON");
        assert_eq!(toks[0].text, "VCON");
        assert_eq!(toks[0].span.line, 3);
    }

    #[test]
    fn token_kind_stream_snapshot_for_a_loop_header() {
        let rendered = kinds("RECURSIO (propositio:(1 == 1), quota: 2) -> {}")
            .into_iter()
            .map(|k| format!("{k:?}"))
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(rendered, @r###"
        Keyword(Recursio)
        LParen
        Ctrl(Propositio)
        Colon
        LParen
        IntLit
        EqEq
        IntLit
        RParen
        Comma
        Ctrl(Quota)
        Colon
        IntLit
        RParen
        Arrow
        LBrace
        RBrace
        Eof
        "###);
    }
}
