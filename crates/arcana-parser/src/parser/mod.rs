//! Recursive-descent parser with a Pratt-style expression sub-parser.

mod expr;
mod stmt;

use arcana_common::{Keyword, Span, Token, TokenKind};

use crate::error::{ParseError, ParseErrorCode};

/// Parses a complete token stream (as produced by `arcana_lexer::lex`)
/// into a `Program`. Parsing does not recover: the first error aborts.
pub struct Parser {
    toks: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(toks: Vec<Token>) -> Self {
        Self { toks, pos: 0 }
    }

    pub(crate) fn cur(&self) -> &Token {
        &self.toks[self.pos.min(self.toks.len() - 1)]
    }

    pub(crate) fn peek(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.toks.len() - 1);
        &self.toks[idx]
    }

    pub(crate) fn span(&self) -> Span {
        self.cur().span
    }

    pub(crate) fn bump(&mut self) -> Token {
        let tok = self.cur().clone();
        if self.pos < self.toks.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn at(&self, kind: &TokenKind) -> bool {
        &self.cur().kind == kind
    }

    pub(crate) fn eat(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.cur().kind == kind {
            Ok(self.bump())
        } else {
            Err(self.expected(what))
        }
    }

    pub(crate) fn eat_keyword(&mut self, kw: Keyword) -> Result<Token, ParseError> {
        self.eat(TokenKind::Keyword(kw), keyword_name(kw))
    }

    fn expected(&self, what: &str) -> ParseError {
        let got = token_description(self.cur());
        ParseError::new(
            ParseErrorCode::ExpectedToken,
            format!("Accipe {got}, pro {what}."),
            self.span(),
        )
    }

    pub(crate) fn unexpected(&self) -> ParseError {
        ParseError::new(
            ParseErrorCode::UnexpectedToken,
            format!("Quid est hoc! Quid faciam?: {}", token_description(self.cur())),
            self.span(),
        )
    }

    /// Parse the whole program: the three mandatory sections, then `EOF`.
    pub fn parse_program(&mut self) -> Result<crate::ast::Program, ParseError> {
        let fons = self.parse_fons()?;
        let introductio = self.parse_introductio()?;
        let doctrina = self.parse_doctrina()?;
        self.eat(TokenKind::Eof, "EOF")?;
        Ok(crate::ast::Program {
            fons,
            introductio,
            doctrina,
        })
    }
}

fn keyword_name(kw: Keyword) -> &'static str {
    match kw {
        Keyword::Fcon => "FCON",
        Keyword::Vcon => "VCON",
        Keyword::Ccon => "CCON",
        Keyword::Principium => "PRINCIPIUM",
        Keyword::Si => "SI",
        Keyword::Verum => "VERUM",
        Keyword::Falsum => "FALSUM",
        Keyword::Recursio => "RECURSIO",
        Keyword::Reditus => "REDITUS",
    }
}

fn token_description(tok: &Token) -> String {
    format!("{:?}:{}", tok.kind, tok.text)
}

/// Parse a full token stream into a `Program`.
pub fn parse(toks: Vec<Token>) -> Result<crate::ast::Program, ParseError> {
    Parser::new(toks).parse_program()
}
