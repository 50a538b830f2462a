use serde::Serialize;

use crate::span::Span;

/// One of the closed set of type names usable in a `VCON` declaration.
///
/// `nihil` is deliberately excluded: it is legal only as the entry
/// function's return type and is tracked as its own token kind, not as
/// a `TypeName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeName {
    Inte,
    Real,
    Verum,
    Filum,
    Ordinata,
    Catalogus,
}

impl TypeName {
    /// Parse a lexeme into a `TypeName`, or `None` if it isn't one of the
    /// closed set.
    pub fn from_lexeme(s: &str) -> Option<Self> {
        Some(match s {
            "inte" => TypeName::Inte,
            "real" => TypeName::Real,
            "verum" => TypeName::Verum,
            "filum" => TypeName::Filum,
            "ordinata" => TypeName::Ordinata,
            "catalogus" => TypeName::Catalogus,
            _ => return None,
        })
    }

    /// The lexeme that produced this type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Inte => "inte",
            TypeName::Real => "real",
            TypeName::Verum => "verum",
            TypeName::Filum => "filum",
            TypeName::Ordinata => "ordinata",
            TypeName::Catalogus => "catalogus",
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reserved-word keywords that introduce a statement or main function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Keyword {
    Fcon,
    Vcon,
    Ccon,
    Principium,
    Si,
    Verum,
    Falsum,
    Recursio,
    Reditus,
}

impl Keyword {
    pub fn from_lexeme(s: &str) -> Option<Self> {
        Some(match s {
            "FCON" => Keyword::Fcon,
            "VCON" => Keyword::Vcon,
            "CCON" => Keyword::Ccon,
            "PRINCIPIUM" => Keyword::Principium,
            "SI" => Keyword::Si,
            "VERUM" => Keyword::Verum,
            "FALSUM" => Keyword::Falsum,
            "RECURSIO" => Keyword::Recursio,
            "REDITUS" => Keyword::Reditus,
            _ => return None,
        })
    }
}

/// Control-flow label words: loop header keys, boolean connectives, and
/// the bare `effigium`/`proximum` jump statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ctrl {
    Effigium,
    Proximum,
    Et,
    Aut,
    Non,
    Propositio,
    Quota,
    Acceleratio,
}

impl Ctrl {
    pub fn from_lexeme(s: &str) -> Option<Self> {
        Some(match s {
            "effigium" => Ctrl::Effigium,
            "proximum" => Ctrl::Proximum,
            "et" => Ctrl::Et,
            "aut" => Ctrl::Aut,
            "non" => Ctrl::Non,
            "propositio" => Ctrl::Propositio,
            "quota" => Ctrl::Quota,
            "acceleratio" => Ctrl::Acceleratio,
            _ => return None,
        })
    }
}

/// The complete vocabulary for the Arcana lexer.
///
/// Identifiers are reclassified after the initial scan into keywords,
/// the `nihil` special word, section tags, types, control labels, the
/// `cantus` marker, or plain identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    // ── Section tags ──────────────────────────────────────────────────
    FonsOpen,
    FonsClose,
    IntroOpen,
    IntroClose,
    DoctrinaOpen,
    DoctrinaClose,
    CmtOpen,
    CmtClose,

    // ── Reclassified identifier families ─────────────────────────────
    Keyword(Keyword),
    /// `nihil` — special, neither keyword nor type.
    Nihil,
    Type(TypeName),
    Ctrl(Ctrl),
    /// `cantus` — interpolated string literal marker.
    Cantus,
    Ident,

    // ── Literals ──────────────────────────────────────────────────────
    IntLit,
    RealLit,
    /// Value has already had its surrounding quotes stripped.
    StringLit,

    // ── Operators (multi-char before single-char in the scan order) ──
    /// `->`
    Arrow,
    /// `<-`
    Flow,
    /// `><`
    Ne,
    /// `==`
    EqEq,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `**`
    Pow,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,

    // ── Punctuation ───────────────────────────────────────────────────
    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
    Comma,

    /// A character (or run of characters) that matched no pattern.
    Mismatch,
    Eof,
}

impl TokenKind {
    /// True for any variant that should never reach the parser as a valid
    /// token - `Mismatch` is lexed so the parser can report it positionally
    /// (spec: "the lexer itself does not fail").
    pub fn is_mismatch(&self) -> bool {
        matches!(self, TokenKind::Mismatch)
    }
}

/// A single lexed token: its kind, source span, and raw lexeme text.
///
/// `text` is the lexeme as written for most kinds, but for `StringLit` it
/// is the string's contents with the surrounding quotes already removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, span, "")
    }
}

/// Reclassify a scanned identifier lexeme into its final token kind.
///
/// Order matters and matches the spec's reclassification list: keywords,
/// then `nihil`, then section tags, then types, then control labels, then
/// `cantus`, falling back to a plain identifier.
pub fn classify_ident(lexeme: &str) -> TokenKind {
    if let Some(kw) = Keyword::from_lexeme(lexeme) {
        return TokenKind::Keyword(kw);
    }
    if lexeme == "nihil" {
        return TokenKind::Nihil;
    }
    if let Some(section) = section_tag_kind(lexeme) {
        return section;
    }
    if let Some(ty) = TypeName::from_lexeme(lexeme) {
        return TokenKind::Type(ty);
    }
    if let Some(ctrl) = Ctrl::from_lexeme(lexeme) {
        return TokenKind::Ctrl(ctrl);
    }
    if lexeme == "cantus" {
        return TokenKind::Cantus;
    }
    TokenKind::Ident
}

fn section_tag_kind(lexeme: &str) -> Option<TokenKind> {
    Some(match lexeme {
        "<FONS>" => TokenKind::FonsOpen,
        "</FONS>" => TokenKind::FonsClose,
        "<INTRODUCTIO>" => TokenKind::IntroOpen,
        "</INTRODUCTIO>" => TokenKind::IntroClose,
        "<DOCTRINA>" => TokenKind::DoctrinaOpen,
        "</DOCTRINA>" => TokenKind::DoctrinaClose,
        "<cmt>" => TokenKind::CmtOpen,
        "</cmt>" => TokenKind::CmtClose,
        _ => return None,
    })
}
