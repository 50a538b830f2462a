//! Arcana's abstract syntax tree.
//!
//! Every node is a variant of a plain enum, not a class hierarchy: a
//! missing match arm anywhere the tree is visited is a compiler error,
//! not a runtime surprise. Each variant carries its own `Span`.

use arcana_common::{Span, TypeName};

/// A binary operator. `Ne` is Arcana's `><` ("not equal"); the rest read
/// the way they print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Aut,
    Et,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

/// A unary prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Non,
    Plus,
    Neg,
}

/// An expression node. Every variant carries its own span.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name { span: Span, id: String },
    IntLit { span: Span, value: i64 },
    RealLit { span: Span, value: f64 },
    StringLit { span: Span, value: String },
    /// `cantus'...${expr}...'` interpolated string template. No grammar
    /// production emits this yet (reserved; see `DictLit`/`IndexExpr`).
    CantusLit { span: Span, template: String },
    /// `{ key: value, ... }`. No grammar production emits this yet.
    DictLit { span: Span, pairs: Vec<(Expr, Expr)> },
    Paren { span: Span, inner: Box<Expr> },
    /// `target[key]`. No grammar production emits this yet.
    IndexExpr { span: Span, target: Box<Expr>, key: Box<Expr> },
    UnaryOp { span: Span, op: UnOp, expr: Box<Expr> },
    BinaryOp { span: Span, op: BinOp, left: Box<Expr>, right: Box<Expr> },
    CallExpr { span: Span, name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Name { span, .. }
            | Expr::IntLit { span, .. }
            | Expr::RealLit { span, .. }
            | Expr::StringLit { span, .. }
            | Expr::CantusLit { span, .. }
            | Expr::DictLit { span, .. }
            | Expr::Paren { span, .. }
            | Expr::IndexExpr { span, .. }
            | Expr::UnaryOp { span, .. }
            | Expr::BinaryOp { span, .. }
            | Expr::CallExpr { span, .. } => *span,
        }
    }

    /// The integer value if this is an `IntLit`, or a unary `+`/`-`
    /// applied to one, else `None`. Used by the semantic analyzer's
    /// literal validation (quota/step): `-1` is a literal in spirit even
    /// though the parser represents it as `UnaryOp(Neg, IntLit(1))`.
    pub fn as_int_literal(&self) -> Option<i64> {
        match self {
            Expr::IntLit { value, .. } => Some(*value),
            Expr::UnaryOp { op: UnOp::Neg, expr, .. } => expr.as_int_literal().map(|v| -v),
            Expr::UnaryOp { op: UnOp::Plus, expr, .. } => expr.as_int_literal(),
            _ => None,
        }
    }

    /// The numeric value if this is an `IntLit`/`RealLit`, or a unary
    /// `+`/`-` applied to one, else `None`.
    pub fn as_numeric_literal(&self) -> Option<f64> {
        match self {
            Expr::IntLit { value, .. } => Some(*value as f64),
            Expr::RealLit { value, .. } => Some(*value),
            Expr::UnaryOp { op: UnOp::Neg, expr, .. } => expr.as_numeric_literal().map(|v| -v),
            Expr::UnaryOp { op: UnOp::Plus, expr, .. } => expr.as_numeric_literal(),
            _ => None,
        }
    }
}

/// A function argument declaration, reserved for `FuncDecl`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgDecl {
    pub name: String,
    pub typ: TypeName,
}

/// A statement node. Every variant carries its own span.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `nihil;` — a no-op statement.
    NihilStmt { span: Span },
    VarDecl {
        span: Span,
        name: String,
        typ: TypeName,
        init: Option<Expr>,
    },
    Assign { span: Span, name: String, value: Expr },
    /// `dst <- src;`. `src` is cleared by the emitter after the value
    /// transfers; both sides are bare identifiers, never expressions.
    Move { span: Span, dst: String, src: String },
    CallStmt { span: Span, call: Box<Expr> },
    ExprStmt { span: Span, expr: Expr },
    IfStmt {
        span: Span,
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    LoopStmt {
        span: Span,
        cond: Expr,
        quota: Option<Expr>,
        step: Option<Expr>,
        body: Vec<Stmt>,
    },
    BreakStmt { span: Span },
    ContinueStmt { span: Span },
    /// Reserved for future user-defined functions; no parser rule yet.
    FuncDecl {
        span: Span,
        name: String,
        return_type: TypeName,
        args: Vec<ArgDecl>,
        body: Vec<Stmt>,
    },
    /// `REDITUS expr;`, valid only inside a `FuncDecl`. No parser rule yet.
    RditusStmt { span: Span, value: Expr },
    /// A parsed-but-inert `<FONS>` import line. No parser rule yet.
    ImportStmt { span: Span, raw: String },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::NihilStmt { span }
            | Stmt::VarDecl { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::Move { span, .. }
            | Stmt::CallStmt { span, .. }
            | Stmt::ExprStmt { span, .. }
            | Stmt::IfStmt { span, .. }
            | Stmt::LoopStmt { span, .. }
            | Stmt::BreakStmt { span }
            | Stmt::ContinueStmt { span }
            | Stmt::FuncDecl { span, .. }
            | Stmt::RditusStmt { span, .. }
            | Stmt::ImportStmt { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FonsSection {
    pub imports: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntroSection {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainFunction {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctrinaSection {
    pub main: MainFunction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub fons: FonsSection,
    pub introductio: IntroSection,
    pub doctrina: DoctrinaSection,
}
