use arcana_common::{Ctrl, TokenKind};

use super::Parser;
use crate::ast::{BinOp, Expr, UnOp};
use crate::error::{ParseError, ParseErrorCode};

/// Precedence (low to high), all left-associative except `**` (right):
/// `aut < et < non(unary) < comparison < +,- < *,/,% < ** < primary`.
/// At most one comparison operator is allowed per chain: `a < b < c` is
/// not a valid expression.
impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.at(&TokenKind::Ctrl(Ctrl::Aut)) {
            let span = self.span();
            self.bump();
            let right = self.parse_and()?;
            left = Expr::BinaryOp {
                span,
                op: BinOp::Aut,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while self.at(&TokenKind::Ctrl(Ctrl::Et)) {
            let span = self.span();
            self.bump();
            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                span,
                op: BinOp::Et,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.at(&TokenKind::Ctrl(Ctrl::Non)) {
            let span = self.span();
            self.bump();
            let expr = self.parse_unary()?;
            return Ok(Expr::UnaryOp {
                span,
                op: UnOp::Non,
                expr: Box::new(expr),
            });
        }
        if self.at(&TokenKind::Plus) {
            let span = self.span();
            self.bump();
            let expr = self.parse_unary()?;
            return Ok(Expr::UnaryOp {
                span,
                op: UnOp::Plus,
                expr: Box::new(expr),
            });
        }
        if self.at(&TokenKind::Minus) {
            let span = self.span();
            self.bump();
            let expr = self.parse_unary()?;
            return Ok(Expr::UnaryOp {
                span,
                op: UnOp::Neg,
                expr: Box::new(expr),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_add()?;
        let op = match self.cur().kind {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::Ne => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Ge => BinOp::Ge,
            _ => return Ok(left),
        };
        let span = self.span();
        self.bump();
        let right = self.parse_add()?;
        Ok(Expr::BinaryOp {
            span,
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_add(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_mul()?;
        loop {
            let op = match self.cur().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let span = self.span();
            self.bump();
            let right = self.parse_mul()?;
            left = Expr::BinaryOp {
                span,
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_mul(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_pow()?;
        loop {
            let op = match self.cur().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };
            let span = self.span();
            self.bump();
            let right = self.parse_pow()?;
            left = Expr::BinaryOp {
                span,
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_pow(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_primary()?;
        if self.at(&TokenKind::Pow) {
            let span = self.span();
            self.bump();
            // Right-associative: recurse back into parse_pow, not primary.
            let right = self.parse_pow()?;
            return Ok(Expr::BinaryOp {
                span,
                op: BinOp::Pow,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();

        // A call expression is also valid as a primary: NAME () <- (args)
        // The head may be a plain identifier or one of the type-named
        // built-ins (`ordinata`, `inte`, ...): those lexemes reclassify to
        // `TokenKind::Type` in the lexer, but are still callable.
        if matches!(self.cur().kind, TokenKind::Ident | TokenKind::Type(_))
            && self.peek(1).kind == TokenKind::LParen
            && self.peek(2).kind == TokenKind::RParen
            && self.peek(3).kind == TokenKind::Flow
        {
            return self.parse_call_expr();
        }

        if self.at(&TokenKind::Ident) {
            let id = self.bump().text;
            return Ok(Expr::Name { span: start, id });
        }

        if self.at(&TokenKind::IntLit) {
            let text = self.bump().text;
            let value = text.parse::<i64>().map_err(|_| ParseError::internal(format!("invalid integer literal: {text}")))?;
            return Ok(Expr::IntLit { span: start, value });
        }

        if self.at(&TokenKind::RealLit) {
            let text = self.bump().text;
            let value = text.parse::<f64>().map_err(|_| ParseError::internal(format!("invalid real literal: {text}")))?;
            return Ok(Expr::RealLit { span: start, value });
        }

        if self.at(&TokenKind::StringLit) {
            let value = self.bump().text;
            return Ok(Expr::StringLit { span: start, value });
        }

        if self.at(&TokenKind::LParen) {
            self.bump();
            let inner = self.parse_expr()?;
            self.eat(TokenKind::RParen, ")")?;
            return Ok(Expr::Paren {
                span: start,
                inner: Box::new(inner),
            });
        }

        if self.at(&TokenKind::Nihil) {
            return Err(ParseError::new(
                ParseErrorCode::NihilNotExpr,
                "nihil is not an expression; use 'nihil;' as a statement.",
                start,
            ));
        }

        Err(self.unexpected())
    }
}
