use arcana_common::{Ctrl, Keyword, TokenKind, TypeName};

use super::Parser;
use crate::ast::{DoctrinaSection, Expr, FonsSection, IntroSection, MainFunction, Stmt};
use crate::error::{ParseError, ParseErrorCode};

impl Parser {
    pub(crate) fn parse_fons(&mut self) -> Result<FonsSection, ParseError> {
        self.eat(TokenKind::FonsOpen, "<FONS>")?;
        // The `<FONS>` section currently accepts no statements; it is a
        // reserved, always-empty placeholder for future imports.
        self.eat(TokenKind::FonsClose, "</FONS>")?;
        Ok(FonsSection { imports: Vec::new() })
    }

    pub(crate) fn parse_introductio(&mut self) -> Result<IntroSection, ParseError> {
        self.eat(TokenKind::IntroOpen, "<INTRODUCTIO>")?;
        let mut stmts = Vec::new();
        while !self.at(&TokenKind::IntroClose) {
            if self.skip_block_comment()? {
                continue;
            }
            stmts.push(self.parse_stmt()?);
        }
        self.eat(TokenKind::IntroClose, "</INTRODUCTIO>")?;
        Ok(IntroSection { stmts })
    }

    pub(crate) fn parse_doctrina(&mut self) -> Result<DoctrinaSection, ParseError> {
        self.eat(TokenKind::DoctrinaOpen, "<DOCTRINA>")?;
        let main = self.parse_main()?;
        self.eat(TokenKind::DoctrinaClose, "</DOCTRINA>")?;
        Ok(DoctrinaSection { main })
    }

    fn parse_main(&mut self) -> Result<MainFunction, ParseError> {
        self.eat_keyword(Keyword::Fcon)?;
        let name_tok = self.eat(TokenKind::Ident, "identifier")?;
        if name_tok.text != "subjecto" {
            return Err(ParseError::new(
                ParseErrorCode::MainSubjectoRequired,
                "Nulla scriptura sine themate est.",
                name_tok.span,
            ));
        }
        self.eat(TokenKind::Colon, ":")?;
        if self.at(&TokenKind::Nihil) {
            self.bump();
        } else {
            return Err(ParseError::new(
                ParseErrorCode::MainNihilRequired,
                "Subiectum veritatem non dat.",
                self.span(),
            ));
        }
        self.eat(TokenKind::LParen, "(")?;
        self.eat(TokenKind::RParen, ")")?;
        self.eat(TokenKind::Arrow, "->")?;
        let body = self.parse_block_stmts()?;
        self.eat(TokenKind::Semicolon, ";")?;
        Ok(MainFunction { body })
    }

    /// If the current token opens a `<cmt>` block, consume up to and
    /// including its matching `</cmt>` and return `true`. Block comments
    /// are tokenized but have no semantic effect: the parser discards
    /// whatever lies between the tags without attempting to parse it as
    /// statements.
    pub(crate) fn skip_block_comment(&mut self) -> Result<bool, ParseError> {
        if !self.at(&TokenKind::CmtOpen) {
            return Ok(false);
        }
        self.bump();
        let mut depth = 1u32;
        loop {
            if self.at(&TokenKind::Eof) {
                return Err(ParseError::new(
                    ParseErrorCode::UnexpectedToken,
                    "<cmt> without matching </cmt>.",
                    self.span(),
                ));
            }
            if self.at(&TokenKind::CmtOpen) {
                depth += 1;
            } else if self.at(&TokenKind::CmtClose) {
                depth -= 1;
                self.bump();
                if depth == 0 {
                    break;
                }
                continue;
            }
            self.bump();
        }
        Ok(true)
    }

    pub(crate) fn parse_block_stmts(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.eat(TokenKind::LBrace, "{")?;
        let mut stmts = Vec::new();
        while !self.at(&TokenKind::RBrace) {
            if self.skip_block_comment()? {
                continue;
            }
            stmts.push(self.parse_stmt()?);
        }
        self.eat(TokenKind::RBrace, "}")?;
        Ok(stmts)
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.span();

        if self.at(&TokenKind::Nihil) {
            self.bump();
            self.eat(TokenKind::Semicolon, ";")?;
            return Ok(Stmt::NihilStmt { span: start });
        }

        if self.at(&TokenKind::Ctrl(Ctrl::Effigium)) {
            self.bump();
            self.eat(TokenKind::Semicolon, ";")?;
            return Ok(Stmt::BreakStmt { span: start });
        }

        if self.at(&TokenKind::Ctrl(Ctrl::Proximum)) {
            self.bump();
            self.eat(TokenKind::Semicolon, ";")?;
            return Ok(Stmt::ContinueStmt { span: start });
        }

        if self.at(&TokenKind::Keyword(Keyword::Vcon)) {
            return self.parse_vardecl();
        }

        if self.at(&TokenKind::Keyword(Keyword::Si)) {
            return self.parse_if();
        }

        if self.at(&TokenKind::Keyword(Keyword::Recursio)) {
            return self.parse_loop();
        }

        // call with a type-named built-in head: ORDINATA ( ) <- ( args ) ;
        // (`ordinata`, `inte`, ... reclassify to `TokenKind::Type`, so they
        // never reach the `Ident` dispatch below.)
        if matches!(self.cur().kind, TokenKind::Type(_))
            && self.peek(1).kind == TokenKind::LParen
            && self.peek(2).kind == TokenKind::RParen
            && self.peek(3).kind == TokenKind::Flow
        {
            let call = self.parse_call_expr()?;
            self.eat(TokenKind::Semicolon, ";")?;
            return Ok(Stmt::CallStmt {
                span: start,
                call: Box::new(call),
            });
        }

        if self.at(&TokenKind::Ident) {
            // Reject the legacy `i += 1;` pattern explicitly: no `+=`
            // in this version.
            if self.peek(1).kind == TokenKind::Plus && self.peek(2).kind == TokenKind::Assign {
                return Err(ParseError::new(
                    ParseErrorCode::UnsupportedSyntax,
                    "'+=' is not supported in this version. Use: i = i + 1;",
                    start,
                ));
            }

            // call: IDENT ( ) <- ( args... ) ;
            if self.peek(1).kind == TokenKind::LParen
                && self.peek(2).kind == TokenKind::RParen
                && self.peek(3).kind == TokenKind::Flow
            {
                let call = self.parse_call_expr()?;
                self.eat(TokenKind::Semicolon, ";")?;
                return Ok(Stmt::CallStmt {
                    span: start,
                    call: Box::new(call),
                });
            }

            // move: IDENT <- IDENT ;
            if self.peek(1).kind == TokenKind::Flow {
                let dst = self.bump().text;
                self.bump(); // <-
                if !self.at(&TokenKind::Ident) {
                    return Err(ParseError::new(
                        ParseErrorCode::InvalidMove,
                        "Aquam sine vase infundere non potes.",
                        self.span(),
                    ));
                }
                let src = self.bump().text;
                self.eat(TokenKind::Semicolon, ";")?;
                return Ok(Stmt::Move { span: start, dst, src });
            }

            // assign: IDENT = expr ;
            if self.peek(1).kind == TokenKind::Assign {
                let name = self.bump().text;
                self.bump(); // =
                let value = self.parse_expr()?;
                self.eat(TokenKind::Semicolon, ";")?;
                return Ok(Stmt::Assign { span: start, name, value });
            }

            let expr = self.parse_expr()?;
            self.eat(TokenKind::Semicolon, ";")?;
            return Ok(Stmt::ExprStmt { span: start, expr });
        }

        Err(self.unexpected())
    }

    fn parse_vardecl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.span();
        self.eat_keyword(Keyword::Vcon)?;
        let name = self.eat(TokenKind::Ident, "identifier")?.text;
        self.eat(TokenKind::Colon, ":")?;
        let typ = self.eat_type()?;
        let init = if self.at(&TokenKind::Assign) {
            self.bump();
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.eat(TokenKind::Semicolon, ";")?;
        Ok(Stmt::VarDecl {
            span: start,
            name,
            typ,
            init,
        })
    }

    fn eat_type(&mut self) -> Result<TypeName, ParseError> {
        match &self.cur().kind {
            TokenKind::Type(t) => {
                let t = *t;
                self.bump();
                Ok(t)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// The name at the head of a call: a plain identifier, or one of the
    /// type-named built-ins (`ordinata`, `inte`, ...) that the lexer
    /// reclassifies to `TokenKind::Type`.
    fn eat_call_name(&mut self) -> Result<String, ParseError> {
        match &self.cur().kind {
            TokenKind::Ident | TokenKind::Type(_) => Ok(self.bump().text),
            _ => Err(self.unexpected()),
        }
    }

    pub(crate) fn parse_call_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        let name = self.eat_call_name()?;
        self.eat(TokenKind::LParen, "(")?;
        self.eat(TokenKind::RParen, ")")?;
        self.eat(TokenKind::Flow, "<-")?;
        let args = self.parse_args_tuple()?;
        Ok(Expr::CallExpr { span: start, name, args })
    }

    /// The right-hand side of a call is always a parenthesized, possibly
    /// empty, comma-separated argument list: even a single argument
    /// requires the outer parentheses.
    fn parse_args_tuple(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.eat(TokenKind::LParen, "(")?;
        let mut args = Vec::new();
        if !self.at(&TokenKind::RParen) {
            args.push(self.parse_expr()?);
            while self.at(&TokenKind::Comma) {
                self.bump();
                args.push(self.parse_expr()?);
            }
        }
        self.eat(TokenKind::RParen, ")")?;
        Ok(args)
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.span();
        self.eat_keyword(Keyword::Si)?;
        let cond = self.parse_propositio_clause()?;

        self.eat(TokenKind::LBrace, "{")?;
        self.eat_keyword(Keyword::Verum)?;
        let then_body = self.parse_block_stmts()?;

        self.eat_keyword(Keyword::Falsum)?;
        let else_body = self.parse_block_stmts()?;

        self.eat(TokenKind::RBrace, "}")?;
        self.eat(TokenKind::Semicolon, ";")?;
        Ok(Stmt::IfStmt {
            span: start,
            cond,
            then_body,
            else_body,
        })
    }

    fn parse_propositio_clause(&mut self) -> Result<Expr, ParseError> {
        self.eat(TokenKind::Ctrl(Ctrl::Propositio), "propositio")?;
        self.eat(TokenKind::Colon, ":")?;
        self.eat(TokenKind::LParen, "(")?;
        let cond = self.parse_expr()?;
        self.eat(TokenKind::RParen, ")")?;
        Ok(cond)
    }

    fn parse_loop(&mut self) -> Result<Stmt, ParseError> {
        let start = self.span();
        self.eat_keyword(Keyword::Recursio)?;
        self.eat(TokenKind::LParen, "(")?;

        let mut cond: Option<Expr> = None;
        let mut quota: Option<Expr> = None;
        let mut step: Option<Expr> = None;

        let mut first = true;
        while !self.at(&TokenKind::RParen) {
            if !first {
                self.eat(TokenKind::Comma, ",")?;
            }
            first = false;

            let key = match &self.cur().kind {
                TokenKind::Ctrl(c) => *c,
                _ => {
                    return Err(ParseError::new(
                        ParseErrorCode::UnknownLoopHeader,
                        format!(
                            "Quaslibet designationes falsas firmiter repudiabimus.: {}",
                            self.cur().text
                        ),
                        self.span(),
                    ))
                }
            };
            self.bump();
            self.eat(TokenKind::Colon, ":")?;

            match key {
                Ctrl::Propositio => {
                    self.eat(TokenKind::LParen, "(")?;
                    cond = Some(self.parse_expr()?);
                    self.eat(TokenKind::RParen, ")")?;
                }
                Ctrl::Quota => quota = Some(self.parse_expr()?),
                Ctrl::Acceleratio => step = Some(self.parse_expr()?),
                _ => {
                    return Err(ParseError::new(
                        ParseErrorCode::UnknownLoopHeader,
                        "Quaslibet designationes falsas firmiter repudiabimus.",
                        self.span(),
                    ))
                }
            }
        }

        self.eat(TokenKind::RParen, ")")?;
        self.eat(TokenKind::Arrow, "->")?;
        let body = self.parse_block_stmts()?;
        self.eat(TokenKind::Semicolon, ";")?;

        let cond = cond.ok_or_else(|| {
            ParseError::new(
                ParseErrorCode::LoopPropositioRequired,
                "Propositiones in vita necessariae sunt.",
                start,
            )
        })?;

        Ok(Stmt::LoopStmt {
            span: start,
            cond,
            quota,
            step,
            body,
        })
    }
}
