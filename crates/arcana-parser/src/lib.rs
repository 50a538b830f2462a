//! Arcana's abstract syntax tree and recursive-descent parser.

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::Program;
pub use error::{ParseError, ParseErrorCode};
pub use parser::{parse, Parser};

#[cfg(test)]
mod tests {
    use arcana_common::TypeName;
    use arcana_lexer::lex;

    use super::*;
    use crate::ast::{Expr, Stmt};
    use crate::error::ParseErrorCode;

    fn parse_src(src: &str) -> Result<Program, ParseError> {
        parse(lex(src))
    }

    const SKELETON: &str = "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {{}};</DOCTRINA>";

    #[test]
    fn parses_minimal_skeleton() {
        let program = parse_src(SKELETON.replace("{{}}", "").as_str()).unwrap();
        assert!(program.introductio.stmts.is_empty());
        assert!(program.doctrina.main.body.is_empty());
    }

    #[test]
    fn every_if_stmt_has_non_null_else_body() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              VCON i: inte = 1;
              SI propositio:(i == 1) { VERUM{ i = 2; } FALSUM{} };
            };
            </DOCTRINA>
        "#;
        let program = parse_src(src).unwrap();
        match &program.doctrina.main.body[1] {
            Stmt::IfStmt { else_body, .. } => assert!(else_body.is_empty()),
            other => panic!("expected IfStmt, got {other:?}"),
        }
    }

    #[test]
    fn call_requires_outer_parens_even_for_one_arg() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              indicant() <- ("hello arkhe");
            };
            </DOCTRINA>
        "#;
        let program = parse_src(src).unwrap();
        match &program.doctrina.main.body[0] {
            Stmt::CallStmt { call, .. } => match call.as_ref() {
                Expr::CallExpr { name, args, .. } => {
                    assert_eq!(name, "indicant");
                    assert_eq!(args.len(), 1);
                }
                other => panic!("expected CallExpr, got {other:?}"),
            },
            other => panic!("expected CallStmt, got {other:?}"),
        }
    }

    #[test]
    fn move_statement_parses_both_identifiers() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              VCON a: inte = 1;
              VCON b: inte = 2;
              a <- b;
            };
            </DOCTRINA>
        "#;
        let program = parse_src(src).unwrap();
        match &program.doctrina.main.body[2] {
            Stmt::Move { dst, src, .. } => {
                assert_eq!(dst, "a");
                assert_eq!(src, "b");
            }
            other => panic!("expected Move, got {other:?}"),
        }
    }

    #[test]
    fn legacy_plus_equals_is_rejected() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              i += 1;
            };
            </DOCTRINA>
        "#;
        let err = parse_src(src).unwrap_err();
        assert_eq!(err.code, ParseErrorCode::UnsupportedSyntax);
    }

    #[test]
    fn nihil_as_expression_is_rejected() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              VCON a: inte = nihil;
            };
            </DOCTRINA>
        "#;
        let err = parse_src(src).unwrap_err();
        assert_eq!(err.code, ParseErrorCode::NihilNotExpr);
    }

    #[test]
    fn comparison_chain_of_two_is_not_allowed() {
        // `a < b < c` parses `a < b` as the left comparison then leaves
        // `< c` dangling, which the statement terminator check rejects.
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              VCON ok: verum = 1 < 2 < 3;
            };
            </DOCTRINA>
        "#;
        assert!(parse_src(src).is_err());
    }

    #[test]
    fn pow_is_right_associative() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              VCON a: inte = 2 ** 3 ** 2;
            };
            </DOCTRINA>
        "#;
        let program = parse_src(src).unwrap();
        match &program.doctrina.main.body[0] {
            Stmt::VarDecl { init: Some(Expr::BinaryOp { left, right, .. }), typ, .. } => {
                assert_eq!(*typ, TypeName::Inte);
                assert!(matches!(left.as_ref(), Expr::IntLit { value: 2, .. }));
                assert!(matches!(right.as_ref(), Expr::BinaryOp { .. }));
            }
            other => panic!("expected VarDecl with BinaryOp init, got {other:?}"),
        }
    }

    #[test]
    fn loop_header_defaults_are_absent_until_semantic_pass() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              RECURSIO (propositio:(1 == 1)) -> { effigium; };
            };
            </DOCTRINA>
        "#;
        let program = parse_src(src).unwrap();
        match &program.doctrina.main.body[0] {
            Stmt::LoopStmt { quota, step, .. } => {
                assert!(quota.is_none());
                assert!(step.is_none());
            }
            other => panic!("expected LoopStmt, got {other:?}"),
        }
    }

    #[test]
    fn statement_shape_snapshot_for_fizzbuzz_body() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              VCON i: inte = 1;
              RECURSIO (propositio:(i <= 15), quota: 20) -> {
                SI propositio:((i % 15) == 0) {
                  VERUM { indicant() <- ("FizzBuzz"); }
                  FALSUM { indicant() <- (i); }
                };
                i = i + 1;
              };
            };
            </DOCTRINA>
        "#;
        let program = parse_src(src).unwrap();
        let shape = program
            .doctrina
            .main
            .body
            .iter()
            .map(stmt_shape)
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(shape, @r###"
        VarDecl
        LoopStmt
        "###);
    }

    fn stmt_shape(stmt: &Stmt) -> &'static str {
        match stmt {
            Stmt::NihilStmt { .. } => "NihilStmt",
            Stmt::VarDecl { .. } => "VarDecl",
            Stmt::Assign { .. } => "Assign",
            Stmt::Move { .. } => "Move",
            Stmt::CallStmt { .. } => "CallStmt",
            Stmt::ExprStmt { .. } => "ExprStmt",
            Stmt::IfStmt { .. } => "IfStmt",
            Stmt::LoopStmt { .. } => "LoopStmt",
            Stmt::BreakStmt { .. } => "BreakStmt",
            Stmt::ContinueStmt { .. } => "ContinueStmt",
            Stmt::FuncDecl { .. } => "FuncDecl",
            Stmt::RditusStmt { .. } => "RditusStmt",
            Stmt::ImportStmt { .. } => "ImportStmt",
        }
    }

    #[test]
    fn block_comment_is_skipped_without_affecting_parse() {
        let src = r#"
            <FONS></FONS>
            <INTRODUCTIO></INTRODUCTIO>
            <DOCTRINA>
            FCON subjecto: nihil () -> {
              <cmt> this is commentary, not executed </cmt>
              nihil;
            };
            </DOCTRINA>
        "#;
        let program = parse_src(src).unwrap();
        assert_eq!(program.doctrina.main.body.len(), 1);
        assert!(matches!(program.doctrina.main.body[0], Stmt::NihilStmt { .. }));
    }
}
