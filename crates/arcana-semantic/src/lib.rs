//! Semantic analysis: loop-nesting and break/continue placement checks,
//! `LoopStmt` header normalization, and a minimal type environment for
//! `VCON`/assignment and built-in arity checks.

pub mod builtins;
pub mod env;
pub mod error;

use arcana_common::{Span, TypeName};
use arcana_parser::ast::{Expr, Program, Stmt};

use env::TypeEnv;
pub use error::{SemanticError, SemanticErrorCode};

/// Result of a successful semantic pass: the same `Program`, now
/// normalized in place (loop defaults injected), plus any warnings.
/// Warnings are never populated today; the slot is reserved.
pub struct SemanticResult {
    pub program: Program,
    pub warnings: Vec<String>,
}

struct Context {
    loop_depth: u32,
    max_loop_depth: u32,
    warnings: Vec<String>,
    env: TypeEnv,
}

/// Run semantic checks and normalizations over `program`, consuming and
/// returning it (mutated in place) on success.
pub fn analyze(mut program: Program, max_loop_depth: u32) -> Result<SemanticResult, SemanticError> {
    let mut ctx = Context {
        loop_depth: 0,
        max_loop_depth,
        warnings: Vec::new(),
        env: TypeEnv::new(),
    };

    for stmt in &mut program.introductio.stmts {
        sem_stmt(stmt, &mut ctx)?;
    }
    for stmt in &mut program.doctrina.main.body {
        sem_stmt(stmt, &mut ctx)?;
    }

    Ok(SemanticResult {
        program,
        warnings: ctx.warnings,
    })
}

fn sem_stmt(stmt: &mut Stmt, ctx: &mut Context) -> Result<(), SemanticError> {
    match stmt {
        Stmt::BreakStmt { span } => {
            if ctx.loop_depth == 0 {
                return Err(SemanticError::new(
                    SemanticErrorCode::BreakOutsideLoop,
                    "Nullus discessus est extra reditum.",
                    *span,
                ));
            }
            Ok(())
        }
        Stmt::ContinueStmt { span } => {
            if ctx.loop_depth == 0 {
                return Err(SemanticError::new(
                    SemanticErrorCode::ContinueOutsideLoop,
                    "Nulla continuitas extra limites est.",
                    *span,
                ));
            }
            Ok(())
        }
        Stmt::NihilStmt { .. } => Ok(()),
        Stmt::VarDecl { name, typ, init, span } => {
            ctx.env.declare(name, *typ);
            if let Some(init) = init {
                sem_expr(init, ctx)?;
                if let Some(rhs_t) = infer_expr_type(init, &ctx.env) {
                    if rhs_t != *typ {
                        return Err(SemanticError::new(
                            SemanticErrorCode::TypeMismatch,
                            "Feretrum neque nimis magnum neque nimis parvum esse debet.",
                            *span,
                        ));
                    }
                }
            }
            Ok(())
        }
        Stmt::Assign { name, value, span } => {
            sem_expr(value, ctx)?;
            let lhs_t = ctx.env.get(name);
            let rhs_t = infer_expr_type(value, &ctx.env);
            if let (Some(lhs_t), Some(rhs_t)) = (lhs_t, rhs_t) {
                if lhs_t != rhs_t {
                    return Err(SemanticError::new(
                        SemanticErrorCode::TypeMismatch,
                        "Feretrum neque nimis magnum neque nimis parvum esse debet.",
                        *span,
                    ));
                }
            }
            Ok(())
        }
        // Grammar already restricts both sides to identifiers; nothing
        // further to check.
        Stmt::Move { .. } => Ok(()),
        Stmt::CallStmt { call, .. } => sem_expr(call, ctx),
        Stmt::ExprStmt { expr, .. } => sem_expr(expr, ctx),
        Stmt::IfStmt { cond, then_body, else_body, .. } => {
            sem_expr(cond, ctx)?;
            for s in then_body {
                sem_stmt(s, ctx)?;
            }
            for s in else_body {
                sem_stmt(s, ctx)?;
            }
            Ok(())
        }
        Stmt::LoopStmt { .. } => sem_loop_stmt(stmt, ctx),
        Stmt::ImportStmt { .. } => Ok(()),
        Stmt::FuncDecl { body, .. } => {
            for s in body {
                sem_stmt(s, ctx)?;
            }
            Ok(())
        }
        Stmt::RditusStmt { value, .. } => sem_expr(value, ctx),
    }
}

fn sem_loop_stmt(stmt: &mut Stmt, ctx: &mut Context) -> Result<(), SemanticError> {
    let Stmt::LoopStmt { span, cond, quota, step, body } = stmt else {
        unreachable!("sem_loop_stmt called on non-LoopStmt");
    };

    let next_depth = ctx.loop_depth + 1;
    if next_depth > ctx.max_loop_depth {
        return Err(SemanticError::new(
            SemanticErrorCode::LoopNestTooDeep,
            "Tres reincarnationes, si plures, maledictio est.",
            *span,
        ));
    }

    sem_expr(cond, ctx)?;

    // Normalize defaults: this, and the step default below, are the
    // only in-place AST mutations anywhere in the pipeline.
    if quota.is_none() {
        *quota = Some(default_int(*span, 100));
    } else {
        sem_expr(quota.as_mut().unwrap(), ctx)?;
    }

    if step.is_none() {
        *step = Some(default_int(*span, 1));
    } else {
        sem_expr(step.as_mut().unwrap(), ctx)?;
    }

    let quota_expr = quota.as_ref().unwrap();
    if let Some(qv) = quota_expr.as_int_literal() {
        if qv < 0 {
            return Err(SemanticError::new(
                SemanticErrorCode::LoopQuotaInvalid,
                "Rectus valor, recta via.",
                quota_expr.span(),
            ));
        }
    }

    let step_expr = step.as_ref().unwrap();
    if let Some(sv) = step_expr.as_numeric_literal() {
        if sv <= 0.0 {
            return Err(SemanticError::new(
                SemanticErrorCode::LoopStepNotPositive,
                "stationarius accelerationis",
                step_expr.span(),
            ));
        }
    }
    // A non-literal step defers to the runtime guard the emitter embeds.

    ctx.loop_depth = next_depth;
    let result = (|| {
        for s in body.iter_mut() {
            sem_stmt(s, ctx)?;
        }
        Ok(())
    })();
    ctx.loop_depth -= 1;
    result
}

fn default_int(span: Span, value: i64) -> Expr {
    Expr::IntLit { span, value }
}

fn sem_expr(expr: &mut Expr, ctx: &mut Context) -> Result<(), SemanticError> {
    match expr {
        Expr::Name { .. } | Expr::IntLit { .. } | Expr::RealLit { .. } | Expr::StringLit { .. } | Expr::CantusLit { .. } => Ok(()),
        Expr::Paren { inner, .. } => sem_expr(inner, ctx),
        Expr::UnaryOp { expr, .. } => sem_expr(expr, ctx),
        Expr::BinaryOp { left, right, .. } => {
            sem_expr(left, ctx)?;
            sem_expr(right, ctx)
        }
        Expr::IndexExpr { target, key, .. } => {
            sem_expr(target, ctx)?;
            sem_expr(key, ctx)
        }
        Expr::DictLit { pairs, .. } => {
            for (k, v) in pairs {
                sem_expr(k, ctx)?;
                sem_expr(v, ctx)?;
            }
            Ok(())
        }
        Expr::CallExpr { .. } => sem_call_expr(expr, ctx),
    }
}

fn sem_call_expr(expr: &mut Expr, ctx: &mut Context) -> Result<(), SemanticError> {
    let Expr::CallExpr { name, args, span } = expr else {
        unreachable!("sem_call_expr called on non-CallExpr");
    };
    for a in args.iter_mut() {
        sem_expr(a, ctx)?;
    }

    if let Some(arity) = builtins::arity_of(name) {
        let n = args.len();
        if n < arity.min || arity.max.is_some_and(|max| n > max) {
            return Err(SemanticError::new(
                SemanticErrorCode::ArgCountMismatch,
                "Numeri non congruunt. Fortasse mus eos abstulit.",
                *span,
            ));
        }
    }
    Ok(())
}

/// Infer the static type of an expression where the spec defines a rule
/// for doing so; `None` otherwise (never an error by itself, only used
/// to decide whether a `TYPE_MISMATCH` check applies).
fn infer_expr_type(expr: &Expr, env: &TypeEnv) -> Option<TypeName> {
    match expr {
        Expr::IntLit { .. } => Some(TypeName::Inte),
        Expr::RealLit { .. } => Some(TypeName::Real),
        Expr::StringLit { .. } => Some(TypeName::Filum),
        Expr::Name { id, .. } => env.get(id),
        Expr::CallExpr { name, .. } => builtins::return_type_of(name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_parser::parse;

    fn analyzed(src: &str) -> Result<SemanticResult, SemanticError> {
        let program = parse(arcana_lexer::lex(src)).expect("parses");
        analyze(program, 3)
    }

    fn wrap(body: &str) -> String {
        format!(
            "<FONS></FONS><INTRODUCTIO></INTRODUCTIO><DOCTRINA>FCON subjecto: nihil () -> {{{body}}};</DOCTRINA>"
        )
    }

    #[test]
    fn break_outside_loop_is_rejected() {
        let err = analyzed(&wrap("effigium;")).unwrap_err();
        assert_eq!(err.code, SemanticErrorCode::BreakOutsideLoop);
    }

    #[test]
    fn continue_outside_loop_is_rejected() {
        let err = analyzed(&wrap("proximum;")).unwrap_err();
        assert_eq!(err.code, SemanticErrorCode::ContinueOutsideLoop);
    }

    #[test]
    fn break_inside_loop_is_accepted() {
        let src = wrap("RECURSIO (propositio:(1 == 1)) -> { effigium; };");
        assert!(analyzed(&src).is_ok());
    }

    #[test]
    fn loop_nesting_of_three_is_accepted_four_is_rejected() {
        let three = wrap(
            "RECURSIO (propositio:(1==1)) -> { RECURSIO (propositio:(1==1)) -> { RECURSIO (propositio:(1==1)) -> { nihil; }; }; };",
        );
        assert!(analyzed(&three).is_ok());

        let four = wrap(
            "RECURSIO (propositio:(1==1)) -> { RECURSIO (propositio:(1==1)) -> { RECURSIO (propositio:(1==1)) -> { RECURSIO (propositio:(1==1)) -> { nihil; }; }; }; };",
        );
        let err = analyzed(&four).unwrap_err();
        assert_eq!(err.code, SemanticErrorCode::LoopNestTooDeep);
    }

    #[test]
    fn loop_defaults_are_injected_when_absent() {
        let src = wrap("RECURSIO (propositio:(1==1)) -> { effigium; };");
        let result = analyzed(&src).unwrap();
        match &result.program.doctrina.main.body[0] {
            Stmt::LoopStmt { quota, step, .. } => {
                assert_eq!(quota.as_ref().unwrap().as_int_literal(), Some(100));
                assert_eq!(step.as_ref().unwrap().as_int_literal(), Some(1));
            }
            other => panic!("expected LoopStmt, got {other:?}"),
        }
    }

    #[test]
    fn negative_quota_literal_is_rejected() {
        let src = wrap("RECURSIO (propositio:(1==1), quota: -1) -> { nihil; };");
        let err = analyzed(&src).unwrap_err();
        assert_eq!(err.code, SemanticErrorCode::LoopQuotaInvalid);
    }

    #[test]
    fn non_positive_step_literal_is_rejected() {
        let src = wrap("RECURSIO (propositio:(1==1), acceleratio: 0) -> { nihil; };");
        let err = analyzed(&src).unwrap_err();
        assert_eq!(err.code, SemanticErrorCode::LoopStepNotPositive);
    }

    #[test]
    fn non_literal_step_defers_to_runtime() {
        let src = wrap("VCON s: inte = 1; RECURSIO (propositio:(1==1), acceleratio: s) -> { effigium; };");
        assert!(analyzed(&src).is_ok());
    }

    #[test]
    fn type_mismatch_on_vardecl_init_is_rejected() {
        let src = wrap(r#"VCON a: inte = "hello";"#);
        let err = analyzed(&src).unwrap_err();
        assert_eq!(err.code, SemanticErrorCode::TypeMismatch);
    }

    #[test]
    fn type_mismatch_on_assign_is_rejected() {
        let src = wrap(r#"VCON a: inte = 1; a = "hello";"#);
        let err = analyzed(&src).unwrap_err();
        assert_eq!(err.code, SemanticErrorCode::TypeMismatch);
    }

    #[test]
    fn matching_vardecl_type_is_accepted() {
        let src = wrap("VCON a: inte = 1;");
        assert!(analyzed(&src).is_ok());
    }

    #[test]
    fn builtin_arity_violation_is_rejected() {
        let src = wrap("longitudo() <- ();");
        let err = analyzed(&src).unwrap_err();
        assert_eq!(err.code, SemanticErrorCode::ArgCountMismatch);
    }

    #[test]
    fn indicant_accepts_any_arg_count() {
        let src = wrap(r#"indicant() <- ("a", "b", "c");"#);
        assert!(analyzed(&src).is_ok());
    }

    #[test]
    fn user_defined_calls_are_never_arity_checked() {
        let src = wrap("misteria() <- (1, 2, 3, 4, 5);");
        assert!(analyzed(&src).is_ok());
    }
}
