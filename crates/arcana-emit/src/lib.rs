//! Transpiler: walks a semantically-normalized `Program` and emits
//! Python source text.
//!
//! One handler per AST node kind, matched statically so a new variant
//! left unhandled is a compile error in this crate, not a runtime
//! surprise in the emitted program.

use std::fmt::Write as _;

use arcana_common::runtime;
use arcana_parser::ast::{BinOp, Expr, Program, Stmt, UnOp};

mod prologue;

/// Emit `program` as a complete, runnable Python module.
///
/// `program` must already have passed [`arcana_semantic::analyze`] —
/// this function assumes every `LoopStmt.quota`/`step` is `Some`.
pub fn emit(program: &Program) -> String {
    let mut e = Emitter::new();
    e.emit_program(program);
    e.out
}

struct Emitter {
    out: String,
    indent: usize,
    loop_counter: u32,
}

impl Emitter {
    fn new() -> Self {
        Self { out: String::new(), indent: 0, loop_counter: 0 }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn emit_program(&mut self, program: &Program) {
        self.out.push_str(prologue::PROLOGUE);
        self.blank();

        for stmt in &program.introductio.stmts {
            self.emit_stmt(stmt);
        }
        if !program.introductio.stmts.is_empty() {
            self.blank();
        }

        self.line("def subjecto():");
        self.indent += 1;
        if program.doctrina.main.body.is_empty() {
            self.line("pass");
        } else {
            for stmt in &program.doctrina.main.body {
                self.emit_stmt(stmt);
            }
        }
        self.indent -= 1;
        self.blank();

        self.line("if __name__ == \"__main__\":");
        self.indent += 1;
        self.line("subjecto()");
        self.indent -= 1;
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::NihilStmt { .. } => self.line("pass"),
            Stmt::VarDecl { name, init, .. } => match init {
                Some(expr) => {
                    let rhs = self.expr_text(expr);
                    self.line(&format!("{name} = {rhs}"));
                }
                None => self.line(&format!("{name} = None")),
            },
            Stmt::Assign { name, value, .. } => {
                let rhs = self.expr_text(value);
                self.line(&format!("{name} = {rhs}"));
            }
            Stmt::Move { dst, src, .. } => {
                self.line(&format!("{dst} = {src}"));
                self.line(&format!("{src} = None"));
            }
            Stmt::CallStmt { call, .. } => {
                let text = self.expr_text(call);
                self.line(&text);
            }
            Stmt::ExprStmt { expr, .. } => {
                let text = self.expr_text(expr);
                self.line(&text);
            }
            Stmt::IfStmt { cond, then_body, else_body, .. } => {
                let cond_text = self.expr_text(cond);
                self.line(&format!("if {cond_text}:"));
                self.indent += 1;
                if then_body.is_empty() {
                    self.line("pass");
                } else {
                    for s in then_body {
                        self.emit_stmt(s);
                    }
                }
                self.indent -= 1;
                if !else_body.is_empty() {
                    self.line("else:");
                    self.indent += 1;
                    for s in else_body {
                        self.emit_stmt(s);
                    }
                    self.indent -= 1;
                }
            }
            Stmt::LoopStmt { .. } => self.emit_loop(stmt),
            Stmt::BreakStmt { .. } => self.line("break"),
            Stmt::ContinueStmt { .. } => self.line("continue"),
            // Reserved, unreachable until the parser grows productions
            // for them; emitted for totality over every AST node kind.
            Stmt::FuncDecl { name, args, body, .. } => {
                let params = args.iter().map(|a| a.name.clone()).collect::<Vec<_>>().join(", ");
                self.line(&format!("def {name}({params}):"));
                self.indent += 1;
                if body.is_empty() {
                    self.line("pass");
                } else {
                    for s in body {
                        self.emit_stmt(s);
                    }
                }
                self.indent -= 1;
            }
            Stmt::RditusStmt { value, .. } => {
                let text = self.expr_text(value);
                self.line(&format!("return {text}"));
            }
            Stmt::ImportStmt { .. } => {}
        }
    }

    fn emit_loop(&mut self, stmt: &Stmt) {
        let Stmt::LoopStmt { cond, quota, step, body, .. } = stmt else {
            unreachable!("emit_loop called on non-LoopStmt");
        };
        let quota = quota.as_ref().expect("quota normalized by semantic analysis");
        let step = step.as_ref().expect("step normalized by semantic analysis");

        let suffix = self.loop_counter;
        self.loop_counter += 1;

        let ctr = format!("ctr_{suffix}");
        let quota_var = format!("quota_{suffix}");
        let step_var = format!("step_{suffix}");

        let quota_text = self.expr_text(quota);
        let step_text = self.expr_text(step);
        let cond_text = self.expr_text(cond);

        self.line(&format!("{ctr} = 0"));
        self.line(&format!("{quota_var} = {quota_text}"));
        self.line(&format!("{step_var} = {step_text}"));
        self.line(&format!(
            "if {quota_var} < 0: raise ArcanaRuntimeError(\"{}\", \"{}\")",
            runtime::R_VERITATEM_NON_ATTIGI,
            runtime::MSG_STATIONARIUS_ACCELERATIONIS,
        ));
        self.line(&format!("assert_positive(\"E0110_LOOP_STEP_NOT_POSITIVE\", {step_var})"));
        self.line(&format!("while {cond_text}:"));
        self.indent += 1;
        self.line(&format!(
            "if {ctr} >= {quota_var}: raise ArcanaRuntimeError(\"{}\", \"{}\")",
            runtime::R_VERITATEM_NON_ATTIGI,
            runtime::MSG_VERITATEM_NON_ATTIGI,
        ));
        self.line(&format!("{ctr} += {step_var}"));
        if body.is_empty() {
            self.line("pass");
        } else {
            for s in body {
                self.emit_stmt(s);
            }
        }
        self.indent -= 1;
    }

    fn expr_text(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Name { id, .. } => id.clone(),
            Expr::IntLit { value, .. } => value.to_string(),
            Expr::RealLit { value, .. } => format_real(*value),
            Expr::StringLit { value, .. } => python_str_literal(value),
            Expr::CantusLit { template, .. } => format!("f{}", python_str_literal(template)),
            Expr::DictLit { pairs, .. } => {
                let body = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", self.expr_text(k), self.expr_text(v)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{body}}}")
            }
            Expr::Paren { inner, .. } => format!("({})", self.expr_text(inner)),
            Expr::IndexExpr { target, key, .. } => {
                format!("{}[{}]", self.expr_text(target), self.expr_text(key))
            }
            Expr::UnaryOp { op, expr, .. } => {
                let inner = self.expr_text(expr);
                match op {
                    UnOp::Non => format!("(not {inner})"),
                    UnOp::Plus => format!("(+{inner})"),
                    UnOp::Neg => format!("(-{inner})"),
                }
            }
            Expr::BinaryOp { op, left, right, .. } => {
                let l = self.expr_text(left);
                let r = self.expr_text(right);
                format!("({l} {} {r})", binop_text(*op))
            }
            Expr::CallExpr { name, args, .. } => self.emit_call(name, args),
        }
    }

    fn emit_call(&mut self, name: &str, args: &[Expr]) -> String {
        if name == "ordinata" {
            return match args.len() {
                0 => "()".to_string(),
                1 => format!("({},)", self.expr_text(&args[0])),
                _ => {
                    let body = args.iter().map(|a| self.expr_text(a)).collect::<Vec<_>>().join(", ");
                    format!("({body})")
                }
            };
        }

        let target = target_builtin(name);
        let body = args.iter().map(|a| self.expr_text(a)).collect::<Vec<_>>().join(", ");
        let mut s = String::new();
        write!(s, "{target}({body})").unwrap();
        s
    }
}

fn target_builtin(name: &str) -> &str {
    match name {
        "indicant" => "print",
        "accipere" => "input",
        "longitudo" => "len",
        "figura" => "figura",
        "inte" => "int",
        "real" => "float",
        "filum" => "str",
        "verum" => "__arcana_verum",
        "catalogus" => "dict",
        other => other,
    }
}

fn binop_text(op: BinOp) -> &'static str {
    match op {
        BinOp::Aut => "or",
        BinOp::Et => "and",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Gt => ">",
        BinOp::Le => "<=",
        BinOp::Ge => ">=",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Rem => "%",
        BinOp::Pow => "**",
    }
}

fn format_real(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn python_str_literal(value: &str) -> String {
    let mut s = String::with_capacity(value.len() + 2);
    s.push('"');
    for c in value.chars() {
        match c {
            '"' => s.push_str("\\\""),
            '\\' => s.push_str("\\\\"),
            '\n' => s.push_str("\\n"),
            _ => s.push(c),
        }
    }
    s.push('"');
    s
}
