//! Nesting complexity scoring for `if` expressions.
//!
//! Each conditional is charged by how deeply it sits inside the `if`
//! being scored: a conditional discovered inside a `then` block or a
//! plain `else` block contributes its current nesting depth, while an
//! `else if` continuation contributes a flat 1, so linear chains are not
//! penalized like true nesting. Entering a plain `else` block also costs
//! a flat 1 before its contents are walked one level deeper.
//!
//! The walk is an explicit recursive descent over statement and
//! expression shapes. Closure bodies and nested items are scope
//! boundaries and are never entered; macro invocations and unrecognized
//! shapes end the walk without contributing.

use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Block, Expr, ExprIf, Local, Stmt};

/// Options applied while scoring a single `if` subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreOptions {
    /// Skip trivial `is_none()`/`is_err()`-style guard conditions
    /// entirely: no charge, no descent.
    pub skip_none_guards: bool,
}

/// Result of scoring one top-level `if`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfScore {
    pub complexity: u32,
    /// Best-effort rendering of the guarding condition; `None` when it
    /// could not be rendered at all.
    pub condition: Option<String>,
}

/// Score one top-level `if` expression.
///
/// Scoring is a pure function of the given subtree: the accumulator is
/// created here and discarded before returning, so sibling statements
/// and repeat invocations can never observe each other.
pub fn score_if(expr: &ExprIf, options: &ScoreOptions) -> IfScore {
    let mut walk = NestingWalk {
        complexity: 0,
        nesting: 0,
        options: *options,
    };
    walk.walk_if(expr, IfKind::Nested);
    IfScore {
        complexity: walk.complexity,
        condition: render_condition(&expr.cond),
    }
}

/// Render an `if` condition back to source-like text, flattened to one
/// line. The exact source slice is preferred; token rendering is the
/// fallback for spans with no source behind them (synthesized trees).
pub fn render_condition(cond: &Expr) -> Option<String> {
    let raw = cond
        .span()
        .source_text()
        .unwrap_or_else(|| cond.to_token_stream().to_string());
    let flattened = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.is_empty() {
        None
    } else {
        Some(flattened)
    }
}

/// Distinguishes a conditional discovered as a new nesting level from
/// one reached as the `else if` continuation of its parent.
#[derive(Clone, Copy, PartialEq, Eq)]
enum IfKind {
    Nested,
    ElseIf,
}

/// Transient accumulator for one `score_if` call.
struct NestingWalk {
    complexity: u32,
    nesting: u32,
    options: ScoreOptions,
}

impl NestingWalk {
    fn walk_if(&mut self, expr: &ExprIf, kind: IfKind) {
        if self.options.skip_none_guards && is_none_guard(&expr.cond) {
            return;
        }

        self.complexity += match kind {
            IfKind::ElseIf => 1,
            IfKind::Nested => self.nesting,
        };

        self.nesting += 1;
        self.walk_block(&expr.then_branch);
        self.nesting -= 1;

        if let Some((_, else_expr)) = &expr.else_branch {
            match else_expr.as_ref() {
                // `else if`: the chain continues at the current level.
                Expr::If(chained) => self.walk_if(chained, IfKind::ElseIf),
                // Plain `else` block: one flat point for the block, its
                // contents one level deeper.
                Expr::Block(block) => {
                    self.complexity += 1;
                    self.nesting += 1;
                    self.walk_block(&block.block);
                    self.nesting -= 1;
                }
                // Not a conditional shape we know how to traverse.
                _ => {}
            }
        }
    }

    fn walk_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.walk_stmt(stmt);
        }
    }

    fn walk_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr, _) => self.walk_expr(expr),
            Stmt::Local(local) => self.walk_local(local),
            // Nested items are their own scope; macro bodies are opaque.
            Stmt::Item(_) | Stmt::Macro(_) => {}
        }
    }

    fn walk_local(&mut self, local: &Local) {
        if let Some(init) = &local.init {
            self.walk_expr(&init.expr);
            if let Some((_, diverge)) = &init.diverge {
                self.walk_expr(diverge);
            }
        }
    }

    fn walk_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::If(expr_if) => self.walk_if(expr_if, IfKind::Nested),
            Expr::Block(e) => self.walk_block(&e.block),
            Expr::Unsafe(e) => self.walk_block(&e.block),
            Expr::Async(e) => self.walk_block(&e.block),
            Expr::TryBlock(e) => self.walk_block(&e.block),
            Expr::Const(e) => self.walk_block(&e.block),
            Expr::Loop(e) => self.walk_block(&e.body),
            Expr::While(e) => {
                self.walk_expr(&e.cond);
                self.walk_block(&e.body);
            }
            Expr::ForLoop(e) => {
                self.walk_expr(&e.expr);
                self.walk_block(&e.body);
            }
            Expr::Match(e) => {
                self.walk_expr(&e.expr);
                for arm in &e.arms {
                    if let Some((_, guard)) = &arm.guard {
                        self.walk_expr(guard);
                    }
                    self.walk_expr(&arm.body);
                }
            }
            Expr::Binary(e) => {
                self.walk_expr(&e.left);
                self.walk_expr(&e.right);
            }
            Expr::Assign(e) => {
                self.walk_expr(&e.left);
                self.walk_expr(&e.right);
            }
            Expr::Index(e) => {
                self.walk_expr(&e.expr);
                self.walk_expr(&e.index);
            }
            Expr::Repeat(e) => {
                self.walk_expr(&e.expr);
                self.walk_expr(&e.len);
            }
            Expr::Unary(e) => self.walk_expr(&e.expr),
            Expr::Paren(e) => self.walk_expr(&e.expr),
            Expr::Group(e) => self.walk_expr(&e.expr),
            Expr::Reference(e) => self.walk_expr(&e.expr),
            Expr::Cast(e) => self.walk_expr(&e.expr),
            Expr::Let(e) => self.walk_expr(&e.expr),
            Expr::Try(e) => self.walk_expr(&e.expr),
            Expr::Await(e) => self.walk_expr(&e.base),
            Expr::Field(e) => self.walk_expr(&e.base),
            Expr::Call(e) => {
                self.walk_expr(&e.func);
                for arg in &e.args {
                    self.walk_expr(arg);
                }
            }
            Expr::MethodCall(e) => {
                self.walk_expr(&e.receiver);
                for arg in &e.args {
                    self.walk_expr(arg);
                }
            }
            Expr::Tuple(e) => {
                for elem in &e.elems {
                    self.walk_expr(elem);
                }
            }
            Expr::Array(e) => {
                for elem in &e.elems {
                    self.walk_expr(elem);
                }
            }
            Expr::Struct(e) => {
                for field in &e.fields {
                    self.walk_expr(&field.expr);
                }
                if let Some(rest) = &e.rest {
                    self.walk_expr(rest);
                }
            }
            Expr::Range(e) => {
                if let Some(start) = &e.start {
                    self.walk_expr(start);
                }
                if let Some(end) = &e.end {
                    self.walk_expr(end);
                }
            }
            Expr::Return(e) => {
                if let Some(inner) = &e.expr {
                    self.walk_expr(inner);
                }
            }
            Expr::Break(e) => {
                if let Some(inner) = &e.expr {
                    self.walk_expr(inner);
                }
            }
            Expr::Yield(e) => {
                if let Some(inner) = &e.expr {
                    self.walk_expr(inner);
                }
            }
            // A closure body is its own scope; its ifs are not charged
            // against the enclosing statement.
            Expr::Closure(_) => {}
            // Leaves (paths, literals) and opaque shapes (macros) end
            // the walk.
            _ => {}
        }
    }
}

const GUARD_METHODS: &[&str] = &["is_none", "is_some", "is_ok", "is_err"];

/// Recognizes the trivial guard shapes `skip_none_guards` excludes:
/// bare `x.is_none()`-style calls on a plain path or field receiver,
/// `==`/`!=` comparisons against `None`, and negations or
/// parenthesizations of either.
pub fn is_none_guard(cond: &Expr) -> bool {
    match cond {
        Expr::MethodCall(call) => {
            call.args.is_empty()
                && GUARD_METHODS.iter().any(|name| call.method == *name)
                && is_plain_receiver(&call.receiver)
        }
        Expr::Binary(binary) => {
            matches!(binary.op, syn::BinOp::Eq(_) | syn::BinOp::Ne(_))
                && (is_none_path(&binary.left) || is_none_path(&binary.right))
        }
        Expr::Unary(unary) => {
            matches!(unary.op, syn::UnOp::Not(_)) && is_none_guard(&unary.expr)
        }
        Expr::Paren(paren) => is_none_guard(&paren.expr),
        _ => false,
    }
}

fn is_plain_receiver(expr: &Expr) -> bool {
    match expr {
        Expr::Path(_) => true,
        Expr::Field(field) => is_plain_receiver(&field.base),
        Expr::Paren(paren) => is_plain_receiver(&paren.expr),
        Expr::Reference(reference) => is_plain_receiver(&reference.expr),
        _ => false,
    }
}

fn is_none_path(expr: &Expr) -> bool {
    match expr {
        Expr::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "None"),
        _ => false,
    }
}
