//! File-level checking.
//!
//! A [`Checker`] parses one file at a time, enumerates the root `if`
//! expressions of every function-like body, scores each root with the
//! nesting walk, and keeps the findings that reach the configured
//! minimum. Roots are the outermost ifs of a body: anything nested
//! below a root, else-if continuations included, is consumed by the
//! scorer rather than reported on its own.

use std::io::Write;
use std::path::Path;

use syn::visit::Visit;
use syn::{Block, ExprClosure, ExprIf, ImplItemFn, Item, ItemFn, TraitItemFn};

use crate::complexity::{score_if, ScoreOptions};
use crate::core::errors::{Error, Result};
use crate::core::{DebugSink, Issue, SourceLocation};
use crate::io;

/// Scans parsed files for deeply nested `if` expressions.
#[derive(Debug)]
pub struct Checker {
    min_complexity: u32,
    options: ScoreOptions,
    debug: DebugSink,
}

impl Checker {
    pub fn new() -> Self {
        Self {
            min_complexity: 1,
            options: ScoreOptions::default(),
            debug: DebugSink::disabled(),
        }
    }

    /// Minimum complexity a root `if` must reach to be reported. The
    /// bound is inclusive; zero admits every root.
    pub fn with_min_complexity(mut self, min_complexity: u32) -> Self {
        self.min_complexity = min_complexity;
        self
    }

    pub fn with_skip_none_guards(mut self, skip: bool) -> Self {
        self.options.skip_none_guards = skip;
        self
    }

    /// Attach a diagnostic sink for progress and rendering warnings.
    /// The returned issue set is unaffected.
    pub fn with_debug_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.debug = DebugSink::to_writer(writer);
        self
    }

    /// Read and check one file from disk. Files carrying a generated
    /// marker are skipped wholesale.
    pub fn check_file(&mut self, path: &Path) -> Result<Vec<Issue>> {
        let source = io::read_file(path)?;
        if io::is_generated(&source) {
            log::debug!("skipping generated file {}", path.display());
            return Ok(Vec::new());
        }
        self.check_source(path, &source)
    }

    /// Check already-loaded source text. `file` is only used for
    /// positions and messages.
    pub fn check_source(&mut self, file: &Path, source: &str) -> Result<Vec<Issue>> {
        let ast = syn::parse_file(source).map_err(|err| {
            let start = err.span().start();
            Error::parse(file, start.line, start.column, err.to_string())
        })?;

        let mut visitor = FileVisitor {
            checker: self,
            file,
            issues: Vec::new(),
        };
        visitor.visit_file(&ast);
        let mut issues = visitor.issues;
        // Nested functions are visited after the rest of their
        // enclosing body; restore document order.
        issues.sort_by_key(|issue| issue.location.offset);

        if self.debug.is_enabled() {
            self.debug.emit(format_args!(
                "{} issue(s) found in {}",
                issues.len(),
                file.display()
            ));
        }
        Ok(issues)
    }

    fn score_root(&mut self, file: &Path, expr: &ExprIf) -> Option<Issue> {
        let scored = score_if(expr, &self.options);
        if scored.complexity < self.min_complexity {
            return None;
        }
        let location = SourceLocation::of(file, expr.if_token.span);
        if scored.condition.is_none() {
            self.debug.emit(format_args!(
                "failed to render condition at {}:{}",
                file.display(),
                location.line
            ));
        }
        Some(Issue::new(
            location,
            scored.complexity,
            scored.condition.unwrap_or_default(),
        ))
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks a file's items and checks each function-like body as it is
/// reached: free functions, associated functions in impl blocks, and
/// defaulted trait methods. Closures are not bodies of their own.
struct FileVisitor<'a> {
    checker: &'a mut Checker,
    file: &'a Path,
    issues: Vec<Issue>,
}

impl FileVisitor<'_> {
    fn check_body(&mut self, block: &Block) {
        let mut finder = IfFinder::default();
        finder.visit_block(block);
        for expr in finder.found {
            if let Some(issue) = self.checker.score_root(self.file, expr) {
                self.issues.push(issue);
            }
        }
    }
}

impl<'ast> Visit<'ast> for FileVisitor<'_> {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.check_body(&node.block);
        syn::visit::visit_item_fn(self, node);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        self.check_body(&node.block);
        syn::visit::visit_impl_item_fn(self, node);
    }

    fn visit_trait_item_fn(&mut self, node: &'ast TraitItemFn) {
        if let Some(block) = &node.default {
            self.check_body(block);
        }
        syn::visit::visit_trait_item_fn(self, node);
    }
}

/// Collects scoring roots: the outermost `if` expressions reachable
/// from a body without entering another `if`, a closure, or a nested
/// item.
#[derive(Default)]
struct IfFinder<'ast> {
    found: Vec<&'ast ExprIf>,
}

impl<'ast> Visit<'ast> for IfFinder<'ast> {
    fn visit_expr_if(&mut self, node: &'ast ExprIf) {
        // No descent: the scorer owns everything below a root.
        self.found.push(node);
    }

    fn visit_expr_closure(&mut self, _: &'ast ExprClosure) {}

    fn visit_item(&mut self, _: &'ast Item) {}
}
