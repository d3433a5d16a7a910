//! Statements and blocks.
//!
//! Each statement kind maps one-to-one onto the equivalent target statement. Nested blocks are rendered one indent
//! level deeper; the first line of a statement is never indented by the statement itself, its caller places it.

use mvel_syntax::ast::{
    Block, CatchClause, Expr, ForEachStmt, ForInit, ForStmt, Ident, IfStmt, LocalDecl, Spanned, Statement, TryStmt,
};

use super::context::Context;
use super::types::descriptor_of;
use crate::registry::TypeDescriptor;

impl<'a> Context<'a> {
    /// Top-level statement sequence, joined by the configured separator.
    pub(crate) fn program(&self, statements: &[Spanned<Statement>]) -> String {
        self.sequence(statements).join(&self.config.statement_separator)
    }

    /// `{ ... }` with its statements one level deeper.
    pub(crate) fn block(&self, block: &Block) -> String {
        self.braced(&block.statements)
    }

    pub(crate) fn braced(&self, statements: &[Spanned<Statement>]) -> String {
        if statements.is_empty() {
            return "{}".to_string();
        }
        let inner = self.nested();
        let pad = inner.indent();
        let lines: Vec<String> = inner
            .sequence(statements)
            .into_iter()
            .map(|s| format!("{pad}{s}"))
            .collect();
        format!("{{\n{}\n{}}}", lines.join("\n"), self.indent())
    }

    /// Translate statements in order; each local declaration is in scope for the statements after it.
    pub(crate) fn sequence(&self, statements: &[Spanned<Statement>]) -> Vec<String> {
        let mut scope = self.clone();
        let mut out = Vec::with_capacity(statements.len());
        for stmt in statements {
            out.push(scope.statement(stmt));
            if let Statement::LocalDecl(decl) = &stmt.node {
                scope = scope.with_locals(scope.declared_locals(decl));
            }
        }
        out
    }

    pub(crate) fn statement(&self, stmt: &Spanned<Statement>) -> String {
        match &stmt.node {
            Statement::Block(block) => self.block(block),
            Statement::If(s) => self.if_statement(s),
            Statement::While(s) => format!("while ({}) {}", self.expr(&s.condition), self.statement(&s.body)),
            Statement::DoWhile(s) => format!("do {} while ({});", self.statement(&s.body), self.expr(&s.condition)),
            Statement::For(s) => self.for_statement(s),
            Statement::ForEach(s) => self.for_each(s),
            Statement::Try(s) => self.try_statement(s),
            Statement::Switch(s) => self.switch_statement(s),
            Statement::Return(None) => "return;".to_string(),
            Statement::Return(Some(e)) => format!("return {};", self.expr(e)),
            Statement::Throw(e) => format!("throw {};", self.expr(e)),
            Statement::Yield(e) => format!("yield {};", self.expr(e)),
            Statement::Break(label) => jump("break", label.as_ref()),
            Statement::Continue(label) => jump("continue", label.as_ref()),
            Statement::Empty => ";".to_string(),
            Statement::Expr(e) => self.expression_statement(e),
            Statement::LocalDecl(decl) => format!("{};", self.local_decl(decl)),
            Statement::Labeled(label, inner) => format!("{label}: {}", self.statement(inner)),
        }
    }

    fn expression_statement(&self, e: &Spanned<Expr>) -> String {
        match &e.node {
            Expr::MutationBlock(subject, entries) => {
                let statements = self.mutation_statements(subject, entries);
                if statements.is_empty() {
                    ";".to_string()
                } else {
                    statements.join(&format!("\n{}", self.indent()))
                }
            }
            _ => format!("{};", self.expr(e)),
        }
    }

    fn if_statement(&self, s: &IfStmt) -> String {
        let mut out = format!("if ({}) {}", self.expr(&s.condition), self.statement(&s.then_branch));
        if let Some(otherwise) = &s.else_branch {
            out.push_str(" else ");
            out.push_str(&self.statement(otherwise));
        }
        out
    }

    fn for_statement(&self, s: &ForStmt) -> String {
        let (init, scope) = match &s.init {
            ForInit::None => (String::new(), self.clone()),
            ForInit::Decl(decl) => (self.local_decl(decl), self.with_locals(self.declared_locals(decl))),
            ForInit::Exprs(exprs) => (self.expr_list(exprs), self.clone()),
        };
        let condition = s
            .condition
            .as_ref()
            .map(|c| format!(" {}", scope.expr(c)))
            .unwrap_or_default();
        let update = if s.update.is_empty() {
            String::new()
        } else {
            format!(" {}", scope.expr_list(&s.update))
        };
        format!("for ({init};{condition};{update}) {}", scope.statement(&s.body))
    }

    fn for_each(&self, s: &ForEachStmt) -> String {
        let ty = if s.ty.is_var() {
            self.static_type(&s.iterable).and_then(|t| t.element_type())
        } else {
            Some(descriptor_of(&s.ty))
        };
        let scope = self.with_local(s.name.clone(), ty);
        format!(
            "for ({}{} {} : {}) {}",
            if s.is_final { "final " } else { "" },
            self.type_ref(&s.ty),
            s.name,
            self.expr(&s.iterable),
            scope.statement(&s.body)
        )
    }

    fn try_statement(&self, s: &TryStmt) -> String {
        let mut out = format!("try {}", self.block(&s.body));
        for clause in &s.catches {
            out.push_str(&self.catch_clause(clause));
        }
        if let Some(finally) = &s.finally {
            out.push_str(" finally ");
            out.push_str(&self.block(finally));
        }
        out
    }

    fn catch_clause(&self, clause: &CatchClause) -> String {
        let types: Vec<String> = clause.types.iter().map(|t| self.type_ref(t)).collect();
        let ty = match clause.types.as_slice() {
            [single] => Some(descriptor_of(single)),
            _ => None,
        };
        let scope = self.with_local(clause.name.clone(), ty);
        format!(" catch ({} {}) {}", types.join(" | "), clause.name, scope.block(&clause.body))
    }

    /// `final int a = 1, b[] = {2}` without the trailing semicolon.
    pub(crate) fn local_decl(&self, decl: &LocalDecl) -> String {
        let declarators: Vec<String> = decl
            .declarators
            .iter()
            .map(|d| {
                let dims = "[]".repeat(d.dims);
                match &d.init {
                    Some(init) => {
                        let target = self.declared_type(decl, d.dims);
                        format!("{}{dims} = {}", d.name, self.coerce_value(init, target.as_ref()))
                    }
                    None => format!("{}{dims}", d.name),
                }
            })
            .collect();
        format!(
            "{}{} {}",
            if decl.is_final { "final " } else { "" },
            self.type_ref(&decl.ty),
            declarators.join(", ")
        )
    }

    /// Names and types a declaration brings into scope.
    pub(crate) fn declared_locals(&self, decl: &LocalDecl) -> Vec<(Ident, Option<TypeDescriptor>)> {
        decl.declarators
            .iter()
            .map(|d| {
                let ty = match &d.init {
                    Some(init) if decl.ty.is_var() => self.static_type(init),
                    _ => self.declared_type(decl, d.dims),
                };
                (d.name.clone(), ty)
            })
            .collect()
    }

    fn declared_type(&self, decl: &LocalDecl, extra_dims: usize) -> Option<TypeDescriptor> {
        if decl.ty.is_var() {
            return None;
        }
        let mut ty = descriptor_of(&decl.ty);
        ty.name.push_str(&"[]".repeat(extra_dims));
        Some(ty)
    }
}

fn jump(keyword: &str, label: Option<&Ident>) -> String {
    match label {
        Some(label) => format!("{keyword} {label};"),
        None => format!("{keyword};"),
    }
}
