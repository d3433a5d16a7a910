//! `switch` in statement and expression position.
//!
//! ## Notes
//! - Labels, guards and bodies are rendered as written; pattern bindings are locals of their case.
//! - In expression position the trailing expression statement of an arrow block becomes `yield`, so the block
//!   produces the value the source block ended with.

use std::borrow::Cow;

use mvel_syntax::ast::{Block, CaseBody, CaseLabel, Ident, Spanned, Statement, SwitchBlock, SwitchCase};

use super::context::Context;
use super::types::descriptor_of;
use crate::registry::TypeDescriptor;

impl<'a> Context<'a> {
    pub(crate) fn switch_statement(&self, switch: &SwitchBlock) -> String {
        self.switch_block(switch, false)
    }

    pub(crate) fn switch_expression(&self, switch: &SwitchBlock) -> String {
        self.switch_block(switch, true)
    }

    fn switch_block(&self, switch: &SwitchBlock, yields: bool) -> String {
        let selector = self.expr(&switch.selector);
        if switch.cases.is_empty() {
            return format!("switch ({selector}) {{}}");
        }
        let inner = self.nested();
        let pad = inner.indent();
        let cases: Vec<String> = switch
            .cases
            .iter()
            .map(|case| format!("{pad}{}", inner.case(&case.node, yields)))
            .collect();
        format!("switch ({selector}) {{\n{}\n{}}}", cases.join("\n"), self.indent())
    }

    fn case(&self, case: &SwitchCase, yields: bool) -> String {
        let scope = self.with_locals(pattern_bindings(&case.labels));
        let mut head = scope.case_head(&case.labels);
        if let Some(guard) = &case.guard {
            head.push_str(" when ");
            head.push_str(&scope.expr(guard));
        }

        match &case.body {
            CaseBody::Expr(e) => format!("{head} -> {};", scope.expr(e)),
            CaseBody::Throw(e) => format!("{head} -> throw {};", scope.expr(e)),
            CaseBody::Block(block) => {
                let block = if yields { yielding(block) } else { Cow::Borrowed(block) };
                format!("{head} -> {}", scope.block(&block))
            }
            CaseBody::Statements(statements) => {
                let inner = scope.nested();
                let pad = inner.indent();
                let mut out = format!("{head}:");
                for stmt in inner.sequence(statements) {
                    out.push('\n');
                    out.push_str(&pad);
                    out.push_str(&stmt);
                }
                out
            }
        }
    }

    fn case_head(&self, labels: &[CaseLabel]) -> String {
        if let [CaseLabel::Default] = labels {
            return "default".to_string();
        }
        let labels: Vec<String> = labels
            .iter()
            .map(|label| match label {
                CaseLabel::Default => "default".to_string(),
                CaseLabel::Expr(e) => self.expr(e),
                CaseLabel::Pattern { ty, binding } => format!("{} {binding}", self.type_ref(ty)),
            })
            .collect();
        format!("case {}", labels.join(", "))
    }
}

fn pattern_bindings(labels: &[CaseLabel]) -> Vec<(Ident, Option<TypeDescriptor>)> {
    labels
        .iter()
        .filter_map(|label| match label {
            CaseLabel::Pattern { ty, binding } => Some((binding.clone(), Some(descriptor_of(ty)))),
            _ => None,
        })
        .collect()
}

/// The block with its trailing expression statement turned into `yield`.
fn yielding(block: &Block) -> Cow<'_, Block> {
    match block.statements.last() {
        Some(Spanned {
            node: Statement::Expr(e),
            span,
        }) => {
            let mut owned = block.clone();
            let last = owned.statements.len() - 1;
            owned.statements[last] = Spanned::new(Statement::Yield(e.clone()), *span);
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(block),
    }
}
