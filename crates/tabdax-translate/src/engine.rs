//! Single-pass rule application

use crate::rules::RuleTable;
use crate::table::TableName;
use std::borrow::Cow;

/// Applies a [`RuleTable`] to an expression
///
/// Each rule runs once, in table order, over the output of the rules before
/// it. There is no fixed-point iteration: a rule never sees its own output.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'r> {
    rules: &'r RuleTable,
}

impl<'r> RuleEngine<'r> {
    pub fn new(rules: &'r RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'r RuleTable {
        self.rules
    }

    /// Translate `expression` with every rule in order
    pub fn apply(&self, expression: &str, table: &TableName) -> String {
        let mut current = expression.to_string();
        for rule in self.rules {
            let next = match rule.apply(&current, table) {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            if let Some(next) = next {
                current = next;
            }
        }
        current
    }

    /// Names of the rules that changed `expression`, in firing order
    pub fn trace(&self, expression: &str, table: &TableName) -> Vec<&'r str> {
        let mut fired = Vec::new();
        let mut current = expression.to_string();
        for rule in self.rules {
            let next = rule.apply(&current, table).into_owned();
            if next != current {
                tracing::trace!(rule = rule.name(), "rule fired");
                fired.push(rule.name());
                current = next;
            }
        }
        fired
    }
}
