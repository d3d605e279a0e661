//! Level-of-detail expressions
//!
//! `{FIXED [Region]: SUM([Sales])}` and its `INCLUDE`/`EXCLUDE` siblings
//! become a `CALCULATE` call whose filter arguments reproduce the scope.

use crate::engine::RuleEngine;
use crate::table::{clean_field, TableName};
use lazy_regex::regex;
use std::fmt;

/// Scope keyword of a level-of-detail block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Fixed,
    Include,
    Exclude,
}

impl Scope {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "FIXED" => Some(Scope::Fixed),
            "INCLUDE" => Some(Scope::Include),
            "EXCLUDE" => Some(Scope::Exclude),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Fixed => f.write_str("FIXED"),
            Scope::Include => f.write_str("INCLUDE"),
            Scope::Exclude => f.write_str("EXCLUDE"),
        }
    }
}

/// A parsed `{<scope> <dims>: <measure>}` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedAggregation {
    pub scope: Scope,
    /// Dimension names without brackets
    pub dimensions: Vec<String>,
    /// Inner measure, untranslated
    pub measure: String,
    /// Whatever followed the closing brace, untranslated
    pub trailing: String,
}

impl ScopedAggregation {
    /// Parse a block; `None` if the text is not a recognizable LOD expression
    pub fn parse(expression: &str) -> Option<Self> {
        let caps = regex!(r"(?is)^\{\s*([a-z]+)\s+([^:]+?)\s*:\s*(.*?)\}(.*)$")
            .captures(expression.trim())?;

        let scope = Scope::from_keyword(&caps[1])?;
        let dimensions: Vec<String> = caps[2]
            .split(',')
            .map(clean_field)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        if dimensions.is_empty() {
            return None;
        }

        Some(Self {
            scope,
            dimensions,
            measure: caps[3].trim().to_string(),
            trailing: caps[4].trim().to_string(),
        })
    }

    /// Filter arguments that reproduce the scope on `table`
    pub fn filter_args(&self, table: &TableName) -> String {
        let columns = self.dimensions.iter().map(|d| table.column(d));
        match self.scope {
            Scope::Fixed => {
                let columns: Vec<String> = columns.collect();
                format!("ALLEXCEPT({}, {})", table.quoted(), columns.join(", "))
            }
            Scope::Include => columns
                .map(|c| format!("KEEPFILTERS(VALUES({c}))"))
                .collect::<Vec<_>>()
                .join(", "),
            Scope::Exclude => columns
                .map(|c| format!("REMOVEFILTERS({c})"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Converts level-of-detail expressions
///
/// The inner measure goes through the rule engine only; nested conditional
/// blocks are not rewritten. Text after the closing brace is translated too,
/// including any further level-of-detail blocks it contains.
#[derive(Debug, Clone, Copy)]
pub struct LodConverter<'r> {
    engine: RuleEngine<'r>,
}

impl<'r> LodConverter<'r> {
    pub fn new(engine: RuleEngine<'r>) -> Self {
        Self { engine }
    }

    /// Convert `expression`, or return it trimmed if it does not parse
    pub fn convert(&self, expression: &str, table: &TableName) -> String {
        let Some(block) = ScopedAggregation::parse(expression) else {
            tracing::debug!("unrecognized level-of-detail expression left as is");
            return expression.trim().to_string();
        };
        self.render(&block, table)
    }

    fn render(&self, block: &ScopedAggregation, table: &TableName) -> String {
        let measure = self.engine.apply(&block.measure, table);
        let call = format!("CALCULATE({measure}, {})", block.filter_args(table));
        if block.trailing.is_empty() {
            call
        } else {
            format!("{call} {}", self.convert_trailing(&block.trailing, table))
        }
    }

    fn convert_trailing(&self, trailing: &str, table: &TableName) -> String {
        let Some(open) = trailing.find('{') else {
            return self.engine.apply(trailing, table);
        };

        let (head, rest) = trailing.split_at(open);
        let rest = match ScopedAggregation::parse(rest) {
            Some(block) => self.render(&block, table),
            None => self.engine.apply(rest, table),
        };
        let head = head.trim();
        if head.is_empty() {
            rest
        } else {
            format!("{} {rest}", self.engine.apply(head, table))
        }
    }
}
