//! Translation rule catalogue
//!
//! A [`RuleTable`] is an ordered list of pattern → rewrite entries. Order is
//! part of the contract: every rule sees the output of the rules before it,
//! so a composite rule such as `WINDOW_SUM(SUM(x))` must sit before the
//! generic `SUM(x)` rule it wraps. Composite rules name the generic rule they
//! must precede and [`RuleTable::validate`] checks it.

pub mod aggregate;
pub mod date;
pub mod index;
pub mod logical;
pub mod percentile;
pub mod rank;
pub mod string;
pub mod window;

use crate::error::{TranslateError, TranslateResult};
use crate::table::TableName;
use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Compiled-size cap for runtime patterns
const CUSTOM_PATTERN_SIZE_LIMIT: usize = 1 << 20;

static BUILTIN: Lazy<RuleTable> = Lazy::new(RuleTable::with_builtin_rules);

/// Function family a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    String,
    Date,
    Logical,
    Window,
    Aggregate,
    Index,
    Rank,
    Percentile,
    Custom,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::String => "string",
            Family::Date => "date",
            Family::Logical => "logical",
            Family::Window => "window",
            Family::Aggregate => "aggregate",
            Family::Index => "index",
            Family::Rank => "rank",
            Family::Percentile => "percentile",
            Family::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Transform signature: captured groups and target table → replacement text
pub type TransformFn = fn(&Groups<'_, '_>, &TableName) -> String;

/// How a matched span is rewritten
#[derive(Clone)]
pub enum Rewrite {
    /// Replacement template. `${n}` is capture group `n`, `{table}` the bare
    /// table name and `{table_ref}` the quoted one.
    Template(Cow<'static, str>),
    /// Output built by a function of the captures
    Transform(TransformFn),
}

impl fmt::Debug for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rewrite::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Rewrite::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// Positional view over the groups captured by one match
///
/// Groups that did not participate in the match read as empty text.
pub struct Groups<'c, 'h> {
    caps: &'c Captures<'h>,
}

impl<'c, 'h> Groups<'c, 'h> {
    pub fn new(caps: &'c Captures<'h>) -> Self {
        Self { caps }
    }

    /// Group `index`, or `""` when absent
    pub fn get(&self, index: usize) -> &'h str {
        self.opt(index).unwrap_or("")
    }

    /// Group `index` if it participated in the match
    pub fn opt(&self, index: usize) -> Option<&'h str> {
        self.caps.get(index).map(|m| m.as_str())
    }
}

/// A single catalogue entry
#[derive(Debug, Clone)]
pub struct Rule {
    name: Cow<'static, str>,
    family: Family,
    pattern: Regex,
    rewrite: Rewrite,
    precedes: Option<Cow<'static, str>>,
    shadowed_by: Option<Cow<'static, str>>,
}

impl Rule {
    /// Build a rule from an already compiled pattern
    ///
    /// Built-in rules pass `lazy_regex::regex!` statics here, which are
    /// checked at compile time.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        family: Family,
        pattern: &Regex,
        rewrite: Rewrite,
    ) -> Self {
        Self {
            name: name.into(),
            family,
            pattern: pattern.clone(),
            rewrite,
            precedes: None,
            shadowed_by: None,
        }
    }

    /// Compile `pattern` case-insensitively and build a rule from it
    pub fn pattern(
        name: impl Into<Cow<'static, str>>,
        family: Family,
        pattern: &str,
        rewrite: Rewrite,
    ) -> TranslateResult<Self> {
        let name = name.into();
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .size_limit(CUSTOM_PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|source| TranslateError::InvalidPattern {
                rule: name.to_string(),
                source,
            })?;
        Ok(Self::new(name, family, &regex, rewrite))
    }

    /// Template rewrite shorthand
    pub fn template(template: &'static str) -> Rewrite {
        Rewrite::Template(Cow::Borrowed(template))
    }

    /// Mark this rule as a composite that must come before `generic`
    pub fn precedes(mut self, generic: impl Into<Cow<'static, str>>) -> Self {
        self.precedes = Some(generic.into());
        self
    }

    /// Mark this rule as unreachable because `earlier` always consumes its input
    pub fn shadowed_by(mut self, earlier: impl Into<Cow<'static, str>>) -> Self {
        self.shadowed_by = Some(earlier.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn regex(&self) -> &Regex {
        &self.pattern
    }

    pub fn rewrite(&self) -> &Rewrite {
        &self.rewrite
    }

    pub fn precedes_rule(&self) -> Option<&str> {
        self.precedes.as_deref()
    }

    pub fn shadowing_rule(&self) -> Option<&str> {
        self.shadowed_by.as_deref()
    }

    /// Replace every non-overlapping match in `input`
    pub fn apply<'a>(&self, input: &'a str, table: &TableName) -> Cow<'a, str> {
        match &self.rewrite {
            Rewrite::Template(template) => {
                let template = expand_table(template, table);
                self.pattern.replace_all(input, |caps: &Captures<'_>| {
                    let mut out = String::new();
                    caps.expand(&template, &mut out);
                    out
                })
            }
            Rewrite::Transform(transform) => self
                .pattern
                .replace_all(input, |caps: &Captures<'_>| transform(&Groups::new(caps), table)),
        }
    }
}

/// Substitute the table placeholders, escaping `$` so the capture expander
/// leaves the name alone.
fn expand_table(template: &str, table: &TableName) -> String {
    template
        .replace("{table_ref}", &table.quoted().replace('$', "$$"))
        .replace("{table}", &table.bare().replace('$', "$$"))
}

/// Serializable summary of a rule, used by catalogue listings
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub position: usize,
    pub name: String,
    pub family: Family,
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precedes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadowed_by: Option<String>,
}

/// Ordered, immutable rule catalogue
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table from `rules`, rejecting ordering mistakes
    pub fn new(rules: Vec<Rule>) -> TranslateResult<Self> {
        let table = Self { rules };
        table.validate()?;
        Ok(table)
    }

    /// The built-in Tableau → DAX catalogue
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }

    fn with_builtin_rules() -> Self {
        let mut rules = Vec::new();
        rules.extend(string::rules());
        rules.extend(date::rules());
        rules.extend(logical::rules());
        rules.extend(window::rules());
        rules.extend(aggregate::rules());
        rules.extend(index::rules());
        rules.extend(rank::rules());
        rules.extend(percentile::rules());
        Self { rules }
    }

    /// Check names are unique, every composite precedes its generic rule,
    /// and every shadowed rule sits after the rule that shadows it.
    pub fn validate(&self) -> TranslateResult<()> {
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(self.rules.len());
        for (pos, rule) in self.rules.iter().enumerate() {
            if positions.insert(rule.name(), pos).is_some() {
                return Err(TranslateError::DuplicateRule(rule.name().to_string()));
            }
        }

        let lookup = |rule: &Rule, target: &str| {
            positions
                .get(target)
                .copied()
                .ok_or_else(|| TranslateError::UnknownRule {
                    rule: rule.name().to_string(),
                    target: target.to_string(),
                })
        };

        for (pos, rule) in self.rules.iter().enumerate() {
            if let Some(generic) = rule.precedes_rule() {
                let generic_pos = lookup(rule, generic)?;
                if generic_pos <= pos {
                    return Err(TranslateError::OrderViolation {
                        composite: rule.name().to_string(),
                        composite_pos: pos,
                        generic: generic.to_string(),
                        generic_pos,
                    });
                }
            }
            if let Some(earlier) = rule.shadowing_rule() {
                let earlier_pos = lookup(rule, earlier)?;
                if earlier_pos >= pos {
                    return Err(TranslateError::OrderViolation {
                        composite: earlier.to_string(),
                        composite_pos: earlier_pos,
                        generic: rule.name().to_string(),
                        generic_pos: pos,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// Table position of the rule called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name() == name)
    }

    /// Families in the order they first appear
    pub fn families(&self) -> Vec<Family> {
        let mut seen = HashSet::new();
        self.rules
            .iter()
            .map(Rule::family)
            .filter(|f| seen.insert(*f))
            .collect()
    }

    /// Summaries of every rule, in table order
    pub fn catalogue(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .enumerate()
            .map(|(position, rule)| RuleInfo {
                position,
                name: rule.name().to_string(),
                family: rule.family(),
                pattern: rule.regex().as_str().to_string(),
                template: match rule.rewrite() {
                    Rewrite::Template(t) => Some(t.to_string()),
                    Rewrite::Transform(_) => None,
                },
                precedes: rule.precedes_rule().map(str::to_string),
                shadowed_by: rule.shadowing_rule().map(str::to_string),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
