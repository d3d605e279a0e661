//! Expression dispatch
//!
//! [`Translator`] decides which converter handles an expression and runs it.
//! Resolution order, first match wins:
//!
//! 1. absent input stays absent
//! 2. `{` → level-of-detail converter
//! 3. an `ELSEIF` keyword anywhere → multi-branch rewriter
//! 4. a leading `CASE` keyword → case rewriter
//! 5. everything else → rule engine

use crate::branch;
use crate::case::{self, CaseSubject};
use crate::engine::RuleEngine;
use crate::lod::{LodConverter, ScopedAggregation};
use crate::rules::RuleTable;
use crate::scanner::{contains_keyword, starts_with_keyword, Keyword};
use crate::table::TableName;
use serde::Serialize;
use std::fmt;

/// Inputs longer than this many bytes pass through untranslated by default
pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

/// Translation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Table generated references are qualified against
    pub table_name: TableName,
    /// Handling of `CASE <subject> WHEN ...`
    pub case_subject: CaseSubject,
    /// Longer inputs are returned unchanged
    pub max_input_len: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            table_name: TableName::default(),
            case_subject: CaseSubject::default(),
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl TranslateOptions {
    /// Default options targeting `table_name`
    pub fn for_table(table_name: impl Into<TableName>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }
}

/// Which converter an expression is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    LevelOfDetail,
    Branch,
    Case,
    Rules,
    /// Over the length limit; returned unchanged
    Oversized,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::LevelOfDetail => "level-of-detail",
            Route::Branch => "branch",
            Route::Case => "case",
            Route::Rules => "rules",
            Route::Oversized => "oversized",
        };
        f.write_str(name)
    }
}

/// How one expression was translated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation<'r> {
    pub route: Route,
    /// Rules that changed the text, in firing order
    pub fired: Vec<&'r str>,
    pub output: String,
}

/// Translates calculated-field expressions to DAX
///
/// Holds a shared reference to an immutable [`RuleTable`], so one translator
/// can serve many threads.
#[derive(Debug, Clone)]
pub struct Translator<'r> {
    rules: &'r RuleTable,
    options: TranslateOptions,
}

impl Translator<'static> {
    /// Translator over the built-in rules
    pub fn new(options: TranslateOptions) -> Self {
        Self::with_rules(RuleTable::builtin(), options)
    }
}

impl Default for Translator<'static> {
    fn default() -> Self {
        Self::new(TranslateOptions::default())
    }
}

impl<'r> Translator<'r> {
    /// Translator over a caller-supplied rule table
    pub fn with_rules(rules: &'r RuleTable, options: TranslateOptions) -> Self {
        Self { rules, options }
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    pub fn rules(&self) -> &'r RuleTable {
        self.rules
    }

    fn engine(&self) -> RuleEngine<'r> {
        RuleEngine::new(self.rules)
    }

    /// Classify `expression` without translating it
    pub fn route(&self, expression: &str) -> Route {
        let text = expression.trim();
        if text.len() > self.options.max_input_len {
            Route::Oversized
        } else if text.starts_with('{') {
            Route::LevelOfDetail
        } else if contains_keyword(text, Keyword::ElseIf) {
            Route::Branch
        } else if starts_with_keyword(text, Keyword::Case) {
            Route::Case
        } else {
            Route::Rules
        }
    }

    /// Translate an optional expression; absent input stays absent
    pub fn translate(&self, expression: Option<&str>) -> Option<String> {
        expression.map(|e| self.translate_str(e))
    }

    /// Translate one expression
    pub fn translate_str(&self, expression: &str) -> String {
        let route = self.route(expression);
        tracing::debug!(%route, "translating expression");
        self.run(route, expression)
    }

    /// Translate and report the route and the rules that fired
    pub fn explain(&self, expression: &str) -> Explanation<'r> {
        let route = self.route(expression);
        let table = &self.options.table_name;
        let fired = match route {
            Route::Rules => self.engine().trace(expression.trim(), table),
            Route::LevelOfDetail => match ScopedAggregation::parse(expression) {
                Some(block) => {
                    let mut fired = self.engine().trace(&block.measure, table);
                    fired.extend(self.engine().trace(&block.trailing, table));
                    fired
                }
                None => Vec::new(),
            },
            Route::Branch | Route::Case | Route::Oversized => Vec::new(),
        };

        Explanation {
            route,
            fired,
            output: self.run(route, expression),
        }
    }

    fn run(&self, route: Route, expression: &str) -> String {
        let table = &self.options.table_name;
        match route {
            Route::Oversized => {
                tracing::warn!(
                    len = expression.len(),
                    limit = self.options.max_input_len,
                    "expression over length limit left untranslated"
                );
                expression.to_string()
            }
            Route::LevelOfDetail => LodConverter::new(self.engine()).convert(expression, table),
            Route::Branch => branch::rewrite(expression),
            Route::Case => case::rewrite(expression, self.options.case_subject),
            Route::Rules => self.engine().apply(expression.trim(), table),
        }
    }
}

/// Translate with the built-in rules and default options for `table_name`
///
/// ```
/// use tabdax_translate::translate;
///
/// assert_eq!(
///     translate(Some("REPLACE([Name], \"a\", \"b\")"), "Table").as_deref(),
///     Some("SUBSTITUTE([Name], \"a\", \"b\")")
/// );
/// assert_eq!(translate(None, "Table"), None);
/// ```
pub fn translate(expression: Option<&str>, table_name: &str) -> Option<String> {
    Translator::new(TranslateOptions::for_table(table_name)).translate(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_routing_order() {
        let translator = Translator::default();
        assert_eq!(translator.route("  {FIXED [a]: SUM([b])}"), Route::LevelOfDetail);
        assert_eq!(translator.route("IF a THEN 1 ELSEIF b THEN 2 END"), Route::Branch);
        assert_eq!(translator.route("CASE [a] WHEN 1 THEN 2 END"), Route::Case);
        assert_eq!(translator.route("CASE WHEN a THEN 1 ELSEIF b THEN 2 END"), Route::Branch);
        assert_eq!(translator.route("IF a THEN 1 ELSE 2 END"), Route::Rules);
        assert_eq!(translator.route("SUM([CASES])"), Route::Rules);
        assert_eq!(translator.route(r#"IF [a] = "ELSEIF" THEN 1 END"#), Route::Rules);
    }

    #[test]
    fn test_absent_stays_absent() {
        assert_eq!(Translator::default().translate(None), None);
    }

    #[test]
    fn test_input_trimmed() {
        assert_eq!(
            Translator::default().translate(Some("  AVG([x])\n")),
            Some("AVERAGE([x])".to_string())
        );
    }

    #[test]
    fn test_oversized_passthrough() {
        let translator = Translator::new(TranslateOptions {
            max_input_len: 8,
            ..TranslateOptions::default()
        });
        let input = "AVG([Sales])";
        assert_eq!(translator.route(input), Route::Oversized);
        assert_eq!(translator.translate_str(input), input);
    }

    #[test]
    fn test_case_subject_option() {
        let translator = Translator::new(TranslateOptions {
            case_subject: CaseSubject::Compare,
            ..TranslateOptions::default()
        });
        assert_eq!(
            translator.translate_str("CASE [a] WHEN 1 THEN 'x' ELSE 'y' END"),
            "SWITCH(TRUE(), [a] = 1, 'x', 'y')"
        );
    }

    #[test]
    fn test_explain_lists_fired_rules() {
        let translator = Translator::default();
        let explanation = translator.explain("ZN(AVG([x]))");
        assert_eq!(explanation.route, Route::Rules);
        assert_eq!(explanation.fired, vec!["AVG", "ZN"]);
        assert_eq!(explanation.output, translator.translate_str("ZN(AVG([x]))"));

        let explanation = translator.explain("{EXCLUDE [r]: AVG([x])}");
        assert_eq!(explanation.route, Route::LevelOfDetail);
        assert_eq!(explanation.fired, vec!["AVG"]);
    }

    #[test]
    fn test_custom_rule_table() {
        use crate::rules::{Family, Rule};

        let rules = RuleTable::new(vec![Rule::pattern(
            "MEDIAN",
            Family::Custom,
            r"\bMEDIAN\((.*?)\)",
            Rule::template("MEDIANX({table_ref}, ${1})"),
        )
        .unwrap()])
        .unwrap();
        let translator = Translator::with_rules(&rules, TranslateOptions::for_table("Facts"));
        assert_eq!(
            translator.translate_str("median([Sales])"),
            "MEDIANX('Facts', [Sales])"
        );
    }

    #[test]
    fn test_translator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Translator<'static>>();
    }
}
