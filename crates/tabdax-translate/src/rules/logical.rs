//! Logical function rules

use super::rank::{rank_of_sum, TieBreak};
use super::{Family, Groups, Rewrite, Rule};
use crate::scanner::{contains_keyword, scan, Keyword};
use crate::table::TableName;
use lazy_regex::regex;
use ::regex::{Captures, Regex};

fn if_then_else_pattern() -> &'static Regex {
    regex!(r"(?i)\bIF\s+(.*?)\s+THEN\s+(.*?)\s+ELSE\s+(.*?)\s+END")
}

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "IF RANK <= N THEN",
            Family::Logical,
            regex!(
                r"(?i)\bIF\s+RANK\(SUM\((.*?)\),\s*'desc'\)\s*<=\s*(\d+)\s+THEN\s+(.*?)(?:\s+ELSE\s+(.*?))?\s+END"
            ),
            Rewrite::Transform(top_n_branch),
        )
        .precedes("IF THEN ELSE"),
        // Statements are not parsed: a lazy match may start in one statement
        // and find its ELSE in the next, so `if_then_else` hands such a match
        // back split at the first END. Nested IF blocks are not supported.
        Rule::new(
            "IF THEN ELSE",
            Family::Logical,
            if_then_else_pattern(),
            Rewrite::Transform(if_then_else),
        )
        .precedes("IF THEN"),
        Rule::new(
            "IF THEN",
            Family::Logical,
            regex!(r"(?i)\bIF\s+(.*?)\s+THEN\s+(.*?)\s+END"),
            Rule::template("IF(${1}, ${2})"),
        ),
        Rule::new(
            "IIF",
            Family::Logical,
            regex!(r"(?i)\bIIF\((.*?),\s*(.*?),\s*(.*?)\)"),
            Rule::template("IF(${1}, ${2}, ${3})"),
        ),
        Rule::new(
            "AND",
            Family::Logical,
            regex!(r"(?i)\bAND\((.*?)\)"),
            Rewrite::Transform(and),
        ),
        Rule::new(
            "OR",
            Family::Logical,
            regex!(r"(?i)\bOR\((.*?)\)"),
            Rewrite::Transform(or),
        ),
        Rule::new(
            "NOT",
            Family::Logical,
            regex!(r"(?i)\bNOT\((.*?)\)"),
            Rule::template("NOT(${1})"),
        ),
    ]
}

fn top_n_branch(g: &Groups<'_, '_>, table: &TableName) -> String {
    let rank = rank_of_sum(table, g.get(1), TieBreak::Skip);
    match g.opt(4) {
        Some(otherwise) => format!("IF({rank} <= {}, {}, {otherwise})", g.get(2), g.get(3)),
        None => format!("IF({rank} <= {}, {})", g.get(2), g.get(3)),
    }
}

fn if_then_else(g: &Groups<'_, '_>, table: &TableName) -> String {
    let matched = g.get(0);
    let crosses_end = contains_keyword(g.get(1), Keyword::End)
        || contains_keyword(g.get(2), Keyword::End);
    let first_end = scan(matched).into_iter().find(|h| h.keyword == Keyword::End);

    match first_end {
        // The first statement has no ELSE; leave it for `IF THEN` and retry
        // the rest.
        Some(end) if crosses_end => {
            let (head, tail) = matched.split_at(end.end);
            let tail = if_then_else_pattern()
                .replace_all(tail, |caps: &Captures<'_>| if_then_else(&Groups::new(caps), table));
            format!("{head}{tail}")
        }
        _ => format!("IF({}, {}, {})", g.get(1), g.get(2), g.get(3)),
    }
}

fn join_operands(operands: &str, operator: &str) -> String {
    operands
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(operator)
}

fn and(g: &Groups<'_, '_>, _table: &TableName) -> String {
    join_operands(g.get(1), " && ")
}

fn or(g: &Groups<'_, '_>, _table: &TableName) -> String {
    join_operands(g.get(1), " || ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RuleEngine;
    use crate::rules::RuleTable;
    use pretty_assertions::assert_eq;

    fn apply(name: &str, input: &str) -> String {
        RuleTable::builtin()
            .get(name)
            .unwrap()
            .apply(input, &TableName::default())
            .into_owned()
    }

    #[test]
    fn test_if_then_else() {
        assert_eq!(
            apply("IF THEN ELSE", r#"IF [Profit] > 0 THEN "Gain" ELSE "Loss" END"#),
            r#"IF([Profit] > 0, "Gain", "Loss")"#
        );
    }

    fn run(input: &str) -> String {
        RuleEngine::new(RuleTable::builtin()).apply(input, &TableName::default())
    }

    #[test]
    fn test_top_n_statement() {
        assert_eq!(
            run(r#"IF RANK(SUM([Sales]), 'desc') <= 10 THEN "Top" ELSE "Other" END"#),
            r#"IF(RANKX(ALL('Table'), CALCULATE(SUM('Table'[Sales])), BLANK(), DESC, SKIP) <= 10, "Top", "Other")"#
        );
        assert_eq!(
            run(r#"if rank(sum([Sales]), 'desc') <= 5 then "Top" end"#),
            r#"IF(RANKX(ALL('Table'), CALCULATE(SUM('Table'[Sales])), BLANK(), DESC, SKIP) <= 5, "Top")"#
        );
    }

    #[test]
    fn test_top_n_statement_precedes_if_then_else() {
        let table = RuleTable::builtin();
        let top_n = table.get("IF RANK <= N THEN").unwrap();
        assert_eq!(top_n.precedes_rule(), Some("IF THEN ELSE"));
        assert!(table.position("IF RANK <= N THEN") < table.position("IF THEN ELSE"));
    }

    #[test]
    fn test_if_then_else_stops_at_first_statement_end() {
        assert_eq!(
            apply("IF THEN ELSE", "IF a THEN 1 END + IF b THEN 2 ELSE 3 END"),
            "IF a THEN 1 END + IF(b, 2, 3)"
        );
        assert_eq!(
            run("IF a THEN 1 END + IF b THEN 2 ELSE 3 END"),
            "IF(a, 1) + IF(b, 2, 3)"
        );
        assert_eq!(
            run("IF a THEN 1 ELSE 2 END + IF b THEN 3 ELSE 4 END"),
            "IF(a, 1, 2) + IF(b, 3, 4)"
        );
    }

    #[test]
    fn test_if_then() {
        assert_eq!(
            apply("IF THEN", r#"if [Profit] > 0 then "Gain" end"#),
            r#"IF([Profit] > 0, "Gain")"#
        );
    }

    #[test]
    fn test_iif() {
        assert_eq!(apply("IIF", "IIF([a] > 1, 1, 0)"), "IF([a] > 1, 1, 0)");
    }

    #[test]
    fn test_and_or_flatten() {
        assert_eq!(apply("AND", "AND([a] > 1, [b] < 2 ,[c])"), "[a] > 1 && [b] < 2 && [c]");
        assert_eq!(apply("OR", "OR([a], [b])"), "[a] || [b]");
    }

    #[test]
    fn test_and_keyword_without_parens_untouched() {
        assert_eq!(apply("AND", "[a] AND [b]"), "[a] AND [b]");
    }
}
