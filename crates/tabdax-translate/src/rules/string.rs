//! String function rules

use super::{Family, Groups, Rewrite, Rule};
use crate::table::TableName;
use lazy_regex::regex;

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "REPLACE",
            Family::String,
            regex!(r"(?i)\bREPLACE\((.*?),\s*(.*?),\s*(.*?)\)"),
            Rule::template("SUBSTITUTE(${1}, ${2}, ${3})"),
        ),
        // FIND's optional start position has no SEARCH equivalent; dropped
        Rule::new(
            "FIND",
            Family::String,
            regex!(r"(?i)\bFIND\((.*?),\s*(.*?)(?:,\s*(.*?))?\)"),
            Rule::template("SEARCH(${1}, ${2})"),
        ),
        Rule::new(
            "CONTAINS",
            Family::String,
            regex!(r"(?i)\bCONTAINS\((.*?),\s*(.*?)\)"),
            Rule::template("SEARCH(${2}, ${1}, 1, 0) > 0"),
        ),
        Rule::new(
            "STARTSWITH",
            Family::String,
            regex!(r"(?i)\bSTARTSWITH\((.*?),\s*(.*?)\)"),
            Rule::template("LEFT(${1}, LEN(${2})) = ${2}"),
        ),
        Rule::new(
            "ENDSWITH",
            Family::String,
            regex!(r"(?i)\bENDSWITH\((.*?),\s*(.*?)\)"),
            Rule::template("RIGHT(${1}, LEN(${2})) = ${2}"),
        ),
        Rule::new(
            "SPLIT",
            Family::String,
            regex!(r#"(?i)\bSPLIT\((.*?),\s*"(.*?)"(?:,\s*(\d+))?\)"#),
            Rewrite::Transform(split),
        ),
    ]
}

/// SPLIT(s, "d", n) → swap the delimiter for a path separator and take item n
fn split(g: &Groups<'_, '_>, _table: &TableName) -> String {
    format!(
        "PATHITEM(SUBSTITUTE({}, \"{}\", \"|\"), {})",
        g.get(1),
        g.get(2),
        g.opt(3).unwrap_or("1")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_replace() {
        assert_eq!(
            apply("REPLACE", r#"REPLACE([Name], "a", "b")"#),
            r#"SUBSTITUTE([Name], "a", "b")"#
        );
        assert_eq!(
            apply("REPLACE", r#"replace([Name],"a","b")"#),
            r#"SUBSTITUTE([Name], "a", "b")"#
        );
    }

    #[test]
    fn test_find_drops_start_position() {
        assert_eq!(apply("FIND", r#"FIND([Name], "x")"#), r#"SEARCH([Name], "x")"#);
        assert_eq!(
            apply("FIND", r#"FIND([Name], "x", 3)"#),
            r#"SEARCH([Name], "x")"#
        );
    }

    #[test]
    fn test_contains_swaps_arguments() {
        assert_eq!(
            apply("CONTAINS", r#"CONTAINS([Name], "Inc")"#),
            r#"SEARCH("Inc", [Name], 1, 0) > 0"#
        );
    }

    #[test]
    fn test_starts_and_ends_with() {
        assert_eq!(
            apply("STARTSWITH", r#"STARTSWITH([Code], "AB")"#),
            r#"LEFT([Code], LEN("AB")) = "AB""#
        );
        assert_eq!(
            apply("ENDSWITH", r#"ENDSWITH([Code], "Z")"#),
            r#"RIGHT([Code], LEN("Z")) = "Z""#
        );
    }

    #[test]
    fn test_split_defaults_to_first_token() {
        assert_eq!(
            apply("SPLIT", r#"SPLIT([Path], "-", 2)"#),
            r#"PATHITEM(SUBSTITUTE([Path], "-", "|"), 2)"#
        );
        assert_eq!(
            apply("SPLIT", r#"SPLIT([Path], "/")"#),
            r#"PATHITEM(SUBSTITUTE([Path], "/", "|"), 1)"#
        );
    }

    #[test]
    fn test_word_boundary_required() {
        assert_eq!(apply("FIND", "REFIND([a], [b])"), "REFIND([a], [b])");
    }
}
