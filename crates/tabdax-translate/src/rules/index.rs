//! Index, running and offset rules
//!
//! These lean on a `[Date]` column of the target table; DAX has no notion of
//! Tableau's table-calculation partitioning, so the date axis stands in for it.

use super::{Family, Rule};
use lazy_regex::regex;

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        // The measure is a placeholder for the author to fill in
        Rule::new(
            "INDEX",
            Family::Index,
            regex!(r"(?i)\bINDEX\(\)"),
            Rule::template("RANKX(ALL(), [Measure])"),
        ),
        Rule::new(
            "PREVIOUS_VALUE",
            Family::Index,
            regex!(r"(?i)\bPREVIOUS_VALUE\((.*?)\)"),
            Rule::template("CALCULATE(${1}, PREVIOUSMONTH([Date]))"),
        ),
        Rule::new(
            "RUNNING_SUM(SUM)",
            Family::Index,
            regex!(r"(?i)\bRUNNING_SUM\(SUM\((.*?)\)\)"),
            Rule::template(
                "CALCULATE(SUM(${1}), FILTER(ALL({table}), {table}[Date] <= MAX({table}[Date])))",
            ),
        ),
        Rule::new(
            "RUNNING_AVG(SUM)",
            Family::Index,
            regex!(r"(?i)\bRUNNING_AVG\(SUM\((.*?)\)\)"),
            Rule::template(
                "CALCULATE(AVERAGEX(FILTER(ALL({table}), {table}[Date] <= MAX({table}[Date])), ${1}))",
            ),
        ),
        Rule::new(
            "LOOKUP(SUM)",
            Family::Index,
            regex!(r"(?i)\bLOOKUP\(SUM\((.*?)\),\s*(-?\d+)\)"),
            Rule::template("CALCULATE(SUM(${1}), DATEADD({table}[Date], ${2}, MONTH))"),
        ),
        // Legacy second PREVIOUS_VALUE mapping. The entry above consumes every
        // PREVIOUS_VALUE call first, so this one never fires.
        Rule::new(
            "PREVIOUS_VALUE (legacy)",
            Family::Index,
            regex!(r"(?i)\bPREVIOUS_VALUE\((.*?)\)"),
            Rule::template(
                "VAR Prev = CALCULATE([Sales], DATEADD({table}[Date], -1, MONTH)) RETURN Prev + [Sales] + [Sales]",
            ),
        )
        .shadowed_by("PREVIOUS_VALUE"),
    ]
}

#[cfg(test)]
mod tests {
    use crate::engine::RuleEngine;
    use crate::rules::RuleTable;
    use crate::table::TableName;
    use pretty_assertions::assert_eq;

    fn run(input: &str) -> String {
        RuleEngine::new(RuleTable::builtin()).apply(input, &TableName::default())
    }

    #[test]
    fn test_index_placeholder_measure() {
        assert_eq!(run("INDEX()"), "RANKX(ALL(), [Measure])");
    }

    #[test]
    fn test_previous_value_first_mapping_wins() {
        assert_eq!(
            run("PREVIOUS_VALUE([Sales])"),
            "CALCULATE([Sales], PREVIOUSMONTH([Date]))"
        );

        let engine = RuleEngine::new(RuleTable::builtin());
        let fired = engine.trace("PREVIOUS_VALUE([Sales])", &TableName::default());
        assert!(fired.contains(&"PREVIOUS_VALUE"));
        assert!(!fired.contains(&"PREVIOUS_VALUE (legacy)"));
    }

    #[test]
    fn test_running_sum() {
        assert_eq!(
            run("RUNNING_SUM(SUM([Sales]))"),
            "CALCULATE(SUM([Sales]), FILTER(ALL(Table), Table[Date] <= MAX(Table[Date])))"
        );
    }

    #[test]
    fn test_running_avg() {
        assert_eq!(
            run("RUNNING_AVG(SUM([Sales]))"),
            "CALCULATE(AVERAGEX(FILTER(ALL(Table), Table[Date] <= MAX(Table[Date])), [Sales]))"
        );
    }

    #[test]
    fn test_lookup_signed_offset() {
        assert_eq!(
            run("LOOKUP(SUM([Sales]), -1)"),
            "CALCULATE(SUM([Sales]), DATEADD(Table[Date], -1, MONTH))"
        );
    }
}
