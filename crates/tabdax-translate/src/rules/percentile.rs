//! Percentile rules

use super::{Family, Groups, Rewrite, Rule};
use crate::table::{clean_field, TableName};
use lazy_regex::regex;

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "WINDOW_PERCENTILE(SUM)",
            Family::Percentile,
            regex!(r"(?i)\bWINDOW_PERCENTILE\(SUM\((.*?)\),\s*(\d+)\)"),
            Rewrite::Transform(window_percentile),
        ),
        // Same pattern as above without field cleanup; never reached
        Rule::new(
            "WINDOW_PERCENTILE(SUM) (legacy)",
            Family::Percentile,
            regex!(r"(?i)\bWINDOW_PERCENTILE\(SUM\((.*?)\),\s*(\d+)\)"),
            Rewrite::Transform(window_percentile_raw),
        )
        .shadowed_by("WINDOW_PERCENTILE(SUM)"),
        Rule::new(
            "PERCENTILE",
            Family::Percentile,
            regex!(r"(?i)\bPERCENTILE\((.*?),\s*(.*?)\)"),
            Rewrite::Transform(percentile),
        ),
        Rule::new(
            "PERCENTILE (legacy)",
            Family::Percentile,
            regex!(r"(?i)\bPERCENTILE\((.*?),\s*(.*?)\)"),
            Rewrite::Transform(percentile_unfiltered),
        )
        .shadowed_by("PERCENTILE"),
    ]
}

/// Convert a 0–100 percentage literal into a 0–1 fraction
///
/// Digits too long for an integer fall back to a DAX division.
pub fn percent_fraction(digits: &str) -> String {
    match digits.parse::<u64>() {
        Ok(n) => format!("{:?}", n as f64 / 100.0),
        Err(_) => format!("{digits} / 100"),
    }
}

fn window_percentile(g: &Groups<'_, '_>, table: &TableName) -> String {
    format!(
        "PERCENTILEX.INC(ALL({}), CALCULATE(SUM({})), {})",
        table.quoted(),
        table.column(clean_field(g.get(1))),
        percent_fraction(g.get(2))
    )
}

fn window_percentile_raw(g: &Groups<'_, '_>, table: &TableName) -> String {
    format!(
        "PERCENTILEX.INC(ALL({}), CALCULATE(SUM({})), {})",
        table.quoted(),
        table.column(g.get(1)),
        percent_fraction(g.get(2))
    )
}

fn percentile(g: &Groups<'_, '_>, table: &TableName) -> String {
    format!(
        "PERCENTILEX.INC(ALL({}), {}, {})",
        table.quoted(),
        table.column(clean_field(g.get(1))),
        g.get(2)
    )
}

fn percentile_unfiltered(g: &Groups<'_, '_>, _table: &TableName) -> String {
    format!(
        "PERCENTILEX.INC(REMOVEFILTERS(), {}, {})",
        clean_field(g.get(1)),
        g.get(2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RuleEngine;
    use crate::rules::RuleTable;
    use pretty_assertions::assert_eq;

    fn run(input: &str) -> String {
        RuleEngine::new(RuleTable::builtin()).apply(input, &TableName::default())
    }

    #[test]
    fn test_percent_fraction() {
        assert_eq!(percent_fraction("90"), "0.9");
        assert_eq!(percent_fraction("100"), "1.0");
        assert_eq!(percent_fraction("5"), "0.05");
        assert_eq!(percent_fraction("0"), "0.0");
        assert_eq!(
            percent_fraction("123456789012345678901234567890"),
            "123456789012345678901234567890 / 100"
        );
    }

    #[test]
    fn test_window_percentile() {
        assert_eq!(
            run("WINDOW_PERCENTILE(SUM([Sales]), 90)"),
            "PERCENTILEX.INC(ALL('Table'), CALCULATE(SUM('Table'[Sales])), 0.9)"
        );
    }

    #[test]
    fn test_percentile_passes_fraction_through() {
        assert_eq!(
            run("PERCENTILE([Sales], 0.25)"),
            "PERCENTILEX.INC(ALL('Table'), 'Table'[Sales], 0.25)"
        );
    }

    #[test]
    fn test_legacy_duplicates_never_fire() {
        let engine = RuleEngine::new(RuleTable::builtin());
        let table = TableName::default();
        let fired = engine.trace("WINDOW_PERCENTILE(SUM([Sales]), 50) + PERCENTILE([x], 0.5)", &table);
        assert_eq!(fired, vec!["WINDOW_PERCENTILE(SUM)", "PERCENTILE"]);
    }
}
