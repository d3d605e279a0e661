//! End-to-end translation scenarios

use pretty_assertions::assert_eq;
use tabdax::prelude::*;
use tabdax::translate;

fn dax(expression: &str) -> String {
    translate(Some(expression), "Table").unwrap()
}

/// Test a plain function rename
#[test]
fn test_replace_becomes_substitute() {
    assert_eq!(
        dax(r#"REPLACE([Name], "a", "b")"#),
        r#"SUBSTITUTE([Name], "a", "b")"#
    );
}

/// Test FIXED level-of-detail conversion
#[test]
fn test_fixed_lod() {
    assert_eq!(
        dax("{FIXED [Region]: SUM([Sales])}"),
        "CALCULATE(SUM([Sales]), ALLEXCEPT('Table', 'Table'[Region]))"
    );
}

/// Test IF/ELSEIF chains become SWITCH(TRUE(), ...)
#[test]
fn test_multi_branch_if() {
    assert_eq!(
        dax(r#"IF [x] > 0 THEN "pos" ELSEIF [x] < 0 THEN "neg" ELSE "zero" END"#),
        r#"SWITCH(TRUE(), [x] > 0, "pos", [x] < 0, "neg", "zero")"#
    );
}

/// Test the window-of-sum special cases differ
#[test]
fn test_window_sum_and_avg_differ() {
    let sum = dax("WINDOW_SUM(SUM([Sales]))");
    let avg = dax("WINDOW_AVG(SUM([Sales]))");

    assert_eq!(sum, "CALCULATE(SUM([Sales]), REMOVEFILTERS())");
    assert_eq!(avg, "CALCULATE(AVERAGEX(ALL(Table), [Sales]))");
    assert_ne!(sum, avg);
}

/// Test composite window rules win over the plain SUM rule
#[test]
fn test_rule_order_sensitivity() {
    let translator = Translator::default();
    let explanation = translator.explain("WINDOW_SUM(SUM([Sales]))");
    assert_eq!(explanation.fired, vec!["WINDOW_SUM(SUM)"]);
}

/// Test quarter truncation builds a first-of-quarter date
#[test]
fn test_datetrunc_quarter() {
    assert_eq!(
        dax("DATETRUNC('quarter', [Date])"),
        "DATE(YEAR([Date]), ((QUARTER([Date]) - 1) * 3) + 1, 1)"
    );
}

/// Test RANK and RANK_DENSE differ only in tie-break mode
#[test]
fn test_rank_tie_break_modes() {
    let rank = dax("RANK(SUM([Sales]))");
    let dense = dax("RANK_DENSE(SUM([Sales]))");

    assert!(rank.ends_with(", SKIP)"));
    assert!(dense.ends_with(", DENSE)"));
    assert_eq!(rank.replace("SKIP", "DENSE"), dense);
}

/// Test unknown text passes through unchanged
#[test]
fn test_passthrough() {
    assert_eq!(dax("[Sales] * (1 + [Tax Rate])"), "[Sales] * (1 + [Tax Rate])");
    assert_eq!(dax(""), "");
    assert_eq!(translate(None, "Table"), None);
}

/// Test CASE blocks with both subject policies
#[test]
fn test_case_policies() {
    let source = r#"CASE [Segment] WHEN "Consumer" THEN 1 WHEN "Corporate" THEN 2 ELSE 3 END"#;

    assert_eq!(
        dax(source),
        r#"SWITCH(TRUE(), "Consumer", 1, "Corporate", 2, 3)"#
    );

    let translator = Translator::new(TranslateOptions {
        case_subject: CaseSubject::Compare,
        ..TranslateOptions::default()
    });
    assert_eq!(
        translator.translate_str(source),
        r#"SWITCH(TRUE(), [Segment] = "Consumer", 1, [Segment] = "Corporate", 2, 3)"#
    );
}

/// Test the configured table name flows into every generated reference
#[test]
fn test_table_name_everywhere() {
    let translator = Translator::new(TranslateOptions::for_table("Fact Sales"));

    assert_eq!(
        translator.translate_str("{INCLUDE [Customer]: AVG([Profit])}"),
        "CALCULATE(AVERAGE([Profit]), KEEPFILTERS(VALUES('Fact Sales'[Customer])))"
    );
    assert_eq!(
        translator.translate_str("WINDOW_AVG(SUM([Sales]))"),
        "CALCULATE(AVERAGEX(ALL('Fact Sales'), [Sales]))"
    );
    assert_eq!(
        translator.translate_str("PERCENTILE([Sales], 0.9)"),
        "PERCENTILEX.INC(ALL('Fact Sales'), 'Fact Sales'[Sales], 0.9)"
    );
}

/// Test a two-branch IF goes through the rule engine
#[test]
fn test_two_branch_if() {
    assert_eq!(
        dax("IF [Profit] > 0 THEN 'Yes' ELSE 'No' END"),
        "IF([Profit] > 0, 'Yes', 'No')"
    );
}

/// Test several rules firing on one expression
#[test]
fn test_combined_rules() {
    assert_eq!(
        dax("IFNULL(AVG([Discount]), 0) + DATEPART('year', [Order Date])"),
        "IF(ISBLANK(AVERAGE([Discount])), 0, AVERAGE([Discount])) + YEAR([Order Date])"
    );
}

/// Test a complete Top-N IF statement keeps its branch results
#[test]
fn test_top_n_statement() {
    assert_eq!(
        dax(r#"IF RANK(SUM([Sales]), 'desc') <= 10 THEN "Top" ELSE "Other" END"#),
        r#"IF(RANKX(ALL('Table'), CALCULATE(SUM('Table'[Sales])), BLANK(), DESC, SKIP) <= 10, "Top", "Other")"#
    );
}

/// Test adjacent IF statements are translated separately
#[test]
fn test_adjacent_if_statements() {
    assert_eq!(
        dax("IF [a] THEN 1 END + IF [b] THEN 2 ELSE 3 END"),
        "IF([a], 1) + IF([b], 2, 3)"
    );
}

/// Test every level-of-detail block in an expression is converted
#[test]
fn test_lod_ratio() {
    assert_eq!(
        dax("{FIXED [a]: SUM([x])} / {FIXED [b]: SUM([x])}"),
        "CALCULATE(SUM([x]), ALLEXCEPT('Table', 'Table'[a])) / CALCULATE(SUM([x]), ALLEXCEPT('Table', 'Table'[b]))"
    );
}
