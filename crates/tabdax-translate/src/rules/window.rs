//! Window aggregate rules
//!
//! Every `WINDOW_<outer>(<inner>(x))` pair is its own hand-written entry.
//! The DAX shape depends on both operators and does not follow one formula,
//! so pairs missing from this list fall through to the plain aggregate rules.

use super::{Family, Rule};
use lazy_regex::regex;

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "WINDOW_SUM(SUM)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_SUM\(SUM\((.*?)\)\)"),
            Rule::template("CALCULATE(SUM(${1}), REMOVEFILTERS())"),
        )
        .precedes("SUM"),
        Rule::new(
            "WINDOW_AVG(AVG)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_AVG\(AVG\((.*?)\)\)"),
            Rule::template("CALCULATE(AVERAGE(${1}), REMOVEFILTERS())"),
        )
        .precedes("AVG"),
        Rule::new(
            "WINDOW_AVG(SUM)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_AVG\(SUM\((.*?)\)\)"),
            Rule::template("CALCULATE(AVERAGEX(ALL({table}), ${1}))"),
        )
        .precedes("SUM"),
        Rule::new(
            "WINDOW_SUM(AVG)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_SUM\(AVG\((.*?)\)\)"),
            Rule::template("CALCULATE(SUMX(ALL({table}), ${1}))"),
        )
        .precedes("AVG"),
        Rule::new(
            "WINDOW_MAX(SUM)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_MAX\(SUM\((.*?)\)\)"),
            Rule::template("CALCULATE(MAX(${1}), REMOVEFILTERS())"),
        )
        .precedes("SUM"),
        Rule::new(
            "WINDOW_MIN(SUM)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_MIN\(SUM\((.*?)\)\)"),
            Rule::template("CALCULATE(MIN(${1}), REMOVEFILTERS())"),
        )
        .precedes("SUM"),
        Rule::new(
            "WINDOW_VAR(SUM)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_VAR\(SUM\((.*?)\)\)"),
            Rule::template("CALCULATE(VAR.S(${1}), REMOVEFILTERS())"),
        )
        .precedes("SUM"),
        Rule::new(
            "WINDOW_VAR(AVG)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_VAR\(AVG\((.*?)\)\)"),
            Rule::template("CALCULATE(VAR.S(${1}), REMOVEFILTERS())"),
        )
        .precedes("AVG"),
        Rule::new(
            "WINDOW_STDEV(SUM)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_STDEV\(SUM\((.*?)\)\)"),
            Rule::template("CALCULATE(STDEV.S(${1}), REMOVEFILTERS())"),
        )
        .precedes("SUM"),
        Rule::new(
            "WINDOW_STDEV(MAX)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_STDEV\(MAX\((.*?)\)\)"),
            Rule::template("CALCULATE(STDEV.S(${1}), REMOVEFILTERS())"),
        )
        .precedes("MAX"),
        Rule::new(
            "WINDOW_MIN(MIN)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_MIN\(MIN\((.*?)\)\)"),
            Rule::template("CALCULATE(MIN(${1}), REMOVEFILTERS())"),
        )
        .precedes("MIN"),
        Rule::new(
            "WINDOW_MAX(MAX)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_MAX\(MAX\((.*?)\)\)"),
            Rule::template("CALCULATE(MAX(${1}), REMOVEFILTERS())"),
        )
        .precedes("MAX"),
        Rule::new(
            "WINDOW_SUM(COUNT)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_SUM\(COUNT\((.*?)\)\)"),
            Rule::template("CALCULATE(COUNT(${1}), REMOVEFILTERS())"),
        ),
        Rule::new(
            "WINDOW_AVG(COUNTD)",
            Family::Window,
            regex!(r"(?i)\bWINDOW_AVG\(COUNTD\((.*?)\)\)"),
            Rule::template("CALCULATE(DISTINCTCOUNT(${1}), REMOVEFILTERS())"),
        )
        .precedes("COUNTD"),
    ]
}
