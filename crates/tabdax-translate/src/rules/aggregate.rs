//! Plain aggregate, math and null-handling rules

use super::{Family, Rule};
use lazy_regex::regex;

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        // Aggregates and math
        Rule::new(
            "SUM",
            Family::Aggregate,
            regex!(r"(?i)\bSUM\((.*?)\)"),
            Rule::template("SUM(${1})"),
        ),
        Rule::new(
            "AVG",
            Family::Aggregate,
            regex!(r"(?i)\bAVG\((.*?)\)"),
            Rule::template("AVERAGE(${1})"),
        ),
        Rule::new(
            "MIN",
            Family::Aggregate,
            regex!(r"(?i)\bMIN\((.*?)\)"),
            Rule::template("MIN(${1})"),
        ),
        Rule::new(
            "MAX",
            Family::Aggregate,
            regex!(r"(?i)\bMAX\((.*?)\)"),
            Rule::template("MAX(${1})"),
        ),
        Rule::new(
            "SQRT",
            Family::Aggregate,
            regex!(r"(?i)\bSQRT\((.*?)\)"),
            Rule::template("SQRT(${1})"),
        ),
        Rule::new(
            "LOG",
            Family::Aggregate,
            regex!(r"(?i)\bLOG\((.*?)\)"),
            Rule::template("LOG(${1})"),
        ),
        Rule::new(
            "INT",
            Family::Aggregate,
            regex!(r"(?i)\bINT\((.*?)\)"),
            Rule::template("INT(${1})"),
        ),
        Rule::new(
            "EXP",
            Family::Aggregate,
            regex!(r"(?i)\bEXP\((.*?)\)"),
            Rule::template("EXP(${1})"),
        ),
        // Null handling
        Rule::new(
            "ZN",
            Family::Aggregate,
            regex!(r"(?i)\bZN\((.*?)\)"),
            Rule::template("IF(ISBLANK(${1}), 0, ${1})"),
        ),
        Rule::new(
            "NOT ISNULL",
            Family::Aggregate,
            regex!(r"(?i)\bNOT\s+ISNULL\((.*?)\)"),
            Rule::template("NOT(ISBLANK(${1}))"),
        )
        .precedes("ISNULL"),
        Rule::new(
            "ISNULL",
            Family::Aggregate,
            regex!(r"(?i)\bISNULL\((.*?)\)"),
            Rule::template("ISBLANK(${1})"),
        ),
        Rule::new(
            "IFNULL",
            Family::Aggregate,
            regex!(r"(?i)\bIFNULL\((.*?),\s*(.*?)\)"),
            Rule::template("IF(ISBLANK(${1}), ${2}, ${1})"),
        ),
        Rule::new(
            "COUNTD",
            Family::Aggregate,
            regex!(r"(?i)\bCOUNTD\((.*?)\)"),
            Rule::template("DISTINCTCOUNT(${1})"),
        ),
    ]
}
