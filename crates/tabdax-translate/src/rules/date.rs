//! Date function rules

use super::{Family, Groups, Rewrite, Rule};
use crate::table::TableName;
use lazy_regex::regex;

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "DATEPART(year)",
            Family::Date,
            regex!(r#"(?i)\bDATEPART\(\s*['"]year['"]\s*,\s*(.*?)\)"#),
            Rule::template("YEAR(${1})"),
        ),
        Rule::new(
            "DATEPART(month)",
            Family::Date,
            regex!(r#"(?i)\bDATEPART\(\s*['"]month['"]\s*,\s*(.*?)\)"#),
            Rule::template("MONTH(${1})"),
        ),
        Rule::new(
            "DATEPART(day)",
            Family::Date,
            regex!(r#"(?i)\bDATEPART\(\s*['"]day['"]\s*,\s*(.*?)\)"#),
            Rule::template("DAY(${1})"),
        ),
        Rule::new(
            "DATEPART(weekday)",
            Family::Date,
            regex!(r#"(?i)\bDATEPART\(\s*['"]weekday['"]\s*,\s*(.*?)\)"#),
            Rule::template("WEEKDAY(${1})"),
        ),
        Rule::new(
            "TODAY",
            Family::Date,
            regex!(r"(?i)\bTODAY\(\)"),
            Rule::template("TODAY()"),
        ),
        Rule::new(
            "NOW",
            Family::Date,
            regex!(r"(?i)\bNOW\(\)"),
            Rule::template("NOW()"),
        ),
        Rule::new(
            "MAKEDATE",
            Family::Date,
            regex!(r"(?i)\bMAKEDATE\((\d+),\s*(\d+),\s*(\d+)\)"),
            Rule::template("DATE(${1}, ${2}, ${3})"),
        ),
        Rule::new(
            "MAKETIME",
            Family::Date,
            regex!(r"(?i)\bMAKETIME\((.*?),\s*(.*?),\s*(.*?)\)"),
            Rule::template("TIME(${1}, ${2}, ${3})"),
        ),
        Rule::new(
            "DATEADD",
            Family::Date,
            regex!(r#"(?i)\bDATEADD\((.*?),\s*(.*?),\s*['"](\w+)['"]\)"#),
            Rewrite::Transform(date_add),
        ),
        Rule::new(
            "DATEDIFF",
            Family::Date,
            regex!(r#"(?i)\bDATEDIFF\((.*?),\s*(.*?),\s*['"](\w+)['"]\)"#),
            Rewrite::Transform(date_diff),
        ),
        Rule::new(
            "DATETRUNC(year|month|day)",
            Family::Date,
            regex!(r#"(?i)\bDATETRUNC\(\s*['"](year|month|day)['"]\s*,\s*(.*?)\)"#),
            Rewrite::Transform(date_trunc),
        ),
        Rule::new(
            "DATETRUNC(quarter)",
            Family::Date,
            regex!(r#"(?i)\bDATETRUNC\(\s*['"]quarter['"]\s*,\s*(.*?)\)"#),
            Rewrite::Transform(date_trunc_quarter),
        ),
    ]
}

/// The unit argument is a quoted literal in Tableau and a bare keyword in DAX
fn date_add(g: &Groups<'_, '_>, _table: &TableName) -> String {
    format!(
        "DATEADD({}, {}, {})",
        g.get(1),
        g.get(2),
        g.get(3).to_uppercase()
    )
}

fn date_diff(g: &Groups<'_, '_>, _table: &TableName) -> String {
    format!(
        "DATEDIFF({}, {}, {})",
        g.get(1),
        g.get(2),
        g.get(3).to_uppercase()
    )
}

fn date_trunc(g: &Groups<'_, '_>, _table: &TableName) -> String {
    let date = g.get(2);
    match g.get(1).to_ascii_lowercase().as_str() {
        "year" => format!("DATE(YEAR({date}), 1, 1)"),
        "month" => format!("EOMONTH({date}, -1) + 1"),
        _ => format!("TRUNC({date}, \"DAY\")"),
    }
}

fn date_trunc_quarter(g: &Groups<'_, '_>, _table: &TableName) -> String {
    let date = g.get(1);
    format!("DATE(YEAR({date}), ((QUARTER({date}) - 1) * 3) + 1, 1)")
}
