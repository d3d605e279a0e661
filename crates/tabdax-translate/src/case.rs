//! `CASE ... WHEN ... THEN ... END` rewriting

use crate::chain::{ConditionalBlock, ConditionalChain};
use crate::scanner::{normalize_whitespace, scan, Keyword, KeywordHit};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// What to do with the subject of `CASE <subject> WHEN <value> ...`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSubject {
    /// Drop the subject and use each `WHEN` value as a bare condition
    #[default]
    Discard,
    /// Turn each `WHEN <value>` into `<subject> = <value>`
    Compare,
}

impl FromStr for CaseSubject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(CaseSubject::Discard),
            "compare" => Ok(CaseSubject::Compare),
            other => Err(format!(
                "unknown case subject policy '{other}' (expected 'discard' or 'compare')"
            )),
        }
    }
}

impl fmt::Display for CaseSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseSubject::Discard => f.write_str("discard"),
            CaseSubject::Compare => f.write_str("compare"),
        }
    }
}

/// Rewrite a `CASE` block into switch-on-true form
///
/// Input that does not start with `CASE` or has no `WHEN ... THEN` pair is
/// returned trimmed but otherwise unchanged.
pub fn rewrite(expression: &str, subject_policy: CaseSubject) -> String {
    let text = normalize_whitespace(expression);
    match parse(&text, subject_policy) {
        Some(block) => block.render(),
        None => expression.trim().to_string(),
    }
}

/// Parse a whitespace-normalized `CASE` block
pub fn parse(text: &str, subject_policy: CaseSubject) -> Option<ConditionalBlock> {
    let hits = scan(text);
    let opener = hits
        .first()
        .filter(|h| h.keyword == Keyword::Case && h.start == 0)?;

    let close = hits
        .iter()
        .skip(1)
        .find(|h| h.keyword == Keyword::End && h.depth == 0);
    let body_end = close.map_or(text.len(), |h| h.start);
    let trailing = close.map_or("", |h| text[h.end..].trim());

    let markers: Vec<&KeywordHit> = hits
        .iter()
        .filter(|h| h.depth == 1 && h.end <= body_end)
        .filter(|h| matches!(h.keyword, Keyword::When | Keyword::Then | Keyword::Else))
        .collect();

    let subject_end = markers.first().map_or(body_end, |h| h.start);
    let subject = match subject_policy {
        CaseSubject::Discard => "",
        CaseSubject::Compare => text[opener.end..subject_end].trim(),
    };

    let mut chain = ConditionalChain::new();
    let mut pending: Option<(&KeywordHit, Option<&KeywordHit>)> = None;

    for &marker in &markers {
        match marker.keyword {
            Keyword::When => {
                finish_pair(&mut chain, text, subject, pending.take(), marker.start);
                pending = Some((marker, None));
            }
            Keyword::Then => {
                if let Some((_, then_hit)) = pending.as_mut() {
                    if then_hit.is_none() {
                        *then_hit = Some(marker);
                    }
                }
            }
            Keyword::Else => {
                finish_pair(&mut chain, text, subject, pending.take(), marker.start);
                chain.set_default(text[marker.end..body_end].trim());
                break;
            }
            _ => {}
        }
    }
    finish_pair(&mut chain, text, subject, pending.take(), body_end);

    if chain.is_empty() {
        return None;
    }

    Some(ConditionalBlock {
        chain,
        trailing: trailing.to_string(),
    })
}

fn finish_pair(
    chain: &mut ConditionalChain,
    text: &str,
    subject: &str,
    pending: Option<(&KeywordHit, Option<&KeywordHit>)>,
    end: usize,
) {
    let Some((when_hit, Some(then_hit))) = pending else {
        return;
    };
    let value = text[when_hit.end..then_hit.start].trim();
    let result = text[then_hit.end..end].trim();
    if subject.is_empty() {
        chain.push(value, result);
    } else {
        chain.push(format!("{subject} = {value}"), result);
    }
}
