//! Multi-branch `IF ... ELSEIF ... END` rewriting
//!
//! ```text
//! IF c1 THEN r1 ELSEIF c2 THEN r2 ELSE d END
//!   → SWITCH(TRUE(), c1, r1, c2, r2, d)
//! ```
//!
//! Conditions and results are copied verbatim; they are not translated.

use crate::chain::{ConditionalBlock, ConditionalChain};
use crate::scanner::{normalize_whitespace, scan, Keyword, KeywordHit};

/// Rewrite an `IF`/`ELSEIF` chain into switch-on-true form
///
/// Input that does not start with `IF`, or that has no parsable
/// `<condition> THEN <result>` branch, is returned trimmed but otherwise
/// unchanged.
pub fn rewrite(expression: &str) -> String {
    let text = normalize_whitespace(expression);
    match parse(&text) {
        Some(block) => block.render(),
        None => expression.trim().to_string(),
    }
}

/// Parse a whitespace-normalized `IF` block
pub fn parse(text: &str) -> Option<ConditionalBlock> {
    let hits = scan(text);
    let opener = hits
        .first()
        .filter(|h| h.keyword == Keyword::If && h.start == 0)?;

    let close = hits
        .iter()
        .skip(1)
        .find(|h| h.keyword == Keyword::End && h.depth == 0);
    let body_end = close.map_or(text.len(), |h| h.start);
    let trailing = close.map_or("", |h| text[h.end..].trim());

    let markers: Vec<&KeywordHit> = hits
        .iter()
        .filter(|h| h.depth == 1 && h.end <= body_end)
        .filter(|h| matches!(h.keyword, Keyword::Then | Keyword::ElseIf | Keyword::Else))
        .collect();

    let mut chain = ConditionalChain::new();

    let else_at = markers.iter().position(|h| h.keyword == Keyword::Else);
    let branches_end = match else_at {
        Some(i) => {
            chain.set_default(text[markers[i].end..body_end].trim());
            markers[i].start
        }
        None => body_end,
    };
    let branch_markers = &markers[..else_at.unwrap_or(markers.len())];

    let mut segment_start = opener.end;
    let mut then_hit: Option<&KeywordHit> = None;
    for &marker in branch_markers {
        match marker.keyword {
            Keyword::ElseIf => {
                push_branch(&mut chain, text, segment_start, then_hit, marker.start);
                segment_start = marker.end;
                then_hit = None;
            }
            Keyword::Then if then_hit.is_none() => then_hit = Some(marker),
            _ => {}
        }
    }
    push_branch(&mut chain, text, segment_start, then_hit, branches_end);

    if chain.is_empty() {
        return None;
    }

    Some(ConditionalBlock {
        chain,
        trailing: trailing.to_string(),
    })
}

/// Add `<condition> THEN <result>` spanning `start..end`; segments with no
/// `THEN` are dropped.
fn push_branch(
    chain: &mut ConditionalChain,
    text: &str,
    start: usize,
    then_hit: Option<&KeywordHit>,
    end: usize,
) {
    if let Some(then_hit) = then_hit {
        let condition = text[start..then_hit.start].trim();
        let result = text[then_hit.end..end].trim();
        chain.push(condition, result);
    }
}
