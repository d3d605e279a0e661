//! Keyword scanner for conditional blocks
//!
//! The branch rewriters only need to know where the block keywords
//! (`IF`, `THEN`, `ELSEIF`, `ELSE`, `CASE`, `WHEN`, `END`) sit. This scanner
//! finds them at word boundaries while skipping string literals and
//! bracketed field names, and records how deeply each one is nested inside
//! `IF`/`CASE` blocks so a nested block's keywords are not mistaken for the
//! outer block's.

/// Block keywords recognized by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Then,
    ElseIf,
    Else,
    End,
    Case,
    When,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        let keyword = match word.to_ascii_uppercase().as_str() {
            "IF" => Keyword::If,
            "THEN" => Keyword::Then,
            "ELSEIF" => Keyword::ElseIf,
            "ELSE" => Keyword::Else,
            "END" => Keyword::End,
            "CASE" => Keyword::Case,
            "WHEN" => Keyword::When,
            _ => return None,
        };
        Some(keyword)
    }

    fn opens_block(self) -> bool {
        matches!(self, Keyword::If | Keyword::Case)
    }
}

/// One keyword occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHit {
    pub keyword: Keyword,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset just past the last character
    pub end: usize,
    /// Number of enclosing `IF`/`CASE` blocks. A block's own opener and
    /// `END` sit at the outer depth; its `THEN`/`ELSE`/`WHEN` one deeper.
    pub depth: usize,
}

/// Scan `input` for block keywords
pub fn scan(input: &str) -> Vec<KeywordHit> {
    KeywordScanner::new(input).collect()
}

/// True if the first word of `input` is `keyword`
pub fn starts_with_keyword(input: &str, keyword: Keyword) -> bool {
    let trimmed = input.trim_start();
    let offset = input.len() - trimmed.len();
    KeywordScanner::new(input)
        .next()
        .map_or(false, |hit| hit.keyword == keyword && hit.start == offset)
}

/// True if `keyword` occurs anywhere outside literals and field names
pub fn contains_keyword(input: &str, keyword: Keyword) -> bool {
    KeywordScanner::new(input).any(|hit| hit.keyword == keyword)
}

/// Collapse whitespace runs to one space, leaving literals and field names alone
pub fn normalize_whitespace(input: &str) -> String {
    let mut scanner = KeywordScanner::new(input.trim());
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    while let Some(c) = scanner.peek_char() {
        if c.is_whitespace() {
            pending_space = true;
            scanner.advance();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        let start = scanner.pos;
        match c {
            '"' | '\'' => scanner.skip_string(c),
            '[' => scanner.skip_field(),
            _ => scanner.advance(),
        }
        out.push_str(&scanner.input[start..scanner.pos]);
    }

    out
}

/// Iterator over the block keywords of an expression
pub struct KeywordScanner<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> KeywordScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn next_hit(&mut self) -> Option<KeywordHit> {
        while let Some(c) = self.peek_char() {
            match c {
                '"' | '\'' => self.skip_string(c),
                '[' => self.skip_field(),
                c if c.is_alphabetic() || c == '_' => {
                    if let Some(hit) = self.scan_word() {
                        return Some(hit);
                    }
                }
                _ => self.advance(),
            }
        }
        None
    }

    fn scan_word(&mut self) -> Option<KeywordHit> {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let end = self.pos;
        let keyword = Keyword::from_word(&self.input[start..end])?;

        let depth = match keyword {
            k if k.opens_block() => {
                self.depth += 1;
                self.depth - 1
            }
            Keyword::End => {
                self.depth = self.depth.saturating_sub(1);
                self.depth
            }
            _ => self.depth,
        };

        Some(KeywordHit {
            keyword,
            start,
            end,
            depth,
        })
    }

    /// Skip a quoted literal; a doubled quote is an escaped quote
    fn skip_string(&mut self, quote: char) {
        self.advance(); // Skip opening quote

        while let Some(c) = self.peek_char() {
            self.advance();
            if c == quote {
                if self.peek_char() == Some(quote) {
                    self.advance();
                } else {
                    return;
                }
            }
        }
    }

    /// Skip a bracketed field name such as `[Order Date]`
    fn skip_field(&mut self) {
        self.advance(); // Skip opening bracket

        while let Some(c) = self.peek_char() {
            self.advance();
            if c == ']' {
                return;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

impl Iterator for KeywordScanner<'_> {
    type Item = KeywordHit;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_hit()
    }
}
