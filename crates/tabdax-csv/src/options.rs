//! Sheet options

/// Header of the source formula column, matched case-insensitively
pub const DEFAULT_FORMULA_COLUMN: &str = "calculation";

/// Header written above the translated column
pub const DEFAULT_DAX_COLUMN: &str = "DAX Expressions";

/// Options for reading formula sheets
#[derive(Debug, Clone)]
pub struct SheetReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Accept rows with a different field count than the header
    pub flexible: bool,
}

impl Default for SheetReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            flexible: true,
        }
    }
}

/// Options for writing translated sheets
#[derive(Debug, Clone)]
pub struct SheetWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Line terminator
    pub line_terminator: LineTerminator,
    /// Header of the source column
    pub formula_header: String,
    /// Header of the translated column
    pub dax_header: String,
}

impl Default for SheetWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            line_terminator: LineTerminator::LF,
            formula_header: DEFAULT_FORMULA_COLUMN.to_string(),
            dax_header: DEFAULT_DAX_COLUMN.to_string(),
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
    /// Mac classic (CR)
    CR,
}

impl LineTerminator {
    pub(crate) fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        }
    }
}
