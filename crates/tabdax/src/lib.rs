//! # tabdax
//!
//! Translate Tableau calculated fields into DAX measures.
//!
//! ## Features
//!
//! - Function-level rewriting for string, date, logical, window, aggregate,
//!   ranking and percentile functions
//! - `{FIXED}` / `{INCLUDE}` / `{EXCLUDE}` level-of-detail conversion
//! - `IF`/`ELSEIF` and `CASE` blocks rewritten to `SWITCH(TRUE(), ...)`
//! - Batch conversion of CSV sheets with a formula column
//!
//! ## Example
//!
//! ```rust
//! use tabdax::prelude::*;
//!
//! let translator = Translator::new(TranslateOptions::for_table("Sales"));
//!
//! let dax = translator.translate_str("IF [x] > 0 THEN 'pos' ELSEIF [x] < 0 THEN 'neg' END");
//! assert_eq!(dax, "SWITCH(TRUE(), [x] > 0, 'pos', [x] < 0, 'neg')");
//!
//! let dax = translator.translate_str("RANK_DENSE(SUM([Profit]))");
//! assert_eq!(
//!     dax,
//!     "RANKX(ALL('Sales'), CALCULATE(SUM('Sales'[Profit])), BLANK(), DESC, DENSE)"
//! );
//! ```

pub mod conversion;
mod error;
pub mod prelude;

pub use conversion::{
    convert_dir, convert_file, sheet_files, ConversionOptions, ConversionStats, SheetConverter,
};
pub use error::{Error, Result};

// Re-export translation types
pub use tabdax_translate::{
    translate, CaseSubject, Explanation, Family, LodConverter, Route, Rule, RuleEngine, RuleInfo,
    RuleTable, Scope, ScopedAggregation, TableName, TranslateError, TranslateOptions,
    TranslateResult, Translator, DEFAULT_TABLE_NAME,
};

// Re-export I/O types
pub use tabdax_csv::{
    CsvError, FormulaRow, FormulaSheet, LineTerminator, SheetReadOptions, SheetReader,
    SheetWriteOptions, SheetWriter, TranslatedSheet, DEFAULT_DAX_COLUMN, DEFAULT_FORMULA_COLUMN,
};
