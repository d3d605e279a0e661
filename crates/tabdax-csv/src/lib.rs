//! # tabdax-csv
//!
//! Reads sheets of calculated fields and writes their DAX translations.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{
    LineTerminator, SheetReadOptions, SheetWriteOptions, DEFAULT_DAX_COLUMN,
    DEFAULT_FORMULA_COLUMN,
};
pub use reader::{FormulaSheet, SheetReader};
pub use writer::{FormulaRow, SheetWriter, TranslatedSheet};
