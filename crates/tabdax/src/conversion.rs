//! Batch conversion of formula sheets
//!
//! Reads every formula in a sheet's formula column, translates it, and writes
//! a two-column sheet pairing each source formula with its DAX.
//!
//! # Example
//!
//! ```rust,no_run
//! use tabdax::{convert_dir, ConversionOptions};
//!
//! let options = ConversionOptions {
//!     table_name: "Sales".into(),
//!     ..ConversionOptions::default()
//! };
//! let stats = convert_dir("queries", "queries_dax", &options)?;
//! println!("Converted {} formulas in {} files", stats.formulas, stats.files);
//! # Ok::<(), tabdax::Error>(())
//! ```

use crate::error::{Error, Result};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use tabdax_csv::{
    FormulaRow, FormulaSheet, SheetReadOptions, SheetReader, SheetWriteOptions, SheetWriter,
    TranslatedSheet, DEFAULT_FORMULA_COLUMN,
};
use tabdax_translate::{
    CaseSubject, RuleTable, TableName, TranslateOptions, Translator, DEFAULT_MAX_INPUT_LEN,
};

/// Options for sheet conversion
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Header of the formula column, matched case-insensitively (default: `calculation`)
    pub formula_column: String,
    /// Table generated references are qualified against (default: `Table`)
    pub table_name: TableName,
    /// Handling of `CASE <subject> WHEN ...`
    pub case_subject: CaseSubject,
    /// Field delimiter for input and output (default: comma)
    pub delimiter: u8,
    /// Formulas longer than this are copied through untranslated
    pub max_input_len: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            formula_column: DEFAULT_FORMULA_COLUMN.to_string(),
            table_name: TableName::default(),
            case_subject: CaseSubject::default(),
            delimiter: b',',
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl ConversionOptions {
    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions {
            table_name: self.table_name.clone(),
            case_subject: self.case_subject,
            max_input_len: self.max_input_len,
        }
    }

    pub fn read_options(&self) -> SheetReadOptions {
        SheetReadOptions {
            delimiter: self.delimiter,
            ..SheetReadOptions::default()
        }
    }

    pub fn write_options(&self) -> SheetWriteOptions {
        SheetWriteOptions {
            delimiter: self.delimiter,
            ..SheetWriteOptions::default()
        }
    }
}

/// Statistics from a conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Number of files written
    pub files: usize,
    /// Number of sheets without a formula column
    pub missing_column: usize,
    /// Number of non-blank formulas read
    pub formulas: usize,
    /// Number of formulas whose translation differs from the source
    pub changed: usize,
}

impl AddAssign for ConversionStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.missing_column += other.missing_column;
        self.formulas += other.formulas;
        self.changed += other.changed;
    }
}

/// Converts sheets with one translator and one set of options
#[derive(Debug, Clone)]
pub struct SheetConverter<'r> {
    translator: Translator<'r>,
    options: ConversionOptions,
}

impl SheetConverter<'static> {
    /// Converter over the built-in rules
    pub fn new(options: ConversionOptions) -> Self {
        Self::with_rules(RuleTable::builtin(), options)
    }
}

impl<'r> SheetConverter<'r> {
    /// Converter over a caller-supplied rule table
    pub fn with_rules(rules: &'r RuleTable, options: ConversionOptions) -> Self {
        Self {
            translator: Translator::with_rules(rules, options.translate_options()),
            options,
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Translate the formula column of `sheet`
    ///
    /// A sheet without the column converts to an empty sheet.
    pub fn convert_sheet(&self, sheet: &FormulaSheet) -> (TranslatedSheet, ConversionStats) {
        let mut stats = ConversionStats::default();

        let Some(formulas) = sheet.formulas(&self.options.formula_column) else {
            tracing::warn!(
                column = %self.options.formula_column,
                "sheet has no formula column"
            );
            stats.missing_column += 1;
            return (TranslatedSheet::new(), stats);
        };

        let translated = formulas
            .into_iter()
            .map(|formula| {
                let dax = self.translator.translate(formula);
                if let (Some(formula), Some(dax)) = (formula, dax.as_deref()) {
                    stats.formulas += 1;
                    if formula.trim() != dax {
                        stats.changed += 1;
                    }
                }
                FormulaRow::new(formula.map(str::to_string), dax)
            })
            .collect();

        (translated, stats)
    }

    /// Convert one file
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<ConversionStats> {
        let sheet = SheetReader::read_file(input, &self.options.read_options())
            .map_err(|e| Error::sheet(input, e))?;

        let (translated, mut stats) = self.convert_sheet(&sheet);

        SheetWriter::write_file(&translated, output, &self.options.write_options())
            .map_err(|e| Error::sheet(output, e))?;
        stats.files += 1;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            formulas = stats.formulas,
            "converted"
        );
        Ok(stats)
    }

    /// Convert every `.csv` file in `input_dir` into `output_dir`
    ///
    /// Files keep their names and are processed in name order. The output
    /// directory is created if needed.
    pub fn convert_dir(&self, input_dir: &Path, output_dir: &Path) -> Result<ConversionStats> {
        std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

        let mut stats = ConversionStats::default();
        for input in sheet_files(input_dir)? {
            let Some(name) = input.file_name() else {
                continue;
            };
            let output = output_dir.join(name);
            stats += self.convert_file(&input, &output)?;
        }
        Ok(stats)
    }
}

/// `.csv` files directly inside `dir`, sorted by name
pub fn sheet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && is_sheet_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_sheet_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"))
}

/// Convert one file with the built-in rules
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConversionOptions,
) -> Result<ConversionStats> {
    SheetConverter::new(options.clone()).convert_file(input.as_ref(), output.as_ref())
}

/// Convert a directory of sheets with the built-in rules
pub fn convert_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    options: &ConversionOptions,
) -> Result<ConversionStats> {
    SheetConverter::new(options.clone()).convert_dir(input_dir.as_ref(), output_dir.as_ref())
}
