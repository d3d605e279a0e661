//! Translated sheet writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::SheetWriteOptions;

/// One source formula and its translation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaRow {
    pub formula: Option<String>,
    pub dax: Option<String>,
}

impl FormulaRow {
    pub fn new(formula: Option<String>, dax: Option<String>) -> Self {
        Self { formula, dax }
    }
}

/// Output of converting one sheet
///
/// A sheet without a formula column converts to an empty one, which is
/// written as the header row alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedSheet {
    pub rows: Vec<FormulaRow>,
}

impl TranslatedSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: FormulaRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<FormulaRow> for TranslatedSheet {
    fn from_iter<I: IntoIterator<Item = FormulaRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Translated sheet writer
pub struct SheetWriter;

impl SheetWriter {
    /// Write a translated sheet to a file
    pub fn write_file<P: AsRef<Path>>(
        sheet: &TranslatedSheet,
        path: P,
        options: &SheetWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(sheet, file, options)
    }

    /// Write a translated sheet to a writer
    pub fn write<W: Write>(
        sheet: &TranslatedSheet,
        writer: W,
        options: &SheetWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .from_writer(writer);

        csv_writer.write_record([options.formula_header.as_str(), options.dax_header.as_str()])?;
        for row in &sheet.rows {
            csv_writer.write_record([
                row.formula.as_deref().unwrap_or(""),
                row.dax.as_deref().unwrap_or(""),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
