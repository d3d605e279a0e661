//! Formula sheet reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::SheetReadOptions;

/// A delimited sheet with a header row
#[derive(Debug, Clone, Default)]
pub struct FormulaSheet {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl FormulaSheet {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column whose trimmed header matches `name`,
    /// ignoring case
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
    }

    /// Cells of column `name`, one per data row; blank cells are `None`
    ///
    /// Returns `None` when no column matches.
    pub fn formulas(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(name)?;
        let cells = self
            .rows
            .iter()
            .map(|row| row.get(index).filter(|cell| !cell.trim().is_empty()))
            .collect();
        Some(cells)
    }
}

/// Formula sheet reader
pub struct SheetReader;

impl SheetReader {
    /// Read a sheet from a file
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        options: &SheetReadOptions,
    ) -> CsvResult<FormulaSheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read a sheet from a reader
    pub fn read<R: Read>(reader: R, options: &SheetReadOptions) -> CsvResult<FormulaSheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .flexible(options.flexible)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            tracing::debug!("sheet has no header row, reading it as empty");
            return Ok(FormulaSheet::default());
        }

        let rows = csv_reader.records().collect::<Result<Vec<_>, _>>()?;
        tracing::trace!(columns = headers.len(), rows = rows.len(), "sheet read");

        Ok(FormulaSheet { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read(text: &str) -> FormulaSheet {
        SheetReader::read(text.as_bytes(), &SheetReadOptions::default()).unwrap()
    }

    #[test]
    fn test_column_lookup_ignores_case_and_whitespace() {
        let sheet = read("Name, Calculation ,Owner\nProfit,SUM([Profit]),ann\n");
        assert_eq!(sheet.column_index("calculation"), Some(1));
        assert_eq!(sheet.column_index("CALCULATION"), Some(1));
        assert_eq!(sheet.formulas("calculation"), Some(vec![Some("SUM([Profit])")]));
    }

    #[test]
    fn test_blank_cells_are_absent() {
        let sheet = read("calculation\nAVG([x])\n\"\"\n\"  \"\nZN([y])\n");
        assert_eq!(
            sheet.formulas("calculation"),
            Some(vec![Some("AVG([x])"), None, None, Some("ZN([y])")])
        );
    }

    #[test]
    fn test_short_rows_read_as_absent() {
        let sheet = read("name,calculation\na,SUM([x])\nb\n");
        assert_eq!(sheet.formulas("calculation"), Some(vec![Some("SUM([x])"), None]));
    }

    #[test]
    fn test_missing_column() {
        let sheet = read("name,owner\na,b\n");
        assert_eq!(sheet.formulas("calculation"), None);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_empty_input_reads_as_empty_sheet() {
        let sheet = read("");
        assert!(sheet.headers().is_empty());
        assert!(sheet.is_empty());
        assert_eq!(sheet.formulas("calculation"), None);
    }

    #[test]
    fn test_multiline_quoted_formula() {
        let sheet = read("calculation\n\"IF [a] THEN 1\nELSEIF [b] THEN 2\nEND\"\n");
        assert_eq!(
            sheet.formulas("calculation"),
            Some(vec![Some("IF [a] THEN 1\nELSEIF [b] THEN 2\nEND")])
        );
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = SheetReadOptions {
            delimiter: b';',
            ..SheetReadOptions::default()
        };
        let sheet = SheetReader::read("calculation;x\nMIN([a]);1\n".as_bytes(), &options).unwrap();
        assert_eq!(sheet.formulas("calculation"), Some(vec![Some("MIN([a])")]));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.csv");
        std::fs::write(&path, "calculation\nTODAY()\n").unwrap();
        let sheet = SheetReader::read_file(&path, &SheetReadOptions::default()).unwrap();
        assert_eq!(sheet.headers(), &["calculation".to_string()]);
        assert_eq!(sheet.formulas("calculation"), Some(vec![Some("TODAY()")]));
    }
}
