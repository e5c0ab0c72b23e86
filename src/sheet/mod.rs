//! Headerless tabular input, addressed purely by zero-based position.

use std::borrow::Cow;
use std::path::Path;

use anyhow::Result;
use rust_decimal::Decimal;

pub mod csv;
pub mod workbook;

/// Reads a whole sheet into a `Ledger`.
pub trait SheetLoader {
    fn load(&self) -> Result<Ledger>;
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot tell the sheet format of {path:?} from its extension, use --format")]
    UnknownFormat { path: String },
    #[error("unknown text encoding {label:?}")]
    UnknownEncoding { label: String },
    #[error("workbook {path:?} contains no worksheets")]
    NoWorksheets { path: String },
}

/// Sheet file formats understood by the loaders.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Format {
    /// Guess from the file extension.
    Auto,
    /// Spreadsheet workbook (xlsx, xlsm, xls, xlsb, ods).
    Workbook,
    /// Comma separated values.
    Csv,
}

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

impl Format {
    /// Resolves `Auto` using the extension of `path`.
    pub fn resolve(self, path: &Path) -> Result<Format, LoadError> {
        use Format::*;

        if self != Auto {
            return Ok(self);
        }
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(Csv),
            ext if WORKBOOK_EXTENSIONS.contains(&ext) => Ok(Workbook),
            _ => Err(LoadError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// A single untyped cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(Decimal),
    Bool(bool),
    /// A spreadsheet error value such as `#DIV/0!`.
    Error(String),
}

impl Cell {
    /// The cell rendered as text, as used for keyword matching and summaries.
    pub fn to_text(&self) -> Cow<'_, str> {
        use Cell::*;

        match self {
            Empty => Cow::Borrowed(""),
            Text(s) => Cow::Borrowed(s),
            Number(d) => Cow::Owned(d.normalize().to_string()),
            Bool(true) => Cow::Borrowed("True"),
            Bool(false) => Cow::Borrowed("False"),
            Error(e) => Cow::Borrowed(e),
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.to_text().contains(keyword)
    }
}

/// Rectangular grid of cells. Shorter rows are padded with `Cell::Empty` to
/// the width of the widest row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Ledger {
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Ledger { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterates over the cells of column `col` from top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(col))
    }
}
