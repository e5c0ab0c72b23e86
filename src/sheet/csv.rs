use std::io::Read;

use anyhow::{Context, Result};
use encoding_rs::Encoding;

use crate::filespec::FileSpec;
use crate::sheet::{Cell, Ledger, LoadError, SheetLoader};

/// Looks up a text encoding by its WHATWG label (e.g. "utf-8", "big5").
pub fn parse_encoding(label: &str) -> Result<&'static Encoding, LoadError> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| LoadError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// A headerless CSV ledger.
#[derive(Debug)]
pub struct CsvSheet {
    pub input: FileSpec,
    pub encoding: &'static Encoding,
}

impl SheetLoader for CsvSheet {
    fn load(&self) -> Result<Ledger> {
        read_ledger(self.input.reader()?, self.encoding)
            .with_context(|| format!("reading CSV ledger from {}", self.input))
    }
}

pub fn read_ledger<R: Read>(reader: R, encoding: &'static Encoding) -> Result<Ledger> {
    let reader = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .build(reader);
    let mut csv_rdr = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in csv_rdr.records().enumerate() {
        let record = result.with_context(|| format!("parsing CSV row {}", index + 1))?;
        rows.push(record.iter().map(cell_from_field).collect());
    }
    Ok(Ledger::from_rows(rows))
}

fn cell_from_field(field: &str) -> Cell {
    if field.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(field.to_string())
    }
}
