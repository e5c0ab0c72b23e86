use std::iter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::sheet::{Cell, Ledger, LoadError, SheetLoader};

/// One worksheet of a spreadsheet workbook.
#[derive(Debug)]
pub struct WorkbookSheet {
    pub path: PathBuf,
    /// Worksheet to read, defaults to the first one.
    pub sheet: Option<String>,
}

impl SheetLoader for WorkbookSheet {
    fn load(&self) -> Result<Ledger> {
        let mut workbook = open_workbook_auto(&self.path)
            .with_context(|| format!("opening workbook {:?}", self.path))?;
        let sheet_name = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| LoadError::NoWorksheets {
                    path: self.path.display().to_string(),
                })?,
        };
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("reading worksheet {:?} of {:?}", sheet_name, self.path))?;

        Ok(ledger_from_range(&range))
    }
}

/// Places the used range at its sheet position. calamine ranges start at the
/// first used cell, while ledger positions count from A1.
fn ledger_from_range(range: &Range<Data>) -> Ledger {
    let (top, left) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Ledger::default(),
    };
    let rows = iter::repeat_with(Vec::new)
        .take(top)
        .chain(range.rows().map(|row| {
            iter::repeat(Cell::Empty)
                .take(left)
                .chain(row.iter().map(cell_from_data))
                .collect()
        }))
        .collect();
    Ledger::from_rows(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(Decimal::from(*i)),
        Data::Float(f) => match Decimal::from_f64(*f) {
            Some(d) => Cell::Number(d),
            None => Cell::Text(f.to_string()),
        },
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(format!("{:?}", e)),
    }
}
