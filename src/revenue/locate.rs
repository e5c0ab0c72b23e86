use crate::sheet::Ledger;

/// Returns the first of the leading `window` columns where any cell contains
/// `keyword`. Matching is case sensitive.
pub fn locate_column(ledger: &Ledger, keyword: &str, window: usize) -> Option<usize> {
    (0..window.min(ledger.width()))
        .find(|&col| ledger.column(col).any(|cell| cell.contains(keyword)))
}

/// Indices of the rows whose cell in `column` contains `keyword`, in ledger
/// order.
pub fn filter_rows(ledger: &Ledger, column: usize, keyword: &str) -> Vec<usize> {
    ledger
        .column(column)
        .enumerate()
        .filter(|(_, cell)| cell.contains(keyword))
        .map(|(idx, _)| idx)
        .collect()
}
