use rust_decimal::Decimal;

use crate::revenue::record::TransactionRecord;
use crate::route::Route;

/// Splits every `Route::Shared` record into two halves, one on each of the
/// `targets` routes.
///
/// Classified records come first in their original order, followed by the
/// halves in the order of the shared records they came from. The total net
/// amount is unchanged.
pub fn split_shared(
    records: &[TransactionRecord],
    targets: (Route, Route),
) -> Vec<TransactionRecord> {
    let (shared, classified): (Vec<&TransactionRecord>, Vec<&TransactionRecord>) = records
        .iter()
        .partition(|record| record.route == Route::Shared);

    let halves = shared
        .into_iter()
        .flat_map(|record| [half(record, targets.0), half(record, targets.1)]);

    classified.into_iter().cloned().chain(halves).collect()
}

fn half(record: &TransactionRecord, route: Route) -> TransactionRecord {
    TransactionRecord {
        row: record.row,
        summary: format!("{} (split-{})", record.summary, route.label()),
        route_text: record.route_text.clone(),
        debit: record.debit / Decimal::TWO,
        credit: record.credit / Decimal::TWO,
        net_amount: record.net_amount / Decimal::TWO,
        route,
    }
}
