use std::collections::HashMap;

use itertools::Itertools;
use rust_decimal::Decimal;
use serde_derive::Serialize;

use crate::revenue::aggregate::{add_to, SumOverflow};
use crate::revenue::record::TransactionRecord;
use crate::route::Route;
use crate::rules::SubTypeTable;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubTypeAmount {
    pub sub_type: String,
    pub route: Route,
    pub net_amount: Decimal,
}

/// Sums net amounts per (sub-type, route) pair. Sub-types are ordered as in
/// `table` with the fallback last, then by route display order. Pairs without
/// records are omitted.
pub fn cross_tabulate(
    records: &[TransactionRecord],
    table: &SubTypeTable,
) -> Result<Vec<SubTypeAmount>, SumOverflow> {
    let mut sums = HashMap::new();
    for record in records {
        let (rank, sub_type) = table.classify(&record.route_text);
        add_to(&mut sums, (rank, sub_type, record.route), record.net_amount)?;
    }
    Ok(sums
        .into_iter()
        .sorted_by_key(|((rank, _, route), _)| (*rank, *route))
        .map(|((_, sub_type, route), net_amount)| SubTypeAmount {
            sub_type: sub_type.to_string(),
            route,
            net_amount,
        })
        .collect())
}
