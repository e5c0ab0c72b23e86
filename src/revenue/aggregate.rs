use std::collections::HashMap;
use std::hash::Hash;

use rust_decimal::Decimal;
use serde_derive::Serialize;

use crate::money::checked_sum;
use crate::revenue::record::TransactionRecord;
use crate::route::Route;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteAmount {
    pub route: Route,
    pub net_amount: Decimal,
}

/// Net amounts per route, one entry per route in display order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteTable {
    /// Label of the amount column, e.g. "客運收入淨額".
    pub column_label: String,
    pub rows: Vec<RouteAmount>,
    pub total: Decimal,
}

impl RouteTable {
    #[cfg(test)]
    pub fn get(&self, route: Route) -> Decimal {
        self.rows
            .iter()
            .find(|row| row.route == route)
            .map_or(Decimal::ZERO, |row| row.net_amount)
    }
}

/// A running total left the range of `Decimal`.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("net amounts are too large to total")]
pub struct SumOverflow;

/// Adds `amount` to the running total for `key`.
pub fn add_to<K>(
    sums: &mut HashMap<K, Decimal>,
    key: K,
    amount: Decimal,
) -> Result<(), SumOverflow>
where
    K: Eq + Hash,
{
    let sum = sums.entry(key).or_insert(Decimal::ZERO);
    *sum = sum.checked_add(amount).ok_or(SumOverflow)?;
    Ok(())
}

pub fn aggregate(
    records: &[TransactionRecord],
    column_label: String,
) -> Result<RouteTable, SumOverflow> {
    let mut sums: HashMap<Route, Decimal> = HashMap::new();
    for record in records {
        add_to(&mut sums, record.route, record.net_amount)?;
    }

    let rows: Vec<RouteAmount> = Route::DISPLAY_ORDER
        .iter()
        .map(|&route| RouteAmount {
            route,
            net_amount: sums.get(&route).copied().unwrap_or(Decimal::ZERO),
        })
        .collect();
    let total = checked_sum(rows.iter().map(|row| row.net_amount)).ok_or(SumOverflow)?;

    Ok(RouteTable {
        column_label,
        rows,
        total,
    })
}
