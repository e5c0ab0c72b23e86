use rust_decimal::Decimal;
use serde_derive::Serialize;
use tracing::trace;

use crate::layout::ColumnLayout;
use crate::money::{coerce_amount, OutOfRange};
use crate::route::Route;
use crate::rules::RouteRules;
use crate::sheet::Ledger;

/// One ledger row of a revenue category, with its amount and route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// Zero-based ledger row the record was read from.
    pub row: usize,
    pub summary: String,
    /// The text the route was classified from.
    pub route_text: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// `credit - debit`. This treats the account as credit-normal; a
    /// debit-normal account shows up as negative revenue and is left that way.
    pub net_amount: Decimal,
    pub route: Route,
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("ledger has {width} columns but the layout reads column {column}")]
    TooNarrow { width: usize, column: usize },
    #[error("row {row} is not in the ledger")]
    MissingRow { row: usize },
    #[error("row {row}: {source}")]
    Amount { row: usize, source: OutOfRange },
    #[error("row {row}: credit minus debit is out of range")]
    NetOverflow { row: usize },
}

/// Reads and classifies the given ledger rows.
pub fn read_records(
    ledger: &Ledger,
    rows: &[usize],
    layout: &ColumnLayout,
    routes: &RouteRules,
) -> Result<Vec<TransactionRecord>, FieldError> {
    let required = layout.required_width();
    if ledger.width() < required {
        return Err(FieldError::TooNarrow {
            width: ledger.width(),
            column: required - 1,
        });
    }

    rows.iter()
        .map(|&idx| {
            let row = ledger.row(idx).ok_or(FieldError::MissingRow { row: idx })?;
            let amount = |column: usize| {
                coerce_amount(&row[column]).map_err(|source| FieldError::Amount { row: idx, source })
            };
            let debit = amount(layout.debit)?;
            let credit = amount(layout.credit)?;
            let net_amount = credit
                .checked_sub(debit)
                .ok_or(FieldError::NetOverflow { row: idx })?;
            let route_text = layout.route_text(row);
            let route = routes.classify(&route_text);
            trace!(row = idx, %route, text = %route_text, "classified row");
            Ok(TransactionRecord {
                row: idx,
                summary: row[layout.summary].to_text().into_owned(),
                route_text,
                debit,
                credit,
                net_amount,
                route,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{dec, ledger_from_csv};

    #[test]
    fn net_is_credit_minus_debit() {
        let ledger = ledger_from_csv(
            "
            d,4101,廣告收入,,,淡海站廣告,,1500
            d,4101,廣告收入,,,安坑站廣告退款,200,
            d,4101,廣告收入,,,環狀線調整,50.5,100
            ",
        );
        let records = read_records(
            &ledger,
            &[0, 1, 2],
            &ColumnLayout::default(),
            &RouteRules::default(),
        )
        .expect("read_records");

        let got: Vec<(Route, Decimal, Decimal, Decimal)> = records
            .iter()
            .map(|r| (r.route, r.debit, r.credit, r.net_amount))
            .collect();
        assert_eq!(
            vec![
                (Route::Danhai, dec("0"), dec("1500"), dec("1500")),
                (Route::Ankeng, dec("200"), dec("0"), dec("-200")),
                (Route::Circular, dec("50.5"), dec("100"), dec("49.5")),
            ],
            got
        );
        assert_eq!("安坑站廣告退款", records[1].summary);
        assert_eq!(1, records[1].row);
    }

    #[test]
    fn blank_and_text_amounts_are_zero() {
        let ledger = ledger_from_csv(
            "
            d,4101,客運收入,,,票收,,
            d,4101,客運收入,,,票收,abc,n/a
            ",
        );
        let records = read_records(
            &ledger,
            &[0, 1],
            &ColumnLayout::default(),
            &RouteRules::default(),
        )
        .expect("read_records");
        for record in records {
            assert_eq!(Decimal::ZERO, record.debit);
            assert_eq!(Decimal::ZERO, record.credit);
            assert_eq!(Decimal::ZERO, record.net_amount);
            assert_eq!(Route::Shared, record.route);
        }
    }

    #[test]
    fn narrow_ledger_is_a_field_error() {
        let ledger = ledger_from_csv("d,4101,租賃收入,,,攤提,100");
        let err = read_records(&ledger, &[0], &ColumnLayout::default(), &RouteRules::default())
            .expect_err("ledger is too narrow");
        assert_eq!(FieldError::TooNarrow { width: 7, column: 7 }, err);
    }

    #[test]
    fn net_overflow_is_a_field_error() {
        let ledger = ledger_from_csv(
            "
            d,4102,客運收入,,,票收,,100
            d,4102,客運收入,,,票收,-79228162514264337593543950335,79228162514264337593543950335
            ",
        );
        let err = read_records(
            &ledger,
            &[0, 1],
            &ColumnLayout::default(),
            &RouteRules::default(),
        )
        .expect_err("net amount overflows");
        assert_eq!(FieldError::NetOverflow { row: 1 }, err);
    }

    #[test]
    fn oversized_amount_is_a_field_error() {
        let ledger = ledger_from_csv("d,4102,客運收入,,,票收,,1e30");
        let err = read_records(&ledger, &[0], &ColumnLayout::default(), &RouteRules::default())
            .expect_err("credit is out of range");
        assert_eq!(
            FieldError::Amount {
                row: 0,
                source: OutOfRange {
                    text: "1e30".to_string()
                },
            },
            err
        );
        assert!(err.to_string().contains("1e30"));
    }

    #[test]
    fn composite_route_text() {
        let ledger = ledger_from_csv("d,4102,客運收入,三鶯營運處,,月票收入,,300");
        let summary_only = read_records(
            &ledger,
            &[0],
            &ColumnLayout::default(),
            &RouteRules::default(),
        )
        .expect("read_records");
        assert_eq!(Route::Shared, summary_only[0].route);

        let layout = ColumnLayout {
            route_text: vec![3, 5],
            ..Default::default()
        };
        let composite =
            read_records(&ledger, &[0], &layout, &RouteRules::default()).expect("read_records");
        assert_eq!(Route::Sanying, composite[0].route);
        assert_eq!("三鶯營運處 月票收入", composite[0].route_text);
        assert_eq!("月票收入", composite[0].summary);
    }
}
