//! Per-category route revenue computation.
//!
//! Each category is computed independently from the shared, read-only ledger:
//! locate the account column, filter its rows, read amounts and routes,
//! optionally split shared amounts, then sum per route.

use rust_decimal::Decimal;
use serde_derive::Serialize;
use tracing::{debug, info, warn};

use crate::config::{CategorySpec, Config};
use crate::sheet::Ledger;

pub mod aggregate;
pub mod cmd;
pub mod locate;
pub mod record;
pub mod redistribute;
pub mod subtype;

use aggregate::RouteTable;
use record::TransactionRecord;
use subtype::SubTypeAmount;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, thiserror::Error)]
pub enum CategoryError {
    #[error("no column among the first {window} contains {keyword:?}")]
    ColumnNotFound { keyword: String, window: usize },
    #[error("found the account column for {keyword:?} but no rows matched it")]
    NoMatchingRows { keyword: String },
    #[error("could not read the summary/debit/credit fields for {keyword:?}: {reason}")]
    FieldRead { keyword: String, reason: String },
}

impl CategoryError {
    pub fn keyword(&self) -> &str {
        use CategoryError::*;
        match self {
            ColumnNotFound { keyword, .. } | NoMatchingRows { keyword } | FieldRead { keyword, .. } => {
                keyword
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryReport {
    pub keyword: String,
    /// Zero-based column the keyword was found in.
    pub account_column: usize,
    pub table: RouteTable,
    /// Records after any splitting, in the order they were aggregated.
    pub records: Vec<TransactionRecord>,
    pub sub_types: Option<Vec<SubTypeAmount>>,
}

impl CategoryReport {
    pub fn grand_total(&self) -> Decimal {
        self.table.total
    }
}

pub fn compute_category(
    ledger: &Ledger,
    config: &Config,
    category: &CategorySpec,
) -> Result<CategoryReport, CategoryError> {
    let keyword = category.keyword.as_str();
    let window = config.layout.search_columns;

    let account_column = locate::locate_column(ledger, keyword, window).ok_or_else(|| {
        CategoryError::ColumnNotFound {
            keyword: keyword.to_string(),
            window,
        }
    })?;
    debug!(keyword, account_column, "located account column");

    let rows = locate::filter_rows(ledger, account_column, keyword);
    if rows.is_empty() {
        return Err(CategoryError::NoMatchingRows {
            keyword: keyword.to_string(),
        });
    }

    let field_read = |reason: &dyn std::fmt::Display| CategoryError::FieldRead {
        keyword: keyword.to_string(),
        reason: reason.to_string(),
    };
    let records = record::read_records(ledger, &rows, &config.layout, &config.routes)
        .map_err(|e| field_read(&e))?;
    let records = match category.split_shared {
        Some(targets) => redistribute::split_shared(&records, targets),
        None => records,
    };

    let table =
        aggregate::aggregate(&records, config.net_label(keyword)).map_err(|e| field_read(&e))?;
    let sub_types = category
        .sub_types
        .as_ref()
        .map(|sub_types| subtype::cross_tabulate(&records, sub_types))
        .transpose()
        .map_err(|e| field_read(&e))?;
    info!(keyword, rows = rows.len(), total = %table.total, "computed category");

    Ok(CategoryReport {
        keyword: keyword.to_string(),
        account_column,
        table,
        records,
        sub_types,
    })
}

/// Computes every category, keeping failures per category.
pub fn compute_categories(
    ledger: &Ledger,
    config: &Config,
    categories: &[CategorySpec],
) -> Vec<Result<CategoryReport, CategoryError>> {
    categories
        .iter()
        .map(|category| {
            let result = compute_category(ledger, config, category);
            if let Err(e) = &result {
                warn!(keyword = %category.keyword, "{}", e);
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ADVERTISING, LEASE, PASSENGER, SUBSIDY};
    use crate::route::Route;
    use crate::testutil::{dec, ledger_from_csv};

    const LEDGER: &str = "
        2024-01-02,J001,廣告收入,營運處,,淡海站柱面廣告,,1200
        2024-01-03,J002,廣告收入,營運處,,安坑外牆廣告,,800
        2024-01-04,J003,廣告收入,營運處,,車廂廣告,,500
        2024-01-04,J004,廣告收入,營運處,,淡海車站廣告退款,200,
        2024-01-05,J005,客運收入,站務處,,淡海輕軌票收,,3000
        2024-01-05,J006,客運收入,站務處,,電子票證清分,,1000
        2024-01-06,J007,客運收入,站務處,,三鶯線票收,,700
        2024-01-06,J008,客運收入,站務處,,退票,15,
        2024-01-07,J009,租賃收入,資產處,,環狀線機房租金,,450
        2024-01-08,J010,現金,,,,9999,
    ";

    fn spec(config: &Config, keyword: &str) -> CategorySpec {
        config
            .select(&[keyword.to_string()])
            .expect("select")
            .remove(0)
    }

    #[test]
    fn advertising_by_route_and_sub_type() {
        let config = Config::default();
        let ledger = ledger_from_csv(LEDGER);
        let report =
            compute_category(&ledger, &config, &spec(&config, ADVERTISING)).expect("advertising");

        assert_eq!(2, report.account_column);
        assert_eq!("廣告收入淨額", report.table.column_label);
        assert_eq!(dec("1000"), report.table.get(Route::Danhai));
        assert_eq!(dec("800"), report.table.get(Route::Ankeng));
        assert_eq!(dec("0"), report.table.get(Route::Circular));
        assert_eq!(dec("500"), report.table.get(Route::Shared));
        assert_eq!(dec("2300"), report.grand_total());
        assert_eq!(4, report.records.len());

        let sub_types: Vec<(String, Route, Decimal)> = report
            .sub_types
            .expect("advertising has sub-types")
            .into_iter()
            .map(|a| (a.sub_type, a.route, a.net_amount))
            .collect();
        assert_eq!(
            vec![
                ("柱體廣告".to_string(), Route::Danhai, dec("1200")),
                ("外牆廣告".to_string(), Route::Ankeng, dec("800")),
                ("車站/車廂廣告".to_string(), Route::Danhai, dec("-200")),
                ("車站/車廂廣告".to_string(), Route::Shared, dec("500")),
            ],
            sub_types
        );
    }

    #[test]
    fn passenger_shared_rows_are_split() {
        let config = Config::default();
        let ledger = ledger_from_csv(LEDGER);
        let report =
            compute_category(&ledger, &config, &spec(&config, PASSENGER)).expect("passenger");

        // 1000 and -15 shared, split evenly onto Danhai and Ankeng.
        assert_eq!(dec("3492.5"), report.table.get(Route::Danhai));
        assert_eq!(dec("492.5"), report.table.get(Route::Ankeng));
        assert_eq!(dec("700"), report.table.get(Route::Sanying));
        assert_eq!(dec("0"), report.table.get(Route::Shared));
        assert_eq!(dec("4685"), report.grand_total());
        assert!(report.sub_types.is_none());
        assert_eq!(6, report.records.len());
        assert!(report
            .records
            .iter()
            .any(|r| r.summary == "電子票證清分 (split-安坑輕軌)"));
    }

    #[test]
    fn passenger_split_scenario() {
        let config = Config::default();
        let ledger = ledger_from_csv("d,J1,客運收入,,,一般票收,0,1000");
        let report =
            compute_category(&ledger, &config, &spec(&config, PASSENGER)).expect("passenger");
        let halves: Vec<(Route, Decimal)> = report
            .records
            .iter()
            .map(|r| (r.route, r.net_amount))
            .collect();
        assert_eq!(
            vec![(Route::Danhai, dec("500")), (Route::Ankeng, dec("500"))],
            halves
        );
        assert_eq!(dec("500"), report.table.get(Route::Danhai));
        assert_eq!(dec("500"), report.table.get(Route::Ankeng));
        assert_eq!(Decimal::ZERO, report.table.get(Route::Shared));
    }

    #[test]
    fn shared_rows_are_kept_for_other_categories() {
        let config = Config::default();
        let ledger = ledger_from_csv("d,J1,租賃收入,,,辦公室出租,0,1000");
        let report = compute_category(&ledger, &config, &spec(&config, LEASE)).expect("lease");
        assert_eq!(dec("1000"), report.table.get(Route::Shared));
        assert_eq!(Decimal::ZERO, report.table.get(Route::Danhai));
    }

    #[test]
    fn keyword_found_in_later_column() {
        let config = Config::default();
        let ledger = ledger_from_csv(LEDGER);
        let report = compute_category(&ledger, &config, &CategorySpec::plain("環狀線機房"))
            .expect("keyword in summary column");
        assert_eq!(5, report.account_column);
        assert_eq!(dec("450"), report.table.get(Route::Circular));
    }

    #[test]
    fn table_sums_to_grand_total() {
        let config = Config::default();
        let ledger = ledger_from_csv(LEDGER);
        for result in compute_categories(&ledger, &config, &config.categories) {
            if let Ok(report) = result {
                let sum: Decimal = report.table.rows.iter().map(|r| r.net_amount).sum();
                assert_eq!(sum, report.grand_total(), "for {}", report.keyword);
                let records: Decimal = report.records.iter().map(|r| r.net_amount).sum();
                assert_eq!(records, report.grand_total(), "for {}", report.keyword);
            }
        }
    }

    #[test]
    fn missing_category_does_not_stop_others() {
        let config = Config::default();
        let ledger = ledger_from_csv(LEDGER);
        let results = compute_categories(&ledger, &config, &config.categories);
        assert_eq!(5, results.len());
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(results[2].is_ok());
        assert_eq!(
            Err(CategoryError::ColumnNotFound {
                keyword: SUBSIDY.to_string(),
                window: 10,
            }),
            results[3]
        );
        assert!(results[4].is_err());
    }

    #[test]
    fn overflow_fails_only_its_category() {
        let config = Config::default();
        let ledger = ledger_from_csv(
            "
            d,J1,租賃收入,,,淡海站商店,,79228162514264337593543950335
            d,J2,租賃收入,,,淡海站商店,,79228162514264337593543950335
            d,J3,客運收入,,,淡海輕軌票收,,1000
            ",
        );
        let results = compute_categories(&ledger, &config, &config.categories);
        match &results[2] {
            Err(CategoryError::FieldRead { keyword, reason }) => {
                assert_eq!(LEASE, keyword);
                assert!(reason.contains("too large"), "{}", reason);
            }
            other => panic!("want a lease overflow, got {:?}", other),
        }
        let passenger = results[1].as_ref().expect("passenger");
        assert_eq!(dec("1000"), passenger.table.get(Route::Danhai));
    }

    #[test]
    fn empty_ledger_finds_no_column() {
        let config = Config::default();
        for result in compute_categories(&Ledger::default(), &config, &config.categories) {
            assert!(matches!(result, Err(CategoryError::ColumnNotFound { .. })));
        }
    }

    #[test]
    fn narrow_ledger_is_a_field_error() {
        let config = Config::default();
        let ledger = ledger_from_csv("d,J1,客運收入,,,票收");
        let err = compute_category(&ledger, &config, &spec(&config, PASSENGER))
            .expect_err("too narrow");
        assert!(matches!(err, CategoryError::FieldRead { .. }));
        assert!(err.to_string().contains("客運收入"));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let config = Config::default();
        let ledger = ledger_from_csv(LEDGER);
        let first = compute_categories(&ledger, &config, &config.categories);
        let second = compute_categories(&ledger, &config, &config.categories);
        assert_eq!(first, second);
    }
}
