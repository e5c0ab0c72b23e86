use std::fmt;

use anyhow::Result;

use crate::money::Whole;
use crate::revenue::{CategoryError, CategoryReport};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable tables.
    Text,
    /// The full results, including per-record details, as RON.
    Ron,
}

/// Plain text rendering of category results, one section per category.
pub struct TextReport<'a> {
    pub results: &'a [Result<CategoryReport, CategoryError>],
    /// Include the sub-type cross tabulation and per-record lines.
    pub detail: bool,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match result {
                Ok(report) => self.fmt_report(f, report)?,
                Err(e) => {
                    writeln!(f, "== {} ==", e.keyword())?;
                    writeln!(f, "error: {}", e)?;
                }
            }
        }
        Ok(())
    }
}

impl TextReport<'_> {
    fn fmt_report(&self, f: &mut fmt::Formatter, report: &CategoryReport) -> fmt::Result {
        let label = &report.table.column_label;
        writeln!(f, "== {} ==", report.keyword)?;
        writeln!(f, "總計: ${}", Whole(report.grand_total()))?;
        writeln!(f, "歸屬路線 | {}", label)?;
        for row in &report.table.rows {
            writeln!(f, "{} | {}", row.route, Whole(row.net_amount))?;
        }
        if !self.detail {
            return Ok(());
        }

        if let Some(sub_types) = &report.sub_types {
            writeln!(f, "廣告細目 | 歸屬路線 | {}", label)?;
            for a in sub_types {
                writeln!(f, "{} | {} | {}", a.sub_type, a.route, Whole(a.net_amount))?;
            }
        }
        writeln!(f, "列 | 歸屬路線 | 摘要 | {}", label)?;
        for r in &report.records {
            // Spreadsheet row numbers are 1-based.
            writeln!(
                f,
                "{} | {} | {} | {}",
                r.row + 1,
                r.route,
                r.summary,
                Whole(r.net_amount)
            )?;
        }
        Ok(())
    }
}

pub fn to_ron(results: &[Result<CategoryReport, CategoryError>]) -> Result<String> {
    let pretty = ron::ser::PrettyConfig::new();
    ron::ser::to_string_pretty(results, pretty).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use goldenfile::Mint;

    use super::*;
    use crate::config::Config;
    use crate::revenue::compute_categories;
    use crate::testutil::ledger_from_csv;

    const LEDGER: &str = "
        2024-01-02,J001,廣告收入,營運處,,淡海站柱面廣告,,1200
        2024-01-03,J002,廣告收入,營運處,,車廂廣告,,500
        2024-01-05,J003,客運收入,站務處,,三鶯線票收,,1234567
        2024-01-05,J004,客運收入,站務處,,電子票證清分,,1001
        2024-01-06,J005,租賃收入,資產處,,環狀線機房租金,0.4,1000.4
    ";

    fn results() -> Vec<Result<CategoryReport, CategoryError>> {
        let config = Config::default();
        compute_categories(&ledger_from_csv(LEDGER), &config, &config.categories)
    }

    #[test]
    fn detailed_report_golden() {
        let mut mint = Mint::new("testdata/output");
        let differ = Box::new(goldenfile::differs::text_diff);
        let mut out = mint
            .new_goldenfile_with_differ("report.txt", differ)
            .expect("new goldenfile");

        let report = TextReport {
            results: &results(),
            detail: true,
        };
        out.write_all(format!("{}", report).as_bytes())
            .expect("write output");
    }

    #[test]
    fn summary_report() {
        let results = results();
        let got = format!(
            "{}",
            TextReport {
                results: &results[2..],
                detail: false,
            }
        );
        let want = textwrap::dedent(
            r#"
            == 租賃收入 ==
            總計: $1,000
            歸屬路線 | 租賃收入淨額
            淡海輕軌 | 0
            安坑輕軌 | 0
            環狀線 | 1,000
            三鶯線 | 0
            各線分攤 | 0

            == 政府補助收入 ==
            error: no column among the first 10 contains "政府補助收入"

            == 什項營業收入 ==
            error: no column among the first 10 contains "什項營業收入"
            "#,
        );
        crate::assert_text_eq!(want.trim_start(), &got);
    }

    #[test]
    fn ron_output_keeps_failures() {
        let dumped = to_ron(&results()).expect("to_ron");
        assert_eq!(3, dumped.matches("Ok(").count());
        assert_eq!(2, dumped.matches("Err(ColumnNotFound(").count());
        assert!(dumped.contains("account_column: 2"));
        assert!(dumped.contains("route: Sanying"));
    }
}
