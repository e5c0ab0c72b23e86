use anyhow::{bail, Context, Result};
use clap::Args;
use encoding_rs::Encoding;
use tracing::{info, warn};

use crate::config::Config;
use crate::filespec::{self, FileSpec};
use crate::output::{self, OutputFormat, TextReport};
use crate::revenue::compute_categories;
use crate::sheet::csv::{parse_encoding, CsvSheet};
use crate::sheet::workbook::WorkbookSheet;
use crate::sheet::{Format, SheetLoader};

#[derive(Debug, Args)]
pub struct Command {
    /// The ledger sheet to read. "-" reads CSV from stdin.
    input: FileSpec,
    /// Format of the ledger sheet.
    #[arg(long = "format", value_enum, default_value = "auto")]
    format: Format,
    /// Text encoding of CSV input, e.g. "big5".
    #[arg(long = "encoding", default_value = "utf-8", value_parser = parse_encoding)]
    encoding: &'static Encoding,
    /// Worksheet to read from a workbook. Defaults to the first worksheet.
    #[arg(long = "sheet")]
    sheet: Option<String>,
    /// RON config file. Uses the built-in categories and rules if not given.
    #[arg(short = 'c', long = "config")]
    config: Option<FileSpec>,
    /// Only report on the given category keyword. May be repeated.
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Include sub-type and per-record breakdowns in text output.
    #[arg(long = "detail")]
    detail: bool,
    /// How to write the report.
    #[arg(long = "output-format", value_enum, default_value = "text")]
    output_format: OutputFormat,
    /// The file to write the report to (overwrites any existing file). "-"
    /// writes to stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: FileSpec,
}

impl Command {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_ref())?;
        let ledger = self
            .get_loader()?
            .load()
            .with_context(|| format!("loading ledger {}", self.input))?;
        if ledger.is_empty() {
            warn!("ledger {} has no rows", self.input);
        }
        info!(
            rows = ledger.len(),
            columns = ledger.width(),
            "loaded ledger"
        );

        let categories = config.select(&self.categories)?;
        let results = compute_categories(&ledger, &config, &categories);

        let content = match self.output_format {
            OutputFormat::Text => TextReport {
                results: &results,
                detail: self.detail,
            }
            .to_string(),
            OutputFormat::Ron => output::to_ron(&results)? + "\n",
        };
        filespec::write_file(&self.output, &content)
    }

    fn get_loader(&self) -> Result<Box<dyn SheetLoader>> {
        let csv = || -> Box<dyn SheetLoader> {
            Box::new(CsvSheet {
                input: self.input.clone(),
                encoding: self.encoding,
            })
        };
        match &self.input {
            FileSpec::Stdio => match self.format {
                Format::Workbook => bail!("workbooks cannot be read from stdin"),
                Format::Auto | Format::Csv => Ok(csv()),
            },
            FileSpec::Path(path) => match self.format.resolve(path)? {
                Format::Workbook => Ok(Box::new(WorkbookSheet {
                    path: path.clone(),
                    sheet: self.sheet.clone(),
                })),
                Format::Auto | Format::Csv => Ok(csv()),
            },
        }
    }
}
