use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::filespec::{self, FileSpec};

#[derive(Debug, Args)]
pub struct Command {
    /// The file to write the config to (overwrites any existing file). "-"
    /// writes to stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: FileSpec,
}

impl Command {
    pub fn run(&self) -> Result<()> {
        let mut content = Config::default().to_ron()?;
        content.push('\n');
        filespec::write_file(&self.output, &content)
    }
}
