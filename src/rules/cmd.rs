use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::filespec::FileSpec;

#[derive(Debug, Args)]
pub struct Command {
    /// RON config file to take the route rules from. Uses the built-in rules
    /// if not given.
    #[arg(short = 'c', long = "config")]
    config: Option<FileSpec>,
    /// Summary texts to classify.
    #[arg(required = true)]
    texts: Vec<String>,
}

impl Command {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_ref())?;
        for text in &self.texts {
            println!("{}\t{}", config.routes.classify(text), text);
        }
        Ok(())
    }
}
