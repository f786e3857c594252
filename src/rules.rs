//! rules command: Print the effective extraction rules as YAML
//!
//! The output is a complete override file, ready to edit and pass back
//! with `--rules`.

use crate::args::RuleSource;
use crate::extract::RegexExtractor;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct RulesArgs {
    #[command(flatten)]
    pub source: RuleSource,
}

pub async fn run_rules(args: RulesArgs) -> Result<()> {
    let rules = args.source.load_rules()?;
    RegexExtractor::new(&rules).context("Invalid extraction rules")?;

    print!("{}", rules.to_yaml()?);
    Ok(())
}
