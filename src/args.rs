//! Arguments and output helpers shared by commands

use crate::extract::{ExtractionRules, RegexExtractor};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Where extraction rules come from
#[derive(Args, Debug, Clone)]
pub struct RuleSource {
    /// YAML file overriding the extraction rules (see `revlookup rules`)
    #[arg(long, value_name = "FILE", env = "REVLOOKUP_RULES")]
    pub rules: Option<PathBuf>,
}

impl RuleSource {
    pub fn load_rules(&self) -> Result<ExtractionRules> {
        match &self.rules {
            Some(path) => ExtractionRules::from_yaml_file(path)
                .with_context(|| format!("Failed to load rules: {}", path.display())),
            None => Ok(ExtractionRules::default()),
        }
    }

    pub fn extractor(&self) -> Result<RegexExtractor> {
        let rules = self.load_rules()?;
        RegexExtractor::new(&rules).context("Invalid extraction rules")
    }
}

/// Serialize as yaml ("yaml" | "yml") or pretty json (anything else)
pub fn render<T: Serialize>(value: &T, format: &str) -> Result<String> {
    let output = match format {
        "yaml" | "yml" => serde_yaml::to_string(value)?,
        _ => serde_json::to_string_pretty(value)?,
    };
    Ok(output)
}
