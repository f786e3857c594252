//! parse command: Run the extraction rules over a saved page
//!
//! Offline check of extraction rules against captured HTML.

use crate::args::{render, RuleSource};
use crate::config::LOOKUP_URL;
use crate::contact::ContactInfo;
use crate::extract::PageExtractor;
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ParseArgs {
    /// Saved HTML page
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number the page was fetched for
    #[arg(long, short)]
    pub number: String,

    /// Lookup URL prefix used to build the website link
    #[arg(long, env = "REVLOOKUP_URL", default_value = LOOKUP_URL)]
    pub lookup_url: String,

    #[command(flatten)]
    pub rules: RuleSource,

    /// Output format: json (default) or yaml
    #[arg(long, short, default_value = "json")]
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct ParsedPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
    pub contact: ContactInfo,
}

pub async fn run_parse(args: ParseArgs) -> Result<()> {
    let html = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read file: {}", args.file.display()))?;

    let extractor = args.rules.extractor()?;
    let parsed = parse_page(&extractor, &html, &args.number, &args.lookup_url);

    println!("{}", render(&parsed, &args.format)?);
    Ok(())
}

pub fn parse_page(
    extractor: &dyn PageExtractor,
    html: &str,
    number: &str,
    lookup_url: &str,
) -> ParsedPage {
    ParsedPage {
        session_cookie: extractor.session_cookie(html),
        contact: ContactInfo::assemble(extractor.fields(html), number, lookup_url),
    }
}
