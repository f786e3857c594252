//! lookup command: Reverse lookup of one or more phone numbers
//!
//! Every number gets its own independent lookup; `--parallel` bounds how
//! many run at once.

use crate::args::{render, RuleSource};
use crate::client::LookupClient;
use crate::config::{
    LookupConfig, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_MS, LOOKUP_URL, USER_AGENT,
};
use crate::contact::ContactInfo;
use crate::redact::mask_number;
use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Args)]
pub struct LookupArgs {
    /// Phone numbers to look up (multiple allowed)
    #[arg(required = true)]
    pub numbers: Vec<String>,

    /// Lookup URL prefix; the phone number is appended to it
    #[arg(long, env = "REVLOOKUP_URL", default_value = LOOKUP_URL)]
    pub lookup_url: String,

    #[command(flatten)]
    pub rules: RuleSource,

    /// User-Agent sent with every request
    #[arg(long, env = "REVLOOKUP_USER_AGENT", default_value = USER_AGENT)]
    pub user_agent: String,

    /// Output format: json (default) or yaml
    #[arg(long, short, default_value = "json")]
    pub format: String,

    /// Parallel lookups (1-16)
    #[arg(long, short, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
    pub parallel: u8,

    /// Timeout per request in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Redirect hops allowed per request
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,
}

impl LookupArgs {
    pub fn config(&self) -> LookupConfig {
        LookupConfig::default()
            .with_lookup_url(self.lookup_url.clone())
            .with_user_agent(self.user_agent.clone())
            .with_timeout_ms(self.timeout)
            .with_max_redirects(self.max_redirects)
    }
}

/// Result for a single number
#[derive(Debug, Serialize)]
pub struct LookupOutcome {
    pub number: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}

impl LookupOutcome {
    fn failed(number: String, err: String) -> Self {
        Self {
            number,
            ok: false,
            err: Some(err),
            contact: None,
        }
    }
}

/// Results wrapper for multiple numbers
#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
    pub timestamp: String,
    pub results: Vec<LookupOutcome>,
}

pub async fn run_lookup(args: LookupArgs) -> Result<()> {
    let count = args.numbers.len();
    let parallel = (args.parallel as usize).min(count).max(1);

    eprintln!(
        "Looking up {} number{} ({} parallel)...",
        count,
        if count == 1 { "" } else { "s" },
        parallel
    );

    let extractor = args.rules.extractor()?;
    let client = LookupClient::with_extractor(args.config(), Arc::new(extractor))?;

    let results = lookup_numbers(&client, &args.numbers, parallel).await;
    let ok_count = results.iter().filter(|r| r.ok).count();

    let output = if results.len() == 1 {
        render(&results[0], &args.format)?
    } else {
        let report = LookupReport {
            total: count,
            ok: ok_count,
            failed: count - ok_count,
            timestamp: Utc::now().to_rfc3339(),
            results,
        };
        render(&report, &args.format)?
    };

    println!("{}", output);
    eprintln!("Done: {}/{} OK", ok_count, count);

    if ok_count == 0 {
        bail!("No lookup succeeded");
    }

    Ok(())
}

/// Look up `numbers` with at most `parallel` lookups in flight.
///
/// Outcomes are returned in input order.
pub async fn lookup_numbers(
    client: &LookupClient,
    numbers: &[String],
    parallel: usize,
) -> Vec<LookupOutcome> {
    let semaphore = Arc::new(Semaphore::new(parallel.max(1)));

    let tasks: Vec<_> = numbers
        .iter()
        .map(|number| {
            let client = client.clone();
            let semaphore = Arc::clone(&semaphore);
            let number = number.clone();
            tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return LookupOutcome::failed(number, e.to_string()),
                };

                eprintln!("  -> {}", mask_number(&number));
                let lookup = client.lookup(number.clone());
                match lookup.contact_info().await {
                    Ok(info) => LookupOutcome {
                        number,
                        ok: true,
                        err: None,
                        contact: Some(info.clone()),
                    },
                    Err(e) => LookupOutcome::failed(number, e.to_string()),
                }
            })
        })
        .collect();

    join_all(tasks)
        .await
        .into_iter()
        .zip(numbers)
        .map(|(joined, number)| {
            joined.unwrap_or_else(|e| LookupOutcome::failed(number.clone(), e.to_string()))
        })
        .collect()
}
