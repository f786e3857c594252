//! Field extraction from lookup pages
//!
//! The site's markup is an external contract that changes without notice, so
//! every field has its own pattern and the whole rule set can be replaced
//! from a YAML file without touching the fetch pipeline.

use crate::error::RulesError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Raw per-field results for one page, before assembly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedFields {
    pub name: Option<String>,
    pub formatted_number: Option<String>,
    pub address_primary: Option<String>,
    pub address_secondary: Option<String>,
    pub address_location: Option<String>,
}

/// One pattern-matching function per field
pub trait PageExtractor: Send + Sync {
    /// Session cookie value from the first response
    fn session_cookie(&self, body: &str) -> Option<String>;

    fn name(&self, body: &str) -> Option<String>;
    fn formatted_number(&self, body: &str) -> Option<String>;
    fn address_primary(&self, body: &str) -> Option<String>;
    fn address_secondary(&self, body: &str) -> Option<String>;
    fn address_location(&self, body: &str) -> Option<String>;

    /// Run every field extraction independently
    fn fields(&self, body: &str) -> ScrapedFields {
        ScrapedFields {
            name: self.name(body),
            formatted_number: self.formatted_number(body),
            address_primary: self.address_primary(body),
            address_secondary: self.address_secondary(body),
            address_location: self.address_location(body),
        }
    }
}

/// Extraction patterns as source text.
///
/// All patterns are compiled in dot-matches-newline mode and the first
/// capture group is the extracted value. Lists are tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    pub cookie: Vec<String>,
    pub name: Vec<String>,
    pub formatted_number: String,
    pub address_primary: String,
    pub address_secondary: String,
    pub address_location: String,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            cookie: vec![
                r"distil_RID=([A-Za-z0-9\-]+)".to_string(),
                r"PID=([A-Za-z0-9\-]+)".to_string(),
            ],
            name: vec![
                r"<h2.*?>Send (.*?)&#39;s details to phone</h2>".to_string(),
                r#"<span\s*class="subtitle.*?>\s*\n?(.*?)\n?\s*</span>"#.to_string(),
            ],
            formatted_number: r"Full Number:</span>([0-9\-\+\(\) ]+)</li>".to_string(),
            address_primary: address_pattern("address-primary"),
            address_secondary: address_pattern("address-secondary"),
            address_location: address_pattern("address-location"),
        }
    }
}

fn address_pattern(class: &str) -> String {
    format!(r#"<span\s+class="{}[^"]*"\s*>([^<]*)</span>"#, class)
}

impl ExtractionRules {
    /// Load rules from YAML; fields missing from the file keep their defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| RulesError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// [`PageExtractor`] driven by compiled [`ExtractionRules`]
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    cookie: Vec<Regex>,
    name: Vec<Regex>,
    formatted_number: Regex,
    address_primary: Regex,
    address_secondary: Regex,
    address_location: Regex,
}

impl RegexExtractor {
    pub fn new(rules: &ExtractionRules) -> Result<Self, RulesError> {
        Ok(Self {
            cookie: compile_all("cookie", &rules.cookie)?,
            name: compile_all("name", &rules.name)?,
            formatted_number: compile("formatted_number", &rules.formatted_number)?,
            address_primary: compile("address_primary", &rules.address_primary)?,
            address_secondary: compile("address_secondary", &rules.address_secondary)?,
            address_location: compile("address_location", &rules.address_location)?,
        })
    }

    /// Extractor for the built-in WhitePages rules
    pub fn whitepages() -> Result<Self, RulesError> {
        Self::new(&ExtractionRules::default())
    }
}

impl PageExtractor for RegexExtractor {
    fn session_cookie(&self, body: &str) -> Option<String> {
        first_match(&self.cookie, body)
    }

    fn name(&self, body: &str) -> Option<String> {
        first_match(&self.name, body).map(|name| name.replace("&amp;", "&"))
    }

    fn formatted_number(&self, body: &str) -> Option<String> {
        capture(&self.formatted_number, body)
    }

    fn address_primary(&self, body: &str) -> Option<String> {
        capture(&self.address_primary, body)
    }

    fn address_secondary(&self, body: &str) -> Option<String> {
        capture(&self.address_secondary, body)
    }

    fn address_location(&self, body: &str) -> Option<String> {
        capture(&self.address_location, body)
    }
}

fn compile(field: &'static str, pattern: &str) -> Result<Regex, RulesError> {
    let re = Regex::new(&format!("(?s){}", pattern))
        .map_err(|source| RulesError::Pattern { field, source })?;

    // Group 0 is the whole match
    if re.captures_len() < 2 {
        return Err(RulesError::NoCaptureGroup { field });
    }

    Ok(re)
}

fn compile_all(field: &'static str, patterns: &[String]) -> Result<Vec<Regex>, RulesError> {
    patterns.iter().map(|p| compile(field, p)).collect()
}

/// First capture group of the first match, trimmed
fn capture(re: &Regex, body: &str) -> Option<String> {
    re.captures(body)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Result of the first pattern in `patterns` that matches
fn first_match(patterns: &[Regex], body: &str) -> Option<String> {
    patterns.iter().find_map(|re| capture(re, body))
}
