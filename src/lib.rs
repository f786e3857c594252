//! revlookup: Reverse phone number lookup against the WhitePages directory
//!
//! Commands:
//! - lookup: Resolve phone numbers to name and address
//! - parse: Run the extraction rules over a saved page
//! - rules: Print the effective extraction rules

pub mod args;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod parse;
pub mod redact;
pub mod rules;
pub mod transport;

pub use client::{LookupClient, ReversePhoneLookup};
pub use config::LookupConfig;
pub use contact::ContactInfo;
pub use error::{LookupError, RulesError, TransportError};
pub use extract::{ExtractionRules, PageExtractor, RegexExtractor, ScrapedFields};
pub use lookup::{lookup_numbers, LookupOutcome, LookupReport};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport};
