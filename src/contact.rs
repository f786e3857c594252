//! Lookup result record

use crate::extract::ScrapedFields;
use serde::Serialize;

const ADDRESS_SEPARATOR: &str = ", ";

/// Best-effort contact details for a phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Extracted number, or the caller's input when the page has none
    pub formatted_number: String,
    /// Lookup URL for `formatted_number`
    pub website: String,
}

impl ContactInfo {
    pub fn assemble(fields: ScrapedFields, input_number: &str, lookup_url: &str) -> Self {
        let address = join_address(
            fields.address_primary.as_deref(),
            fields.address_secondary.as_deref(),
            fields.address_location.as_deref(),
        );

        let formatted_number = fields
            .formatted_number
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| input_number.to_string());
        let website = format!("{}{}", lookup_url, formatted_number);

        Self {
            name: fields.name,
            address,
            formatted_number,
            website,
        }
    }
}

/// Non-empty parts joined in primary, secondary, location order
pub fn join_address(
    primary: Option<&str>,
    secondary: Option<&str>,
    location: Option<&str>,
) -> Option<String> {
    let parts: Vec<&str> = [primary, secondary, location]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(ADDRESS_SEPARATOR))
    }
}
