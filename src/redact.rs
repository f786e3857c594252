//! Phone number masking for log output

use url::Url;

/// Replace every ASCII digit with `x`
pub fn mask_number(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_digit() { 'x' } else { c })
        .collect()
}

/// Mask the path and the values of all query parameters in `url`,
/// keeping scheme, host and port readable. Any fragment is dropped.
///
/// Unparseable input is masked as a whole.
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return mask_number(url);
    };

    let path = mask_number(parsed.path());
    parsed.set_path(&path);
    parsed.set_fragment(None);

    if parsed.query().is_none() {
        return parsed.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), mask_number(&v)))
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}
