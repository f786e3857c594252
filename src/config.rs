//! Lookup configuration: site constants and transport limits

/// Reverse lookup endpoint; the phone number is appended verbatim
pub const LOOKUP_URL: &str = "http://www.whitepages.com/search/ReversePhone?full_phone=";

/// The site blocks clients it does not recognize as a browser
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:26.0) Gecko/20100101 Firefox/26.0";

/// Name of the session cookie replayed on the second request
pub const COOKIE_NAME: &str = "D_UID";

pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Configuration for a [`crate::LookupClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    pub lookup_url: String,
    pub user_agent: String,
    pub cookie_name: String,
    /// Redirect hops allowed per fetch
    pub max_redirects: usize,
    pub timeout_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            lookup_url: LOOKUP_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            cookie_name: COOKIE_NAME.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl LookupConfig {
    pub fn with_lookup_url(mut self, url: impl Into<String>) -> Self {
        self.lookup_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// URL of the lookup page for `number`
    pub fn url_for(&self, number: &str) -> String {
        format!("{}{}", self.lookup_url, number)
    }

    /// `Cookie` header value for a session cookie
    pub fn cookie_header(&self, value: &str) -> String {
        format!("{}={}", self.cookie_name, value)
    }
}
