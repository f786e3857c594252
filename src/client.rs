//! Reverse phone lookup client
//!
//! fetch → extract session cookie → refetch with cookie → extract fields →
//! assemble. The page is fetched twice on every lookup because the cookie's
//! restrictions (IP checks, expiry) are unknown.

use crate::config::LookupConfig;
use crate::contact::ContactInfo;
use crate::error::{LookupError, TransportError};
use crate::extract::{PageExtractor, RegexExtractor};
use crate::redact::mask_number;
use crate::transport::{fetch_following_redirects, HttpTransport, ReqwestTransport};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Shared, immutable lookup machinery; cheap to clone
#[derive(Clone)]
pub struct LookupClient {
    config: Arc<LookupConfig>,
    transport: Arc<dyn HttpTransport>,
    extractor: Arc<dyn PageExtractor>,
}

impl LookupClient {
    /// Client with the reqwest transport and built-in extraction rules
    pub fn new(config: LookupConfig) -> anyhow::Result<Self> {
        let extractor = RegexExtractor::whitepages()?;
        Ok(Self::with_extractor(config, Arc::new(extractor))?)
    }

    /// Client with the reqwest transport and the given extractor
    pub fn with_extractor(
        config: LookupConfig,
        extractor: Arc<dyn PageExtractor>,
    ) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.timeout_ms)?;
        Ok(Self::with_parts(config, Arc::new(transport), extractor))
    }

    pub fn with_parts(
        config: LookupConfig,
        transport: Arc<dyn HttpTransport>,
        extractor: Arc<dyn PageExtractor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            extractor,
        }
    }

    /// New lookup for `number`; nothing is fetched until
    /// [`ReversePhoneLookup::contact_info`] is awaited
    pub fn lookup(&self, number: impl Into<String>) -> ReversePhoneLookup {
        ReversePhoneLookup {
            number: number.into(),
            client: self.clone(),
            info: OnceCell::new(),
        }
    }
}

/// A single lookup; the result is computed once and cached
pub struct ReversePhoneLookup {
    number: String,
    client: LookupClient,
    info: OnceCell<ContactInfo>,
}

impl ReversePhoneLookup {
    /// Run the lookup, or return the cached result of an earlier run.
    ///
    /// Failed runs are not cached.
    pub async fn contact_info(&self) -> Result<&ContactInfo, LookupError> {
        self.info.get_or_try_init(|| self.run()).await
    }

    async fn run(&self) -> Result<ContactInfo, LookupError> {
        let config = &self.client.config;
        let extractor = &self.client.extractor;
        let url = config.url_for(&self.number);

        info!(number = %mask_number(&self.number), "reverse lookup");

        let first = self.fetch(&url, None).await?;
        let cookie = first
            .as_deref()
            .and_then(|body| extractor.session_cookie(body))
            .ok_or(LookupError::MissingCookie)?;
        debug!("session cookie found");

        let page = self.fetch(&url, Some(cookie.as_str())).await?.unwrap_or_default();
        let fields = extractor.fields(&page);

        Ok(ContactInfo::assemble(fields, &self.number, &config.lookup_url))
    }

    async fn fetch(
        &self,
        url: &str,
        cookie: Option<&str>,
    ) -> Result<Option<String>, TransportError> {
        let config = &self.client.config;
        let cookie_header = cookie.map(|c| config.cookie_header(c));

        let mut headers = vec![("User-Agent", config.user_agent.as_str())];
        if let Some(value) = cookie_header.as_deref() {
            headers.push(("Cookie", value));
        }

        fetch_following_redirects(
            self.client.transport.as_ref(),
            url,
            &headers,
            config.max_redirects,
        )
        .await
    }
}
