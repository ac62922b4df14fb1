//! Live quote API client.

use async_trait::async_trait;
use reqwest::{Client, Url};

use currency_types::{QuoteError, QuoteProvider, QuoteResponse};

/// Base URL of the public quote API.
pub const DEFAULT_QUOTE_API_URL: &str = "https://economia.awesomeapi.com.br";

/// Quote provider backed by the `/json/last/{pair}` endpoint of a quote API.
///
/// No timeout is configured here; request deadlines belong to the HTTP layer
/// that drives the conversion.
#[derive(Debug, Clone)]
pub struct HttpQuoteProvider {
    base_url: String,
    http: Client,
}

impl HttpQuoteProvider {
    /// Creates a provider for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a provider reusing an existing HTTP client.
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/json/last/{pair}`, with the pair escaped as a single path segment.
    fn quote_url(&self, pair: &str) -> Result<Url, QuoteError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| QuoteError::Transport(format!("invalid quote API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| QuoteError::Transport("quote API URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["json", "last", pair]);
        Ok(url)
    }
}

impl Default for HttpQuoteProvider {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTE_API_URL)
    }
}

#[async_trait]
impl QuoteProvider for HttpQuoteProvider {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get_quote(&self, pair: &str) -> Result<QuoteResponse, QuoteError> {
        let url = self.quote_url(pair)?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!("Quote API answered {} for {}", status, pair);
            return Err(QuoteError::Status(status.as_u16()));
        }

        resp.json::<QuoteResponse>().await.map_err(|e| {
            if e.is_decode() {
                QuoteError::Decode(e.to_string())
            } else {
                QuoteError::Transport(e.to_string())
            }
        })
    }
}
