use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header;
use tokio::time::sleep;

use crate::{
    classify::classify_response,
    decode::{decode_query_response, decode_success_body},
    retry::{parse_retry_after, AttemptState},
    ClientOptions, ErrorCategory, JsonMap, RequestDescriptor, Result,
    SearchAnalyticsQueryRequest, SearchAnalyticsQueryResponse, SearchConsoleError,
};

/// Base URL of the Search Console (Webmasters v3) REST API.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/webmasters/v3";

#[derive(Clone)]
/// HTTP client for the Search Console API.
///
/// Cloning is cheap and shares the underlying connection pool.
pub struct SearchConsoleClient {
    http: reqwest::Client,
    base_url: String,
    authorization: String,
    options: ClientOptions,
}

impl fmt::Debug for SearchConsoleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConsoleClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

impl SearchConsoleClient {
    /// Creates a client from an OAuth access token.
    ///
    /// If the token is missing the `Bearer ` prefix, it is added automatically.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            authorization: normalize_bearer_authorization(token.as_ref()),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `GSC_ACCESS_TOKEN` — OAuth access token (Bearer prefix optional)
    /// - `GSC_HTTP_TIMEOUT`, `GSC_USER_AGENT` — see [`ClientOptions::from_env`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use search_console_http::SearchConsoleClient;
    ///
    /// let gsc = SearchConsoleClient::from_env().expect("missing GSC_ACCESS_TOKEN");
    /// ```
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GSC_ACCESS_TOKEN").map_err(|_| {
            SearchConsoleError::Config("missing GSC_ACCESS_TOKEN environment variable".to_owned())
        })?;
        if token.trim().is_empty() {
            return Err(SearchConsoleError::Config(
                "GSC_ACCESS_TOKEN is set but empty".to_owned(),
            ));
        }
        Ok(Self::new(token).with_options(ClientOptions::from_env()?))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Points the client at another API root, e.g. a proxy or mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Queries search performance data for a property.
    pub async fn search_analytics_query(
        &self,
        site_url: &str,
        request: &SearchAnalyticsQueryRequest,
    ) -> Result<SearchAnalyticsQueryResponse> {
        let payload = serde_json::to_value(request).map_err(|err| {
            SearchConsoleError::Decode(format!("query request could not be encoded: {err}"))
        })?;
        let url = format!("{}/searchAnalytics/query", self.site_url(site_url));
        let body = self.execute(&RequestDescriptor::post(url, payload)).await?;
        decode_query_response(body)
    }

    /// Lists properties the caller has access to.
    pub async fn sites_list(&self) -> Result<JsonMap> {
        let url = format!("{}/sites", self.base_url);
        self.execute(&RequestDescriptor::get(url)).await
    }

    /// Registers a property for the authenticated principal.
    ///
    /// URL-prefix properties take the full URL with trailing slash
    /// (`https://example.com/`), domain properties `sc-domain:example.com`.
    pub async fn sites_add(&self, site_url: &str) -> Result<()> {
        self.execute(&RequestDescriptor::put(self.site_url(site_url)))
            .await
            .map(drop)
    }

    /// Gets a property's registration and permission level.
    pub async fn sites_get(&self, site_url: &str) -> Result<JsonMap> {
        self.execute(&RequestDescriptor::get(self.site_url(site_url)))
            .await
    }

    pub async fn sitemaps_list(&self, site_url: &str) -> Result<JsonMap> {
        let url = format!("{}/sitemaps", self.site_url(site_url));
        self.execute(&RequestDescriptor::get(url)).await
    }

    pub async fn sitemaps_submit(&self, site_url: &str, feedpath: &str) -> Result<JsonMap> {
        let url = self.sitemap_url(site_url, feedpath);
        self.execute(&RequestDescriptor::put(url)).await
    }

    pub async fn sitemaps_delete(&self, site_url: &str, feedpath: &str) -> Result<()> {
        let url = self.sitemap_url(site_url, feedpath);
        self.execute(&RequestDescriptor::delete(url)).await.map(drop)
    }

    /// Runs one logical call, retrying rate-limit and server errors.
    ///
    /// `401` and other client errors end the call immediately. `429` and
    /// `5xx` are retried up to [`ClientOptions::max_retries`] times with
    /// exponential backoff; a numeric `Retry-After` on a `429` replaces the
    /// delay for that sleep only. The returned error always reflects the
    /// last response.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<JsonMap> {
        let body = request.body().map(|body| body.to_string());
        let started = Instant::now();
        let mut state = AttemptState::new(&self.options);

        loop {
            let mut builder = self
                .http
                .request(request.method().into(), request.url())
                .header(header::AUTHORIZATION, &self.authorization)
                .header(header::ACCEPT, "application/json")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::USER_AGENT, &self.options.user_agent)
                .timeout(self.options.timeout());
            if let Some(body) = &body {
                builder = builder.body(body.clone());
            }

            let response = builder.send().await.map_err(SearchConsoleError::Transport)?;
            let status = response.status().as_u16();
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_retry_after);
            let text = response.text().await.map_err(SearchConsoleError::Transport)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                method = %request.method(),
                url = request.url(),
                attempt = state.attempt(),
                status,
                "search console response"
            );

            let Some(error) = classify_response(status, &text) else {
                return decode_success_body(&text);
            };

            let delay = match error.category {
                ErrorCategory::RateLimited => state.next_delay(retry_after),
                ErrorCategory::ServerError => state.next_delay(None),
                ErrorCategory::Unauthorized | ErrorCategory::ClientError => None,
            };
            let Some(delay) = delay.filter(|delay| self.within_deadline(started, *delay)) else {
                #[cfg(feature = "tracing")]
                {
                    if error.category.is_retryable() {
                        tracing::warn!(
                            attempts = state.attempt(),
                            status,
                            "giving up on search console request"
                        );
                    }
                }
                return Err(error.into());
            };

            #[cfg(feature = "tracing")]
            tracing::debug!(
                status,
                delay_ms = delay.as_millis() as u64,
                "retrying search console request"
            );

            sleep(delay).await;
        }
    }

    fn within_deadline(&self, started: Instant, delay: Duration) -> bool {
        self.options
            .total_timeout()
            .map_or(true, |total| started.elapsed().saturating_add(delay) <= total)
    }

    fn site_url(&self, site_url: &str) -> String {
        format!("{}/sites/{}", self.base_url, urlencoding::encode(site_url))
    }

    fn sitemap_url(&self, site_url: &str, feedpath: &str) -> String {
        format!(
            "{}/sitemaps/{}",
            self.site_url(site_url),
            urlencoding::encode(feedpath)
        )
    }
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
