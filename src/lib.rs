//! `search-console-http` is an async HTTP client for the Google Search
//! Console (Webmasters v3) API.
//!
//! Every call goes through [`SearchConsoleClient::execute`], which retries
//! rate-limit (`429`) and server (`5xx`) responses with capped exponential
//! backoff and reports failures as a single [`SearchConsoleError`].
//!
//! Typed helpers cover the common endpoints:
//! - [`SearchConsoleClient::search_analytics_query`]
//! - [`SearchConsoleClient::sites_list`], [`SearchConsoleClient::sites_add`],
//!   [`SearchConsoleClient::sites_get`]
//! - [`SearchConsoleClient::sitemaps_list`],
//!   [`SearchConsoleClient::sitemaps_submit`],
//!   [`SearchConsoleClient::sitemaps_delete`]

mod classify;
mod client;
mod decode;
mod error;
mod options;
mod query;
mod request;
mod retry;
mod types;
mod wire;

pub use classify::{classify_status, ErrorDetails};
pub use client::{SearchConsoleClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorCategory, SearchConsoleError};
pub use options::{ClientOptions, DEFAULT_USER_AGENT};
pub use query::{
    AggregationType, DataState, Dimension, DimensionFilter, DimensionFilterGroup,
    FilterOperator, GroupType, SearchAnalyticsQueryRequest,
};
pub use request::{HttpMethod, RequestDescriptor};
pub use types::{JsonMap, SearchAnalyticsQueryResponse, SearchAnalyticsRow};

pub type Result<T> = std::result::Result<T, SearchConsoleError>;
