/// Parsed JSON object returned by a successful call; empty for `204`.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// One row of search performance data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchAnalyticsRow {
    /// Dimension values in the order requested.
    pub keys: Vec<String>,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    pub position: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchAnalyticsQueryResponse {
    pub rows: Vec<SearchAnalyticsRow>,
    pub response_aggregation_type: Option<String>,
}
