use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub rows: Option<Vec<Row>>,
    #[serde(default)]
    pub response_aggregation_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub keys: Option<Vec<String>>,
    #[serde(default)]
    pub clicks: Option<f64>,
    #[serde(default)]
    pub impressions: Option<f64>,
    #[serde(default)]
    pub ctr: Option<f64>,
    #[serde(default)]
    pub position: Option<f64>,
}
