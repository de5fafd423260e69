use serde::{Deserialize, Serialize};

/// Dimension to group search analytics rows by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Date,
    Query,
    Page,
    Country,
    Device,
    SearchAppearance,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregationType {
    Auto,
    ByPage,
    ByProperty,
}

/// Whether to include fresh (not yet finalized) data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataState {
    Final,
    All,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    #[default]
    And,
    Or,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DimensionFilter {
    pub dimension: Dimension,
    pub operator: FilterOperator,
    pub expression: String,
}

impl DimensionFilter {
    pub fn new(dimension: Dimension, operator: FilterOperator, expression: impl Into<String>) -> Self {
        Self {
            dimension,
            operator,
            expression: expression.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionFilterGroup {
    pub group_type: GroupType,
    pub filters: Vec<DimensionFilter>,
}

impl DimensionFilterGroup {
    /// Builds an `and` group, the API default.
    pub fn all(filters: impl Into<Vec<DimensionFilter>>) -> Self {
        Self {
            group_type: GroupType::And,
            filters: filters.into(),
        }
    }
}

/// Body of `POST /sites/{site}/searchAnalytics/query`.
///
/// Dates use `YYYY-MM-DD`. Unset options are left out of the payload so the
/// API applies its own defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsQueryRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimension_filter_groups: Vec<DimensionFilterGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_type: Option<AggregationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_state: Option<DataState>,
}

impl SearchAnalyticsQueryRequest {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Self::default()
        }
    }

    pub fn dimensions(mut self, dimensions: impl Into<Vec<Dimension>>) -> Self {
        self.dimensions = dimensions.into();
        self
    }

    pub fn row_limit(mut self, limit: u32) -> Self {
        self.row_limit = Some(limit);
        self
    }

    pub fn start_row(mut self, row: u32) -> Self {
        self.start_row = Some(row);
        self
    }

    pub fn filter_group(mut self, group: DimensionFilterGroup) -> Self {
        self.dimension_filter_groups.push(group);
        self
    }

    pub fn aggregation_type(mut self, aggregation: AggregationType) -> Self {
        self.aggregation_type = Some(aggregation);
        self
    }

    pub fn data_state(mut self, state: DataState) -> Self {
        self.data_state = Some(state);
        self
    }
}
