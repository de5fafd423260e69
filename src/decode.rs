use crate::{
    wire, JsonMap, SearchAnalyticsQueryResponse, SearchAnalyticsRow, SearchConsoleError,
};

/// Translates a query response body into typed rows.
///
/// Missing or `null` metrics decode as zero, missing keys as empty.
pub(crate) fn decode_query_response(
    body: JsonMap,
) -> Result<SearchAnalyticsQueryResponse, SearchConsoleError> {
    let response: wire::QueryResponse =
        serde_json::from_value(serde_json::Value::Object(body)).map_err(|err| {
            SearchConsoleError::Decode(format!("invalid search analytics response: {err}"))
        })?;

    let rows = response
        .rows
        .unwrap_or_default()
        .into_iter()
        .map(decode_row)
        .collect();

    Ok(SearchAnalyticsQueryResponse {
        rows,
        response_aggregation_type: response.response_aggregation_type,
    })
}

fn decode_row(row: wire::Row) -> SearchAnalyticsRow {
    SearchAnalyticsRow {
        keys: row.keys.unwrap_or_default(),
        clicks: row.clicks.unwrap_or_default(),
        impressions: row.impressions.unwrap_or_default(),
        ctr: row.ctr.unwrap_or_default(),
        position: row.position.unwrap_or_default(),
    }
}

/// Parses a success body: empty means an empty map, anything else must be
/// a JSON object.
pub(crate) fn decode_success_body(body: &str) -> Result<JsonMap, SearchConsoleError> {
    if body.trim().is_empty() {
        return Ok(JsonMap::new());
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(SearchConsoleError::Decode(format!(
            "expected JSON object, got: {other}"
        ))),
        Err(err) => Err(SearchConsoleError::Decode(format!(
            "invalid response JSON: {err}; body: {body}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{decode_query_response, decode_success_body};
    use crate::{JsonMap, SearchConsoleError};

    fn object(value: serde_json::Value) -> JsonMap {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn query_rows_decode_with_defaults() {
        let response = decode_query_response(object(json!({
            "rows": [
                {"keys": ["query A", "/"], "clicks": 10, "impressions": 100, "ctr": 0.1, "position": 3.2},
                {"clicks": null}
            ],
            "responseAggregationType": "auto"
        })))
        .expect("response must decode");

        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.rows[0].keys, vec!["query A".to_owned(), "/".to_owned()]);
        assert_eq!(response.rows[0].clicks, 10.0);
        assert_eq!(response.rows[0].position, 3.2);
        assert!(response.rows[1].keys.is_empty());
        assert_eq!(response.rows[1].clicks, 0.0);
        assert_eq!(response.response_aggregation_type.as_deref(), Some("auto"));
    }

    #[test]
    fn empty_body_yields_no_rows() {
        let response = decode_query_response(JsonMap::new()).expect("empty map must decode");
        assert!(response.rows.is_empty());
        assert_eq!(response.response_aggregation_type, None);
    }

    #[test]
    fn wrong_row_shape_is_decode_error() {
        let err = decode_query_response(object(json!({"rows": "nope"})))
            .expect_err("rows must be a list");
        assert!(matches!(err, SearchConsoleError::Decode(_)));
    }

    #[test]
    fn success_body_must_be_object_or_empty() {
        assert!(decode_success_body("").expect("empty body is ok").is_empty());
        assert!(decode_success_body(" \n").expect("blank body is ok").is_empty());
        assert_eq!(
            decode_success_body(r#"{"sitemap": []}"#).expect("object body is ok"),
            object(json!({"sitemap": []}))
        );
        assert!(matches!(
            decode_success_body("[1]"),
            Err(SearchConsoleError::Decode(_))
        ));
        assert!(matches!(
            decode_success_body("not json"),
            Err(SearchConsoleError::Decode(_))
        ));
    }
}
