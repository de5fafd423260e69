use search_console_http::{
    ErrorCategory, SearchAnalyticsQueryRequest, SearchConsoleClient, SearchConsoleError,
};

fn load_live_client() -> Option<(SearchConsoleClient, Option<String>)> {
    let client = SearchConsoleClient::from_env().ok()?;
    let site_url = std::env::var("GSC_SITE_URL")
        .ok()
        .filter(|value| !value.trim().is_empty());
    Some((client, site_url))
}

#[tokio::test]
async fn live_sites_and_search_analytics() {
    let Some((gsc, site_url)) = load_live_client() else {
        eprintln!("skipping live test: GSC_ACCESS_TOKEN not set");
        return;
    };

    let sites = gsc.sites_list().await.expect("sites list must succeed");
    if let Some(entries) = sites.get("siteEntry") {
        assert!(entries.is_array());
    }

    let Some(site_url) = site_url else {
        eprintln!("skipping search analytics: GSC_SITE_URL not set");
        return;
    };

    let request = SearchAnalyticsQueryRequest::new("2025-01-01", "2025-01-07").row_limit(5);
    let response = gsc
        .search_analytics_query(&site_url, &request)
        .await
        .expect("search analytics query must succeed");
    assert!(response.rows.len() <= 5);
}

#[tokio::test]
async fn live_rejects_invalid_token() {
    if load_live_client().is_none() {
        eprintln!("skipping live test: GSC_ACCESS_TOKEN not set");
        return;
    }

    let err = SearchConsoleClient::new("definitely-not-a-token")
        .sites_list()
        .await
        .expect_err("invalid token must be rejected");

    match err {
        SearchConsoleError::Api(api) => assert_eq!(api.category, ErrorCategory::Unauthorized),
        other => panic!("expected unauthorized error, got {other:?}"),
    }
}
