use search_console_http::{
    Dimension, DimensionFilter, DimensionFilterGroup, FilterOperator,
    SearchAnalyticsQueryRequest, SearchConsoleClient, SearchConsoleError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let site_url = std::env::var("GSC_SITE_URL")?;
    let gsc = SearchConsoleClient::from_env()?;

    let request = SearchAnalyticsQueryRequest::new("2025-07-01", "2025-07-31")
        .dimensions([Dimension::Query, Dimension::Page])
        .filter_group(DimensionFilterGroup::all([DimensionFilter::new(
            Dimension::Country,
            FilterOperator::Equals,
            "usa",
        )]))
        .row_limit(25);

    match gsc.search_analytics_query(&site_url, &request).await {
        Ok(response) => {
            for row in response.rows {
                println!(
                    "{:?}\tclicks={} impressions={} ctr={:.3} position={:.1}",
                    row.keys, row.clicks, row.impressions, row.ctr, row.position
                );
            }
        }
        Err(err @ SearchConsoleError::Api(_)) if err.is_retryable() => {
            eprintln!("gave up after retries: {err}");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
