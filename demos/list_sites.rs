use search_console_http::SearchConsoleClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let gsc = SearchConsoleClient::from_env()?;

    let sites = gsc.sites_list().await?;
    let entries = sites
        .get("siteEntry")
        .and_then(|entries| entries.as_array())
        .cloned()
        .unwrap_or_default();

    for entry in entries {
        println!(
            "{}\t{}",
            entry["siteUrl"].as_str().unwrap_or("?"),
            entry["permissionLevel"].as_str().unwrap_or("?")
        );
    }

    Ok(())
}
