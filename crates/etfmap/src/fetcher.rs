use etfmap_spider as spider;
use tracing::info;

/// Run the composition batch for each requested country, in order.
pub(crate) async fn run(countries: Vec<String>, tui: bool) -> anyhow::Result<()> {
    let time = std::time::Instant::now();

    for country in countries {
        // the per-country rollup is logged by the scrape itself
        spider::compositions::scrape(&country, tui).await?;
    }

    info!(
        "spider finished collecting compositions, time elapsed: {:?}",
        time.elapsed()
    );

    Ok(())
}
