use colored::Colorize;
use ffcal_spider::econ::forex_factory;
use ffcal_spider::CalendarConfig;
use tracing::{info, trace};

const TITLE: &str = "Forex Factory Calendar Fetcher";

/// Run the fetch → filter → write pipeline once.
pub(crate) async fn run(config: CalendarConfig, tui: bool) -> anyhow::Result<()> {
    let bar = "=".repeat(60);
    if tui {
        println!("{bar}\n{TITLE}\n{bar}");
    }

    trace!("running with {config:?}");
    let time = std::time::Instant::now();
    let report = forex_factory::scrape(&config, tui).await?;

    info!(
        "kept {} of {} events ({} malformed), time elapsed: {:?}",
        report.snapshot.events.len(),
        report.fetched,
        report.skipped,
        time.elapsed()
    );

    if tui {
        println!("{bar}\n{} Complete!\n{bar}", "✓".green());
    }

    Ok(())
}
