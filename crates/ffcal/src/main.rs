mod cli;
mod pipeline;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use colored::Colorize;
use ffcal_spider::{CalendarConfig, FetchError};
use tracing::{error, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// install the subscriber for the requested trace level
fn preprocess(trace_level: Level) {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

// operator-facing line for a failed run
fn diagnostic(err: &anyhow::Error) -> String {
    match err.downcast_ref::<FetchError>() {
        Some(err) if err.is_decode() => format!("Error parsing JSON: {err}"),
        Some(err) => format!("Error fetching calendar: {err}"),
        None => format!("Error: {err:#}"),
    }
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    let mut config = CalendarConfig::default();
    if let Some(output) = cli.output {
        config = config.with_output(output);
    }

    // `fetch` is the only command, and the default
    if let Err(err) = pipeline::run(config, tui).await {
        error!("calendar run failed: {err:#}");
        eprintln!("{} {}", "✗".red(), diagnostic(&err));
        std::process::exit(1);
    }
}
