use super::filter::{self, Filtered};
use super::snapshot::{self, CalendarSnapshot};
use crate::config::CalendarConfig;
use crate::error::FetchError;
use crate::http::*;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::ClientBuilder;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

// feed = `https://cdn-nfs.faireconomy.media/ff_calendar_thisweek.json`
//
// One response holds the whole current week. No paging, no conditional requests.

/////////////////////////////////////////////////////////////////////////////////
// core
/////////////////////////////////////////////////////////////////////////////////

/// Summary of a completed run.
#[derive(Debug)]
pub struct Report {
    /// Events in the feed before filtering.
    pub fetched: usize,

    /// Records dropped for a missing or malformed date.
    pub skipped: usize,

    pub snapshot: CalendarSnapshot,
}

/// Fetch the weekly calendar, keep today's and tomorrow's high-impact events, and
/// write them to `config.output`.
///
/// Any fetch or write failure aborts the run before (or during) the write; a malformed
/// record only costs that record.
pub async fn scrape(config: &CalendarConfig, tui: bool) -> anyhow::Result<Report> {
    let time = std::time::Instant::now();
    let http_client = build_client(config)?;

    // 1. fetch
    if tui {
        println!("Fetching calendar data from {}...", config.url);
    }
    let pb = if tui {
        let pb = ProgressBar::new_spinner().with_style(
            ProgressStyle::default_spinner().template("{msg} {spinner:.magenta} [{elapsed_precise:.magenta}]")?,
        );
        pb.set_message("waiting for the calendar feed ...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };
    let fetched = fetch(&http_client, &config.url).await;
    pb.finish_and_clear();
    let events = fetched?;

    let total = events.len();
    if tui {
        println!("{} Successfully fetched {total} total events", "✓".green());
    }

    // 2. filter
    let today = chrono::Utc::now().date_naive();
    debug!("filtering {total} events for {today} and the day after");
    let Filtered { events, skipped, .. } = filter::filter(events, today, &config.policy);
    if tui {
        for skip in &skipped {
            println!(
                "{} Skipping malformed event: {}",
                "Warning:".yellow(),
                skip.reason
            );
        }
        println!(
            "{} Filtered to {} high-impact events",
            "✓".green(),
            events.len()
        );
    }

    // 3. write
    let snapshot = snapshot::save(events, &config.output).await?;
    if tui {
        println!(
            "{} Saved {} events to {}",
            "✓".green(),
            snapshot.events.len(),
            config.output.display()
        );
    }

    info!(
        "calendar snapshot written to {}, {}",
        config.output.display(),
        crate::time_elapsed(time)
    );

    Ok(Report {
        fetched: total,
        skipped: skipped.len(),
        snapshot,
    })
}

/// Build the HTTP client with the browser user agent, `Accept` header and timeout
/// from `config` baked in.
pub fn build_client(config: &CalendarConfig) -> anyhow::Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);

    let client = ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|err| {
            error!("failed to build calendar client, error({err})");
            err
        })?;

    Ok(client)
}

/// GET the calendar feed at `url` and decode it; one attempt, no retry.
pub async fn fetch(http_client: &HttpClient, url: &str) -> Result<Vec<RawEvent>, FetchError> {
    trace!("fetching calendar from {url}");
    let transport = |source: reqwest::Error| {
        error!("failed to fetch calendar, error({source})");
        FetchError::Transport {
            url: url.to_string(),
            source,
        }
    };

    let response = http_client.get(url).send().await.map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        error!("calendar request rejected with {status}");
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    trace!("calendar body received ({} bytes); deserializing ...", body.len());

    let events: Vec<RawEvent> = serde_json::from_slice(&body).map_err(|err| {
        error!("failed to parse calendar JSON, error({err})");
        FetchError::Decode(err)
    })?;

    debug!("fetched {} calendar events", events.len());
    Ok(events)
}

/////////////////////////////////////////////////////////////////////////////////
// endpoints
/////////////////////////////////////////////////////////////////////////////////
//
// calendar
// ----------------------------------------------------------------
// [
//   {
//     "title": "Non-Farm Employment Change",
//     "country": "USD",
//     "date": "2024-03-08",
//     "time": "8:30am",
//     "impact": "High",
//     "forecast": "200K",
//     "previous": "353K",
//     "actual": ""
//   },
//   ...
// ]
//
// Some variants of the feed grade events with a numeric `volatility` instead of, or
// alongside, the `impact` label.

/// One event as the feed publishes it. Every field is optional; anything of an
/// unexpected type is treated as missing rather than failing the whole response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawEvent {
    #[serde(default, deserialize_with = "de_text")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub time: Option<String>,

    /// Currency code, e.g. `USD`.
    #[serde(default, deserialize_with = "de_text")]
    pub country: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub impact: Option<String>,

    #[serde(default, deserialize_with = "de_volatility")]
    pub volatility: Option<i64>,

    #[serde(default, deserialize_with = "de_text")]
    pub forecast: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub previous: Option<String>,

    #[serde(default, deserialize_with = "de_text")]
    pub actual: Option<String>,
}

// strings pass through; numbers and booleans are rendered; null, arrays and objects are dropped
fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            if !other.is_null() {
                warn!("ignoring non-text calendar field: {other}");
            }
            None
        }
    })
}

// integers, floats (truncated) and numeric strings
fn de_volatility<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    })
}
