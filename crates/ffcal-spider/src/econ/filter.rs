use super::forex_factory::RawEvent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Impact label that marks an event as market-moving, compared case-insensitively.
pub const DEFAULT_IMPACT_LABEL: &str = "high";

/// Numeric severity at or above which an event counts as high impact, whatever its label.
pub const DEFAULT_VOLATILITY_THRESHOLD: i64 = 3;

/// Format of the feed's `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decides whether an event is high impact.
///
/// The feed has been seen grading events either with a text label or with a numeric
/// volatility, so either signal alone is enough.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImpactPolicy {
    pub label: String,
    pub volatility_threshold: i64,
}

impl Default for ImpactPolicy {
    fn default() -> Self {
        Self {
            label: DEFAULT_IMPACT_LABEL.to_string(),
            volatility_threshold: DEFAULT_VOLATILITY_THRESHOLD,
        }
    }
}

impl ImpactPolicy {
    pub fn is_high_impact(&self, impact: &str, volatility: i64) -> bool {
        impact.trim().eq_ignore_ascii_case(&self.label) || volatility >= self.volatility_threshold
    }
}

/// A calendar event in the shape written to the snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanedEvent {
    pub date: String,
    pub time: String,
    pub currency: String,
    pub event: String,
    pub impact: String,
    pub forecast: String,
    pub previous: String,
    pub actual: String,
}

#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("missing 'date' field")]
    MissingDate,

    #[error("invalid date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A record dropped because its date could not be read.
#[derive(Debug)]
pub struct Skipped {
    /// Position of the record in the feed.
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct Filtered {
    /// Kept events, in feed order.
    pub events: Vec<CleanedEvent>,

    /// Malformed records; each one was logged once.
    pub skipped: Vec<Skipped>,

    pub outside_window: usize,
    pub low_impact: usize,
}

/// Keep the high-impact events dated `today` or the day after.
///
/// `today` is taken as a parameter so the caller decides what "now" is; the pipeline
/// passes the current UTC date. Records with a missing or malformed date are skipped
/// with a warning, everything else that fails a criterion is dropped quietly.
pub fn filter(events: Vec<RawEvent>, today: NaiveDate, policy: &ImpactPolicy) -> Filtered {
    let tomorrow = today.succ_opt();
    let mut filtered = Filtered {
        events: Vec::with_capacity(events.len()),
        ..Filtered::default()
    };

    for (index, raw) in events.into_iter().enumerate() {
        let date = match parse_date(raw.date.as_deref()) {
            Ok(date) => date,
            Err(reason) => {
                warn!("skipping malformed event #{index}: {reason}");
                filtered.skipped.push(Skipped { index, reason });
                continue;
            }
        };

        if date != today && Some(date) != tomorrow {
            filtered.outside_window += 1;
            continue;
        }

        let impact = raw.impact.as_deref().unwrap_or_default().trim().to_string();
        if !policy.is_high_impact(&impact, raw.volatility.unwrap_or(0)) {
            filtered.low_impact += 1;
            continue;
        }

        trace!(
            "keeping {} {}",
            raw.country.as_deref().unwrap_or_default(),
            raw.title.as_deref().unwrap_or_default()
        );
        filtered.events.push(CleanedEvent {
            date: raw.date.unwrap_or_default(),
            time: raw.time.unwrap_or_default(),
            currency: raw.country.unwrap_or_default(),
            event: raw.title.unwrap_or_default(),
            impact,
            forecast: raw.forecast.unwrap_or_default(),
            previous: raw.previous.unwrap_or_default(),
            actual: raw.actual.unwrap_or_default(),
        });
    }

    debug!(
        "filtered to {} high-impact events ({} malformed, {} outside window, {} low impact)",
        filtered.events.len(),
        filtered.skipped.len(),
        filtered.outside_window,
        filtered.low_impact
    );

    filtered
}

fn parse_date(value: Option<&str>) -> Result<NaiveDate, SkipReason> {
    let value = value.ok_or(SkipReason::MissingDate)?;
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| SkipReason::InvalidDate {
        value: value.to_string(),
        source,
    })
}
