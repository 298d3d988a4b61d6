use crate::econ::filter::ImpactPolicy;
use std::path::PathBuf;
use std::time::Duration;

/// Forex Factory's weekly calendar, as served by the Fair Economy CDN.
pub const CALENDAR_URL: &str = "https://cdn-nfs.faireconomy.media/ff_calendar_thisweek.json";

/// The CDN drops requests that look like bots, so present as a desktop browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const ACCEPT: &str = "application/json";

pub const TIMEOUT: Duration = Duration::from_secs(30);

/// Snapshot file, relative to the working directory.
pub const OUTPUT_PATH: &str = "calendar.json";

/// Everything a single run needs to know about where to fetch from, what to keep,
/// and where to write.
#[derive(Clone, Debug)]
pub struct CalendarConfig {
    pub url: String,
    pub user_agent: String,
    pub accept: String,
    pub timeout: Duration,
    pub policy: ImpactPolicy,
    pub output: PathBuf,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            url: CALENDAR_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            accept: ACCEPT.to_string(),
            timeout: TIMEOUT,
            policy: ImpactPolicy::default(),
            output: PathBuf::from(OUTPUT_PATH),
        }
    }
}

impl CalendarConfig {
    /// Replace the snapshot destination.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Point the fetcher at a different feed.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_feed() {
        let config = CalendarConfig::default();
        assert_eq!(config.url, CALENDAR_URL);
        assert_eq!(config.accept, "application/json");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.output, PathBuf::from("calendar.json"));
        assert_eq!(config.policy.volatility_threshold, 3);
    }

    #[test]
    fn builders_override_fields() {
        let config = CalendarConfig::default()
            .with_output("/tmp/out.json")
            .with_url("http://127.0.0.1:1/feed.json");
        assert_eq!(config.output, PathBuf::from("/tmp/out.json"));
        assert_eq!(config.url, "http://127.0.0.1:1/feed.json");
    }
}
