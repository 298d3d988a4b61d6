use super::filter::CleanedEvent;
use crate::fs::write_json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The file written by a run: when it was generated, and what was kept.
///
/// ```json
/// {
///   "updated_at": "2024-03-12T06:00:00.123456Z",
///   "events": [ ... ]
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarSnapshot {
    /// ISO-8601, UTC, with a trailing `Z`.
    pub updated_at: String,
    pub events: Vec<CleanedEvent>,
}

impl CalendarSnapshot {
    pub fn new(events: Vec<CleanedEvent>, generated_at: DateTime<Utc>) -> Self {
        Self {
            updated_at: generated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            events,
        }
    }
}

/// Stamp `events` with the current time and overwrite `destination` with the result.
pub async fn save(
    events: Vec<CleanedEvent>,
    destination: impl AsRef<Path>,
) -> anyhow::Result<CalendarSnapshot> {
    let destination = destination.as_ref();
    let snapshot = CalendarSnapshot::new(events, Utc::now());

    write_json(destination, &snapshot).await?;
    debug!(
        "saved {} events to {}",
        snapshot.events.len(),
        destination.display()
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_is_utc_with_zulu_suffix() {
        let at = Utc
            .with_ymd_and_hms(2024, 3, 12, 6, 0, 5)
            .single()
            .expect("valid instant");
        let snapshot = CalendarSnapshot::new(vec![], at);
        assert_eq!(snapshot.updated_at, "2024-03-12T06:00:05.000000Z");
    }

    #[tokio::test]
    async fn save_writes_exactly_two_top_level_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("calendar.json");
        let event = CleanedEvent {
            date: "2024-03-12".into(),
            currency: "JPY".into(),
            event: "日銀 政策金利".into(),
            impact: "High".into(),
            ..CleanedEvent::default()
        };

        let snapshot = save(vec![event.clone()], &path).await.expect("save");

        let raw = std::fs::read_to_string(&path).expect("read");
        assert!(raw.contains("日銀 政策金利"));

        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
        let object = value.as_object().expect("object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["events", "updated_at"]);
        assert_eq!(object["events"].as_array().map(Vec::len), Some(1));
        assert_eq!(object["events"][0]["event"], "日銀 政策金利");

        let updated_at = object["updated_at"].as_str().expect("string");
        assert!(updated_at.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(updated_at).is_ok());
        assert_eq!(snapshot.events, vec![event]);
    }
}
