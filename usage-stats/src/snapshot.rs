use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of the counters, as served to the dashboard and
/// written to disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_messages: u64,
    #[serde(default)]
    pub by_channel: BTreeMap<String, u64>,
    /// `total_messages * minutes_per_message`.
    #[serde(default)]
    pub minutes_saved: f64,
    #[serde(default)]
    pub hours_saved: f64,
    pub first_message_at: Option<DateTime<Utc>>,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl StatsSnapshot {
    pub(crate) fn count(&mut self, channel: &str, at: DateTime<Utc>, minutes_per_message: f64) {
        self.total_messages += 1;
        *self.by_channel.entry(channel.to_string()).or_insert(0) += 1;
        self.first_message_at.get_or_insert(at);
        self.last_message_at = Some(at);
        self.refresh_estimate(minutes_per_message);
    }

    pub(crate) fn refresh_estimate(&mut self, minutes_per_message: f64) {
        self.minutes_saved = self.total_messages as f64 * minutes_per_message;
        self.hours_saved = (self.minutes_saved / 60.0 * 100.0).round() / 100.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_tracks_channels_and_timestamps() {
        let t1 = DateTime::parse_from_rfc3339("2026-01-01T10:00:00Z").unwrap().with_timezone(&Utc);
        let t2 = DateTime::parse_from_rfc3339("2026-01-01T11:00:00Z").unwrap().with_timezone(&Utc);

        let mut s = StatsSnapshot::default();
        s.count("website", t1, 3.0);
        s.count("telegram", t2, 3.0);
        s.count("website", t2, 3.0);

        assert_eq!(s.total_messages, 3);
        assert_eq!(s.by_channel["website"], 2);
        assert_eq!(s.by_channel["telegram"], 1);
        assert_eq!(s.first_message_at, Some(t1));
        assert_eq!(s.last_message_at, Some(t2));
        assert_eq!(s.minutes_saved, 9.0);
        assert_eq!(s.hours_saved, 0.15);
    }
}
