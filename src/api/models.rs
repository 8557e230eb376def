use serde::{Deserialize, Serialize};

/// Server-assigned account identifier.
pub type AccountId = i64;

/// A linked streaming-provider identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(alias = "spotify_user_id")]
    pub provider_user_id: String,
    pub display_name: String,
}

/// Point-in-time snapshot of what an account's player is doing.
///
/// Optional facets are `None` when nothing is playing or the provider did not
/// report them; they render as empty or disabled, never as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlaybackState {
    pub is_playing: bool,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub album_image_url: Option<String>,
    #[serde(default)]
    pub progress_ms: u64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub volume_percent: Option<u8>,
    #[serde(default)]
    pub device_name: Option<String>,
}

impl PlaybackState {
    /// Track progress in percent, 0 when the duration is unknown.
    pub fn progress_percent(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        (self.progress_ms as f64 / self.duration_ms as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn has_track(&self) -> bool {
        self.track_name
            .as_deref()
            .map(|name| !name.trim().is_empty())
            .unwrap_or(false)
    }
}

/// The signed-in user, as reported by `/google/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
}

/// Formats milliseconds as `M:SS`, or `H:MM:SS` once an hour is reached.
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_has_zero_progress() {
        for progress_ms in [0, 1, 5_000, u64::MAX] {
            let state = PlaybackState {
                progress_ms,
                duration_ms: 0,
                ..Default::default()
            };
            let percent = state.progress_percent();
            assert!(percent.is_finite());
            assert_eq!(percent, 0.0);
        }
    }

    #[test]
    fn progress_is_clamped_to_full() {
        let state = PlaybackState {
            progress_ms: 90_000,
            duration_ms: 60_000,
            ..Default::default()
        };
        assert_eq!(state.progress_percent(), 100.0);

        let half = PlaybackState {
            progress_ms: 30_000,
            duration_ms: 60_000,
            ..Default::default()
        };
        assert_eq!(half.progress_percent(), 50.0);
    }

    #[test]
    fn format_time_below_an_hour() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(999), "0:00");
        assert_eq!(format_time(61_000), "1:01");
        assert_eq!(format_time(605_000), "10:05");
        assert_eq!(format_time(3_599_999), "59:59");

        for ms in (0..3_600_000u64).step_by(7_919) {
            let text = format_time(ms);
            let (minutes, seconds) = text.split_once(':').expect("M:SS");
            assert_eq!(seconds.len(), 2, "{text}");
            assert!(minutes.parse::<u64>().unwrap() < 60, "{text}");
            assert!(seconds.parse::<u64>().unwrap() < 60, "{text}");
        }
    }

    #[test]
    fn format_time_with_hours() {
        assert_eq!(format_time(3_600_000), "1:00:00");
        assert_eq!(format_time(3_725_000), "1:02:05");
        assert_eq!(format_time(36_000_000), "10:00:00");

        for ms in (3_600_000..20_000_000u64).step_by(104_729) {
            let text = format_time(ms);
            let parts: Vec<&str> = text.split(':').collect();
            assert_eq!(parts.len(), 3, "{text}");
            assert_eq!(parts[1].len(), 2, "{text}");
            assert_eq!(parts[2].len(), 2, "{text}");
        }
    }

    #[test]
    fn playback_state_tolerates_missing_facets() {
        let state: PlaybackState = serde_json::from_str(r#"{"is_playing": false}"#).unwrap();
        assert_eq!(state, PlaybackState::default());
        assert!(!state.has_track());

        let state: PlaybackState = serde_json::from_str(
            r#"{
                "is_playing": true,
                "track_name": "Song",
                "artist_name": "A, B",
                "album_name": null,
                "album_image_url": "https://img/1.jpg",
                "progress_ms": 1200,
                "duration_ms": 180000,
                "volume_percent": 40,
                "device_name": "Kitchen"
            }"#,
        )
        .unwrap();
        assert!(state.has_track());
        assert_eq!(state.volume_percent, Some(40));
        assert_eq!(state.album_name, None);
    }

    #[test]
    fn account_accepts_provider_field_alias() {
        let account: Account = serde_json::from_str(
            r#"{"id": 3, "spotify_user_id": "abc", "display_name": "Alice"}"#,
        )
        .unwrap();
        assert_eq!(account.id, 3);
        assert_eq!(account.provider_user_id, "abc");
    }
}
