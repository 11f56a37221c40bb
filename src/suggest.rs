//! Playlist mood suggestion for the music card.
//!
//! With a configured endpoint this POSTs the current time and expects a
//! `{"playlistType": "focus"|"break", "reason": ...}` reply; any failure
//! surfaces as a single non-fatal error for the status line, no retries.
//! Without an endpoint a local time-of-day rule answers instead: focus
//! playlists during working hours (09:00-17:00), break playlists otherwise.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistMood {
    Focus,
    Break,
}

impl PlaylistMood {
    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Break => "break",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub playlist_type: PlaylistMood,
    pub reason: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestRequest<'a> {
    current_time: &'a str,
}

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("suggestion request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct SuggestClient {
    endpoint: Option<String>,
    http: reqwest::blocking::Client,
}

impl SuggestClient {
    pub fn new(endpoint: Option<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { endpoint, http }
    }

    pub fn suggest(&self, now: NaiveTime) -> Result<Suggestion, SuggestError> {
        let hhmm = now.format("%H:%M").to_string();
        match &self.endpoint {
            Some(url) => {
                let response = self
                    .http
                    .post(url)
                    .json(&SuggestRequest { current_time: &hhmm })
                    .send()?
                    .error_for_status()?;
                Ok(response.json()?)
            }
            None => Ok(local_suggestion(now)),
        }
    }
}

/// The offline rule, mirroring what the remote endpoint is prompted to do.
pub fn local_suggestion(now: NaiveTime) -> Suggestion {
    let hhmm = now.format("%H:%M");
    if (9..17).contains(&now.hour()) {
        Suggestion {
            playlist_type: PlaylistMood::Focus,
            reason: format!("It's {hhmm}, prime working hours. Something steady to stay in the zone."),
        }
    } else {
        Suggestion {
            playlist_type: PlaylistMood::Break,
            reason: format!("It's {hhmm}, outside working hours. Time to wind down."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn heuristic_boundaries() {
        assert_eq!(local_suggestion(time(8, 59)).playlist_type, PlaylistMood::Break);
        assert_eq!(local_suggestion(time(9, 0)).playlist_type, PlaylistMood::Focus);
        assert_eq!(local_suggestion(time(16, 59)).playlist_type, PlaylistMood::Focus);
        assert_eq!(local_suggestion(time(17, 0)).playlist_type, PlaylistMood::Break);
        assert_eq!(local_suggestion(time(23, 30)).playlist_type, PlaylistMood::Break);
    }

    #[test]
    fn endpoint_reply_schema_parses() {
        let suggestion: Suggestion =
            serde_json::from_str(r#"{"playlistType":"break","reason":"Late evening."}"#).unwrap();
        assert_eq!(suggestion.playlist_type, PlaylistMood::Break);
        assert_eq!(suggestion.reason, "Late evening.");
    }

    #[test]
    fn offline_client_answers_without_network() {
        let client = SuggestClient::new(None);
        let suggestion = client.suggest(time(10, 15)).unwrap();
        assert_eq!(suggestion.playlist_type, PlaylistMood::Focus);
        assert!(suggestion.reason.contains("10:15"));
    }
}
