//! User settings: persisted schema, defaults, and the enum options the
//! settings view cycles through.
//!
//! The settings file is camelCase JSON with per-field defaults, so a file
//! written by an older version (or trimmed by hand) merges cleanly with the
//! current defaults instead of failing to load.

use serde::{Deserialize, Serialize};

use crate::engine::RepeatMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSound {
    Alarm,
    Bell,
    None,
}

impl NotificationSound {
    pub fn cycle(self) -> Self {
        match self {
            Self::Alarm => Self::Bell,
            Self::Bell => Self::None,
            Self::None => Self::Alarm,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Alarm => "alarm",
            Self::Bell => "bell",
            Self::None => "none",
        }
    }
}

/// Which progress graphic the timer view draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressStyle {
    Gauge,
    Pills,
    DotMatrix,
}

impl ProgressStyle {
    pub fn cycle(self) -> Self {
        match self {
            Self::Gauge => Self::Pills,
            Self::Pills => Self::DotMatrix,
            Self::DotMatrix => Self::Gauge,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gauge => "gauge",
            Self::Pills => "pills",
            Self::DotMatrix => "dot matrix",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressUnit {
    Minutes,
    Hours,
}

impl ProgressUnit {
    pub fn cycle(self) -> Self {
        match self {
            Self::Minutes => Self::Hours,
            Self::Hours => Self::Minutes,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
        }
    }

    /// Render a minute count in this unit, e.g. `95 minutes` or `1h 35m`.
    pub fn format(self, minutes: u32) -> String {
        match self {
            Self::Minutes => format!("{} minutes", minutes),
            Self::Hours => format!("{}h {}m", minutes / 60, minutes % 60),
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Default session length in minutes, applied at startup and after reset.
    pub default_focus_duration: u32,
    /// Daily goal in minutes, drawn as the target line in the weekly view.
    pub daily_focus_goal: u32,
    pub auto_start_timer: bool,
    pub repeat_mode: RepeatMode,
    pub notify_on_completion: bool,
    pub enable_sound_alert: bool,
    pub notification_sound: NotificationSound,
    pub progress_style: ProgressStyle,
    pub progress_display_unit: ProgressUnit,
    pub show_music_card: bool,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_focus_duration: 25,
            daily_focus_goal: 120,
            auto_start_timer: false,
            repeat_mode: RepeatMode::None,
            notify_on_completion: true,
            enable_sound_alert: true,
            notification_sound: NotificationSound::Alarm,
            progress_style: ProgressStyle::Gauge,
            progress_display_unit: ProgressUnit::Minutes,
            show_music_card: true,
            theme: "default".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_merges_with_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"defaultFocusDuration": 45, "enableSoundAlert": false}"#)
                .unwrap();
        assert_eq!(settings.default_focus_duration, 45);
        assert!(!settings.enable_sound_alert);
        // Untouched fields fall back to defaults.
        assert_eq!(settings.daily_focus_goal, 120);
        assert_eq!(settings.notification_sound, NotificationSound::Alarm);
        assert_eq!(settings.theme, "default");
    }

    #[test]
    fn enum_spellings_match_the_stored_schema() {
        let json = serde_json::to_string(&Settings {
            repeat_mode: RepeatMode::RestartSameDuration,
            progress_style: ProgressStyle::DotMatrix,
            ..Settings::default()
        })
        .unwrap();
        assert!(json.contains("\"repeatMode\":\"restartSameDuration\""));
        assert!(json.contains("\"progressStyle\":\"dotMatrix\""));
        assert!(json.contains("\"notificationSound\":\"alarm\""));
    }

    #[test]
    fn unit_formatting() {
        assert_eq!(ProgressUnit::Minutes.format(95), "95 minutes");
        assert_eq!(ProgressUnit::Hours.format(95), "1h 35m");
        assert_eq!(ProgressUnit::Hours.format(45), "0h 45m");
    }
}
