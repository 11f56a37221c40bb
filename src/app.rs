//! Application state and input handling.
//!
//! One `AppState` owns the timer engine, the focus ledger, the settings, and
//! the view plumbing. The run loop polls input at the draw cadence and calls
//! `update()` each pass; `update()` drains whole elapsed seconds into the
//! engine and dispatches any completion events to the ledger and the
//! notification side effects.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, KeyCode, KeyModifiers};

use crate::engine::{RepeatMode, TimerEngine, TimerEvent, TimerState};
use crate::ledger::FocusLedger;
use crate::notify;
use crate::settings::Settings;
use crate::storage;
use crate::suggest::{SuggestClient, Suggestion};
use crate::theme::{self, Theme, get_theme};

pub const MAX_DURATION_MINUTES: u32 = crate::engine::MAX_DURATION_SECS / 60;

#[derive(PartialEq, Clone, Copy)]
pub enum View {
    Timer,
    Progress,
    Settings,
    Help,
}

/// Modal text-entry and confirmation states layered over the views.
#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    EditingLabel,
    EditingDuration,
    ConfirmingWeekReset,
}

#[derive(PartialEq, Clone, Copy)]
pub enum SettingsField {
    FocusDuration,
    DailyGoal,
    AutoStart,
    Repeat,
    NotifyOnCompletion,
    SoundAlert,
    NotificationSound,
    ProgressStyle,
    DisplayUnit,
    MusicCard,
    Theme,
}

impl SettingsField {
    pub fn next(self) -> Self {
        match self {
            Self::FocusDuration => Self::DailyGoal,
            Self::DailyGoal => Self::AutoStart,
            Self::AutoStart => Self::Repeat,
            Self::Repeat => Self::NotifyOnCompletion,
            Self::NotifyOnCompletion => Self::SoundAlert,
            Self::SoundAlert => Self::NotificationSound,
            Self::NotificationSound => Self::ProgressStyle,
            Self::ProgressStyle => Self::DisplayUnit,
            Self::DisplayUnit => Self::MusicCard,
            Self::MusicCard => Self::Theme,
            Self::Theme => Self::FocusDuration,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::FocusDuration => Self::Theme,
            Self::DailyGoal => Self::FocusDuration,
            Self::AutoStart => Self::DailyGoal,
            Self::Repeat => Self::AutoStart,
            Self::NotifyOnCompletion => Self::Repeat,
            Self::SoundAlert => Self::NotifyOnCompletion,
            Self::NotificationSound => Self::SoundAlert,
            Self::ProgressStyle => Self::NotificationSound,
            Self::DisplayUnit => Self::ProgressStyle,
            Self::MusicCard => Self::DisplayUnit,
            Self::Theme => Self::MusicCard,
        }
    }
}

pub struct AppState {
    pub engine: TimerEngine,
    pub ledger: FocusLedger,
    pub settings: Settings,
    pub suggest: SuggestClient,
    pub suggestion: Option<Suggestion>,
    pub session_label: String,
    pub current_view: View,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub settings_field: SettingsField,
    pub settings_editing: bool,
    pub settings_input: String,
    pub theme: Theme,
    pub status: Option<String>,
    pub animation_frame: u8,
    settings_path: PathBuf,
    last_second: Instant,
}

impl AppState {
    pub fn new(
        settings: Settings,
        ledger: FocusLedger,
        suggest: SuggestClient,
        settings_path: PathBuf,
    ) -> Self {
        let engine = TimerEngine::new(settings.default_focus_duration * 60, settings.repeat_mode);
        let theme = get_theme(&settings.theme);
        Self {
            engine,
            ledger,
            settings,
            suggest,
            suggestion: None,
            session_label: String::new(),
            current_view: View::Timer,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            settings_field: SettingsField::FocusDuration,
            settings_editing: false,
            settings_input: String::new(),
            theme,
            status: None,
            animation_frame: 0,
            settings_path,
            last_second: Instant::now(),
        }
    }

    pub fn time_display(&self) -> String {
        let secs = self.engine.remaining_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    fn is_break_session(&self) -> bool {
        self.session_label.to_lowercase().contains("break")
    }

    /// Called every pass of the run loop. Drains each whole elapsed second
    /// into the engine so a slow draw never drops countdown ticks.
    pub fn update(&mut self) {
        while self.last_second.elapsed() >= Duration::from_secs(1) {
            self.last_second += Duration::from_secs(1);
            let events = self.engine.tick();
            if !events.is_empty() {
                let today = Local::now().date_naive();
                self.handle_timer_events(events, today);
            }
        }
        self.animation_frame = self.animation_frame.wrapping_add(1) % 20;
    }

    /// Dispatch completion events after the engine transition has committed.
    /// Records the configured session minutes against the completion-time
    /// date; break-labeled sessions count for nothing.
    pub fn handle_timer_events(&mut self, events: Vec<TimerEvent>, today: NaiveDate) {
        for event in events {
            match event {
                TimerEvent::SessionComplete { focused_minutes } => {
                    if !self.is_break_session() {
                        if let Err(e) = self.ledger.record_session(today, focused_minutes) {
                            self.status = Some(format!("Focus data not saved: {e}"));
                        }
                    }
                }
                TimerEvent::Finished => {
                    self.status = Some("Session complete!".into());
                    if self.settings.notify_on_completion {
                        let body = if self.session_label.is_empty() {
                            "Your session has ended.".to_string()
                        } else {
                            format!("Your \"{}\" session has ended.", self.session_label)
                        };
                        notify::notify("FocusGlow: Timer Finished!", &body);
                    }
                    if self.settings.enable_sound_alert {
                        notify::play_sound(self.settings.notification_sound);
                    }
                }
            }
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = storage::save_json(&self.settings_path, &self.settings) {
            self.status = Some(format!("Settings not saved: {e}"));
        }
    }

    /// Select a new duration in minutes. Only honored while `Idle`; the
    /// engine rejects duration edits mid-session and the UI respects that.
    fn select_duration(&mut self, minutes: u32) {
        if self.engine.state() != TimerState::Idle {
            return;
        }
        if self.engine.set_duration(minutes * 60).is_ok() && self.settings.auto_start_timer {
            self.engine.start();
        }
    }

    fn fetch_suggestion(&mut self) {
        match self.suggest.suggest(Local::now().time()) {
            Ok(suggestion) => {
                self.status = None;
                self.suggestion = Some(suggestion);
            }
            Err(_) => {
                self.status = Some("Couldn't fetch a playlist suggestion.".into());
            }
        }
    }
}

// ============================================================================
// Event Handlers
// ============================================================================

/// Returns true when the app should quit.
pub fn handle_input(key: event::KeyEvent, app: &mut AppState) -> bool {
    // Text-entry modes swallow everything first.
    if matches!(app.input_mode, InputMode::EditingLabel | InputMode::EditingDuration) {
        match key.code {
            KeyCode::Char(c) => app.input_buffer.push(c),
            KeyCode::Backspace => {
                app.input_buffer.pop();
            }
            KeyCode::Enter => commit_input(app),
            KeyCode::Esc => {
                app.input_mode = InputMode::Normal;
                app.input_buffer.clear();
            }
            _ => {}
        }
        return false;
    }

    if app.settings_editing {
        match key.code {
            KeyCode::Char(c) => app.settings_input.push(c),
            KeyCode::Backspace => {
                app.settings_input.pop();
            }
            KeyCode::Enter => apply_setting(app),
            KeyCode::Esc => {
                app.settings_editing = false;
                app.settings_input.clear();
            }
            _ => {}
        }
        return false;
    }

    if app.input_mode == InputMode::ConfirmingWeekReset {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let today = Local::now().date_naive();
                match app.ledger.reset_week(today) {
                    Ok(()) => app.status = Some("Current week data reset.".into()),
                    Err(e) => app.status = Some(format!("Week reset not saved: {e}")),
                }
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.input_mode = InputMode::Normal;
            }
            _ => {}
        }
        return false;
    }

    match app.current_view {
        View::Settings => handle_settings_view(key, app),
        View::Progress => handle_progress_view(key, app),
        _ => handle_main_view(key, app),
    }
}

fn handle_main_view(key: event::KeyEvent, app: &mut AppState) -> bool {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }

    match key.code {
        KeyCode::Char(' ') => match app.engine.state() {
            TimerState::Idle => app.engine.start(),
            TimerState::Running => app.engine.pause(),
            TimerState::Paused => app.engine.resume(),
        },
        KeyCode::Char('r') => {
            let _ = app.engine.reset(None);
            if app.settings.auto_start_timer {
                app.engine.start();
            }
        }
        KeyCode::Char('1') => app.select_duration(5),
        KeyCode::Char('2') => app.select_duration(10),
        KeyCode::Char('3') => app.select_duration(25),
        KeyCode::Char('c') => {
            if app.engine.state() == TimerState::Idle {
                app.input_mode = InputMode::EditingDuration;
                app.input_buffer = (app.engine.duration_secs() / 60).to_string();
            }
        }
        KeyCode::Char('l') => {
            app.input_mode = InputMode::EditingLabel;
            app.input_buffer = app.session_label.clone();
        }
        KeyCode::Char('g') => {
            if app.settings.show_music_card {
                app.fetch_suggestion();
            }
        }
        KeyCode::Char('p') => {
            app.current_view = if app.current_view == View::Progress {
                View::Timer
            } else {
                View::Progress
            };
        }
        KeyCode::Char('d') => app.current_view = View::Settings,
        KeyCode::Char('h') | KeyCode::Char('?') => {
            app.current_view = if app.current_view == View::Help {
                View::Timer
            } else {
                View::Help
            };
        }
        _ => {}
    }

    false
}

fn handle_progress_view(key: event::KeyEvent, app: &mut AppState) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('p') => {
            app.current_view = View::Timer;
        }
        KeyCode::Char('r') => {
            app.input_mode = InputMode::ConfirmingWeekReset;
        }
        KeyCode::Char('u') => {
            app.settings.progress_display_unit = app.settings.progress_display_unit.cycle();
            app.save_settings();
        }
        _ => {}
    }
    false
}

fn handle_settings_view(key: event::KeyEvent, app: &mut AppState) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('d') => {
            app.current_view = View::Timer;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_field = app.settings_field.next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_field = app.settings_field.prev();
        }
        KeyCode::Enter | KeyCode::Char('e') => start_editing(app),
        KeyCode::Char(' ') => toggle_setting(app),
        KeyCode::Left | KeyCode::Char('h') => cycle_setting(app, false),
        KeyCode::Right | KeyCode::Char('l') => cycle_setting(app, true),
        _ => {}
    }
    false
}

fn start_editing(app: &mut AppState) {
    let input = match app.settings_field {
        SettingsField::FocusDuration => app.settings.default_focus_duration.to_string(),
        SettingsField::DailyGoal => app.settings.daily_focus_goal.to_string(),
        _ => return,
    };
    app.settings_input = input;
    app.settings_editing = true;
}

fn apply_setting(app: &mut AppState) {
    if let Ok(v) = app.settings_input.parse::<u32>() {
        match app.settings_field {
            SettingsField::FocusDuration => {
                if (1..=MAX_DURATION_MINUTES).contains(&v) {
                    app.settings.default_focus_duration = v;
                    // Takes effect immediately when no session is underway.
                    if app.engine.state() == TimerState::Idle {
                        let _ = app.engine.set_duration(v * 60);
                    }
                    app.save_settings();
                }
            }
            SettingsField::DailyGoal => {
                if (1..=1440).contains(&v) {
                    app.settings.daily_focus_goal = v;
                    app.save_settings();
                }
            }
            _ => {}
        }
    }
    app.settings_editing = false;
    app.settings_input.clear();
}

fn toggle_setting(app: &mut AppState) {
    match app.settings_field {
        SettingsField::AutoStart => {
            app.settings.auto_start_timer = !app.settings.auto_start_timer;
        }
        SettingsField::NotifyOnCompletion => {
            app.settings.notify_on_completion = !app.settings.notify_on_completion;
        }
        SettingsField::SoundAlert => {
            app.settings.enable_sound_alert = !app.settings.enable_sound_alert;
        }
        SettingsField::MusicCard => {
            app.settings.show_music_card = !app.settings.show_music_card;
        }
        SettingsField::Repeat => {
            app.settings.repeat_mode = match app.settings.repeat_mode {
                RepeatMode::None => RepeatMode::RestartSameDuration,
                RepeatMode::RestartSameDuration => RepeatMode::None,
            };
            app.engine.set_repeat_mode(app.settings.repeat_mode);
        }
        SettingsField::NotificationSound => {
            app.settings.notification_sound = app.settings.notification_sound.cycle();
        }
        SettingsField::ProgressStyle => {
            app.settings.progress_style = app.settings.progress_style.cycle();
        }
        SettingsField::DisplayUnit => {
            app.settings.progress_display_unit = app.settings.progress_display_unit.cycle();
        }
        _ => return,
    }
    app.save_settings();
}

fn cycle_setting(app: &mut AppState, forward: bool) {
    if app.settings_field != SettingsField::Theme {
        return;
    }
    let idx = theme::THEMES
        .iter()
        .position(|&t| t == app.settings.theme)
        .unwrap_or(0);
    let new_idx = if forward {
        (idx + 1) % theme::THEMES.len()
    } else if idx == 0 {
        theme::THEMES.len() - 1
    } else {
        idx - 1
    };
    app.settings.theme = theme::THEMES[new_idx].into();
    app.theme = get_theme(&app.settings.theme);
    app.save_settings();
}

fn commit_input(app: &mut AppState) {
    match app.input_mode {
        InputMode::EditingLabel => {
            app.session_label = app.input_buffer.trim().to_string();
        }
        InputMode::EditingDuration => {
            if let Ok(minutes) = app.input_buffer.trim().parse::<u32>() {
                if (1..=MAX_DURATION_MINUTES).contains(&minutes) {
                    app.select_duration(minutes);
                }
            }
        }
        _ => {}
    }
    app.input_mode = InputMode::Normal;
    app.input_buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TimerEvent;
    use chrono::NaiveDate;

    fn test_app() -> AppState {
        let mut settings = Settings::default();
        settings.notify_on_completion = false;
        settings.enable_sound_alert = false;
        AppState::new(
            settings,
            FocusLedger::in_memory(),
            SuggestClient::new(None),
            std::env::temp_dir().join("focusglow_test_settings.json"),
        )
    }

    fn complete_events(minutes: u32) -> Vec<TimerEvent> {
        vec![
            TimerEvent::SessionComplete { focused_minutes: minutes },
            TimerEvent::Finished,
        ]
    }

    #[test]
    fn completed_session_is_recorded_for_today() {
        let mut app = test_app();
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        app.handle_timer_events(complete_events(25), today);
        assert_eq!(app.ledger.week_total(today), 25);
    }

    #[test]
    fn break_labeled_sessions_are_not_recorded() {
        let mut app = test_app();
        app.session_label = "Coffee Break".into();
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        app.handle_timer_events(complete_events(10), today);
        assert_eq!(app.ledger.week_total(today), 0);
    }

    #[test]
    fn duration_selection_only_applies_while_idle() {
        let mut app = test_app();
        app.engine.start();
        app.select_duration(50);
        assert_eq!(app.engine.duration_secs(), 25 * 60);

        let _ = app.engine.reset(None);
        app.select_duration(50);
        assert_eq!(app.engine.duration_secs(), 50 * 60);
    }

    #[test]
    fn sub_minute_sessions_never_pollute_the_ledger() {
        let mut app = test_app();
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        // A 30-second session completes with floor(30/60) = 0 minutes.
        app.handle_timer_events(complete_events(0), today);
        assert_eq!(app.ledger.week_total(today), 0);
    }
}
