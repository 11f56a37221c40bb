use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    io,
    time::{Duration, Instant},
};

mod app;
mod engine;
mod graphics;
mod ledger;
mod notify;
mod settings;
mod storage;
mod suggest;
mod theme;
mod ui;

use app::{AppState, handle_input};
use engine::MAX_DURATION_SECS;
use ledger::FocusLedger;
use settings::Settings;
use suggest::SuggestClient;

const TICK_RATE: Duration = Duration::from_millis(50);

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone)]
#[command(author, version, about = "✨ focusglow - A Glowing Terminal Focus Timer")]
struct Args {
    /// Session duration, e.g. 25m, 1h30m, 90s
    #[arg(short, long, value_parser = parse_duration)]
    duration: Option<f64>,
    #[arg(short = 't', long)]
    theme: Option<String>,
    #[arg(long)]
    no_sound: bool,
    /// Start the countdown immediately
    #[arg(long)]
    auto_start: bool,
    /// Playlist suggestion endpoint; without it a local time-of-day rule answers
    #[arg(long)]
    suggest_url: Option<String>,
}

fn parse_duration(s: &str) -> std::result::Result<f64, String> {
    let s = s.trim().to_lowercase();
    let mut total = 0.0;
    let mut num = String::new();

    for c in s.chars() {
        match c {
            '0'..='9' | '.' => num.push(c),
            'h' => {
                total += num.parse::<f64>().map_err(|_| "Invalid hours")? * 60.0;
                num.clear();
            }
            'm' => {
                total += num.parse::<f64>().map_err(|_| "Invalid minutes")?;
                num.clear();
            }
            's' => {
                total += num.parse::<f64>().map_err(|_| "Invalid seconds")? / 60.0;
                num.clear();
            }
            _ => return Err("Invalid format".into()),
        }
    }

    if total > 0.0 { Ok(total) } else { Err("Duration must be > 0".into()) }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let settings_path = storage::data_path("settings.json");
    let mut settings: Settings = storage::load_json(&settings_path);

    // CLI overrides
    if let Some(t) = args.theme.clone() {
        settings.theme = t;
    }
    if args.no_sound {
        settings.enable_sound_alert = false;
    }
    if args.auto_start {
        settings.auto_start_timer = true;
    }

    let ledger = FocusLedger::load(storage::data_path("focus_data.json"));
    let suggest = SuggestClient::new(args.suggest_url.clone());
    let mut app = AppState::new(settings, ledger, suggest, settings_path);

    if let Some(minutes) = args.duration {
        let secs = ((minutes * 60.0).round() as u32).clamp(1, MAX_DURATION_SECS);
        let _ = app.engine.set_duration(secs);
    }
    if app.settings.auto_start_timer {
        app.engine.start();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::render_ui(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_input(key, app) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.update();
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_parse_in_human_format() {
        assert_eq!(parse_duration("25m").unwrap(), 25.0);
        assert_eq!(parse_duration("1h30m").unwrap(), 90.0);
        assert_eq!(parse_duration("90s").unwrap(), 1.5);
        assert!(parse_duration("0m").is_err());
        assert!(parse_duration("soon").is_err());
    }
}
