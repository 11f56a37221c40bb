//! View rendering. Everything here draws from `AppState` and the pure
//! builders in `graphics`; no view holds state of its own.

use ratatui::{prelude::*, widgets::*};

use crate::app::{AppState, InputMode, SettingsField, View};
use crate::engine::{RepeatMode, TimerState};
use crate::graphics;
use crate::settings::ProgressStyle;
use crate::suggest::PlaylistMood;

const PILL_COUNT: usize = 12;

pub fn render_ui(f: &mut Frame, app: &AppState) {
    match app.current_view {
        View::Timer => render_timer(f, app),
        View::Progress => render_progress(f, app),
        View::Settings => render_settings(f, app),
        View::Help => render_help(f, app),
    }
}

fn render_timer(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(4)])
        .split(f.size());

    // Header
    let header = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border_color))
        .title(Span::styled(
            " ✨ FOCUSGLOW ",
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(header, chunks[0]);

    // Main content
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(8),
            Constraint::Length(2), // session label
            Constraint::Length(1),
            Constraint::Length(5), // time readout
            Constraint::Length(1),
            Constraint::Length(2), // date
            Constraint::Length(1),
            Constraint::Length(2), // run status
            Constraint::Length(1),
            Constraint::Length(3), // progress graphic
            Constraint::Length(1),
            Constraint::Length(2), // presets
            Constraint::Length(1),
            Constraint::Length(2), // music card
            Constraint::Percentage(8),
        ])
        .split(chunks[1]);

    render_session_label(f, app, sections[1]);
    render_time_readout(f, app, sections[3]);

    // Date/time
    let now = chrono::Local::now();
    let date_lines = vec![
        Line::from(Span::styled(
            now.format("%A, %B %d, %Y").to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            now.format("%I:%M %p").to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(date_lines).alignment(Alignment::Center), sections[5]);

    // Run status
    let (status, color) = match app.engine.state() {
        TimerState::Running => (
            format!("{} RUNNING", if app.animation_frame < 10 { "●" } else { "○" }),
            Color::Green,
        ),
        TimerState::Paused => (
            format!("⏸  PAUSED{}", ".".repeat((app.animation_frame / 5) as usize % 4)),
            Color::Yellow,
        ),
        TimerState::Idle => ("■ READY".into(), Color::Gray),
    };
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[7],
    );

    render_progress_graphic(f, app, sections[9]);
    render_presets(f, app, sections[11]);
    render_music_card(f, app, sections[13]);
    render_footer(f, app, chunks[2]);
}

fn render_session_label(f: &mut Frame, app: &AppState, area: Rect) {
    let line = if app.input_mode == InputMode::EditingLabel {
        Line::from(vec![
            Span::styled("Label: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                &app.input_buffer,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("█", Style::default().fg(Color::Green)),
        ])
    } else if app.session_label.is_empty() {
        Line::from(Span::styled(
            "Press L to label this session",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(
            app.session_label.clone(),
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        ))
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_time_readout(f: &mut Frame, app: &AppState, area: Rect) {
    let time_str = app.time_display();
    let lines: Vec<Line> = if app.settings.progress_style == ProgressStyle::DotMatrix {
        graphics::dot_matrix_rows(&time_str)
            .into_iter()
            .map(|row| {
                Line::from(Span::styled(
                    row,
                    Style::default().fg(app.theme.timer_color).add_modifier(Modifier::BOLD),
                ))
            })
            .collect()
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                time_str,
                Style::default().fg(app.theme.timer_color).add_modifier(Modifier::BOLD),
            )),
        ]
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_progress_graphic(f: &mut Frame, app: &AppState, area: Rect) {
    let remaining = app.engine.remaining_secs();
    let total = app.engine.duration_secs();

    match app.settings.progress_style {
        ProgressStyle::Pills => {
            let pills: String = graphics::pill_segments(remaining, total, PILL_COUNT)
                .iter()
                .map(|&filled| if filled { "▰ " } else { "▱ " })
                .collect();
            f.render_widget(
                Paragraph::new(pills.trim_end().to_string())
                    .style(Style::default().fg(app.theme.timer_color))
                    .alignment(Alignment::Center),
                area,
            );
        }
        _ => {
            // Gauge doubles as the fallback behind the dot-matrix readout.
            f.render_widget(
                Gauge::default()
                    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                    .gauge_style(Style::default().fg(app.theme.timer_color).bg(Color::Black))
                    .percent((graphics::progress_ratio(remaining, total) * 100.0) as u16),
                area,
            );
        }
    }
}

fn render_presets(f: &mut Frame, app: &AppState, area: Rect) {
    let current = app.engine.duration_secs() / 60;
    let lines = if app.input_mode == InputMode::EditingDuration {
        vec![Line::from(vec![
            Span::styled("Custom minutes: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                &app.input_buffer,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled("█", Style::default().fg(Color::Green)),
        ])]
    } else {
        let preset = |key: &'static str, minutes: u32| -> Vec<Span<'static>> {
            let selected = current == minutes;
            let style = if selected {
                Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            vec![
                Span::styled(format!("[{key}] "), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{minutes}m"), style),
                Span::raw("   "),
            ]
        };
        let mut spans = Vec::new();
        spans.extend(preset("1", 5));
        spans.extend(preset("2", 10));
        spans.extend(preset("3", 25));
        spans.push(Span::styled("[C] ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("custom ({current}m)"),
            Style::default().fg(Color::Gray),
        ));
        vec![Line::from(spans)]
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_music_card(f: &mut Frame, app: &AppState, area: Rect) {
    if !app.settings.show_music_card {
        return;
    }
    let lines = match &app.suggestion {
        Some(s) => {
            let icon = match s.playlist_type {
                PlaylistMood::Focus => "🎧",
                PlaylistMood::Break => "🎵",
            };
            vec![
                Line::from(vec![
                    Span::raw(format!("{icon} ")),
                    Span::styled(
                        format!("{} playlist", s.playlist_type.label()),
                        Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    s.reason.clone(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                )),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Press G for a playlist suggestion",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))],
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        span_key("Space", app),
        Span::raw(" Start/Pause  •  "),
        span_key("R", app),
        Span::raw(" Reset  •  "),
        span_key("1-3/C", app),
        Span::raw(" Duration  •  "),
        span_key("L", app),
        Span::raw(" Label"),
    ]));
    lines.push(Line::from(vec![
        span_key("P", app),
        Span::raw(" Progress  •  "),
        span_key("D", app),
        Span::raw(" Settings  •  "),
        span_key("G", app),
        Span::raw(" Playlist  •  "),
        span_key("H", app),
        Span::raw(" Help  •  "),
        span_key("Q", app),
        Span::raw(" Quit"),
    ]));
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_progress(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 85, f.size());
    let today = chrono::Local::now().date_naive();
    let week = app.ledger.week_view(today);
    let total = app.ledger.week_total(today);
    let goal = app.settings.daily_focus_goal;
    let unit = app.settings.progress_display_unit;

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "📈 WEEKLY FOCUS SUMMARY",
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if app.input_mode == InputMode::ConfirmingWeekReset {
        lines.push(Line::from(Span::styled(
            "  ⚠️  Reset all focus data for this week? This cannot be undone.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "  Y: Confirm  •  N/Esc: Cancel",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  R: Reset week  •  U: Toggle unit  •  P/Esc: Back",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    let best = week.iter().map(|d| d.focused_minutes).max().unwrap_or(0);
    let scale = goal.max(best).max(1);

    for day in &week {
        let width = (day.focused_minutes as f64 / scale as f64 * 30.0) as usize;
        let met_goal = day.focused_minutes >= goal;
        let bar_color = if met_goal { app.theme.goal_color } else { app.theme.bar_color };
        let marker = if day.focused_minutes > 0 && day.focused_minutes == best {
            " ★"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", day.label), Style::default().fg(Color::Gray)),
            Span::styled("█".repeat(width.min(30)), Style::default().fg(bar_color)),
            Span::raw(format!(" {}{}", unit.format(day.focused_minutes), marker)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Total this week: ", Style::default().fg(Color::Gray)),
        Span::styled(
            unit.format(total),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Daily goal: ", Style::default().fg(Color::Gray)),
        Span::styled(unit.format(goal), Style::default().fg(Color::DarkGray)),
    ]));

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Weekly Progress ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color)),
        ),
        area,
    );
}

fn render_settings(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 90, f.size());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⚙️  SETTINGS",
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  ↑↓/jk: Navigate  •  Enter: Edit  •  Space: Toggle/Cycle  •  ←→/hl: Themes",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];

    let repeat_label = match app.settings.repeat_mode {
        RepeatMode::None => "off",
        RepeatMode::RestartSameDuration => "restart same duration",
    };
    let on_off = |v: bool| if v { "ON" } else { "OFF" }.to_string();

    let fields = [
        (
            SettingsField::FocusDuration,
            "⏱  Focus Duration",
            format!("{} min", app.settings.default_focus_duration),
        ),
        (
            SettingsField::DailyGoal,
            "🎯 Daily Focus Goal",
            format!("{} min", app.settings.daily_focus_goal),
        ),
        (SettingsField::AutoStart, "▶️  Auto-Start", on_off(app.settings.auto_start_timer)),
        (SettingsField::Repeat, "🔁 Repeat", repeat_label.to_string()),
        (
            SettingsField::NotifyOnCompletion,
            "🔔 Completion Notification",
            on_off(app.settings.notify_on_completion),
        ),
        (SettingsField::SoundAlert, "🔊 Sound Alert", on_off(app.settings.enable_sound_alert)),
        (
            SettingsField::NotificationSound,
            "🎶 Notification Sound",
            app.settings.notification_sound.label().to_string(),
        ),
        (
            SettingsField::ProgressStyle,
            "📊 Progress Style",
            app.settings.progress_style.label().to_string(),
        ),
        (
            SettingsField::DisplayUnit,
            "🕒 Display Unit",
            app.settings.progress_display_unit.label().to_string(),
        ),
        (SettingsField::MusicCard, "🎧 Music Card", on_off(app.settings.show_music_card)),
        (SettingsField::Theme, "🎨 Theme", format!("< {} >", app.settings.theme)),
    ];

    for (field, label, value) in fields {
        let selected = app.settings_field == field;
        let editing = selected && app.settings_editing;

        if editing {
            lines.push(Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    app.settings_input.clone(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", Style::default().fg(Color::Green)),
            ]));
        } else {
            let (prefix, label_style, value_style) = if selected {
                (
                    "  > ",
                    Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )
            } else {
                ("    ", Style::default().fg(Color::Gray), Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(vec![
                Span::styled(prefix, label_style),
                Span::styled(label, label_style),
                Span::raw("  "),
                Span::styled(value, value_style),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  💾 Saved automatically",
        Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
    )));

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Settings ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color)),
        ),
        area,
    );
}

fn render_help(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 85, f.size());

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⌨️  KEYBOARD SHORTCUTS",
            Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Timer:"),
        help_line("Space", "Start / pause / resume"),
        help_line("R", "Reset current timer"),
        help_line("1 / 2 / 3", "Presets: 5m, 10m, 25m (while idle)"),
        help_line("C", "Custom duration in minutes (while idle)"),
        help_line("L", "Label this session (\"break\" labels are not counted)"),
        help_line("G", "Fetch a playlist suggestion"),
        Line::from(""),
        Line::from("  Navigation:"),
        help_line("P", "Weekly progress view"),
        help_line("D", "Settings"),
        help_line("H / ?", "Toggle help"),
        Line::from(""),
        Line::from("  Weekly Progress:"),
        help_line("R", "Reset current week data (with confirmation)"),
        help_line("U", "Toggle minutes/hours display"),
        Line::from(""),
        Line::from("  General:"),
        help_line("Q / Esc", "Exit / go back"),
        help_line("Ctrl+C", "Force quit"),
        Line::from(""),
        Line::from(Span::styled(
            "💡 Completed focus time is saved per day and summed Monday to Sunday",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(
        Paragraph::new(help_text).alignment(Alignment::Left).block(
            Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color)),
        ),
        area,
    );
}

fn span_key<'a>(text: &'a str, app: &AppState) -> Span<'a> {
    Span::styled(
        text,
        Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD),
    )
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}", desc)),
    ])
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}
