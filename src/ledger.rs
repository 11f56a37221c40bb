//! Per-day focus-minute ledger with a Monday-to-Sunday weekly view.
//!
//! Completed (non-break) sessions accumulate minutes under their local
//! calendar date. The backing file is a flat array of
//! `{"date":"YYYY-MM-DD","focusedMinutes":N}` records; every mutation
//! persists before returning, so a crash window exists only between the
//! in-memory update and the write.

use anyhow::{Context, Result};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One stored record. Field casing matches the ledger file schema.
#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
struct DailyFocusEntry {
    date: NaiveDate,
    focused_minutes: u32,
}

/// One day of the weekly view. Days without data carry zero minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub label: &'static str,
    pub focused_minutes: u32,
}

pub struct FocusLedger {
    entries: BTreeMap<NaiveDate, u32>,
    path: Option<PathBuf>,
}

impl FocusLedger {
    /// Load the ledger from `path`, failing open: a missing, unreadable, or
    /// corrupt file yields an empty ledger and a stderr warning. The next
    /// successful write re-establishes durability.
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<DailyFocusEntry>>(&raw) {
                Ok(records) => records
                    .into_iter()
                    .map(|e| (e.date, e.focused_minutes))
                    .collect(),
                Err(e) => {
                    eprintln!("focusglow: ignoring unreadable ledger {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { entries, path: Some(path) }
    }

    /// A ledger with no backing file. Mutations stay in memory.
    pub fn in_memory() -> Self {
        Self { entries: BTreeMap::new(), path: None }
    }

    /// Credit `minutes` of completed focus time to `today`.
    ///
    /// Zero-minute sessions (instant resets, sub-minute timers) are a no-op
    /// and never create an entry.
    pub fn record_session(&mut self, today: NaiveDate, minutes: u32) -> Result<()> {
        if minutes == 0 {
            return Ok(());
        }
        *self.entries.entry(today).or_insert(0) += minutes;
        self.persist()
    }

    /// The Monday-start week containing `reference`: always exactly 7 days,
    /// Monday through Sunday.
    pub fn week_view(&self, reference: NaiveDate) -> [DaySummary; 7] {
        let monday = week_start(reference);
        std::array::from_fn(|i| {
            let date = monday
                .checked_add_days(Days::new(i as u64))
                .unwrap_or(monday);
            DaySummary {
                date,
                label: DAY_LABELS[i],
                focused_minutes: self.entries.get(&date).copied().unwrap_or(0),
            }
        })
    }

    pub fn week_total(&self, reference: NaiveDate) -> u32 {
        self.week_view(reference)
            .iter()
            .map(|d| d.focused_minutes)
            .sum()
    }

    /// Delete every entry inside the Monday-start week containing
    /// `reference`. Entries outside that window are untouched. Irreversible.
    pub fn reset_week(&mut self, reference: NaiveDate) -> Result<()> {
        let monday = week_start(reference);
        let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
        self.entries.retain(|date, _| *date < monday || *date > sunday);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let records: Vec<DailyFocusEntry> = self
            .entries
            .iter()
            .map(|(&date, &focused_minutes)| DailyFocusEntry { date, focused_minutes })
            .collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write ledger {}", path.display()))
    }
}

fn week_start(reference: NaiveDate) -> NaiveDate {
    let back = reference.weekday().num_days_from_monday() as u64;
    reference
        .checked_sub_days(Days::new(back))
        .unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sessions_accumulate_within_a_day() {
        let mut ledger = FocusLedger::in_memory();
        let today = date(2026, 8, 26); // a Wednesday
        ledger.record_session(today, 10).unwrap();
        ledger.record_session(today, 15).unwrap();

        let view = ledger.week_view(today);
        assert_eq!(view[2].label, "Wed");
        assert_eq!(view[2].focused_minutes, 25);
        assert_eq!(ledger.week_total(today), 25);
    }

    #[test]
    fn zero_minutes_creates_no_entry() {
        let mut ledger = FocusLedger::in_memory();
        let today = date(2026, 8, 26);
        ledger.record_session(today, 0).unwrap();
        assert_eq!(ledger.week_total(today), 0);
        assert!(ledger.week_view(today).iter().all(|d| d.focused_minutes == 0));
    }

    #[test]
    fn week_view_is_always_seven_days_monday_first() {
        let ledger = FocusLedger::in_memory();
        // A Sunday: the view must still anchor on the preceding Monday.
        let sunday = date(2026, 8, 30);
        let view = ledger.week_view(sunday);

        let labels: Vec<&str> = view.iter().map(|d| d.label).collect();
        assert_eq!(labels, DAY_LABELS);
        assert_eq!(view[0].date, date(2026, 8, 24));
        assert_eq!(view[6].date, sunday);
    }

    #[test]
    fn week_total_matches_summed_view() {
        let mut ledger = FocusLedger::in_memory();
        ledger.record_session(date(2026, 8, 24), 30).unwrap();
        ledger.record_session(date(2026, 8, 27), 45).unwrap();
        ledger.record_session(date(2026, 8, 30), 5).unwrap();
        // Outside the week under test.
        ledger.record_session(date(2026, 9, 2), 99).unwrap();

        let reference = date(2026, 8, 26);
        let summed: u32 = ledger
            .week_view(reference)
            .iter()
            .map(|d| d.focused_minutes)
            .sum();
        assert_eq!(ledger.week_total(reference), summed);
        assert_eq!(summed, 80);
    }

    #[test]
    fn reset_clears_only_the_reference_week() {
        let mut ledger = FocusLedger::in_memory();
        ledger.record_session(date(2026, 8, 23), 60).unwrap(); // previous week's Sunday
        ledger.record_session(date(2026, 8, 24), 30).unwrap(); // this week's Monday
        ledger.record_session(date(2026, 8, 30), 20).unwrap(); // this week's Sunday
        ledger.record_session(date(2026, 8, 31), 40).unwrap(); // next week's Monday

        ledger.reset_week(date(2026, 8, 26)).unwrap();

        assert_eq!(ledger.week_total(date(2026, 8, 26)), 0);
        assert_eq!(ledger.week_total(date(2026, 8, 23)), 60);
        assert_eq!(ledger.week_total(date(2026, 8, 31)), 40);
    }

    #[test]
    fn ledger_round_trips_through_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focus_data.json");

        let mut ledger = FocusLedger::load(path.clone());
        ledger.record_session(date(2026, 8, 26), 25).unwrap();
        ledger.record_session(date(2026, 8, 27), 50).unwrap();

        let reloaded = FocusLedger::load(path.clone());
        assert_eq!(reloaded.week_total(date(2026, 8, 26)), 75);

        // The stored schema is the camelCase record array.
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"focusedMinutes\": 25"));
        assert!(raw.contains("\"date\": \"2026-08-26\""));
    }

    #[test]
    fn corrupt_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focus_data.json");
        fs::write(&path, "{not json").unwrap();

        let mut ledger = FocusLedger::load(path.clone());
        assert_eq!(ledger.week_total(date(2026, 8, 26)), 0);

        // The next write re-establishes a readable file.
        ledger.record_session(date(2026, 8, 26), 5).unwrap();
        let reloaded = FocusLedger::load(path);
        assert_eq!(reloaded.week_total(date(2026, 8, 26)), 5);
    }
}
