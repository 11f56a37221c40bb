//! Countdown timer state machine.
//!
//! The engine owns no thread and no OS timer. The run loop is the single
//! cadence: it calls `tick()` once per elapsed wall-clock second, and the
//! engine only decrements while `Running`. Leaving `Running` (pause, reset,
//! completion) makes further ticks no-ops, so cancelling the countdown is a
//! state transition and is idempotent.
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Idle (completion)
//! ```
//!
//! Completion is reported as events returned from `tick()` rather than stored
//! callbacks; the caller dispatches them after the transition has already
//! committed, which keeps dispatch non-re-entrant and exactly-once per cycle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard ceiling on a single session: 240 minutes.
pub const MAX_DURATION_SECS: u32 = 240 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// What happens when the countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatMode {
    /// Stop at zero and wait for the user.
    #[default]
    None,
    /// Immediately re-arm with the same duration and keep running.
    RestartSameDuration,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("operation not valid while timer is {0:?}")]
    InvalidState(TimerState),
    #[error("duration must be 1..={MAX_DURATION_SECS} seconds, got {0}")]
    InvalidDuration(u32),
}

/// Events produced by `tick()` on the zero crossing, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A full session finished. Credits the *configured* duration, not
    /// elapsed real time, so a paused-and-resumed session still counts whole.
    SessionComplete { focused_minutes: u32 },
    /// The countdown hit zero; side effects (notification, sound) go here.
    Finished,
}

pub struct TimerEngine {
    duration_secs: u32,
    remaining_secs: u32,
    state: TimerState,
    repeat: RepeatMode,
}

impl TimerEngine {
    pub fn new(duration_secs: u32, repeat: RepeatMode) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: TimerState::Idle,
            repeat,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn set_repeat_mode(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
    }

    /// `Idle | Paused -> Running`. No-op on a drained timer.
    pub fn start(&mut self) {
        if self.remaining_secs > 0 && self.state != TimerState::Running {
            self.state = TimerState::Running;
        }
    }

    /// `Running -> Paused`. No-op in any other state, so a second pause in a
    /// row leaves both state and remaining time untouched.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// `Paused -> Running` while time remains.
    pub fn resume(&mut self) {
        if self.state == TimerState::Paused && self.remaining_secs > 0 {
            self.state = TimerState::Running;
        }
    }

    /// Stop the countdown and return to `Idle` with a full timer.
    ///
    /// Plain `reset(None)` is valid from any state. Supplying a new duration
    /// while `Running` is rejected: the UI never offers duration editing
    /// mid-session, and the engine enforces the same contract.
    pub fn reset(&mut self, new_duration_secs: Option<u32>) -> Result<(), TimerError> {
        if let Some(d) = new_duration_secs {
            if self.state == TimerState::Running {
                return Err(TimerError::InvalidState(self.state));
            }
            Self::check_duration(d)?;
            self.duration_secs = d;
        }
        self.remaining_secs = self.duration_secs;
        self.state = TimerState::Idle;
        Ok(())
    }

    /// Change the configured duration without starting. `Idle` only.
    pub fn set_duration(&mut self, duration_secs: u32) -> Result<(), TimerError> {
        if self.state != TimerState::Idle {
            return Err(TimerError::InvalidState(self.state));
        }
        Self::check_duration(duration_secs)?;
        self.duration_secs = duration_secs;
        self.remaining_secs = duration_secs;
        Ok(())
    }

    /// Advance the countdown by one second.
    ///
    /// Outside `Running` this is a no-op. On the 1 -> 0 crossing the engine
    /// transitions out of `Running` *before* returning the completion events,
    /// then re-arms if `RepeatMode::RestartSameDuration` is set. Each full
    /// cycle produces its own pair of events.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return Vec::new();
        }
        // Zero crossing (remaining was 1; a running timer never holds 0).
        self.remaining_secs = 0;
        let focused_minutes = self.duration_secs / 60;
        match self.repeat {
            RepeatMode::None => {
                self.state = TimerState::Idle;
            }
            RepeatMode::RestartSameDuration => {
                self.remaining_secs = self.duration_secs;
            }
        }
        vec![TimerEvent::SessionComplete { focused_minutes }, TimerEvent::Finished]
    }

    fn check_duration(duration_secs: u32) -> Result<(), TimerError> {
        if duration_secs == 0 || duration_secs > MAX_DURATION_SECS {
            return Err(TimerError::InvalidDuration(duration_secs));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(engine: &mut TimerEngine, max_ticks: u32) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for _ in 0..max_ticks {
            events.extend(engine.tick());
            if engine.state() != TimerState::Running {
                break;
            }
        }
        events
    }

    #[test]
    fn countdown_is_monotonic() {
        let mut engine = TimerEngine::new(10, RepeatMode::None);
        engine.start();
        for n in 1..=9 {
            assert!(engine.tick().is_empty());
            assert_eq!(engine.remaining_secs(), 10 - n);
        }
    }

    #[test]
    fn completion_fires_both_events_exactly_once() {
        let mut engine = TimerEngine::new(1500, RepeatMode::None);
        engine.start();
        let events = run_to_completion(&mut engine, 2000);

        assert_eq!(
            events,
            vec![
                TimerEvent::SessionComplete { focused_minutes: 25 },
                TimerEvent::Finished,
            ]
        );
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 0);

        // Drained timer: further ticks and starts produce nothing.
        assert!(engine.tick().is_empty());
        engine.start();
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut engine = TimerEngine::new(60, RepeatMode::None);
        engine.start();
        engine.tick();
        engine.pause();
        let remaining = engine.remaining_secs();
        engine.pause();
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.remaining_secs(), remaining);
    }

    #[test]
    fn ticks_while_paused_are_lost_free() {
        let mut engine = TimerEngine::new(60, RepeatMode::None);
        engine.start();
        for _ in 0..30 {
            engine.tick();
        }
        engine.pause();
        for _ in 0..100 {
            assert!(engine.tick().is_empty());
        }
        assert_eq!(engine.remaining_secs(), 30);

        // Resume and finish: one completion, full configured credit.
        engine.resume();
        let events = run_to_completion(&mut engine, 100);
        assert_eq!(
            events,
            vec![
                TimerEvent::SessionComplete { focused_minutes: 1 },
                TimerEvent::Finished,
            ]
        );
    }

    #[test]
    fn start_on_zero_duration_is_a_noop() {
        let mut engine = TimerEngine::new(0, RepeatMode::None);
        engine.start();
        assert_eq!(engine.state(), TimerState::Idle);
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn resume_outside_paused_is_a_noop() {
        let mut engine = TimerEngine::new(60, RepeatMode::None);
        engine.resume();
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn reset_stops_a_running_timer() {
        let mut engine = TimerEngine::new(60, RepeatMode::None);
        engine.start();
        for _ in 0..10 {
            engine.tick();
        }
        engine.reset(None).unwrap();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 60);
    }

    #[test]
    fn reset_with_new_duration_while_running_is_rejected() {
        let mut engine = TimerEngine::new(60, RepeatMode::None);
        engine.start();
        assert_eq!(
            engine.reset(Some(120)),
            Err(TimerError::InvalidState(TimerState::Running))
        );
        // The running countdown is untouched.
        assert_eq!(engine.state(), TimerState::Running);
        assert_eq!(engine.duration_secs(), 60);
    }

    #[test]
    fn reset_with_new_duration_replaces_the_session() {
        let mut engine = TimerEngine::new(60, RepeatMode::None);
        engine.reset(Some(300)).unwrap();
        assert_eq!(engine.duration_secs(), 300);
        assert_eq!(engine.remaining_secs(), 300);
    }

    #[test]
    fn set_duration_enforces_state_and_range() {
        let mut engine = TimerEngine::new(60, RepeatMode::None);
        assert_eq!(engine.set_duration(0), Err(TimerError::InvalidDuration(0)));
        assert_eq!(
            engine.set_duration(MAX_DURATION_SECS + 1),
            Err(TimerError::InvalidDuration(MAX_DURATION_SECS + 1))
        );
        engine.set_duration(90).unwrap();
        assert_eq!(engine.remaining_secs(), 90);

        engine.start();
        assert_eq!(
            engine.set_duration(120),
            Err(TimerError::InvalidState(TimerState::Running))
        );
        engine.pause();
        assert_eq!(
            engine.set_duration(120),
            Err(TimerError::InvalidState(TimerState::Paused))
        );
    }

    #[test]
    fn repeat_mode_rearms_and_fires_per_cycle() {
        let mut engine = TimerEngine::new(120, RepeatMode::RestartSameDuration);
        engine.start();

        let mut completions = 0;
        for _ in 0..360 {
            for event in engine.tick() {
                if let TimerEvent::SessionComplete { focused_minutes } = event {
                    completions += 1;
                    assert_eq!(focused_minutes, 2);
                }
            }
            assert_eq!(engine.state(), TimerState::Running);
        }
        assert_eq!(completions, 3);
        assert_eq!(engine.remaining_secs(), 120);
    }
}
