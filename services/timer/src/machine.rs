//! Pomodoro timer state machine
//!
//! [`Timer`] tracks the elapsed time of the current phase, whether the clock
//! is running and whether a Pomodoro cycle is active. It has no notion of
//! wall-clock time: the caller advances it with [`Timer::tick`] and reacts to
//! the [`PhaseEvent`]s it returns.
//!
//! ```text
//! Idle ──start──▶ Running(phase) ◀──toggle──▶ Paused(phase)
//!   ▲                    │                          │
//!   └───────────stop─────┴──────────────────────────┘
//! ```

use std::{fmt, ops::RangeInclusive};

use common::{NewSession, SessionKind, session::MILLIS_PER_MINUTE};
use thiserror::Error;

/// Operator-adjustable work duration, in minutes
pub const WORK_MINUTES_RANGE: RangeInclusive<u32> = 1..=60;

/// Operator-adjustable break duration, in minutes
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=15;

/// Interval kind the timer is currently measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Work,
    Break,
}

impl Phase {
    /// Session kind recorded for this phase
    pub fn kind(&self) -> SessionKind {
        match self {
            Phase::Work => SessionKind::Work,
            Phase::Break => SessionKind::Break,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind(), f)
    }
}

/// Coarse state of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not running, nothing elapsed and no cycle active
    Idle,
    Running(Phase),
    Paused(Phase),
}

/// Notification raised when a phase runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Work phase reached its duration; the timer moved to break
    WorkComplete,
    /// Break phase reached its duration; the timer moved back to work
    BreakComplete,
}

/// Errors raised by timer configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("{phase} duration of {minutes} min is outside {min}..={max} min")]
    DurationOutOfRange {
        phase: Phase,
        minutes: u32,
        min: u32,
        max: u32,
    },
}

fn check_range(phase: Phase, minutes: u32) -> Result<u32, TimerError> {
    let range = match phase {
        Phase::Work => WORK_MINUTES_RANGE,
        Phase::Break => BREAK_MINUTES_RANGE,
    };

    if range.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(TimerError::DurationOutOfRange {
            phase,
            minutes,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Configured phase lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    work_minutes: u32,
    break_minutes: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_minutes: 1,
            break_minutes: 1,
        }
    }
}

impl Durations {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Result<Self, TimerError> {
        Ok(Self {
            work_minutes: check_range(Phase::Work, work_minutes)?,
            break_minutes: check_range(Phase::Break, break_minutes)?,
        })
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    /// Length of `phase` in milliseconds
    pub fn millis(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::Break => self.break_minutes,
        };
        u64::from(minutes) * MILLIS_PER_MINUTE
    }
}

/// Copy of the timer state, cheap to hand to a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub elapsed_ms: u64,
    pub running: bool,
    pub phase: Phase,
    pub pomodoro_active: bool,
    pub durations: Durations,
}

impl TimerSnapshot {
    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running(self.phase)
        } else if self.pomodoro_active || self.elapsed_ms > 0 {
            TimerState::Paused(self.phase)
        } else {
            TimerState::Idle
        }
    }
}

/// The Pomodoro timer
#[derive(Debug, Clone, Default)]
pub struct Timer {
    elapsed_ms: u64,
    running: bool,
    phase: Phase,
    pomodoro_active: bool,
    durations: Durations,
}

impl Timer {
    pub fn new(durations: Durations) -> Self {
        Self {
            durations,
            ..Self::default()
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pomodoro_active(&self) -> bool {
        self.pomodoro_active
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn state(&self) -> TimerState {
        self.snapshot().state()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            elapsed_ms: self.elapsed_ms,
            running: self.running,
            phase: self.phase,
            pomodoro_active: self.pomodoro_active,
            durations: self.durations,
        }
    }

    /// Start or pause the clock. Returns the new running flag.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Stop the clock and end any Pomodoro cycle
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
        self.pomodoro_active = false;
        self.phase = Phase::Work;
    }

    /// Zero the elapsed time, leaving phase and running flag alone
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    /// Begin a Pomodoro cycle in the work phase and start the clock.
    ///
    /// Returns the session the caller should record with the registry. The
    /// timer does not depend on that request succeeding.
    pub fn start_pomodoro(&mut self) -> NewSession {
        self.pomodoro_active = true;
        self.phase = Phase::Work;
        self.elapsed_ms = 0;
        self.running = true;

        NewSession {
            kind: SessionKind::Work,
            minutes: self.durations.work_minutes,
        }
    }

    /// Advance the clock by `quantum_ms` if it is running
    pub fn tick(&mut self, quantum_ms: u64) -> Option<PhaseEvent> {
        if !self.running {
            return None;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(quantum_ms);
        self.check_phase_boundary()
    }

    pub fn set_work_minutes(&mut self, minutes: u32) -> Result<Option<PhaseEvent>, TimerError> {
        self.durations.work_minutes = check_range(Phase::Work, minutes)?;
        Ok(self.check_phase_boundary())
    }

    pub fn set_break_minutes(&mut self, minutes: u32) -> Result<Option<PhaseEvent>, TimerError> {
        self.durations.break_minutes = check_range(Phase::Break, minutes)?;
        Ok(self.check_phase_boundary())
    }

    /// Switch phase if the current one has run its course.
    ///
    /// Only applies while a Pomodoro cycle is active. The work check runs
    /// first and at most one transition happens per call.
    pub fn check_phase_boundary(&mut self) -> Option<PhaseEvent> {
        if !self.pomodoro_active {
            return None;
        }

        let event = match self.phase {
            Phase::Work if self.elapsed_ms >= self.durations.millis(Phase::Work) => {
                self.phase = Phase::Break;
                PhaseEvent::WorkComplete
            }
            Phase::Break if self.elapsed_ms >= self.durations.millis(Phase::Break) => {
                self.phase = Phase::Work;
                PhaseEvent::BreakComplete
            }
            _ => return None,
        };

        self.elapsed_ms = 0;
        Some(event)
    }
}
