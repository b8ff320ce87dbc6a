//! Clock display formatting

use crate::machine::{TimerSnapshot, TimerState};

/// Render milliseconds as `MM:SS.cc`.
///
/// Minutes are not wrapped into hours, so an hour reads `60:00.00`.
pub fn format_time(elapsed_ms: u64) -> String {
    let minutes = elapsed_ms / 60_000;
    let seconds = (elapsed_ms / 1000) % 60;
    let centis = (elapsed_ms % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

/// One-line status shown by the terminal front end
pub fn status_line(snapshot: &TimerSnapshot) -> String {
    let state = match snapshot.state() {
        TimerState::Idle => "idle",
        TimerState::Running(_) => "running",
        TimerState::Paused(_) => "paused",
    };

    let mode = if snapshot.pomodoro_active {
        format!(
            "pomodoro {}/{} min",
            snapshot.durations.work_minutes(),
            snapshot.durations.break_minutes()
        )
    } else {
        "stopwatch".to_string()
    };

    format!(
        "{:<5} {}  {:<7}  {}",
        snapshot.phase,
        format_time(snapshot.elapsed_ms),
        state,
        mode
    )
}
