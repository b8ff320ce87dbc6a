//! Pomodoro timer client
//!
//! The timer state machine, the tick loop that drives it, and a small
//! client for recording sessions with the session registry.

pub mod client;
pub mod command;
pub mod config;
pub mod format;
pub mod machine;
pub mod notify;
pub mod runner;

pub use client::SessionClient;
pub use machine::{Durations, Phase, PhaseEvent, Timer, TimerState};
pub use runner::{Command, TimerEvent, TimerHandle, TimerRunner};
