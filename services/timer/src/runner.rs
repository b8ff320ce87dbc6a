//! Tick loop driving the timer
//!
//! A single task owns the [`Timer`]. Operator commands reach it over a
//! channel and everything it does is published back as [`TimerEvent`]s, so
//! the task never blocks on rendering, sound or the network.

use std::time::Duration;

use common::NewSession;
use thiserror::Error;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::machine::{PhaseEvent, Timer, TimerError, TimerSnapshot};

/// Polling interval used unless configured otherwise
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

const COMMAND_CAPACITY: usize = 32;

/// Requests accepted by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartPause,
    Stop,
    Reset,
    StartPomodoro,
    SetWorkMinutes(u32),
    SetBreakMinutes(u32),
    Shutdown,
}

/// Everything the runner reports back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// State after a tick or a command
    Updated(TimerSnapshot),
    /// A phase ran out; play the matching cue
    PhaseCompleted(PhaseEvent),
    /// A Pomodoro cycle started; record this session with the registry
    SessionRequested(NewSession),
    /// A command was refused and left the timer untouched
    Rejected(TimerError),
}

/// Error returned when the runner is no longer accepting commands
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("timer runner has stopped")]
pub struct RunnerStopped;

/// Sending half used to drive a running timer
#[derive(Debug, Clone)]
pub struct TimerHandle {
    commands: mpsc::Sender<Command>,
}

impl TimerHandle {
    pub async fn send(&self, command: Command) -> Result<(), RunnerStopped> {
        self.commands.send(command).await.map_err(|_| RunnerStopped)
    }
}

enum Step {
    Command(Option<Command>),
    Tick,
}

/// Owns the timer and its ticker
pub struct TimerRunner {
    timer: Timer,
    period: Duration,
    ticker: Option<Interval>,
    commands: mpsc::Receiver<Command>,
    events: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerRunner {
    /// Build a runner plus the handle and event stream that talk to it
    pub fn new(
        timer: Timer,
        period: Duration,
    ) -> (Self, TimerHandle, mpsc::UnboundedReceiver<TimerEvent>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let runner = Self {
            timer,
            period,
            ticker: None,
            commands: command_rx,
            events: event_tx,
        };

        (
            runner,
            TimerHandle {
                commands: command_tx,
            },
            event_rx,
        )
    }

    /// Spawn the runner on the current tokio runtime
    pub fn spawn(
        timer: Timer,
        period: Duration,
    ) -> (
        TimerHandle,
        mpsc::UnboundedReceiver<TimerEvent>,
        JoinHandle<Timer>,
    ) {
        let (runner, handle, events) = Self::new(timer, period);
        let task = tokio::spawn(runner.run());
        (handle, events, task)
    }

    /// Run until [`Command::Shutdown`] or until every handle is dropped.
    /// Returns the timer in its final state.
    pub async fn run(mut self) -> Timer {
        info!("Timer runner started with a {:?} tick", self.period);
        self.sync_ticker();

        loop {
            let step = tokio::select! {
                biased;
                command = self.commands.recv() => Step::Command(command),
                _ = next_tick(&mut self.ticker) => Step::Tick,
            };

            match step {
                Step::Command(None | Some(Command::Shutdown)) => break,
                Step::Command(Some(command)) => self.apply(command),
                Step::Tick => {
                    let event = self.timer.tick(self.quantum_ms());
                    self.publish_phase(event);
                }
            }

            self.emit(TimerEvent::Updated(self.timer.snapshot()));
            self.sync_ticker();
        }

        info!("Timer runner stopped");
        self.timer
    }

    fn apply(&mut self, command: Command) {
        debug!("Applying {:?}", command);

        match command {
            Command::StartPause => {
                let running = self.timer.toggle_running();
                info!("Timer {}", if running { "started" } else { "paused" });
            }
            Command::Stop => {
                self.timer.stop();
                info!("Timer stopped");
            }
            Command::Reset => self.timer.reset(),
            Command::StartPomodoro => {
                let session = self.timer.start_pomodoro();
                info!("Pomodoro cycle started ({} min work)", session.minutes);
                self.emit(TimerEvent::SessionRequested(session));
            }
            Command::SetWorkMinutes(minutes) => {
                let result = self.timer.set_work_minutes(minutes);
                self.publish_update(result);
            }
            Command::SetBreakMinutes(minutes) => {
                let result = self.timer.set_break_minutes(minutes);
                self.publish_update(result);
            }
            Command::Shutdown => {}
        }

        let event = self.timer.check_phase_boundary();
        self.publish_phase(event);
    }

    fn publish_update(&mut self, result: Result<Option<PhaseEvent>, TimerError>) {
        match result {
            Ok(event) => self.publish_phase(event),
            Err(e) => {
                warn!("Rejected duration change: {}", e);
                self.emit(TimerEvent::Rejected(e));
            }
        }
    }

    fn publish_phase(&mut self, event: Option<PhaseEvent>) {
        if let Some(event) = event {
            info!("{:?}, now in {} phase", event, self.timer.phase());
            self.emit(TimerEvent::PhaseCompleted(event));
        }
    }

    fn emit(&self, event: TimerEvent) {
        // Nobody listening is not an error for the timer itself
        let _ = self.events.send(event);
    }

    fn quantum_ms(&self) -> u64 {
        self.period.as_millis() as u64
    }

    /// Keep exactly one ticker alive while running and none otherwise
    fn sync_ticker(&mut self) {
        match (self.timer.is_running(), self.ticker.is_some()) {
            (true, false) => {
                let mut ticker = time::interval_at(Instant::now() + self.period, self.period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
                self.ticker = Some(ticker);
            }
            (false, true) => self.ticker = None,
            _ => {}
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
