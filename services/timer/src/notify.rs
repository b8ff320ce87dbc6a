//! Phase-change cues
//!
//! Audio playback is out of scope; the terminal bell stands in for it. A
//! finished work phase rings once, a finished break rings twice.

use std::{
    io::{self, Write},
    sync::Mutex,
};

use tracing::{info, warn};

use crate::machine::PhaseEvent;

const BELL: &[u8] = b"\x07";

/// Something that can signal the end of a phase
pub trait Notifier: Send + Sync {
    fn cue(&self, event: PhaseEvent);
}

/// Rings the terminal bell on a writer (stderr by default)
pub struct TerminalBell<W = io::Stderr> {
    out: Mutex<W>,
}

impl TerminalBell {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Give back the writer, e.g. to inspect what was rung
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ring(&self, times: usize) -> io::Result<()> {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for _ in 0..times {
            out.write_all(BELL)?;
        }
        out.flush()
    }
}

impl<W: Write + Send> Notifier for TerminalBell<W> {
    fn cue(&self, event: PhaseEvent) {
        let (times, message) = match event {
            PhaseEvent::WorkComplete => (1, "Work phase complete, time for a break"),
            PhaseEvent::BreakComplete => (2, "Break over, back to work"),
        };

        info!("{}", message);
        if let Err(e) = self.ring(times) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}
