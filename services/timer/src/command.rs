//! Operator input parsing
//!
//! The terminal front end reads one command per line. Timer commands are
//! forwarded to the runner; the rest are handled by the front end itself.

use std::str::FromStr;

use common::SessionId;
use thiserror::Error;

use crate::runner::Command;

/// Help text listing every accepted command
pub const HELP: &str = "\
commands:
  pomodoro          start a Pomodoro cycle (records a work session)
  start | pause     toggle the clock (also: s, p, empty line)
  stop              stop the clock and end the cycle
  reset             zero the clock
  work <minutes>    set work duration (1-60)
  break <minutes>   set break duration (1-15)
  sessions          list recorded sessions
  forget <id>       delete a recorded session
  help              show this text
  quit              exit (also: q)";

/// One parsed line of operator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Timer(Command),
    ListSessions,
    Forget(SessionId),
    Help,
    Quit,
}

/// Error raised for input that is not a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a whole number")]
    InvalidNumber(String),

    #[error("'{0}' takes at most one argument")]
    TooManyArguments(&'static str),
}

impl FromStr for Input {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Input::Timer(Command::StartPause));
        };
        let word = word.to_ascii_lowercase();

        let input = match word.as_str() {
            "start" | "pause" | "s" | "p" => Input::Timer(Command::StartPause),
            "stop" => Input::Timer(Command::Stop),
            "reset" | "r" => Input::Timer(Command::Reset),
            "pomodoro" => Input::Timer(Command::StartPomodoro),
            "work" => Input::Timer(Command::SetWorkMinutes(number(words.next(), "work")?)),
            "break" => Input::Timer(Command::SetBreakMinutes(number(words.next(), "break")?)),
            "sessions" | "ls" => Input::ListSessions,
            "forget" => Input::Forget(number(words.next(), "forget")?),
            "help" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            _ => return Err(ParseCommandError::Unknown(word)),
        };

        if words.next().is_some() {
            return Err(ParseCommandError::TooManyArguments(name_of(&input)));
        }
        Ok(input)
    }
}

fn number<T: FromStr>(arg: Option<&str>, command: &'static str) -> Result<T, ParseCommandError> {
    let arg = arg.ok_or(ParseCommandError::MissingArgument(command))?;
    arg.parse()
        .map_err(|_| ParseCommandError::InvalidNumber(arg.to_string()))
}

fn name_of(input: &Input) -> &'static str {
    match input {
        Input::Timer(Command::StartPause) => "start",
        Input::Timer(Command::Stop) => "stop",
        Input::Timer(Command::Reset) => "reset",
        Input::Timer(Command::StartPomodoro) => "pomodoro",
        Input::Timer(Command::SetWorkMinutes(_)) => "work",
        Input::Timer(Command::SetBreakMinutes(_)) => "break",
        Input::Timer(Command::Shutdown) | Input::Quit => "quit",
        Input::ListSessions => "sessions",
        Input::Forget(_) => "forget",
        Input::Help => "help",
    }
}
