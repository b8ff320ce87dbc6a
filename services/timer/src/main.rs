use std::io::{self, Write};

use anyhow::Result;
use timer::{
    Command, SessionClient, Timer, TimerEvent, TimerRunner,
    command::{HELP, Input},
    config::TimerConfig,
    format::status_line,
    notify::{Notifier, TerminalBell},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, the clock owns stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = TimerConfig::from_env()?;
    let durations = config.durations()?;
    info!(
        "Starting timer ({} min work, {} min break, registry at {})",
        durations.work_minutes(),
        durations.break_minutes(),
        config.api_url
    );

    let client = SessionClient::new(config.api_url.clone());
    let notifier = TerminalBell::stderr();
    let (handle, mut events, runner) = TimerRunner::spawn(Timer::new(durations), config.tick());

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.parse::<Input>() {
                    Ok(Input::Quit) => break,
                    Ok(Input::Timer(command)) => handle.send(command).await?,
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(Input::ListSessions) => list_sessions(client.clone()),
                    Ok(Input::Forget(id)) => forget_session(client.clone(), id),
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some(event) = events.recv() => match event {
                TimerEvent::Updated(snapshot) => {
                    print!("\r{}", status_line(&snapshot));
                    io::stdout().flush()?;
                }
                TimerEvent::PhaseCompleted(event) => notifier.cue(event),
                TimerEvent::SessionRequested(session) => record_session(client.clone(), session),
                TimerEvent::Rejected(e) => eprintln!("\n{e}"),
            },
        }
    }

    // The runner may already be gone if stdin closed first
    let _ = handle.send(Command::Shutdown).await;
    let timer = runner.await?;
    println!();
    info!("Timer exited at {:?}", timer.state());

    Ok(())
}

/// Record a session without holding up the timer
fn record_session(client: SessionClient, session: common::NewSession) {
    tokio::spawn(async move {
        match client.create_session(&session).await {
            Ok(record) => info!("Pomodoro started: session {} recorded", record.id),
            Err(e) => warn!("Failed to record session: {}", e),
        }
    });
}

fn list_sessions(client: SessionClient) {
    tokio::spawn(async move {
        match client.list_sessions().await {
            Ok(records) if records.is_empty() => println!("\nno sessions recorded"),
            Ok(records) => {
                println!();
                for record in records {
                    println!(
                        "#{:<4} {:<5} {:>3} min  {:?}",
                        record.id,
                        record.kind,
                        record.duration / common::session::MILLIS_PER_MINUTE,
                        record.status
                    );
                }
            }
            Err(e) => warn!("Failed to list sessions: {}", e),
        }
    });
}

fn forget_session(client: SessionClient, id: common::SessionId) {
    tokio::spawn(async move {
        match client.delete_session(id).await {
            Ok(()) => info!("Session {} forgotten", id),
            Err(e) => warn!("Failed to delete session {}: {}", id, e),
        }
    });
}
