// player.rs
//
// Copyright 2026 Stéphane Cerveau <scerveau@igalia.com>
//
// This file is part of gst-tutorials
//
// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::config::PlayerArgs;
use crate::error::Result;
use crate::gst::bus::{
    BusEvent, Dispatcher, EosPolicy, EventKind, Outcome, Session, TAGS_CHANGED,
};
use crate::gst::player::Player;
use crate::gst::state::PlaybackState;
use crate::gst::streams::StreamInfo;
use crate::tutorial::command::{Command, HELP};
use crate::tutorial::view::{from_seconds, PlayerView, SeekSlider, Status};

/// Period of the position/duration refresh.
pub const REFRESH_INTERVAL_SECS: u64 = 1;

pub fn render_streams(streams: &[StreamInfo], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(streams)?);
    }
    if streams.is_empty() {
        return Ok("No streams analyzed yet".to_string());
    }
    Ok(streams
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn render_status(status: &Status, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(status)?)
    } else {
        Ok(status.to_string())
    }
}

/// Exit code once the dispatcher terminated: that of the recorded outcome,
/// or success when the user quit.
pub fn exit_code(session: &Session) -> i32 {
    session.outcome().map_or(0, Outcome::exit_code)
}

fn new_view(player: &Player) -> PlayerView {
    let mut slider = SeekSlider::new();
    let seek_player = player.clone();
    slider.connect_value_changed(move |seconds| {
        if let Err(e) = seek_player.seek(from_seconds(seconds)) {
            warn!("{}", e);
        }
    });
    PlayerView::new(slider)
}

fn new_dispatcher(player: &Player, args: &PlayerArgs) -> Dispatcher<PlayerView> {
    let policy = if args.exit_on_eos {
        EosPolicy::Terminate
    } else {
        EosPolicy::KeepRunning
    };
    let mut dispatcher =
        Dispatcher::with_context(player.element(), new_view(player)).eos_policy(policy);

    let refresh_player = player.clone();
    dispatcher.on(EventKind::StateChanged, move |event, session, view| {
        match event {
            BusEvent::StateChanged {
                old: PlaybackState::Ready,
                new: PlaybackState::Paused,
                ..
            } => {
                // Refresh right away rather than waiting for the next tick
                view.refresh(&refresh_player, session.state());
            }
            BusEvent::StateChanged {
                new: PlaybackState::Ready,
                ..
            } => view.reset(),
            _ => {}
        }
    });

    let tags_player = player.clone();
    dispatcher.on(EventKind::Application, move |event, _, view| {
        if matches!(event, BusEvent::Application { name } if name == TAGS_CHANGED) {
            view.set_streams(tags_player.analyze_streams());
        }
    });

    dispatcher
}

/// Apply one command. `quit` asks the dispatcher to terminate.
fn execute(
    command: Command,
    player: &Player,
    dispatcher: &mut Dispatcher<PlayerView>,
    json: bool,
) -> Result<()> {
    match command {
        Command::Play => player.play()?,
        Command::Pause => player.pause()?,
        Command::Stop => {
            player.stop()?;
            dispatcher.context_mut().reset();
        }
        Command::Seek(seconds) => {
            let view = dispatcher.context_mut();
            if view.duration().is_none() {
                info!("Duration not known yet, seeking without range check");
            }
            view.slider.set_value(seconds);
        }
        Command::Select(id) => {
            if player.select_stream(id)? {
                info!("{} selected", id);
            } else {
                info!("{} is already selected", id);
            }
        }
        Command::Streams => {
            println!("{}", render_streams(dispatcher.context().streams(), json)?);
        }
        Command::Status => {
            let status = dispatcher.context().status(dispatcher.state());
            println!("{}", render_status(&status, json)?);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => dispatcher.request_termination(),
    }
    Ok(())
}

async fn run_loop(args: &PlayerArgs) -> Result<i32> {
    let player = Player::new(&args.uri)?;
    let bus = player.bus()?;
    let mut dispatcher = new_dispatcher(&player, args);

    let mut messages = bus.stream();
    let mut ticker = tokio::time::interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ctrl_c_armed = true;

    if let Err(e) = player.play() {
        player.shutdown();
        return Err(e);
    }
    info!("Player started, type 'help' for commands");

    let code = loop {
        tokio::select! {
            msg = messages.next() => {
                let Some(msg) = msg else {
                    warn!("Bus stream ended");
                    break Outcome::Flushed.exit_code();
                };
                dispatcher.handle_message(&msg);
            }
            _ = ticker.tick() => {
                let state = dispatcher.state();
                dispatcher.context_mut().refresh(&player, state);
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match line.parse::<Command>() {
                    Ok(command) => {
                        if let Err(e) = execute(command, &player, &mut dispatcher, args.json) {
                            warn!("{}", e);
                        }
                    }
                    Err(e) => warn!("{}", e),
                },
                Ok(None) => {
                    info!("Standard input closed, commands disabled");
                    stdin_open = false;
                }
                Err(e) => {
                    error!("Failed to read standard input: {}", e);
                    stdin_open = false;
                }
            },
            result = &mut ctrl_c, if ctrl_c_armed => {
                ctrl_c_armed = false;
                match result {
                    Ok(()) => {
                        info!("Received Ctrl+C");
                        dispatcher.request_termination();
                    }
                    Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
                }
            }
        }

        if dispatcher.is_terminated() {
            break exit_code(dispatcher.session());
        }
    };

    info!("Shutting down player");
    player.shutdown();
    Ok(code)
}

/// Run the player on a single-threaded runtime. Returns the exit code.
pub fn run(args: &PlayerArgs) -> Result<i32> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_loop(args));
    // The stdin reader blocks a runtime thread until the next line.
    runtime.shutdown_background();
    result
}
