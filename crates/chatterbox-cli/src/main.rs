mod cli;
mod input;
mod render;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chatterbox_common::{ChatterboxError, ConfigError};
use chatterbox_config::ChatterboxConfig;
use chatterbox_sync::api::ChatterQuery;
use chatterbox_sync::poll::TwoSpeed;
use chatterbox_sync::{
    ActivityMonitor, ChatFeedSync, ChatSyncConfig, ChatterTransport, FileStore, HttpTransport,
    HttpTransportConfig, InputEvent, MonitorConfig, PollOptions, PresenceSync, SharedKeyElection,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::input::Input;
use crate::render::FeedPrinter;

const DEFAULT_DIRECTIVE: &str = "chatterbox=info";

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let loaded = match &args.config {
        Some(path) => chatterbox_config::load_config_from(Path::new(path)),
        None => chatterbox_config::load_config(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (ChatterboxConfig::default(), Some(e)),
    };

    let directive = cli::log_directive(
        args.log_level.as_deref(),
        std::env::var("RUST_LOG").ok(),
        config.logging.level.as_directive(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match config_error {
        Some(e @ ConfigError::ValidationError(_)) => {
            error!(error = %e, "Invalid config, refusing to start");
            return ExitCode::FAILURE;
        }
        Some(e) => warn!(error = %e, "Config not loaded, using defaults"),
        None => {}
    }

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "chatterbox exited with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args, config: ChatterboxConfig) -> Result<(), ChatterboxError> {
    let transport: Arc<dyn ChatterTransport> = Arc::new(HttpTransport::new(HttpTransportConfig {
        base_url: args
            .base_url
            .unwrap_or_else(|| config.server.base_url.clone()),
        request_timeout: Duration::from_secs(u64::from(config.server.request_timeout_secs)),
        connect_timeout: Duration::from_secs(u64::from(config.server.connect_timeout_secs)),
    })?);
    let room = args.room.or(config.chatter.room);

    if args.once {
        let query = ChatterQuery::Latest {
            limit: config.chatter.snapshot_limit,
            room,
        };
        let messages = transport.fetch_chatter(&query).await?;
        for msg in messages.iter().rev() {
            println!("{}", render::format_line(msg));
        }
        return Ok(());
    }

    let store_path = match &config.activity.store_path {
        Some(path) => path.clone(),
        None => FileStore::default_path()?,
    };
    let election = Arc::new(SharedKeyElection::new(FileStore::new(store_path)));
    let monitor = ActivityMonitor::observe(
        MonitorConfig {
            sleep_after: Duration::from_secs(u64::from(config.activity.sleep_after_minutes) * 60),
            recent_window: Duration::from_secs(u64::from(config.activity.recent_window_secs)),
            reconcile_interval: Duration::from_secs(u64::from(
                config.activity.reconcile_interval_secs,
            )),
        },
        election,
    );
    info!(tab = %monitor.tab(), room = ?room, "Session started");

    let chat = ChatFeedSync::spawn(
        Arc::clone(&transport),
        monitor.subscribe(),
        ChatSyncConfig {
            policy: TwoSpeed::from_secs(
                u64::from(config.chatter.active_interval_secs),
                u64::from(config.chatter.idle_interval_secs),
            ),
            snapshot_limit: config.chatter.snapshot_limit,
            room,
            ..ChatSyncConfig::default()
        },
        PollOptions::new("chatter").refresh_on_focus(config.chatter.refresh_on_focus),
    );
    let presence = PresenceSync::spawn(
        Arc::clone(&transport),
        monitor.subscribe(),
        Duration::from_secs(u64::from(config.presence.interval_secs)),
        PollOptions::new("presence").refresh_on_focus(config.presence.refresh_on_focus),
    );

    let result = session(&monitor, &chat, &presence).await;

    chat.shutdown();
    presence.shutdown();
    monitor.shutdown();
    info!("Session ended");
    result
}

async fn session(
    monitor: &ActivityMonitor,
    chat: &ChatFeedSync,
    presence: &PresenceSync,
) -> Result<(), ChatterboxError> {
    let mut printer = FeedPrinter::default();
    let mut chat_rx = chat.subscribe();
    let mut presence_rx = presence.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                monitor.record(InputEvent::KeyDown);
                if !handle_input(Input::parse(&line), chat, presence).await {
                    break;
                }
            }

            changed = chat_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = chat_rx.borrow_and_update().clone();
                if let Some(feed) = &state.data {
                    for line in printer.new_lines(feed) {
                        println!("{line}");
                    }
                }
                if let Some(message) = printer.error_change(state.error.as_deref()) {
                    eprintln!("{message}");
                }
            }

            changed = presence_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let room = presence_rx
                    .borrow_and_update()
                    .data
                    .as_ref()
                    .and_then(|s| s.current_room_id);
                if room.is_some() {
                    chat.set_room(room)?;
                }
            }
        }
    }
    Ok(())
}

/// Returns `false` when the session should end.
async fn handle_input(input: Input, chat: &ChatFeedSync, presence: &PresenceSync) -> bool {
    let result = match input {
        Input::Empty => Ok(()),
        Input::Quit => return false,
        Input::Invalid(reason) => {
            eprintln!("! {reason}");
            Ok(())
        }
        Input::Say(text) => chat.post_message(&text).await.map(|outcome| {
            if let Some(warning) = outcome.warning {
                eprintln!("! {warning}");
            }
        }),
        Input::Room(id) => match presence.change_room(id).await {
            Ok(_) => chat.set_room(Some(id)),
            Err(e) => Err(e),
        },
        Input::Cloak(cloaked) => presence.set_cloaked(cloaked).await.map(|_| ()),
        Input::Refresh => chat.refresh().and_then(|()| presence.refresh()),
        Input::Who => {
            match presence.snapshot() {
                Some(snapshot) => render::render_who(&snapshot)
                    .iter()
                    .for_each(|line| println!("{line}")),
                None => eprintln!("! presence not loaded yet"),
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", render::describe_failure(&e));
    }
    true
}
