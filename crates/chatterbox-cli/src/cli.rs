use clap::Parser;

/// chatterbox: follow and talk in the site chatterbox from a terminal.
#[derive(Parser, Debug)]
#[command(name = "chatterbox", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Site origin override, e.g. https://everything2.com.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Room to follow.
    #[arg(long)]
    pub room: Option<u64>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the latest messages and exit.
    #[arg(long)]
    pub once: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Tracing filter directive: `--log-level`, then `RUST_LOG`, then the
/// config file. Levels from the flag and the config apply to our crates
/// only; `RUST_LOG` is taken verbatim.
pub fn log_directive(flag: Option<&str>, env: Option<String>, config_level: &str) -> String {
    match (flag, env) {
        (Some(level), _) => format!("chatterbox={}", level.trim()),
        (None, Some(env)) if !env.trim().is_empty() => env,
        _ => format!("chatterbox={config_level}"),
    }
}
