//! Command-line driver.
//!
//! Runs the extension inside a [`LocalHost`] and plays a short session:
//! load, players joining, the command and its completion, players leaving,
//! unload.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::agent::ExampleEssentialAgent;
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::host::runtime::{CommandAccess, LocalHost, LocalPlayer};
use crate::host::{Actor, Extension, LoadOutcome};

#[derive(Parser)]
#[command(name = "essential-agent-example")]
#[command(about = "Essential Agent example extension driven by a local host", long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/mcengine/essential-agent-example.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the extension into a local host and simulate a session
    Run {
        /// Name of the host plugin; lower-cased it becomes the command namespace
        #[arg(long, default_value = "MCEngineEssential")]
        host_name: String,

        /// Players that join and leave during the session
        #[arg(long = "player", default_values_t = [String::from("Steve"), String::from("Alex")])]
        players: Vec<String>,

        /// Arguments passed to the command
        #[arg(long = "arg")]
        args: Vec<String>,

        /// Simulate a host that refuses access to its command table
        #[arg(long)]
        deny_commands: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Resolve the config to use.
///
/// An explicit path must load. For the default path a broken file falls
/// back to defaults and the error is handed back so it can be logged once
/// tracing is installed.
fn load_config(
    explicit: Option<&PathBuf>,
    default_path: &Path,
) -> anyhow::Result<(AgentConfig, Option<AgentError>)> {
    match explicit {
        Some(path) => {
            let config = AgentConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            Ok((config, None))
        }
        None => match AgentConfig::load_or_default(default_path) {
            Ok(config) => Ok((config, None)),
            Err(e) => Ok((AgentConfig::default(), Some(e))),
        },
    }
}

fn init_tracing(config: &AgentConfig) {
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Parse arguments and run the selected command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_path = AgentConfig::config_path();
    let (config, fallback) = load_config(cli.config.as_ref(), &default_path)?;
    init_tracing(&config);
    if let Some(e) = fallback {
        tracing::warn!(path = %default_path.display(), "{}; using default config", e);
    }

    match cli.command {
        Some(Commands::Config) => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Some(Commands::Run {
            host_name,
            players,
            args,
            deny_commands,
        }) => run_session(config, &host_name, &players, &args, deny_commands),
        None => run_session(
            config,
            "MCEngineEssential",
            &["Steve".to_string(), "Alex".to_string()],
            &[],
            false,
        ),
    }
}

fn run_session(
    config: AgentConfig,
    host_name: &str,
    players: &[String],
    args: &[String],
    deny_commands: bool,
) -> anyhow::Result<()> {
    let access = if deny_commands {
        CommandAccess::Denied("command table access disabled".to_string())
    } else {
        CommandAccess::Open
    };

    let mut host = LocalHost::new(host_name, config.registry.collision).with_command_access(access);
    let command_name = config.command.name.clone();
    let mut agent = ExampleEssentialAgent::with_config(config);

    agent.set_id(&mut host, "");
    let outcome = agent.on_load(&mut host);
    if let LoadOutcome::Degraded(e) = &outcome {
        println!("Loaded without command: {e}");
    }
    println!("Registered labels: {:?}", host.commands().labels());

    let players: Vec<LocalPlayer> = players.iter().map(LocalPlayer::new).collect();
    for player in &players {
        host.player_join(player);
    }

    if let Some(first) = players.first() {
        let mut line = format!("/{command_name}");
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        println!("{} runs {}: {:?}", first.name(), line, host.dispatch_command(first, &line));

        let prefix: String = command_name.chars().take(3).collect();
        println!(
            "Completions for /{}: {:?}",
            prefix,
            host.tab_complete(first, &format!("/{prefix}"))
        );
    }

    for player in &players {
        for message in player.messages() {
            println!("{} <- {}", player.name(), message);
        }
        host.player_quit(player);
    }

    agent.on_unload(&mut host);
    Ok(())
}
