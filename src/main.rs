use clap::{Parser, Subcommand};
use lapis::commands::{build_commands, HelpCommand, Services};
use lapis::console::{ConsoleChannel, ConsoleDestination};
use lapis::dispatch::CommandParser;
use lapis::gateway::Gateway;
use lapis_core::{config, message::SenderRole, traits::Channel, traits::SettingsStore};
use lapis_settings::{SettingsGate, SettingsIdentifierPair, SettingsPool};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "lapis", version, about = "Lapis — chat bot command core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console channel.
    Start {
        /// Simulate a group chat with this id (private chat when omitted).
        #[arg(long)]
        group: Option<i64>,
        /// Sender user id.
        #[arg(long, default_value_t = 10000)]
        sender: i64,
        /// Sender role in the group: member, admin or owner.
        #[arg(long, default_value = "member")]
        role: SenderRole,
    },
    /// Inspect or change stored settings directly.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Resolve a toggle (catalog default plus stored override).
    Get { key: String, destination_id: i64 },
    /// Store a value for a toggle.
    Set {
        key: String,
        destination_id: i64,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Remove a stored value, restoring the default.
    Unset { key: String, destination_id: i64 },
    /// List stored values for a destination.
    List { destination_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.bot.log_level)),
        )
        .init();

    let pool = SettingsPool::new(&cfg.settings).await?;

    match cli.command {
        Commands::Start {
            group,
            sender,
            role,
        } => {
            let destination = match group {
                Some(group_id) => ConsoleDestination::Group {
                    group_id,
                    sender_id: sender,
                    sender_role: role,
                },
                None => ConsoleDestination::Private { sender_id: sender },
            };
            let channel: Arc<dyn Channel> = Arc::new(ConsoleChannel::new(destination));
            let settings = SettingsGate::new(Arc::new(pool));
            let services = Services {
                channel: channel.clone(),
                settings: settings.clone(),
                administrator_id: cfg.bot.administrator_id,
            };

            let help = Arc::new(HelpCommand::new(services.clone()));
            let commands = build_commands(&services, help.clone())?;
            let parser = Arc::new(CommandParser::new(
                commands,
                settings,
                &cfg.bot.aliases,
                help,
            )?);

            println!("{} — reading commands from stdin...", cfg.bot.name);
            Gateway::new(channel, parser).run().await?;
        }
        Commands::Settings { action } => match action {
            SettingsAction::Get {
                key,
                destination_id,
            } => {
                let pair = parse_pair(&key)?;
                let gate = SettingsGate::new(Arc::new(pool));
                let value = gate.get_value(&pair, destination_id).await;
                println!("{pair} @ {destination_id} = {value}");
            }
            SettingsAction::Set {
                key,
                destination_id,
                value,
            } => {
                let pair = parse_pair(&key)?;
                pool.set(&pair.to_string(), destination_id, value).await?;
                println!("{pair} @ {destination_id} := {value}");
            }
            SettingsAction::Unset {
                key,
                destination_id,
            } => {
                let pair = parse_pair(&key)?;
                if pool.remove(&pair.to_string(), destination_id).await? {
                    println!("{pair} @ {destination_id} reset to default");
                } else {
                    println!("{pair} @ {destination_id} was not set");
                }
            }
            SettingsAction::List { destination_id } => {
                let rows = pool.list(destination_id).await?;
                if rows.is_empty() {
                    println!("no stored settings for {destination_id}");
                }
                for (key, value) in rows {
                    println!("{key} = {value}");
                }
            }
        },
    }

    Ok(())
}

fn parse_pair(key: &str) -> anyhow::Result<SettingsIdentifierPair> {
    key.parse::<SettingsIdentifierPair>()
        .map_err(|e| anyhow::anyhow!("{e} (expected prime.identifier)"))
}
