mod events;
mod gateway;
mod schedule;

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context as _, anyhow};
use poise::serenity_prelude as serenity;
use tracing::{debug, error, info};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use boldbash_core::{BotConfig, Channels, Data, Error};
use boldbash_database::Database;

use events::messages::MESSAGE_LOG_TARGET;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the .env file
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;
    init_tracing(&config.message_log_path)?;

    default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install rustls ring provider"))?;

    info!("Bold and Bash version {} starting.", env!("CARGO_PKG_VERSION"));
    debug!(?config, "configuration loaded");

    let db = Database::open(&config.data_dir).await?;
    info!(data_dir = %db.data_dir().display(), "JSON store loaded.");

    let registry = boldbash_commands::registry()?;
    info!(commands = registry.len(), "Command modules loaded.");

    let token = config.token.clone();
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, _framework| {
            Box::pin(async move {
                let channels = resolve_channels(ctx, &config).await?;
                info!(guild = %channels.guild_name, "Channels resolved.");

                let data = Data::new(db, config, channels, registry);
                schedule::set_random_status(ctx, &data);
                schedule::spawn(ctx.clone(), data.clone());

                info!("Bot is now online and connected to server.");
                Ok(data)
            })
        })
        .build();

    info!("Bold and Bash is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

/// Console output plus a plain message log file fed by [`MESSAGE_LOG_TARGET`].
fn init_tracing(message_log_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = message_log_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    let message_log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(message_log_path)
        .with_context(|| format!("failed to open message log `{}`", message_log_path.display()))?;

    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level || target == MESSAGE_LOG_TARGET {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    let message_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(message_log))
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .with_filter(filter_fn(|metadata| metadata.target() == MESSAGE_LOG_TARGET));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(message_layer)
        .init();
    Ok(())
}

async fn resolve_channel(
    ctx: &serenity::Context,
    id: serenity::ChannelId,
    label: &str,
) -> anyhow::Result<serenity::GuildChannel> {
    id.to_channel(ctx)
        .await
        .ok()
        .and_then(|channel| channel.guild())
        .with_context(|| format!("{label} channel #{id} not found"))
}

/// Look up every configured channel. Any missing channel aborts startup.
async fn resolve_channels(ctx: &serenity::Context, config: &BotConfig) -> anyhow::Result<Channels> {
    let log = resolve_channel(ctx, config.log_channel_id, "Logging").await?;
    let showcase = resolve_channel(ctx, config.showcase_channel_id, "Showcase").await?;
    let verification = resolve_channel(ctx, config.verification_channel_id, "Verification").await?;

    let guild_id = log.guild_id;
    let guild_name = guild_id
        .to_partial_guild(ctx)
        .await
        .map(|guild| guild.name)
        .unwrap_or_else(|_| format!("Server {}", guild_id.get()));

    Ok(Channels {
        guild_id,
        guild_name,
        log: log.id,
        showcase: showcase.id,
        verification: verification.id,
    })
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(?error, "startup failed");
            std::process::exit(1);
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(?error, event = event.snake_case_name(), "event handler failed");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            events::messages::handle_message(ctx, data, new_message).await;
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            events::members::handle_member_join(data, new_member);
        }
        serenity::FullEvent::GuildMemberRemoval { guild_id, user, .. } => {
            events::members::handle_member_leave(data, *guild_id, user);
        }
        _ => {}
    }

    Ok(())
}
