pub mod command;
pub mod config;
pub mod gateway;
pub mod registry;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::sync::Arc;

use poise::serenity_prelude as serenity;

use boldbash_database::Database;

pub use command::{Access, Argument, BoxFuture, Command, Identity, Invocation, MessageRef, Outcome};
pub use config::BotConfig;
pub use gateway::Gateway;
pub use registry::{Registry, RegistryError};
pub use state::{Channels, DailyStats, StatsSnapshot};

pub type Error = anyhow::Error;

/// Application state shared by the event handlers and the scheduler.
///
/// Built once during framework setup, after every required channel has been
/// resolved; nothing is dispatched before it exists.
#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub config: Arc<BotConfig>,
    pub channels: Channels,
    pub stats: Arc<DailyStats>,
    pub registry: Arc<Registry>,
}

impl Data {
    pub fn new(db: Database, config: BotConfig, channels: Channels, registry: Registry) -> Self {
        Self {
            db,
            config: Arc::new(config),
            channels,
            stats: Arc::new(DailyStats::default()),
            registry: Arc::new(registry),
        }
    }

    pub fn command_prefix(&self) -> char {
        self.config.command_prefix
    }

    pub fn guild_id(&self) -> serenity::GuildId {
        self.channels.guild_id
    }
}
