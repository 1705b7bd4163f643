//! In-memory [`Gateway`] used by tests across the workspace.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use boldbash_utils::embed::Embed;

use boldbash_database::Database;

use crate::command::{Identity, MessageRef};
use crate::config::BotConfig;
use crate::gateway::Gateway;
use crate::registry::Registry;
use crate::state::Channels;
use crate::Data;

pub const GUILD_ID: u64 = 1;
pub const LOG_CHANNEL: u64 = 10;
pub const SHOWCASE_CHANNEL: u64 = 11;
pub const VERIFICATION_CHANNEL: u64 = 12;
pub const GENERAL_CHANNEL: u64 = 13;
pub const VERIFIED_ROLE: u64 = 50;
pub const VERIFICATION_CODE: &str = "letmein";
pub const INVITE_LINK: &str = "https://discord.gg/boldbash";

/// Application state backed by a store in `data_dir` and fixed channel ids.
pub async fn test_data(data_dir: &Path, registry: Registry) -> Data {
    let data_dir_value = data_dir.display().to_string();
    let config = BotConfig::from_lookup(|key| {
        let value = match key {
            "DISCORD_TOKEN" => "test-token".to_owned(),
            "LOG_CHANNEL_ID" => LOG_CHANNEL.to_string(),
            "SHOWCASE_CHANNEL_ID" => SHOWCASE_CHANNEL.to_string(),
            "VERIFICATION_CHANNEL_ID" => VERIFICATION_CHANNEL.to_string(),
            "VERIFIED_ROLE_ID" => VERIFIED_ROLE.to_string(),
            "VERIFICATION_CODE" => VERIFICATION_CODE.to_owned(),
            "INVITE_LINK" => INVITE_LINK.to_owned(),
            "DATA_DIR" => data_dir_value.clone(),
            _ => return None,
        };
        Some(value)
    })
    .expect("test configuration is valid");

    let db = Database::open(&config.data_dir)
        .await
        .expect("test store opens");

    let channels = Channels {
        guild_id: serenity::GuildId::new(GUILD_ID),
        guild_name: "Bold and Bash".to_owned(),
        log: serenity::ChannelId::new(LOG_CHANNEL),
        showcase: serenity::ChannelId::new(SHOWCASE_CHANNEL),
        verification: serenity::ChannelId::new(VERIFICATION_CHANNEL),
    };

    Data::new(db, config, channels, registry)
}

pub fn member(user_id: u64, name: &str) -> Identity {
    Identity {
        user_id: serenity::UserId::new(user_id),
        name: name.to_owned(),
        permissions: serenity::Permissions::SEND_MESSAGES,
    }
}

pub fn staff(user_id: u64, name: &str) -> Identity {
    Identity {
        permissions: serenity::Permissions::BAN_MEMBERS | serenity::Permissions::SEND_MESSAGES,
        ..member(user_id, name)
    }
}

pub fn message_in(channel: u64, message: u64) -> MessageRef {
    MessageRef {
        channel_id: serenity::ChannelId::new(channel),
        message_id: serenity::MessageId::new(message),
    }
}

/// One call made through the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Sent {
        channel: serenity::ChannelId,
        text: String,
        embed: Option<Embed>,
    },
    Replied {
        message: MessageRef,
        text: String,
    },
    Deleted(MessageRef),
    Private {
        user: serenity::UserId,
        text: String,
        embed: Option<Embed>,
    },
    File {
        channel: serenity::ChannelId,
        text: String,
        path: PathBuf,
    },
    Banned {
        user: serenity::UserId,
        reason: String,
    },
    Unbanned(serenity::UserId),
    Kicked {
        user: serenity::UserId,
        reason: String,
    },
    RoleAdded {
        user: serenity::UserId,
        role: serenity::RoleId,
    },
}

impl Delivery {
    /// Embed description or plain text, whichever carries the message.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Sent { text, embed, .. } | Self::Private { text, embed, .. } => embed
                .as_ref()
                .and_then(|embed| embed.description.as_deref())
                .or(Some(text.as_str())),
            Self::Replied { text, .. } | Self::File { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_error_notice(&self) -> bool {
        matches!(
            self,
            Self::Sent { embed: Some(embed), .. } if embed.title.as_deref() == Some("Error")
        )
    }
}

/// Records every call; configurable failures and user names.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    deliveries: Mutex<Vec<Delivery>>,
    user_names: HashMap<serenity::UserId, String>,
    failing_users: HashSet<serenity::UserId>,
    failing_channels: HashSet<serenity::ChannelId>,
    fail_private: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: u64, name: &str) -> Self {
        self.user_names
            .insert(serenity::UserId::new(user), name.to_owned());
        self
    }

    /// Make moderation actions against `user` fail.
    pub fn failing_for(mut self, user: u64) -> Self {
        self.failing_users.insert(serenity::UserId::new(user));
        self
    }

    /// Make posts to `channel` fail.
    pub fn failing_channel(mut self, channel: u64) -> Self {
        self.failing_channels.insert(serenity::ChannelId::new(channel));
        self
    }

    /// Make every direct message fail.
    pub fn without_private_messages(mut self) -> Self {
        self.fail_private = true;
        self
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.lock().clone()
    }

    pub fn error_notices(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|delivery| delivery.is_error_notice())
            .filter_map(|delivery| delivery.body().map(str::to_owned))
            .collect()
    }

    /// Plain texts posted with `send`, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|delivery| match delivery {
                Delivery::Sent { text, .. } if !text.is_empty() => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<MessageRef> {
        self.lock()
            .iter()
            .filter_map(|delivery| match delivery {
                Delivery::Deleted(message) => Some(*message),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Delivery>> {
        self.deliveries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, delivery: Delivery) {
        self.lock().push(delivery);
    }

    fn check_user(&self, user: serenity::UserId, action: &str) -> anyhow::Result<()> {
        if self.failing_users.contains(&user) {
            bail!("{action} rejected for {user}");
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn send(
        &self,
        channel: serenity::ChannelId,
        text: &str,
        embed: Option<Embed>,
    ) -> anyhow::Result<()> {
        if self.failing_channels.contains(&channel) {
            bail!("cannot post in {channel}");
        }
        self.record(Delivery::Sent {
            channel,
            text: text.to_owned(),
            embed,
        });
        Ok(())
    }

    async fn reply(&self, message: MessageRef, text: &str) -> anyhow::Result<()> {
        self.record(Delivery::Replied {
            message,
            text: text.to_owned(),
        });
        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> anyhow::Result<()> {
        self.record(Delivery::Deleted(message));
        Ok(())
    }

    async fn send_private(
        &self,
        user: serenity::UserId,
        text: &str,
        embed: Option<Embed>,
    ) -> anyhow::Result<()> {
        if self.fail_private {
            bail!("cannot send messages to {user}");
        }
        self.record(Delivery::Private {
            user,
            text: text.to_owned(),
            embed,
        });
        Ok(())
    }

    async fn send_file(
        &self,
        channel: serenity::ChannelId,
        text: &str,
        path: &Path,
    ) -> anyhow::Result<()> {
        self.record(Delivery::File {
            channel,
            text: text.to_owned(),
            path: path.to_path_buf(),
        });
        Ok(())
    }

    async fn ban(
        &self,
        _guild: serenity::GuildId,
        user: serenity::UserId,
        reason: &str,
    ) -> anyhow::Result<()> {
        self.check_user(user, "ban")?;
        self.record(Delivery::Banned {
            user,
            reason: reason.to_owned(),
        });
        Ok(())
    }

    async fn unban(&self, _guild: serenity::GuildId, user: serenity::UserId) -> anyhow::Result<()> {
        self.check_user(user, "unban")?;
        self.record(Delivery::Unbanned(user));
        Ok(())
    }

    async fn kick(
        &self,
        _guild: serenity::GuildId,
        user: serenity::UserId,
        reason: &str,
    ) -> anyhow::Result<()> {
        self.check_user(user, "kick")?;
        self.record(Delivery::Kicked {
            user,
            reason: reason.to_owned(),
        });
        Ok(())
    }

    async fn add_role(
        &self,
        _guild: serenity::GuildId,
        user: serenity::UserId,
        role: serenity::RoleId,
    ) -> anyhow::Result<()> {
        self.check_user(user, "add_role")?;
        self.record(Delivery::RoleAdded { user, role });
        Ok(())
    }

    async fn user_name(&self, user: serenity::UserId) -> Option<String> {
        self.user_names.get(&user).cloned()
    }
}
