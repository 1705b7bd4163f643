//! Outbound side of the bot: message delivery and moderation actions.
//!
//! Commands and scheduled jobs only talk to Discord through [`Gateway`], which
//! keeps them testable against a recording implementation.

use std::path::Path;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use boldbash_utils::embed::Embed;

use crate::command::MessageRef;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Post a message to a channel.
    async fn send(
        &self,
        channel: serenity::ChannelId,
        text: &str,
        embed: Option<Embed>,
    ) -> anyhow::Result<()>;

    /// Reply to a message in its channel.
    async fn reply(&self, message: MessageRef, text: &str) -> anyhow::Result<()>;

    async fn delete_message(&self, message: MessageRef) -> anyhow::Result<()>;

    /// Send a direct message to a user.
    async fn send_private(
        &self,
        user: serenity::UserId,
        text: &str,
        embed: Option<Embed>,
    ) -> anyhow::Result<()>;

    /// Post a local file as an attachment.
    async fn send_file(
        &self,
        channel: serenity::ChannelId,
        text: &str,
        path: &Path,
    ) -> anyhow::Result<()>;

    async fn ban(
        &self,
        guild: serenity::GuildId,
        user: serenity::UserId,
        reason: &str,
    ) -> anyhow::Result<()>;

    async fn unban(&self, guild: serenity::GuildId, user: serenity::UserId) -> anyhow::Result<()>;

    async fn kick(
        &self,
        guild: serenity::GuildId,
        user: serenity::UserId,
        reason: &str,
    ) -> anyhow::Result<()>;

    async fn add_role(
        &self,
        guild: serenity::GuildId,
        user: serenity::UserId,
        role: serenity::RoleId,
    ) -> anyhow::Result<()>;

    /// Look up a user's name, `None` when the user cannot be fetched.
    async fn user_name(&self, user: serenity::UserId) -> Option<String>;
}
