use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use boldbash_core::{Gateway, MessageRef};
use boldbash_utils::embed::Embed;

/// [`Gateway`] backed by the Discord HTTP API.
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<serenity::Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }

    fn http(&self) -> &serenity::Http {
        self.http.as_ref()
    }
}

fn create_message(text: &str, embed: Option<Embed>) -> serenity::CreateMessage {
    let mut builder = serenity::CreateMessage::new();
    if !text.is_empty() {
        builder = builder.content(text);
    }
    if let Some(embed) = embed {
        builder = builder.embed(embed.into_create_embed());
    }
    builder
}

#[async_trait]
impl Gateway for SerenityGateway {
    async fn send(
        &self,
        channel: serenity::ChannelId,
        text: &str,
        embed: Option<Embed>,
    ) -> anyhow::Result<()> {
        channel
            .send_message(self.http(), create_message(text, embed))
            .await?;
        Ok(())
    }

    async fn reply(&self, message: MessageRef, text: &str) -> anyhow::Result<()> {
        let builder = serenity::CreateMessage::new()
            .content(text)
            .reference_message((message.channel_id, message.message_id));
        message.channel_id.send_message(self.http(), builder).await?;
        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> anyhow::Result<()> {
        message
            .channel_id
            .delete_message(self.http(), message.message_id)
            .await?;
        Ok(())
    }

    async fn send_private(
        &self,
        user: serenity::UserId,
        text: &str,
        embed: Option<Embed>,
    ) -> anyhow::Result<()> {
        user.direct_message(self.http(), create_message(text, embed))
            .await?;
        Ok(())
    }

    async fn send_file(
        &self,
        channel: serenity::ChannelId,
        text: &str,
        path: &Path,
    ) -> anyhow::Result<()> {
        let attachment = serenity::CreateAttachment::path(path)
            .await
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        channel
            .send_message(self.http(), create_message(text, None).add_file(attachment))
            .await?;
        Ok(())
    }

    async fn ban(
        &self,
        guild: serenity::GuildId,
        user: serenity::UserId,
        reason: &str,
    ) -> anyhow::Result<()> {
        guild.ban_with_reason(self.http(), user, 0, reason).await?;
        Ok(())
    }

    async fn unban(&self, guild: serenity::GuildId, user: serenity::UserId) -> anyhow::Result<()> {
        guild.unban(self.http(), user).await?;
        Ok(())
    }

    async fn kick(
        &self,
        guild: serenity::GuildId,
        user: serenity::UserId,
        reason: &str,
    ) -> anyhow::Result<()> {
        guild.kick_with_reason(self.http(), user, reason).await?;
        Ok(())
    }

    async fn add_role(
        &self,
        guild: serenity::GuildId,
        user: serenity::UserId,
        role: serenity::RoleId,
    ) -> anyhow::Result<()> {
        self.http()
            .add_member_role(guild, user, role, Some("Passed verification"))
            .await?;
        Ok(())
    }

    async fn user_name(&self, user: serenity::UserId) -> Option<String> {
        self.http()
            .get_user(user)
            .await
            .ok()
            .map(|user| user.global_name.clone().unwrap_or_else(|| user.name.clone()))
    }
}
