use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};

use boldbash_commands::dispatch::{InboundMessage, is_command, process_message};
use boldbash_core::{Data, Gateway, Identity, MessageRef};
use boldbash_utils::formatting::{format_message_log_line, mention};
use boldbash_utils::permissions::resolve_user_permissions;

use crate::gateway::SerenityGateway;

/// Tracing target routed to the message log file.
pub const MESSAGE_LOG_TARGET: &str = "boldbash::messages";

const DIRECT_MESSAGE_LABEL: &str = "DM";

pub async fn handle_message(ctx: &serenity::Context, data: &Data, message: &serenity::Message) {
    if message.author.bot {
        return;
    }

    let gateway = SerenityGateway::new(ctx.http.clone());

    let Some(guild_id) = message.guild_id else {
        forward_direct_message(data, &gateway, message).await;
        return;
    };

    if guild_id != data.guild_id() {
        debug!(%guild_id, "ignoring message from another guild");
        return;
    }

    // Nothing is recorded from the verification channel.
    if message.channel_id != data.channels.verification {
        let label = channel_label(ctx, message.channel_id).await;
        log_message(&label, message);
    }

    // Only command-looking messages resolve permissions.
    let permissions = if is_command(&message.content, data.command_prefix()) {
        match resolve_user_permissions(&ctx.http, guild_id, message.author.id).await {
            Ok(permissions) => permissions,
            Err(source) => {
                warn!(?source, user = %message.author.id, "failed to resolve permissions");
                serenity::Permissions::empty()
            }
        }
    } else {
        serenity::Permissions::empty()
    };

    let inbound = InboundMessage {
        reference: MessageRef {
            channel_id: message.channel_id,
            message_id: message.id,
        },
        author: Identity {
            user_id: message.author.id,
            name: message.author.name.clone(),
            permissions,
        },
        content: message.content.clone(),
    };

    let disposition = process_message(data, &gateway, &inbound).await;
    debug!(?disposition, "message processed");
}

async fn forward_direct_message(data: &Data, gateway: &SerenityGateway, message: &serenity::Message) {
    log_message(DIRECT_MESSAGE_LABEL, message);

    let text = format!(
        "DM from {} ({}): \"{}\".",
        mention(message.author.id.get()),
        message.author.id,
        message.content
    );
    if let Err(source) = gateway.send(data.channels.log, &text, None).await {
        error!(?source, "failed to forward direct message");
    }
}

async fn channel_label(ctx: &serenity::Context, channel_id: serenity::ChannelId) -> String {
    match channel_id.name(ctx).await {
        Ok(name) => format!("#{}", name),
        Err(_) => format!("#{}", channel_id),
    }
}

fn log_message(label: &str, message: &serenity::Message) {
    info!(
        target: MESSAGE_LOG_TARGET,
        "{}",
        format_message_log_line(
            label,
            &message.author.name,
            message.author.id.get(),
            &message.content
        )
    );
}
