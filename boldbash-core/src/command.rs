use std::future::Future;
use std::pin::Pin;

use poise::serenity_prelude as serenity;
use tracing::{error, warn};

use boldbash_utils::embed::{Embed, error_embed};
use boldbash_utils::permissions::{STAFF_PERMISSIONS, grants};

use crate::Data;
use crate::gateway::Gateway;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Entry point of a command: the invocation context and the raw argument tokens.
pub type ExecuteFn = for<'a> fn(&'a Invocation<'a>, &'a [String]) -> BoxFuture<'a, Outcome>;

/// Result of one statement. Only used to decide whether a chain continues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Success,
    Failure,
}

impl Outcome {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Argument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl Argument {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: false,
        }
    }
}

/// Who may run a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Everyone,
    Staff,
}

impl Access {
    pub fn permits(self, identity: &Identity) -> bool {
        match self {
            Self::Everyone => true,
            Self::Staff => grants(identity.permissions, STAFF_PERMISSIONS),
        }
    }
}

/// A registered command. Built as a `const` next to its implementation.
#[derive(Clone, Copy, Debug)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub arguments: &'static [Argument],
    pub access: Access,
    pub execute: ExecuteFn,
}

impl Command {
    pub fn is_executable(&self, identity: &Identity) -> bool {
        self.access.permits(identity)
    }

    pub fn required_arguments(&self) -> usize {
        self.arguments.iter().filter(|arg| arg.required).count()
    }

    pub fn accepts_argument_count(&self, count: usize) -> bool {
        count >= self.required_arguments() && count <= self.arguments.len()
    }

    /// Usage line such as `.ban <user> <duration> [reason]`.
    pub fn usage(&self, prefix: char) -> String {
        let mut usage = format!("{}{}", prefix, self.name);
        for argument in self.arguments {
            if argument.required {
                usage.push_str(&format!(" <{}>", argument.name));
            } else {
                usage.push_str(&format!(" [{}]", argument.name));
            }
        }
        usage
    }
}

/// The author of a message, with permissions resolved once per message.
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: serenity::UserId,
    pub name: String,
    pub permissions: serenity::Permissions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: serenity::ChannelId,
    pub message_id: serenity::MessageId,
}

/// Context of one statement in a chain.
pub struct Invocation<'a> {
    pub data: &'a Data,
    pub gateway: &'a dyn Gateway,
    pub author: &'a Identity,
    pub message: MessageRef,
    /// Whether this is the last statement of its chain.
    pub is_final: bool,
}

impl Invocation<'_> {
    pub fn channel_id(&self) -> serenity::ChannelId {
        self.message.channel_id
    }

    pub fn prefix(&self) -> char {
        self.data.command_prefix()
    }

    pub async fn say(&self, text: &str) {
        if let Err(source) = self.gateway.send(self.channel_id(), text, None).await {
            error!(?source, "failed to send message");
        }
    }

    pub async fn say_embed(&self, text: &str, embed: Embed) {
        if let Err(source) = self.gateway.send(self.channel_id(), text, Some(embed)).await {
            error!(?source, "failed to send embed");
        }
    }

    pub async fn reply(&self, text: &str) {
        if let Err(source) = self.gateway.reply(self.message, text).await {
            error!(?source, "failed to reply to message");
        }
    }

    /// Post an error notice into the invoking channel.
    pub async fn error(&self, text: &str) {
        if let Err(source) = self
            .gateway
            .send(self.channel_id(), "", Some(error_embed(text)))
            .await
        {
            error!(?source, "failed to send error notice");
        }
    }

    /// Post an error notice and report failure to the chain.
    pub async fn fail(&self, text: &str) -> Outcome {
        self.error(text).await;
        Outcome::Failure
    }

    pub async fn delete_invoking_message(&self) {
        if let Err(source) = self.gateway.delete_message(self.message).await {
            warn!(?source, "failed to delete invoking message");
        }
    }
}
