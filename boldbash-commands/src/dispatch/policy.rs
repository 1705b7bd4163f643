use std::collections::HashSet;

use poise::serenity_prelude as serenity;

use boldbash_core::Channels;

/// The one command accepted in the verification channel.
pub const VERIFY_COMMAND: &str = "verify";

/// Per-channel restrictions applied before any command runs.
#[derive(Clone, Debug)]
pub struct ChannelPolicy {
    content_restricted: HashSet<serenity::ChannelId>,
    single_statement: HashSet<serenity::ChannelId>,
    exempt_command: &'static str,
}

impl ChannelPolicy {
    pub fn new(exempt_command: &'static str) -> Self {
        Self {
            content_restricted: HashSet::new(),
            single_statement: HashSet::new(),
            exempt_command,
        }
    }

    /// The verification channel accepts a single `verify` statement and nothing else.
    pub fn for_channels(channels: &Channels) -> Self {
        Self::new(VERIFY_COMMAND)
            .restrict_content(channels.verification)
            .limit_to_single_statement(channels.verification)
    }

    /// Messages in `channel` other than the exempt command are deleted.
    pub fn restrict_content(mut self, channel: serenity::ChannelId) -> Self {
        self.content_restricted.insert(channel);
        self
    }

    /// Only the first statement of a chain is considered in `channel`.
    pub fn limit_to_single_statement(mut self, channel: serenity::ChannelId) -> Self {
        self.single_statement.insert(channel);
        self
    }

    pub fn is_content_restricted(&self, channel: serenity::ChannelId) -> bool {
        self.content_restricted.contains(&channel)
    }

    pub fn is_single_statement(&self, channel: serenity::ChannelId) -> bool {
        self.single_statement.contains(&channel)
    }

    pub fn exempt_command(&self) -> &'static str {
        self.exempt_command
    }

    /// Whether a statement named `name` may run in `channel`.
    pub fn permits(&self, channel: serenity::ChannelId, name: &str) -> bool {
        !self.is_content_restricted(channel) || name.eq_ignore_ascii_case(self.exempt_command)
    }
}
