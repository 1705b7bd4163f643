use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context as _, bail};
use poise::serenity_prelude as serenity;

use boldbash_utils::DEFAULT_COMMAND_PREFIX;

const DEFAULT_DATA_DIR: &str = "./Data";
const DEFAULT_MESSAGE_LOG: &str = "messages.log";

/// Runtime configuration read from the environment (and `.env`).
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub command_prefix: char,
    pub log_channel_id: serenity::ChannelId,
    pub showcase_channel_id: serenity::ChannelId,
    pub verification_channel_id: serenity::ChannelId,
    pub verified_role_id: Option<serenity::RoleId>,
    pub verification_code: Option<String>,
    pub invite_link: String,
    pub data_dir: PathBuf,
    pub message_log_path: PathBuf,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("command_prefix", &self.command_prefix)
            .field("log_channel_id", &self.log_channel_id)
            .field("showcase_channel_id", &self.showcase_channel_id)
            .field("verification_channel_id", &self.verification_channel_id)
            .field("verified_role_id", &self.verified_role_id)
            .field("verification_code", &self.verification_code.as_ref().map(|_| "<redacted>"))
            .field("invite_link", &self.invite_link)
            .field("data_dir", &self.data_dir)
            .field("message_log_path", &self.message_log_path)
            .finish()
    }
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };
        let required = |key: &str| value(key).with_context(|| format!("{key} is not set"));

        let token = required("DISCORD_TOKEN")?;
        let channel = |key: &str| -> anyhow::Result<serenity::ChannelId> {
            Ok(serenity::ChannelId::new(parse_id(key, &required(key)?)?))
        };

        let log_channel_id = channel("LOG_CHANNEL_ID")?;
        let showcase_channel_id = channel("SHOWCASE_CHANNEL_ID")?;
        let verification_channel_id = channel("VERIFICATION_CHANNEL_ID")?;

        let verified_role_id = value("VERIFIED_ROLE_ID")
            .map(|raw| parse_id("VERIFIED_ROLE_ID", &raw).map(serenity::RoleId::new))
            .transpose()?;

        let command_prefix = match value("COMMAND_PREFIX") {
            Some(raw) => parse_prefix(&raw)?,
            None => DEFAULT_COMMAND_PREFIX,
        };

        let data_dir = value("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let message_log_path = value("MESSAGE_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DEFAULT_MESSAGE_LOG));

        Ok(Self {
            token,
            command_prefix,
            log_channel_id,
            showcase_channel_id,
            verification_channel_id,
            verified_role_id,
            verification_code: value("VERIFICATION_CODE"),
            invite_link: value("INVITE_LINK").unwrap_or_default(),
            data_dir,
            message_log_path,
        })
    }
}

fn parse_id(key: &str, raw: &str) -> anyhow::Result<u64> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => bail!("{key} must be a non-zero numeric id, got `{raw}`"),
    }
}

fn parse_prefix(raw: &str) -> anyhow::Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(prefix), None) if !prefix.is_alphanumeric() => Ok(prefix),
        _ => bail!("COMMAND_PREFIX must be a single non-alphanumeric character, got `{raw}`"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::BotConfig;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key: &str| map.get(key).map(|value| (*value).to_owned())
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("DISCORD_TOKEN", "token"),
        ("LOG_CHANNEL_ID", "100"),
        ("SHOWCASE_CHANNEL_ID", "200"),
        ("VERIFICATION_CHANNEL_ID", "300"),
    ];

    #[test]
    fn defaults_apply_to_optional_keys() {
        let config = BotConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.command_prefix, '.');
        assert_eq!(config.log_channel_id.get(), 100);
        assert_eq!(config.verification_channel_id.get(), 300);
        assert!(config.verified_role_id.is_none());
        assert!(config.verification_code.is_none());
        assert_eq!(config.data_dir, PathBuf::from("./Data"));
        assert_eq!(config.message_log_path, PathBuf::from("./Data").join("messages.log"));
    }

    #[test]
    fn missing_required_key_is_an_error() {
        let error = BotConfig::from_lookup(lookup(&REQUIRED[..3])).unwrap_err();
        assert!(error.to_string().contains("VERIFICATION_CHANNEL_ID"));
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("COMMAND_PREFIX", "!!"));
        assert!(BotConfig::from_lookup(lookup(&pairs)).is_err());

        pairs.pop();
        pairs.push(("COMMAND_PREFIX", "!"));
        assert_eq!(BotConfig::from_lookup(lookup(&pairs)).unwrap().command_prefix, '!');
    }

    #[test]
    fn invalid_ids_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("LOG_CHANNEL_ID", "general");
        assert!(BotConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("VERIFICATION_CODE", "hunter2"));
        let config = BotConfig::from_lookup(lookup(&pairs)).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("\"token\""));
    }
}
