pub mod dispatch;
pub mod jobs;
pub mod moderation;
pub mod utility;
pub mod verification;

use boldbash_core::{Command, Registry, RegistryError};

pub const COMMANDS: &[Command] = &[
    utility::ping::META,
    utility::usage::META,
    utility::showcase::META,
    utility::quote::META,
    utility::addquote::META,
    utility::delquote::META,
    utility::stats::META,
    moderation::warn::META,
    moderation::warnings::META,
    moderation::clearwarnings::META,
    moderation::kick::META,
    moderation::ban::META,
    moderation::unban::META,
    verification::verify::META,
];

/// The command table used by the bot. `help` is built into the dispatcher.
pub fn registry() -> Result<Registry, RegistryError> {
    Registry::from_commands(COMMANDS)
}

#[cfg(test)]
pub(crate) mod test_support {
    use boldbash_core::testing::{GENERAL_CHANNEL, RecordingGateway, message_in, test_data};
    use boldbash_core::{Data, Identity, Outcome};
    use tempfile::TempDir;

    use crate::dispatch::{Disposition, InboundMessage, process_message};

    /// State backed by a fresh temp dir, with the full command table.
    pub async fn setup() -> (TempDir, Data) {
        let dir = tempfile::tempdir().unwrap();
        let data = test_data(dir.path(), crate::registry().unwrap()).await;
        (dir, data)
    }

    /// Dispatch `content` from `author` in the general channel; returns the outcomes.
    pub async fn run(
        data: &Data,
        gateway: &RecordingGateway,
        author: Identity,
        content: &str,
    ) -> Vec<Outcome> {
        run_in(data, gateway, GENERAL_CHANNEL, author, content).await
    }

    pub async fn run_in(
        data: &Data,
        gateway: &RecordingGateway,
        channel: u64,
        author: Identity,
        content: &str,
    ) -> Vec<Outcome> {
        let message = InboundMessage {
            reference: message_in(channel, 700),
            author,
            content: content.to_owned(),
        };

        match process_message(data, gateway, &message).await {
            Disposition::Completed(report) => report.outcomes,
            other => panic!("`{content}` was not dispatched: {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, registry};

    #[test]
    fn command_table_registers_cleanly() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), COMMANDS.len());
        assert!(registry.lookup("help").is_none());
        assert!(registry.lookup("verify").is_some());
    }
}
