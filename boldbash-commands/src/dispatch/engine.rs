use tracing::{debug, info, warn};

use boldbash_core::registry::HELP_COMMAND;
use boldbash_core::{Data, Gateway, Identity, Invocation, MessageRef, Outcome};

use super::{ChannelPolicy, DispatchError, is_command, split_chain, tokenize};
use crate::utility::help::send_help;

/// A message as seen by the dispatcher.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub reference: MessageRef,
    pub author: Identity,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainState {
    Running,
    ShortCircuited,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainReport {
    pub state: ChainState,
    /// One outcome per statement that ran, in order.
    pub outcomes: Vec<Outcome>,
    /// Statements never started because an earlier one failed.
    pub skipped: usize,
}

impl ChainReport {
    pub fn succeeded(&self) -> bool {
        self.state == ChainState::Done && self.outcomes.iter().all(|outcome| outcome.is_success())
    }
}

/// What happened to a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Not a command; left alone.
    Ignored,
    /// Removed by channel policy without any notice.
    Suppressed,
    Completed(ChainReport),
}

enum Step {
    Finished(Outcome),
    Suppressed,
}

/// Run every statement of a message, stopping at the first failure.
pub async fn process_message(
    data: &Data,
    gateway: &dyn Gateway,
    message: &InboundMessage,
) -> Disposition {
    let prefix = data.command_prefix();
    let policy = ChannelPolicy::for_channels(&data.channels);
    let channel = message.reference.channel_id;

    if !is_command(&message.content, prefix) {
        if policy.is_content_restricted(channel) {
            suppress(gateway, message.reference, "not a command").await;
            return Disposition::Suppressed;
        }
        return Disposition::Ignored;
    }

    let single_statement = policy.is_single_statement(channel);
    let segments = match split_chain(&message.content, prefix, single_statement) {
        Ok(segments) => segments,
        Err(source) => {
            if policy.is_content_restricted(channel) {
                suppress(gateway, message.reference, "empty command").await;
                return Disposition::Suppressed;
            }
            debug!(%source, "empty command");
            let invocation = invocation_for(data, gateway, message, true);
            let outcome = command_not_found(&invocation, "").await;
            return Disposition::Completed(ChainReport {
                state: ChainState::ShortCircuited,
                outcomes: vec![outcome],
                skipped: 0,
            });
        }
    };

    let total = segments.len();
    let mut state = ChainState::Running;
    let mut outcomes = Vec::with_capacity(total);

    for (index, segment) in segments.iter().enumerate() {
        let invocation = invocation_for(data, gateway, message, index + 1 == total);
        match run_statement(&invocation, &policy, segment).await {
            Step::Suppressed => return Disposition::Suppressed,
            Step::Finished(outcome) => {
                outcomes.push(outcome);
                if !outcome.is_success() {
                    state = ChainState::ShortCircuited;
                    break;
                }
            }
        }
    }

    if state == ChainState::Running {
        state = ChainState::Done;
    }

    let skipped = total - outcomes.len();
    if skipped > 0 {
        info!(
            user = %message.author.user_id,
            ran = outcomes.len(),
            skipped,
            "command chain short-circuited"
        );
        let invocation = invocation_for(data, gateway, message, true);
        invocation.error(&DispatchError::ChainAborted.to_string()).await;
    }

    Disposition::Completed(ChainReport {
        state,
        outcomes,
        skipped,
    })
}

fn invocation_for<'a>(
    data: &'a Data,
    gateway: &'a dyn Gateway,
    message: &'a InboundMessage,
    is_final: bool,
) -> Invocation<'a> {
    Invocation {
        data,
        gateway,
        author: &message.author,
        message: message.reference,
        is_final,
    }
}

async fn run_statement(invocation: &Invocation<'_>, policy: &ChannelPolicy, segment: &str) -> Step {
    let channel = invocation.channel_id();
    let prefix = invocation.prefix();

    let statement = match tokenize(segment, prefix) {
        Ok(statement) => statement,
        Err(source) => {
            if policy.is_content_restricted(channel) {
                suppress(invocation.gateway, invocation.message, "empty statement").await;
                return Step::Suppressed;
            }
            debug!(%source, segment, "statement has no command");
            return Step::Finished(command_not_found(invocation, "").await);
        }
    };

    if !policy.permits(channel, &statement.name) {
        let violation = DispatchError::PolicyViolation {
            exempt: policy.exempt_command(),
        };
        suppress(invocation.gateway, invocation.message, &violation.to_string()).await;
        return Step::Suppressed;
    }

    debug!(command = %statement.name, args = ?statement.args, "command entered");

    if statement.name == HELP_COMMAND {
        return Step::Finished(send_help(invocation).await);
    }

    let Some(command) = invocation.data.registry.lookup(&statement.name) else {
        return Step::Finished(command_not_found(invocation, &statement.name).await);
    };

    if !command.is_executable(invocation.author) {
        let denied = DispatchError::PermissionDenied {
            name: command.name.to_owned(),
            prefix,
        };
        info!(user = %invocation.author.user_id, command = command.name, "permission denied");
        return Step::Finished(invocation.fail(&denied.to_string()).await);
    }

    if !command.accepts_argument_count(statement.args.len()) {
        let invalid = DispatchError::InvalidArguments {
            usage: command.usage(prefix),
        };
        // Arguments typed into a restricted channel never stay visible.
        if policy.is_content_restricted(channel) {
            suppress(invocation.gateway, invocation.message, "invalid arguments").await;
        }
        return Step::Finished(invocation.fail(&invalid.to_string()).await);
    }

    let outcome = (command.execute)(invocation, &statement.args).await;
    if !outcome.is_success() {
        let failed = DispatchError::ExecutionFailed {
            name: command.name.to_owned(),
        };
        debug!(%failed, code = outcome.code(), "statement failed");
    }

    Step::Finished(outcome)
}

async fn command_not_found(invocation: &Invocation<'_>, name: &str) -> Outcome {
    let missing = DispatchError::CommandNotFound {
        name: name.to_owned(),
        prefix: invocation.prefix(),
    };
    invocation.fail(&missing.to_string()).await
}

async fn suppress(gateway: &dyn Gateway, message: MessageRef, reason: &str) {
    debug!(channel = %message.channel_id, reason, "removing message from restricted channel");
    if let Err(source) = gateway.delete_message(message).await {
        warn!(?source, "failed to delete message in restricted channel");
    }
}
