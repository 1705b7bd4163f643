use thiserror::Error;

use crate::command::{Command, Identity};

/// Name handled by the dispatcher itself; never stored in the registry.
pub const HELP_COMMAND: &str = "help";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command `{0}` is registered twice")]
    DuplicateName(&'static str),

    #[error("command name `{0}` is reserved")]
    ReservedName(&'static str),

    #[error("command `{command}` declares required argument `{argument}` after an optional one")]
    OptionalBeforeRequired {
        command: &'static str,
        argument: &'static str,
    },
}

/// Read-only table of commands keyed by case-insensitive name.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a static command table.
    pub fn from_commands(commands: &[Command]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for command in commands {
            registry.register(*command)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if command.name.eq_ignore_ascii_case(HELP_COMMAND) {
            return Err(RegistryError::ReservedName(command.name));
        }

        if self.lookup(command.name).is_some() {
            return Err(RegistryError::DuplicateName(command.name));
        }

        let mut seen_optional = false;
        for argument in command.arguments {
            if argument.required && seen_optional {
                return Err(RegistryError::OptionalBeforeRequired {
                    command: command.name,
                    argument: argument.name,
                });
            }
            seen_optional |= !argument.required;
        }

        self.commands.push(command);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Command> {
        let wanted = name.to_lowercase();
        self.commands
            .iter()
            .find(|command| command.name.to_lowercase() == wanted)
    }

    /// Commands the identity may run, in registration order.
    pub fn list_executable<'a>(
        &'a self,
        identity: &'a Identity,
    ) -> impl Iterator<Item = &'a Command> + 'a {
        self.commands
            .iter()
            .filter(move |command| command.is_executable(identity))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
