use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Help,
    List,
    Read,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub action: CommandAction,
}

const COMMAND_TABLE: [Command; 6] = [
    Command {
        name: "help",
        description: "Show this help message",
        action: CommandAction::Help,
    },
    Command {
        name: "ls",
        description: "Show the file explorer (optionally for a path)",
        action: CommandAction::List,
    },
    Command {
        name: "read",
        description: "Show the contents of a file",
        action: CommandAction::Read,
    },
    Command {
        name: "leer",
        description: "Alias for 'read'",
        action: CommandAction::Read,
    },
    Command {
        name: "exit",
        description: "Exit the application",
        action: CommandAction::Exit,
    },
    Command {
        name: "quit",
        description: "Alias for 'exit'",
        action: CommandAction::Exit,
    },
];

/// Reserved first words of a chat submission. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    by_name: HashMap<&'static str, Command>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let by_name = COMMAND_TABLE
            .iter()
            .map(|command| (command.name, *command))
            .collect();
        Self { by_name }
    }
}

impl CommandRegistry {
    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.by_name.get(name).copied()
    }

    /// Registration order, used for help output.
    pub fn commands(&self) -> impl Iterator<Item = &'static Command> {
        COMMAND_TABLE.iter()
    }
}

/// Splits a chat submission into its first token and the remaining arguments.
pub fn parse_command_line(input: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = input.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.collect()))
}
