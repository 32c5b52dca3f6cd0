use std::collections::HashMap;

use super::SenderId;
use crate::application::errors::CommandError;

/// Leading character that marks text as a command invocation
pub const COMMAND_PREFIX: char = '/';

/// What a command handler sees when invoked
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub args: Vec<String>,
    pub sender: SenderId,
}

impl CommandContext {
    pub fn new(args: Vec<String>, sender: SenderId) -> Self {
        Self { args, sender }
    }
}

/// Command handler function type
pub type CommandHandler = Box<dyn Fn(&CommandContext) -> Result<String, CommandError> + Send + Sync>;

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub description: String,
    pub usage: Option<String>,
    handler: CommandHandler,
}

impl Command {
    /// `name` is normalised to lower case and given the `/` prefix if missing
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&CommandContext) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        let name = name.into().to_lowercase();
        let name = if name.starts_with(COMMAND_PREFIX) {
            name
        } else {
            format!("{}{}", COMMAND_PREFIX, name)
        };

        Self {
            name,
            description: String::new(),
            usage: None,
            handler: Box::new(handler),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<String, CommandError> {
        (self.handler)(ctx)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

/// Command registry for managing available commands.
///
/// Names are unique: registering a name that already exists replaces the
/// earlier command.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the command that was replaced, if any
    pub fn register(&mut self, command: Command) -> Option<Command> {
        let replaced = self.commands.insert(command.name.clone(), command);
        if let Some(old) = &replaced {
            tracing::debug!("Command {} re-registered, previous handler replaced", old.name);
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All commands, sorted by name
    pub fn all(&self) -> Vec<&Command> {
        let mut commands: Vec<&Command> = self.commands.values().collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> SenderId {
        SenderId::parse("alice@example.net").unwrap()
    }

    #[test]
    fn test_name_is_normalised() {
        let cmd = Command::new("Ping", |_| Ok("pong".to_string()));
        assert_eq!(cmd.name, "/ping");

        let cmd = Command::new("/echo", |_| Ok(String::new()));
        assert_eq!(cmd.name, "/echo");
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(Command::new("/ping", |_| Ok("first".into()))).is_none());
        let replaced = registry.register(Command::new("/ping", |_| Ok("second".into())));
        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);

        let ctx = CommandContext::new(vec![], sender());
        assert_eq!(registry.get("/ping").unwrap().execute(&ctx).unwrap(), "second");
    }

    #[test]
    fn test_all_is_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("/time", |_| Ok(String::new())));
        registry.register(Command::new("/echo", |_| Ok(String::new())));
        registry.register(Command::new("/ping", |_| Ok(String::new())));

        let names: Vec<&str> = registry.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["/echo", "/ping", "/time"]);
    }

    #[test]
    fn test_handler_receives_context() {
        let cmd = Command::new("/who", |ctx| Ok(format!("{} {}", ctx.sender, ctx.args.join(","))));
        let ctx = CommandContext::new(vec!["a".into(), "B".into()], sender());
        assert_eq!(cmd.execute(&ctx).unwrap(), "alice@example.net a,B");
    }
}
