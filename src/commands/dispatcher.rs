use super::{
    ChatState,
    handler::{HelpCommand, HistoryCommand, QuitCommand, SessionCommand, SuggestCommand},
    registry::CommandRegistry,
};
use crate::core::error::MmateError;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(
        &self,
        command: &str,
        args: &[&str],
        state: &mut ChatState,
    ) -> Result<Option<String>, MmateError> {
        self.registry.execute(command, args, state)
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("help", HelpCommand);
    registry.register("suggest", SuggestCommand);
    registry.register("history", HistoryCommand);
    registry.register("session", SessionCommand);

    CommandDispatcher::new(Arc::new(registry))
}
