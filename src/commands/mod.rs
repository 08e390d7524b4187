pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::chat::TurnController;
pub use dispatcher::create_command_registry;

/// What slash commands may read or request from the chat loop.
pub struct ChatState {
    pub controller: TurnController,
    pub should_continue: bool,
    /// Suggestion picked by `/suggest n`, submitted by the loop afterwards.
    pub pending_suggestion: Option<usize>,
}

impl ChatState {
    pub fn new(controller: TurnController) -> Self {
        Self {
            controller,
            should_continue: true,
            pending_suggestion: None,
        }
    }
}

/// Splits `/name arg1 arg2` into the command name and its arguments.
/// A line starting with `//` is chat text, not a command.
pub fn parse_command(input: &str) -> Option<(&str, Vec<&str>)> {
    let rest = input.trim().strip_prefix('/')?;
    if rest.starts_with('/') {
        return None;
    }
    let mut parts = rest.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.collect()))
}

/// Text to send for a non-command line: `//text` becomes `/text`.
pub fn chat_text(input: &str) -> &str {
    let trimmed = input.trim_start();
    if trimmed.starts_with("//") {
        &trimmed[1..]
    } else {
        input
    }
}
