use super::ChatState;
use crate::chat::SUGGESTIONS;
use crate::core::error::MmateError;
use crate::display;

use console::style;

pub trait CommandHandler {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, MmateError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct SuggestCommand;
pub struct HistoryCommand;
pub struct SessionCommand;

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, MmateError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Leave the chat"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _state: &mut ChatState,
        _args: &[&str],
    ) -> Result<Option<String>, MmateError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = vec![
            title.to_string(),
            QuitCommand.help().to_string(),
            HelpCommand.help().to_string(),
            SuggestCommand.help().to_string(),
            HistoryCommand.help().to_string(),
            SessionCommand.help().to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for SuggestCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, MmateError> {
        let Some(raw) = args.first() else {
            display::display_suggestions(state.controller.suggestions_enabled());
            return Ok(None);
        };

        let index = raw
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=SUGGESTIONS.len()).contains(n))
            .ok_or_else(|| {
                MmateError::Input(format!(
                    "Pick a suggestion between 1 and {}",
                    SUGGESTIONS.len()
                ))
            })?;

        state.pending_suggestion = Some(index - 1);
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/suggest [n] - List suggested prompts, or send suggestion n"
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, MmateError> {
        Ok(Some(display::format_history(state.controller.messages())))
    }

    fn help(&self) -> &'static str {
        "/history - Show the conversation so far"
    }
}

impl CommandHandler for SessionCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, MmateError> {
        let text = match state.controller.session_id() {
            Some(id) => format!("Session: {}", id),
            None => "No session yet; one starts with the first reply.".to_string(),
        };
        Ok(Some(text))
    }

    fn help(&self) -> &'static str {
        "/session - Show the current session id"
    }
}
