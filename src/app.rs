use crate::backend::HttpBackend;
use crate::chat::{SUGGESTIONS, TurnController, TurnOutcome};
use crate::cli::Args;
use crate::commands::{ChatState, chat_text, dispatcher::CommandDispatcher, parse_command};
use crate::config::Settings;
use crate::core::error::MmateError;
use crate::display::{self, TerminalObserver};
use crate::input;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use tracing::{debug, info};

pub struct Application {
    pub args: Args,
    pub settings: Settings,
    pub command_dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(args: Args, settings: Settings, command_dispatcher: CommandDispatcher) -> Self {
        Self {
            args,
            settings,
            command_dispatcher,
        }
    }

    pub async fn run(&mut self) -> Result<(), MmateError> {
        let backend = HttpBackend::new(&self.settings.backend_url, self.settings.request_timeout)?;
        info!(endpoint = backend.endpoint(), "using chat backend");

        let logs_visible = self.args.verbose || std::env::var_os("RUST_LOG").is_some();
        let controller = TurnController::new(Box::new(backend), self.settings.typing_delay)
            .with_observer(Box::new(TerminalObserver::new(!logs_visible)));

        let piped = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| MmateError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        let message = match (self.args.message.take(), piped) {
            (Some(arg), Some(stdin)) if !stdin.trim().is_empty() => {
                Some(format!("{}\n\n{}", stdin.trim_end(), arg))
            }
            (Some(arg), _) => Some(arg),
            (None, Some(stdin)) => Some(stdin.trim_end().to_string()),
            (None, None) => None,
        };

        match message {
            Some(message) => Self::handle_single_turn(controller, &message).await,
            None => self.handle_chat_mode(controller).await,
        }
    }

    async fn handle_single_turn(
        mut controller: TurnController,
        message: &str,
    ) -> Result<(), MmateError> {
        match controller.submit(message).await {
            TurnOutcome::Rejected => Err(MmateError::Input("Nothing to send".to_string())),
            outcome => {
                debug!(?outcome, "single turn finished");
                Ok(())
            }
        }
    }

    async fn handle_chat_mode(&mut self, controller: TurnController) -> Result<(), MmateError> {
        display::display_welcome();

        let mut state = ChatState::new(controller);
        let mut editor = input::create_editor(self.command_dispatcher.clone())?;

        while state.should_continue {
            let Some(line) = input::read_input(&mut editor)? else {
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            if let Some((command, args)) = parse_command(&line) {
                match self.command_dispatcher.execute(command, &args, &mut state) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) => display::display_error(&e),
                }

                if let Some(index) = state.pending_suggestion.take() {
                    display::display_user_echo(SUGGESTIONS[index]);
                    state.controller.submit_suggestion(index).await;
                }
                continue;
            }

            state.controller.set_input(chat_text(&line));
            state.controller.submit_input().await;
        }

        input::save_history(&mut editor)?;
        Ok(())
    }
}
