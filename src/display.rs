use crate::chat::{ChatObserver, Message, SUGGESTIONS, Sender, TurnState};
use crate::utils::text::wrap_text;
use console::{Term, measure_text_width, style};

const TYPING_LINE: &str = "MindfulMate is typing...";

fn box_width(term: &Term) -> usize {
    let terminal_width = term.size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), 100).max(40)
}

/// Greeting plus the numbered suggestion list
pub fn display_welcome() {
    println!(
        "\n{} {}",
        style("🌱").bold().green(),
        style("MindfulMate").bold().green()
    );
    println!(
        "{}",
        style("Share how you feel. Type /help for commands, Ctrl+D or /quit to leave.").dim()
    );
    println!(
        "{}",
        style("Start a message with // to send a literal leading slash.").dim()
    );
    display_suggestions(true);
}

pub fn display_suggestions(enabled: bool) {
    println!("\n{}", style("Try one of these with /suggest <n>:").cyan());
    for (i, prompt) in SUGGESTIONS.iter().enumerate() {
        let line = format!("  {}. {}", i + 1, prompt);
        if enabled {
            println!("{}", line);
        } else {
            println!("{}", style(line).dim());
        }
    }
}

/// Echo a prompt the user did not type themselves
pub fn display_user_echo(text: &str) {
    println!("{} {}", style(">").bold().cyan(), text);
}

/// Display an assistant reply in a framed box
pub fn display_reply(reply: &str) {
    if looks_like_markdown(reply) {
        println!("\n{}", style("💬 MindfulMate").bold().green());
        termimad::print_text(reply);
        return;
    }

    let term = Term::stdout();
    let max_width = box_width(&term);
    let lines = wrap_text(reply, max_width.saturating_sub(4));

    let content_width = lines
        .iter()
        .map(|line| measure_text_width(line))
        .max()
        .unwrap_or(0);
    let width = std::cmp::min(max_width, content_width + 4);

    let top_border = "┌".to_string() + &"─".repeat(width - 2) + "┐";
    let bottom_border = "└".to_string() + &"─".repeat(width - 2) + "┘";

    println!("\n{}", style("💬 MindfulMate").bold().green());
    println!("{}", style(&top_border).dim().green());
    for line in lines {
        let padding = width.saturating_sub(measure_text_width(&line) + 3);
        println!("│ {}{}│", style(&line).white(), " ".repeat(padding));
    }
    println!("{}", style(&bottom_border).dim().green());
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains("**") || text.contains('`') || text.contains("\n#")
}

/// Full transcript, oldest first
pub fn format_history(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages yet.".to_string();
    }

    messages
        .iter()
        .map(|m| {
            let label = match m.sender {
                Sender::User => style(m.sender.label()).bold().cyan(),
                Sender::Assistant => style(m.sender.label()).bold().green(),
            };
            format!("{} {} {}: {}", style(m.id).dim(), style(&m.timestamp).dim(), label, m.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn display_error(err: &dyn std::error::Error) {
    eprintln!("{} {}", style("✖").bold().red(), style(err).red());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypingIndicator {
    Show,
    Clear,
}

/// With `transient` off the typing line is left in place: log output may
/// have been written after it, and clearing would erase that instead.
fn typing_indicator(state: TurnState, shown: bool, transient: bool) -> Option<TypingIndicator> {
    if state.is_typing && !shown {
        Some(TypingIndicator::Show)
    } else if !state.is_typing && shown && transient {
        Some(TypingIndicator::Clear)
    } else {
        None
    }
}

/// Renders controller transitions: assistant replies and the typing line.
/// User messages are not echoed; the line editor already shows them.
pub struct TerminalObserver {
    term: Term,
    typing_shown: bool,
    transient_typing: bool,
}

impl TerminalObserver {
    /// `transient_typing` should be false whenever logs can reach the
    /// terminal while a turn is in flight.
    pub fn new(transient_typing: bool) -> Self {
        Self {
            term: Term::stdout(),
            typing_shown: false,
            transient_typing,
        }
    }
}

impl ChatObserver for TerminalObserver {
    fn message_appended(&mut self, message: &Message) {
        if message.sender == Sender::Assistant {
            display_reply(&message.text);
        }
    }

    fn turn_state_changed(&mut self, state: TurnState) {
        if !self.term.is_term() {
            return;
        }

        match typing_indicator(state, self.typing_shown, self.transient_typing) {
            Some(TypingIndicator::Show) => {
                self.term
                    .write_line(&style(TYPING_LINE).italic().dim().to_string())
                    .ok();
                self.typing_shown = true;
            }
            Some(TypingIndicator::Clear) => {
                self.term.clear_last_lines(1).ok();
                self.typing_shown = false;
            }
            None if !state.is_typing => self.typing_shown = false,
            None => {}
        }
    }
}
