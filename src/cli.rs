use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "mmate", author, version, about = "Terminal client for the MindfulMate wellness chat", long_about = None)]
pub struct Args {
    /// Message to send as a single turn; starts an interactive chat when omitted
    pub message: Option<String>,

    /// Base URL of the chat backend
    #[arg(short, long, env = "MMATE_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Minimum time the typing indicator stays up, in milliseconds
    #[arg(long)]
    pub typing_delay_ms: Option<u64>,

    /// Give up on a backend request after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
