pub mod controller;
pub mod message;
pub mod session;
pub mod store;
pub mod suggestions;

pub use controller::{ChatObserver, TurnController, TurnOutcome, TurnState};
pub use message::{Message, Sender};
pub use suggestions::SUGGESTIONS;
