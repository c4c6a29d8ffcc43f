pub mod chat_manager;
pub mod client;
pub mod dispatcher;
pub mod message;
pub mod transcript;

pub use chat_manager::ChatManager;
pub use client::{CompletionClient, XaiClient};
pub use dispatcher::{answer, QueryDispatcher, SubmitOutcome};
pub use message::{ChatMessage, Sender};
pub use transcript::Transcript;
