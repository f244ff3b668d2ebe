//! Conversation data model shared by the store and the exchange client.

mod message;
mod session;

pub use message::{Message, Role};
pub use session::{ChatSession, StoreState, DEFAULT_TITLE};
