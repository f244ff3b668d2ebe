//! The caller that composes the session store and the exchange client.
//!
//! `ChatController` owns the store, forwards history to the client, turns
//! failures into visible assistant messages and names new sessions after
//! their first message.

mod chat;
mod manager;
mod types;


pub use manager::ChatController;
pub use types::SendOutcome;
