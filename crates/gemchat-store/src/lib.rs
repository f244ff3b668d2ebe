//! Session storage for gemchat.
//!
//! Owns the collection of chat sessions and the active-session pointer,
//! persisting the whole snapshot to a key-value slot after every mutation.
//!
//! - `SessionStore`: create / switch / append / rename / delete
//! - `KeyValueStore`: the persistence boundary, with file and in-memory backends
//! - `export`: standalone JSON documents for a single session
//! - `title`: chat titles derived from the first user message

pub mod export;
pub mod kv;
pub mod store;
pub mod title;

pub use export::{export_file_name, export_session, export_session_json};
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use store::{Clock, SessionStore, DEFAULT_STATE_KEY};
pub use title::{generate_chat_title, truncate_text, DEFAULT_TITLE_LEN};
