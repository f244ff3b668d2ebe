pub mod errors;
pub mod id;
pub mod paths;
pub mod time;
pub mod types;

pub use errors::{ConfigError, GemchatError, StoreError};
pub use id::{new_id, MessageId, SessionId};
pub use time::now_millis;
pub use types::{ChatSession, Message, Role, StoreState, DEFAULT_TITLE};
