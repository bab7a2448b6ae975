pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{BufferError, ConfigError, DispatchError, EafError};
pub use events::{Event, EventBus};
pub use id::{new_id, BufferId};
pub use types::{BufferKind, BufferState, Color, Size};

pub type Result<T> = std::result::Result<T, EafError>;
