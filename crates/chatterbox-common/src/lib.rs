pub mod errors;
pub mod id;

pub use errors::{ChatterboxError, ConfigError, SyncError};
pub use id::{new_id, TabId};
