//! Configuration schema types for the chatterbox client.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the intervals the site has always used.

mod activity;
mod chatter;
mod logging;
mod presence;
mod server;

pub use activity::*;
pub use chatter::*;
pub use logging::*;
pub use presence::*;
pub use server::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ChatterboxConfig {
    pub server: ServerConfig,
    pub activity: ActivityConfig,
    pub chatter: ChatterConfig,
    pub presence: PresenceConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
