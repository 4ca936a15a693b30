//! Room and other-users presence.

mod sync;
mod types;

pub use sync::PresenceSync;
pub use types::{AvailableRoom, RoomGroup, RoomSnapshot, RoomUser, Suspension, SuspensionKind};
