//! HTTP collaborators: the chatter and chatroom JSON endpoints.

mod http;
mod transport;
mod types;

pub use http::{HttpTransport, HttpTransportConfig};
pub use transport::ChatterTransport;
pub use types::{ChatterQuery, PostOutcome, PostResponse, RoomActionResponse, MAX_MESSAGE_CHARS};
