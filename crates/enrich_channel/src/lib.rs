//! Enrichment channel: the shared, self-healing connection to the background process.
mod manager;
mod memory;
mod transport;
mod types;

pub use manager::{ChannelManager, Listener};
pub use memory::{memory_channel, BackgroundConnection, BackgroundEndpoint, MemoryConnector};
pub use transport::{Connector, Port};
pub use types::{ChannelSettings, Delivery, ListenerId, TransportError, DEFAULT_CHANNEL_NAME};
