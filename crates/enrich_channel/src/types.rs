use thiserror::Error;

pub const DEFAULT_CHANNEL_NAME: &str = "google-search";

/// Handle for one listener registration. Never reused within a manager.
pub type ListenerId = u64;

#[derive(Debug, Clone)]
pub struct ChannelSettings {
    /// Well-known name every (re)connection is opened under.
    pub name: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_CHANNEL_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not connect to channel {name}: {reason}")]
    ConnectFailed { name: String, reason: String },
    #[error("connection closed by peer")]
    Disconnected,
    #[error("post failed: {0}")]
    PostFailed(String),
}

/// What happened to a message handed to `ChannelManager::send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Dropped,
}
