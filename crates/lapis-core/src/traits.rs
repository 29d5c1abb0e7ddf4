use crate::{
    error::LapisError,
    message::{MessageContext, OutgoingMessage},
};
use async_trait::async_trait;

/// Messaging channel: the chat transport.
///
/// A chat platform session implements this trait to deliver inbound
/// messages and send replies.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<MessageContext>, LapisError>;

    /// Send a message back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), LapisError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), LapisError>;
}

/// Persistent boolean settings, keyed per destination id.
///
/// Implementations must tolerate concurrent reads and serialize concurrent
/// writes to the same key.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read `key` for `destination_id`, returning `default` when unset.
    async fn get(&self, key: &str, destination_id: i64, default: bool)
        -> Result<bool, LapisError>;

    /// Store `value` for `key` under `destination_id`.
    async fn set(&self, key: &str, destination_id: i64, value: bool) -> Result<(), LapisError>;
}
