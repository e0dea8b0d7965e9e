// Transport traits for the dashboard feed channel
use crate::error::FeedError;
use async_trait::async_trait;
use url::Url;

/// One open bidirectional feed channel
#[async_trait]
pub trait FeedChannel: Send {
    async fn send_text(&mut self, text: String) -> Result<(), FeedError>;

    /// Next inbound text message, `None` once the channel has closed
    /// (closed by the peer or failed).
    async fn next_message(&mut self) -> Option<String>;

    async fn close(&mut self) -> Result<(), FeedError>;
}

#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Open a channel to `endpoint`, completing once the handshake is done
    async fn connect(&self, endpoint: &Url) -> Result<Box<dyn FeedChannel>, FeedError>;
}
