// WebSocket transport for the dashboard feed
use crate::application::transport::{FeedChannel, FeedTransport};
use crate::error::FeedError;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct WebSocketTransport;

impl WebSocketTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FeedTransport for WebSocketTransport {
    async fn connect(&self, endpoint: &Url) -> Result<Box<dyn FeedChannel>, FeedError> {
        let (stream, _response) = tokio_tungstenite::connect_async(endpoint.as_str()).await?;
        Ok(Box::new(WebSocketChannel { stream }))
    }
}

struct WebSocketChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl FeedChannel for WebSocketChannel {
    async fn send_text(&mut self, text: String) -> Result<(), FeedError> {
        self.stream.send(Message::Text(text)).await?;
        Ok(())
    }

    async fn next_message(&mut self) -> Option<String> {
        while let Some(item) = self.stream.next().await {
            match item {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                    Ok(text) => return Some(text),
                    Err(_) => tracing::debug!("Ignoring non-utf8 binary frame"),
                },
                Ok(Message::Close(frame)) => {
                    tracing::debug!("Close frame received: {:?}", frame);
                    return None;
                }
                // Pings are answered by tungstenite itself
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Dashboard feed error: {}", e);
                    return None;
                }
            }
        }
        None
    }

    async fn close(&mut self) -> Result<(), FeedError> {
        self.stream.close(None).await?;
        Ok(())
    }
}
