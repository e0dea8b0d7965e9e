// Connection manager - Keeps the dashboard feed channel open and applies pushes
use crate::application::chart_refresh::refresh;
use crate::application::chart_registry::ChartRegistry;
use crate::application::transport::{FeedChannel, FeedTransport};
use crate::domain::payload::{DataRequest, UpdatePayload};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use url::Url;

pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Closed,
    Connecting,
    Open,
}

/// Page lifecycle events the manager reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The dashboard came back to the foreground
    VisibilityRegained,
    /// The page is going away; close without reconnecting
    Teardown,
}

#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// `false` when the dashboard is not shown; `run` then returns at once
    pub enabled: bool,
    pub endpoint: Url,
    pub reconnect_delay: Duration,
}

enum ConnectOutcome {
    Opened(Box<dyn FeedChannel>),
    Failed,
    Teardown,
}

enum ChannelEnd {
    Closed,
    Teardown,
}

enum Step {
    Message(Option<String>),
    Lifecycle(Option<LifecycleEvent>),
}

pub struct ConnectionManager {
    transport: Arc<dyn FeedTransport>,
    registry: ChartRegistry,
    options: FeedOptions,
    state: watch::Sender<ConnectionState>,
}

impl ConnectionManager {
    pub fn new(
        transport: Arc<dyn FeedTransport>,
        registry: ChartRegistry,
        options: FeedOptions,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Closed);
        Self {
            transport,
            registry,
            options,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Drive the feed until a teardown event arrives (or every lifecycle
    /// sender is dropped). Returns the chart registry.
    ///
    /// After any closure exactly one reopen is scheduled `reconnect_delay`
    /// later. Regaining visibility while closed cancels that pending reopen
    /// and connects immediately.
    pub async fn run(mut self, mut events: mpsc::Receiver<LifecycleEvent>) -> ChartRegistry {
        if !self.options.enabled {
            tracing::info!("Dashboard feed disabled, not connecting");
            return self.registry;
        }

        let mut reopen_at: Option<Instant> = None;
        let mut connect_now = true;

        loop {
            if connect_now {
                connect_now = false;

                let end = match self.connect(&mut events).await {
                    ConnectOutcome::Opened(channel) => self.serve(channel, &mut events).await,
                    ConnectOutcome::Failed => ChannelEnd::Closed,
                    ConnectOutcome::Teardown => ChannelEnd::Teardown,
                };

                match end {
                    ChannelEnd::Closed => {
                        tracing::info!(
                            "Reopening dashboard feed in {}ms",
                            self.options.reconnect_delay.as_millis()
                        );
                        reopen_at = Some(Instant::now() + self.options.reconnect_delay);
                    }
                    ChannelEnd::Teardown => break,
                }
                continue;
            }

            let reopen = async {
                match reopen_at {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                _ = reopen => connect_now = true,
                event = events.recv() => match event {
                    Some(LifecycleEvent::VisibilityRegained) => {
                        tracing::info!("Dashboard visible again, reconnecting now");
                        connect_now = true;
                    }
                    Some(LifecycleEvent::Teardown) | None => break,
                },
            }
        }

        self.state.send_replace(ConnectionState::Closed);
        tracing::info!("Dashboard feed stopped");
        self.registry
    }

    async fn connect(&mut self, events: &mut mpsc::Receiver<LifecycleEvent>) -> ConnectOutcome {
        self.state.send_replace(ConnectionState::Connecting);
        tracing::info!("Connecting to dashboard feed at {}", self.options.endpoint);

        let transport = self.transport.clone();
        let endpoint = self.options.endpoint.clone();
        let connecting = async move { transport.connect(&endpoint).await };
        tokio::pin!(connecting);

        let result = loop {
            tokio::select! {
                result = &mut connecting => break result,
                event = events.recv() => match event {
                    Some(LifecycleEvent::VisibilityRegained) => {
                        tracing::debug!("Visibility regained while connecting, attempt already in flight");
                    }
                    Some(LifecycleEvent::Teardown) | None => {
                        self.state.send_replace(ConnectionState::Closed);
                        return ConnectOutcome::Teardown;
                    }
                },
            }
        };

        match result {
            Ok(mut channel) => {
                self.state.send_replace(ConnectionState::Open);
                tracing::info!("Dashboard feed connection established");

                match serde_json::to_string(&DataRequest::get_data()) {
                    Ok(request) => {
                        if let Err(e) = channel.send_text(request).await {
                            tracing::warn!("Failed to request dashboard snapshot: {}", e);
                        }
                    }
                    Err(e) => tracing::error!("Failed to encode snapshot request: {}", e),
                }

                ConnectOutcome::Opened(channel)
            }
            Err(e) => {
                self.state.send_replace(ConnectionState::Closed);
                tracing::warn!("Failed to connect to dashboard feed: {}", e);
                ConnectOutcome::Failed
            }
        }
    }

    async fn serve(
        &mut self,
        mut channel: Box<dyn FeedChannel>,
        events: &mut mpsc::Receiver<LifecycleEvent>,
    ) -> ChannelEnd {
        loop {
            let step = tokio::select! {
                message = channel.next_message() => Step::Message(message),
                event = events.recv() => Step::Lifecycle(event),
            };

            match step {
                Step::Message(Some(text)) => self.handle_message(&text),
                Step::Message(None) => {
                    self.state.send_replace(ConnectionState::Closed);
                    tracing::info!("Dashboard feed connection closed");
                    return ChannelEnd::Closed;
                }
                Step::Lifecycle(Some(LifecycleEvent::VisibilityRegained)) => {}
                Step::Lifecycle(Some(LifecycleEvent::Teardown) | None) => {
                    if let Err(e) = channel.close().await {
                        tracing::debug!("Error closing dashboard feed: {}", e);
                    }
                    self.state.send_replace(ConnectionState::Closed);
                    return ChannelEnd::Teardown;
                }
            }
        }
    }

    fn handle_message(&mut self, text: &str) {
        match UpdatePayload::decode(text) {
            Ok(payload) if payload.is_empty() => {
                tracing::debug!("Dashboard feed message carried no known sections");
            }
            Ok(payload) => refresh(&mut self.registry, &payload),
            Err(e) => tracing::debug!("Dropping dashboard feed message: {}", e),
        }
    }
}
