// Test doubles for charts and the feed transport
use crate::application::chart_registry::ChartHandle;
use crate::application::transport::{FeedChannel, FeedTransport};
use crate::domain::chart::{ChartData, RedrawMode};
use crate::error::FeedError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite;
use url::Url;

#[derive(Debug, Default)]
pub struct ChartLog {
    pub data: Option<ChartData>,
    pub redraws: Vec<RedrawMode>,
}

/// Chart handle that records everything done to it
pub struct RecordingChart {
    log: Arc<Mutex<ChartLog>>,
}

impl RecordingChart {
    pub fn new() -> (Self, Arc<Mutex<ChartLog>>) {
        let log = Arc::new(Mutex::new(ChartLog::default()));
        (Self { log: log.clone() }, log)
    }
}

impl ChartHandle for RecordingChart {
    fn replace_data(&mut self, data: ChartData) {
        self.log.lock().unwrap().data = Some(data);
    }

    fn redraw(&mut self, mode: RedrawMode) {
        self.log.lock().unwrap().redraws.push(mode);
    }
}

/// Server side of one accepted fake connection
pub struct FakePeer {
    pub opened_at: Instant,
    /// Dropping this closes the channel from the server side
    pub inbound: mpsc::UnboundedSender<String>,
    pub sent: Arc<Mutex<Vec<String>>>,
    pub closed_by_client: Arc<AtomicBool>,
}

/// Transport that accepts or refuses connections from a script
pub struct FakeTransport {
    script: Mutex<VecDeque<bool>>,
    connect_delay: Duration,
    attempts: mpsc::UnboundedSender<Instant>,
    peers: mpsc::UnboundedSender<FakePeer>,
}

pub struct FakeServer {
    pub attempts: mpsc::UnboundedReceiver<Instant>,
    pub peers: mpsc::UnboundedReceiver<FakePeer>,
}

impl FakeTransport {
    /// `true` accepts the attempt, `false` refuses it. Attempts past the end
    /// of the script are refused.
    pub fn scripted(script: &[bool]) -> (Self, FakeServer) {
        let (attempts_tx, attempts_rx) = mpsc::unbounded_channel();
        let (peers_tx, peers_rx) = mpsc::unbounded_channel();
        let transport = Self {
            script: Mutex::new(script.iter().copied().collect()),
            connect_delay: Duration::ZERO,
            attempts: attempts_tx,
            peers: peers_tx,
        };
        let server = FakeServer {
            attempts: attempts_rx,
            peers: peers_rx,
        };
        (transport, server)
    }

    /// Every attempt takes `delay` before it is accepted or refused
    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }
}

#[async_trait]
impl FeedTransport for FakeTransport {
    async fn connect(&self, _endpoint: &Url) -> Result<Box<dyn FeedChannel>, FeedError> {
        let now = Instant::now();
        let _ = self.attempts.send(now);

        if !self.connect_delay.is_zero() {
            tokio::time::sleep(self.connect_delay).await;
        }

        let accept = self.script.lock().unwrap().pop_front().unwrap_or(false);
        if !accept {
            return Err(FeedError::WebSocket(tungstenite::Error::ConnectionClosed));
        }

        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        let _ = self.peers.send(FakePeer {
            opened_at: now,
            inbound: inbound_tx,
            sent: sent.clone(),
            closed_by_client: closed.clone(),
        });

        Ok(Box::new(FakeChannel {
            inbound: inbound_rx,
            sent,
            closed,
        }))
    }
}

struct FakeChannel {
    inbound: mpsc::UnboundedReceiver<String>,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl FeedChannel for FakeChannel {
    async fn send_text(&mut self, text: String) -> Result<(), FeedError> {
        self.sent.lock().unwrap().push(text);
        Ok(())
    }

    async fn next_message(&mut self) -> Option<String> {
        self.inbound.recv().await
    }

    async fn close(&mut self) -> Result<(), FeedError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
