// Feed server request handlers
use crate::domain::payload::DataRequest;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const FEED_PATH: &str = "/ws/dashboard/";

pub fn feed_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route(FEED_PATH, get(dashboard_feed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard feed (WebSocket upgrade)
pub async fn dashboard_feed(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_feed(socket, state))
}

enum FeedStep {
    Push,
    Ignore,
    Stop,
}

/// Push a snapshot on every tick of the push interval (the first one right
/// away) and whenever the client asks for one.
async fn serve_feed(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut ticker = tokio::time::interval(state.push_interval);

    tracing::info!("Dashboard feed client connected");

    loop {
        let step = tokio::select! {
            _ = ticker.tick() => FeedStep::Push,
            msg = receiver.next() => match msg {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<DataRequest>(&text) {
                    Ok(request) if request.is_get_data() => FeedStep::Push,
                    Ok(request) => {
                        tracing::debug!("Ignoring feed request {:?}", request.message);
                        FeedStep::Ignore
                    }
                    Err(e) => {
                        tracing::debug!("Ignoring malformed feed request: {}", e);
                        FeedStep::Ignore
                    }
                },
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => FeedStep::Stop,
                Some(Ok(_)) => FeedStep::Ignore,
            },
        };

        match step {
            FeedStep::Push => {
                let snapshot = state.snapshot_service.snapshot();
                let text = match serde_json::to_string(&snapshot) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!("Failed to encode dashboard snapshot: {}", e);
                        continue;
                    }
                };
                if sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            FeedStep::Ignore => {}
            FeedStep::Stop => break,
        }
    }

    tracing::info!("Dashboard feed client disconnected");
}
