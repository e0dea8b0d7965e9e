// Main entry point - Dependency injection for the feed client and server
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::application::chart_registry::{ChartHandle, ChartRegistry};
use crate::application::connection_manager::ConnectionManager;
use crate::application::snapshot_service::SnapshotService;
use crate::domain::chart::RedrawMode;
use crate::domain::section::Section;
use crate::infrastructure::config::{load_dashboard_config, FeedSettings, ServerSettings};
use crate::infrastructure::tracing_chart::TracingChart;
use crate::infrastructure::ws_transport::WebSocketTransport;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::feed_router;
use crate::presentation::page_events::spawn_page_events;

#[derive(Parser)]
#[command(name = "storefront-dashboard-feed", about = "Live storefront dashboard feed")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Follow the dashboard feed and redraw the charts (default)
    Watch,
    /// Serve the dashboard feed
    Serve,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_dashboard_config()?;

    match cli.command.unwrap_or(Command::Watch) {
        Command::Watch => watch(config.feed).await,
        Command::Serve => serve(config.server).await,
    }
}

async fn watch(feed: FeedSettings) -> anyhow::Result<()> {
    let options = feed.options()?;

    // Charts are drawn once, empty, before the feed starts filling them
    let mut registry = ChartRegistry::new();
    for section in Section::ALL {
        let mut chart = TracingChart::new(section);
        chart.redraw(RedrawMode::Animated);
        registry = registry.with_chart(section, Box::new(chart));
    }
    tracing::info!("Registered {} dashboard charts", registry.len());

    let manager = ConnectionManager::new(Arc::new(WebSocketTransport::new()), registry, options);

    let mut state = manager.subscribe();
    tokio::spawn(async move {
        while state.changed().await.is_ok() {
            tracing::debug!("Dashboard feed state: {:?}", *state.borrow());
        }
    });

    let (events_tx, events_rx) = mpsc::channel(8);
    let page_events = spawn_page_events(events_tx);

    manager.run(events_rx).await;
    page_events.abort();

    Ok(())
}

async fn serve(server: ServerSettings) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        snapshot_service: SnapshotService::new(),
        push_interval: Duration::from_millis(server.push_interval_ms),
    });
    let router = feed_router(state);

    let addr: SocketAddr = server.bind.parse()?;
    tracing::info!("Starting dashboard feed server on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
