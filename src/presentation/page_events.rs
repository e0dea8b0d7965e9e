// Page lifecycle bridge - Process signals stand in for browser page events
use crate::application::connection_manager::LifecycleEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Forward page lifecycle events to the connection manager.
///
/// Ctrl-C (and SIGTERM on unix) tears the feed down; SIGHUP on unix is the
/// "dashboard visible again" nudge.
pub fn spawn_page_events(events: mpsc::Sender<LifecycleEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                _ = shutdown_requested() => LifecycleEvent::Teardown,
                _ = visibility_regained() => LifecycleEvent::VisibilityRegained,
            };

            tracing::debug!("Page event: {:?}", event);
            if events.send(event).await.is_err() || event == LifecycleEvent::Teardown {
                break;
            }
        }
    })
}

async fn shutdown_requested() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(e) => tracing::warn!("Cannot listen for SIGTERM: {}", e),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn visibility_regained() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::hangup()) {
            Ok(mut hangup) => {
                hangup.recv().await;
                return;
            }
            Err(e) => tracing::warn!("Cannot listen for SIGHUP: {}", e),
        }
    }

    std::future::pending::<()>().await;
}
