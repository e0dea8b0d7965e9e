// Application state for the feed server handlers
use crate::application::snapshot_service::SnapshotService;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub snapshot_service: SnapshotService,
    /// Period of the unsolicited snapshot push on each feed connection
    pub push_interval: Duration,
}
