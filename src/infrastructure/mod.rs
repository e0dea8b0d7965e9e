// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod tracing_chart;
pub mod ws_transport;
