// Application layer - Feed use cases and the seams they depend on
pub mod chart_refresh;
pub mod chart_registry;
pub mod connection_manager;
pub mod snapshot_service;
pub mod transport;

#[cfg(test)]
pub mod testing;
