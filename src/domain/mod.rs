// Domain layer - Feed payloads and chart datasets
pub mod chart;
pub mod payload;
pub mod section;
