// Presentation layer - Feed server endpoints and page lifecycle
pub mod app_state;
pub mod handlers;
pub mod page_events;
