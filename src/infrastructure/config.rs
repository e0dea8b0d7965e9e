use crate::application::connection_manager::{FeedOptions, DEFAULT_RECONNECT_DELAY};
use crate::error::FeedError;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeedSettings {
    /// Whether the dashboard is shown at all
    pub enabled: bool,
    /// Origin of the page hosting the dashboard
    pub page_url: String,
    pub path: String,
    pub reconnect_delay_ms: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            page_url: "http://127.0.0.1:8000/".to_string(),
            path: "/ws/dashboard/".to_string(),
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY.as_millis() as u64,
        }
    }
}

impl FeedSettings {
    /// Feed address for the configured page: `wss` for an `https` page,
    /// `ws` for `http`, same host and port.
    pub fn endpoint(&self) -> Result<Url, FeedError> {
        let page = Url::parse(&self.page_url)?;
        let scheme = match page.scheme() {
            "https" => "wss",
            "http" => "ws",
            other => return Err(FeedError::UnsupportedScheme(other.to_string())),
        };
        let host = page
            .host_str()
            .ok_or_else(|| FeedError::MissingHost(self.page_url.clone()))?;
        let authority = match page.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Url::parse(&format!("{}://{}{}", scheme, authority, self.path))?)
    }

    pub fn options(&self) -> Result<FeedOptions, FeedError> {
        Ok(FeedOptions {
            enabled: self.enabled,
            endpoint: self.endpoint()?,
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub push_interval_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            push_interval_ms: 5000,
        }
    }
}

/// Load `config/dashboard.*` (optional) overlaid with `DASHBOARD__*` environment variables
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
