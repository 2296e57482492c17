use crate::domain::errors::ConfigError;
use serde::Deserialize;

pub const DEFAULT_LIVE_DATA_ENDPOINT: &str = "/api/live-data";
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 45_000;
pub const DEFAULT_CLOCK_REFRESH_MS: u32 = 5_000;

/// Options of a single poller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollerConfig {
    pub endpoint_url: String,
    pub interval_ms: u32,
    pub clock_refresh_ms: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_LIVE_DATA_ENDPOINT.to_string(),
            interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            clock_refresh_ms: DEFAULT_CLOCK_REFRESH_MS,
        }
    }
}

impl PollerConfig {
    pub fn new(endpoint_url: impl Into<String>, interval_ms: u32) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            interval_ms,
            ..Self::default()
        }
    }

    pub fn with_clock_refresh(mut self, clock_refresh_ms: u32) -> Self {
        self.clock_refresh_ms = clock_refresh_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.clock_refresh_ms == 0 {
            return Err(ConfigError::ZeroClockRefresh);
        }
        Ok(())
    }
}

/// Options accepted by `startDashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    #[serde(flatten)]
    pub poller: PollerConfig,
    /// Prefix for relative endpoint paths; empty means same origin.
    pub base_url: String,
    pub load_fixings: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poller: PollerConfig::default(),
            base_url: String::new(),
            load_fixings: true,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::InvalidOptions(e.to_string()))?;
        config.poller.validate()?;
        Ok(config)
    }
}
