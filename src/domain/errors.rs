use derive_more::Display;

/// Everything that can go wrong in one fetch cycle.
///
/// The poller does not distinguish between the variants: all three take the
/// same error path and the next scheduled tick is the only recovery.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PollError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "HTTP {}", _0)]
    HttpStatus(u16),
    #[display(fmt = "Malformed response body: {}", _0)]
    MalformedBody(String),
}

impl std::error::Error for PollError {}

impl From<serde_json::Error> for PollError {
    fn from(error: serde_json::Error) -> Self {
        PollError::MalformedBody(error.to_string())
    }
}

/// Rejected dashboard or poller options.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigError {
    #[display(fmt = "intervalMs must be greater than zero")]
    ZeroInterval,
    #[display(fmt = "clockRefreshMs must be greater than zero")]
    ZeroClockRefresh,
    #[display(fmt = "endpointUrl must not be empty")]
    EmptyEndpoint,
    #[display(fmt = "Invalid options: {}", _0)]
    InvalidOptions(String),
}

impl std::error::Error for ConfigError {}
