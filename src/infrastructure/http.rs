use crate::application::ports::HttpSource;
use crate::domain::{errors::PollError, logging::LogComponent};
use crate::{log_debug, log_warn};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;

/// `fetch`-backed HTTP source
#[derive(Debug, Clone, Default)]
pub struct GlooHttpSource {
    base_url: String,
}

impl GlooHttpSource {
    /// An empty base keeps relative paths relative to the page.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn resolve_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") || self.base_url.is_empty() {
            endpoint.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            )
        }
    }
}

impl HttpSource for GlooHttpSource {
    fn get_text<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, PollError>> {
        async move {
            let url = self.resolve_url(url);
            log_debug!(LogComponent::Infrastructure("HTTP"), "🌐 GET: {}", url);

            let response = Request::get(&url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| PollError::Network(format!("Request failed: {e:?}")))?;

            if !response.ok() {
                log_warn!(
                    LogComponent::Infrastructure("HTTP"),
                    "HTTP error: {} - {}",
                    response.status(),
                    response.status_text()
                );
                return Err(PollError::HttpStatus(response.status()));
            }

            let text = response
                .text()
                .await
                .map_err(|e| PollError::Network(format!("Failed to read response: {e:?}")))?;

            log_debug!(
                LogComponent::Infrastructure("HTTP"),
                "✅ GET response: {} bytes",
                text.len()
            );
            Ok(text)
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_stay_relative_without_base() {
        let source = GlooHttpSource::default();
        assert_eq!(source.resolve_url("/api/live-data"), "/api/live-data");
    }

    #[test]
    fn base_url_is_joined_with_single_slash() {
        let source = GlooHttpSource::new("https://desk.local/");
        assert_eq!(
            source.resolve_url("/admin/api/last-fixing"),
            "https://desk.local/admin/api/last-fixing"
        );
    }

    #[test]
    fn absolute_endpoints_ignore_base() {
        let source = GlooHttpSource::new("https://desk.local");
        assert_eq!(
            source.resolve_url("https://feed.local/api/live-data"),
            "https://feed.local/api/live-data"
        );
    }
}
