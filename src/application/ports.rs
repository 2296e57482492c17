//! Seams between the use cases and the browser.
//!
//! Browser adapters live in `infrastructure`; tests provide their own.

use crate::domain::{
    errors::PollError,
    market_data::{FixingCard, PriceDisplay, PricePoint, Symbol},
};
use futures::future::LocalBoxFuture;

/// Issues a GET and yields the response body of a 2xx answer.
pub trait HttpSource {
    /// Connection failures map to `PollError::Network`, non-2xx answers to
    /// `PollError::HttpStatus`.
    fn get_text<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, PollError>>;
}

/// Cancels a timer when dropped.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Keep the timer running for the rest of the page's life.
    pub fn forget(mut self) {
        if let Some(cancel) = self.cancel.take() {
            std::mem::forget(cancel);
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Single-threaded task spawning and repeating timers.
pub trait Scheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> TimerHandle;
}

/// Receives the "last updated" text.
pub trait StatusSink {
    fn set_status(&self, text: &str);
}

/// Everything the dashboard page can be asked to show.
pub trait DashboardView: StatusSink {
    /// Full ordered series, handed to the external chart.
    fn update_chart(&self, symbol: Symbol, points: &[PricePoint]);
    fn update_price(&self, symbol: Symbol, display: &PriceDisplay);
    fn update_fixing_card(&self, card: FixingCard, html: &str);
}
