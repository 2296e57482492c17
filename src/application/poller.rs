use crate::application::config::PollerConfig;
use crate::application::ports::{HttpSource, Scheduler, StatusSink, TimerHandle};
use crate::domain::{
    errors::{ConfigError, PollError},
    logging::{LogComponent, TimeProvider},
    polling::{InFlightGuard, LastUpdate, PollState},
};
use crate::{log_debug, log_error, log_info};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::Rc;

const COMPONENT: LogComponent = LogComponent::Application("Poller");

/// What a single call to [`Poller::poll_once`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Updated,
    Failed,
    /// A previous fetch was still in flight; the tick was dropped.
    Skipped,
}

/// Injected collaborators of a poller.
#[derive(Clone)]
pub struct PollerDeps {
    pub source: Rc<dyn HttpSource>,
    pub clock: Rc<dyn TimeProvider>,
    pub status: Rc<dyn StatusSink>,
}

struct PollerInner<T> {
    config: PollerConfig,
    deps: PollerDeps,
    state: Rc<RefCell<PollState>>,
    on_data: Box<dyn Fn(T)>,
    on_error: Box<dyn Fn(&PollError)>,
}

/// Fetches JSON from one endpoint on a fixed interval.
///
/// Cloning yields another reference to the same poller and state.
pub struct Poller<T> {
    inner: Rc<PollerInner<T>>,
}

impl<T> Clone for Poller<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: DeserializeOwned + 'static> Poller<T> {
    pub fn new(
        config: PollerConfig,
        deps: PollerDeps,
        on_data: impl Fn(T) + 'static,
        on_error: impl Fn(&PollError) + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = Rc::new(RefCell::new(PollState::new(config.interval_ms)));
        Ok(Self {
            inner: Rc::new(PollerInner {
                config,
                deps,
                state,
                on_data: Box::new(on_data),
                on_error: Box::new(on_error),
            }),
        })
    }

    pub fn config(&self) -> &PollerConfig {
        &self.inner.config
    }

    pub fn is_updating(&self) -> bool {
        self.inner.state.borrow().is_updating
    }

    pub fn last_update(&self) -> LastUpdate {
        self.inner.state.borrow().last_update.clone()
    }

    /// Fetch immediately, then every `interval_ms`; refresh the status clock
    /// every `clock_refresh_ms`.
    ///
    /// Each call registers its own pair of timers.
    pub fn start(&self, scheduler: Rc<dyn Scheduler>) -> PollerHandle {
        log_info!(
            COMPONENT,
            "🚀 Polling {} every {} ms",
            self.inner.config.endpoint_url,
            self.inner.config.interval_ms
        );

        self.spawn_cycle(scheduler.as_ref());

        let refresh = {
            let poller = self.clone();
            let spawner = Rc::clone(&scheduler);
            scheduler.every(
                self.inner.config.interval_ms,
                Box::new(move || poller.spawn_cycle(spawner.as_ref())),
            )
        };

        let clock = {
            let poller = self.clone();
            scheduler.every(
                self.inner.config.clock_refresh_ms,
                Box::new(move || poller.refresh_clock()),
            )
        };

        PollerHandle {
            refresh: Some(refresh),
            clock: Some(clock),
        }
    }

    fn spawn_cycle(&self, scheduler: &dyn Scheduler) {
        let poller = self.clone();
        scheduler.spawn(
            async move {
                poller.poll_once().await;
            }
            .boxed_local(),
        );
    }

    /// Run one fetch cycle unless one is already in flight.
    pub async fn poll_once(&self) -> PollOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.inner.state) else {
            log_debug!(COMPONENT, "Update already in progress, skipping...");
            return PollOutcome::Skipped;
        };

        log_debug!(COMPONENT, "🔄 Fetching {}", self.inner.config.endpoint_url);

        match self.fetch().await {
            Ok(payload) => {
                (self.inner.on_data)(payload);
                self.record(LastUpdate::Succeeded(self.inner.deps.clock.now_formatted()));
                log_debug!(COMPONENT, "✅ Update applied");
                PollOutcome::Updated
            }
            Err(error) => {
                log_error!(COMPONENT, "❌ Error updating from {}: {}", self.inner.config.endpoint_url, error);
                (self.inner.on_error)(&error);
                self.record(LastUpdate::Failed(self.inner.deps.clock.now_formatted()));
                PollOutcome::Failed
            }
        }
    }

    async fn fetch(&self) -> Result<T, PollError> {
        let body = self
            .inner
            .deps
            .source
            .get_text(&self.inner.config.endpoint_url)
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn record(&self, update: LastUpdate) {
        let text = update.status_text();
        self.inner.state.borrow_mut().last_update = update;
        if let Some(text) = text {
            self.inner.deps.status.set_status(&text);
        }
    }

    /// Rewrite the status clock unless a fetch is running or the last one
    /// failed.
    pub fn refresh_clock(&self) {
        let state = self.inner.state.borrow();
        if state.is_updating || state.last_update.is_failed() {
            return;
        }
        drop(state);
        self.inner
            .deps
            .status
            .set_status(&self.inner.deps.clock.now_formatted());
    }
}

/// Owns the timers of a started poller.
pub struct PollerHandle {
    refresh: Option<TimerHandle>,
    clock: Option<TimerHandle>,
}

impl PollerHandle {
    pub fn is_running(&self) -> bool {
        self.refresh.is_some()
    }

    /// Cancel both timers. A fetch already in flight still completes.
    pub fn stop(&mut self) {
        if self.refresh.take().is_some() {
            log_info!(COMPONENT, "⏹️ Polling stopped");
        }
        self.clock.take();
    }

    /// Leave the timers running until the page goes away.
    pub fn forget(mut self) {
        if let Some(refresh) = self.refresh.take() {
            refresh.forget();
        }
        if let Some(clock) = self.clock.take() {
            clock.forget();
        }
    }
}
