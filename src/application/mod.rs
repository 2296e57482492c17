//! Use cases: the generic poller and the dashboard built on top of it.

pub mod config;
pub mod dashboard;
pub mod poller;
pub mod ports;

pub use config::{DashboardConfig, PollerConfig};
pub use dashboard::{dispatch_snapshot, live_data_poller, load_fixing_cards};
pub use poller::{PollOutcome, Poller, PollerDeps, PollerHandle};
pub use ports::{DashboardView, HttpSource, Scheduler, StatusSink, TimerHandle};
