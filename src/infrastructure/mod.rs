//! Browser adapters for the application ports.

pub mod http;
pub mod services;
pub mod timers;
pub mod ui;

pub use http::GlooHttpSource;
pub use services::{BrowserTimeProvider, ConsoleLogger};
pub use timers::BrowserScheduler;
pub use ui::DomDashboardView;
