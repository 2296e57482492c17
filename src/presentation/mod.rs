pub mod wasm_api;

pub use wasm_api::{DashboardHandle, launch, parse_options, start_dashboard};
