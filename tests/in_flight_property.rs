mod common;

use common::{ManualScheduler, RecordingView, ScriptedSource, StepClock};
use live_dashboard_wasm::application::{PollerConfig, live_data_poller};
use live_dashboard_wasm::domain::errors::PollError;
use quickcheck_macros::quickcheck;

const BODY: &str = r#"{"dxy": [{"Close": 104.0, "Open": 103.5}]}"#;

/// Random interleaving of timer ticks and response arrivals never has more
/// than one request open, and the poller is idle once everything resolved.
#[quickcheck]
fn never_more_than_one_request_in_flight(steps: Vec<u8>) -> bool {
    let source = ScriptedSource::new();
    let view = RecordingView::new();
    let poller = live_data_poller(
        PollerConfig::new("/api/live-data", 1_000),
        source.clone(),
        StepClock::at(0),
        view,
    )
    .unwrap();
    let scheduler = ManualScheduler::new();
    let _handle = poller.start(scheduler.clone());
    scheduler.run_until_stalled();

    for step in steps {
        match step % 4 {
            0 | 1 => scheduler.advance(1_000),
            2 => {
                source.resolve_next(Ok(BODY.to_string()));
            }
            _ => {
                source.resolve_next(Err(PollError::HttpStatus(500)));
            }
        }
        scheduler.run_until_stalled();
        if source.pending() > 1 {
            return false;
        }
    }

    while source.resolve_next(Ok(BODY.to_string())) {
        scheduler.run_until_stalled();
    }

    source.max_in_flight() == 1 && !poller.is_updating()
}
