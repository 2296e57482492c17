use crate::application::ports::{Scheduler, TimerHandle};
use futures::future::LocalBoxFuture;
use gloo_timers::callback::Interval;

/// Browser event-loop scheduler: `setInterval` timers and `spawn_local` tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn every(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> TimerHandle {
        let interval = Interval::new(period_ms, move || tick());
        TimerHandle::new(move || drop(interval))
    }
}
