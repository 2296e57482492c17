#![allow(dead_code)]

use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use live_dashboard_wasm::application::{DashboardView, HttpSource, Scheduler, StatusSink, TimerHandle};
use live_dashboard_wasm::domain::errors::PollError;
use live_dashboard_wasm::domain::logging::TimeProvider;
use live_dashboard_wasm::domain::market_data::{FixingCard, PriceDisplay, PricePoint, Symbol};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

struct ManualTimer {
    period_ms: u64,
    next_due_ms: u64,
    tick: Rc<RefCell<Box<dyn FnMut()>>>,
    cancelled: Rc<Cell<bool>>,
}

/// Scheduler whose clock only moves when the test says so.
pub struct ManualScheduler {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    timers: RefCell<Vec<ManualTimer>>,
    now_ms: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Rc::new(Self {
            pool: RefCell::new(pool),
            spawner,
            timers: RefCell::new(Vec::new()),
            now_ms: Cell::new(0),
        })
    }

    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    pub fn active_timers(&self) -> usize {
        self.timers.borrow().iter().filter(|t| !t.cancelled.get()).count()
    }

    /// Fire every timer due within the next `ms`, in due order, running
    /// spawned tasks after each tick.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                timers
                    .iter_mut()
                    .filter(|t| !t.cancelled.get() && t.next_due_ms <= target)
                    .min_by_key(|t| t.next_due_ms)
                    .map(|t| {
                        let due = t.next_due_ms;
                        t.next_due_ms += t.period_ms;
                        (due, Rc::clone(&t.tick))
                    })
            };
            let Some((due, tick)) = next else { break };
            self.now_ms.set(due);
            (tick.borrow_mut())();
            self.run_until_stalled();
        }
        self.now_ms.set(target);
        self.run_until_stalled();
    }
}

impl Scheduler for ManualScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("local pool accepts tasks");
    }

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> TimerHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.timers.borrow_mut().push(ManualTimer {
            period_ms: u64::from(period_ms),
            next_due_ms: self.now_ms.get() + u64::from(period_ms),
            tick: Rc::new(RefCell::new(tick)),
            cancelled: Rc::clone(&cancelled),
        });
        TimerHandle::new(move || cancelled.set(true))
    }
}

/// HTTP source answering from fixed routes, or holding requests open until
/// the test resolves them.
#[derive(Default)]
pub struct ScriptedSource {
    routes: RefCell<HashMap<String, Result<String, PollError>>>,
    pending: RefCell<VecDeque<oneshot::Sender<Result<String, PollError>>>>,
    requests: RefCell<Vec<String>>,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
}

impl ScriptedSource {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn route(&self, url: &str, reply: Result<String, PollError>) {
        self.routes.borrow_mut().insert(url.to_string(), reply);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.get()
    }

    /// Answer the oldest held request. Returns false when none is open.
    pub fn resolve_next(&self, reply: Result<String, PollError>) -> bool {
        match self.pending.borrow_mut().pop_front() {
            Some(sender) => sender.send(reply).is_ok(),
            None => false,
        }
    }
}

impl HttpSource for ScriptedSource {
    fn get_text<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, PollError>> {
        self.requests.borrow_mut().push(url.to_string());
        let (tx, rx) = oneshot::channel();
        match self.routes.borrow().get(url) {
            Some(reply) => {
                let _ = tx.send(reply.clone());
            }
            None => self.pending.borrow_mut().push_back(tx),
        }
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight
            .set(self.max_in_flight.get().max(self.in_flight.get()));
        async move {
            let reply = rx
                .await
                .unwrap_or_else(|_| Err(PollError::Network("request dropped".into())));
            self.in_flight.set(self.in_flight.get() - 1);
            reply
        }
        .boxed_local()
    }
}

/// Clock formatting milliseconds as `HH:MM:SS`.
pub struct StepClock {
    now_ms: AtomicU64,
}

impl StepClock {
    pub fn at(now_ms: u64) -> Rc<Self> {
        Rc::new(Self {
            now_ms: AtomicU64::new(now_ms),
        })
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl TimeProvider for StepClock {
    fn current_timestamp(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let secs = timestamp / 1000;
        format!("{:02}:{:02}:{:02}", (secs / 3600) % 24, (secs / 60) % 60, secs % 60)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Chart(Symbol, usize),
    Price(Symbol, PriceDisplay),
    Fixing(FixingCard, String),
}

/// View recording every call.
#[derive(Default)]
pub struct RecordingView {
    status: RefCell<Option<String>>,
    status_writes: Cell<usize>,
    events: RefCell<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }

    pub fn status_writes(&self) -> usize {
        self.status_writes.get()
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }
}

impl StatusSink for RecordingView {
    fn set_status(&self, text: &str) {
        *self.status.borrow_mut() = Some(text.to_string());
        self.status_writes.set(self.status_writes.get() + 1);
    }
}

impl DashboardView for RecordingView {
    fn update_chart(&self, symbol: Symbol, points: &[PricePoint]) {
        self.events.borrow_mut().push(ViewEvent::Chart(symbol, points.len()));
    }

    fn update_price(&self, symbol: Symbol, display: &PriceDisplay) {
        self.events
            .borrow_mut()
            .push(ViewEvent::Price(symbol, display.clone()));
    }

    fn update_fixing_card(&self, card: FixingCard, html: &str) {
        self.events
            .borrow_mut()
            .push(ViewEvent::Fixing(card, html.to_string()));
    }
}
