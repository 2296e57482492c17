use std::cell::RefCell;
use std::rc::Rc;

/// Prefix written to the status line when a cycle fails.
pub const FAILURE_MARKER: &str = "Update failed";

/// Outcome of the most recent completed cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LastUpdate {
    #[default]
    Never,
    Succeeded(String),
    Failed(String),
}

impl LastUpdate {
    pub fn is_failed(&self) -> bool {
        matches!(self, LastUpdate::Failed(_))
    }

    /// Text for the `lastUpdate` element, `None` before the first cycle.
    pub fn status_text(&self) -> Option<String> {
        match self {
            LastUpdate::Never => None,
            LastUpdate::Succeeded(time) => Some(time.clone()),
            LastUpdate::Failed(time) => Some(format!("{FAILURE_MARKER} - {time}")),
        }
    }
}

/// Mutable state of one poller. States are idle and fetching; nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub is_updating: bool,
    pub refresh_interval_ms: u32,
    pub last_update: LastUpdate,
}

impl PollState {
    pub fn new(refresh_interval_ms: u32) -> Self {
        Self {
            is_updating: false,
            refresh_interval_ms,
            last_update: LastUpdate::Never,
        }
    }
}

/// Holds the in-flight flag for the duration of one fetch.
///
/// The flag is cleared on drop, so success, failure, a panicking callback
/// and a cancelled future all return the poller to idle.
#[derive(Debug)]
pub struct InFlightGuard {
    state: Rc<RefCell<PollState>>,
}

impl InFlightGuard {
    /// `None` when another fetch already holds the flag.
    pub fn acquire(state: &Rc<RefCell<PollState>>) -> Option<Self> {
        let mut current = state.borrow_mut();
        if current.is_updating {
            return None;
        }
        current.is_updating = true;
        Some(Self {
            state: Rc::clone(state),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.state.borrow_mut().is_updating = false;
    }
}
