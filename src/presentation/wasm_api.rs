use futures::FutureExt;
use gloo::utils::format::JsValueSerdeExt;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::application::{
    DashboardConfig, DashboardView, HttpSource, PollerHandle, Scheduler, live_data_poller,
    load_fixing_cards,
};
use crate::domain::{
    errors::ConfigError,
    logging::{LogComponent, TimeProvider},
};
use crate::infrastructure::{BrowserScheduler, BrowserTimeProvider, DomDashboardView, GlooHttpSource};
use crate::log_info;

thread_local! {
    /// Running pollers by handle id. Timers live here, not in the JS
    /// wrapper, so collecting the wrapper leaves polling untouched.
    static RUNNING: RefCell<HashMap<u32, PollerHandle>> = RefCell::new(HashMap::new());
    static NEXT_ID: Cell<u32> = const { Cell::new(0) };
}

/// JS handle of a running dashboard.
///
/// Only `stop()` ends polling; dropping or `free()`-ing the handle does not.
#[wasm_bindgen]
pub struct DashboardHandle {
    id: u32,
}

impl DashboardHandle {
    /// Park a started poller in the registry and hand out its key.
    pub fn track(live: PollerHandle) -> Self {
        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id.wrapping_add(1));
            id
        });
        RUNNING.with(|running| running.borrow_mut().insert(id, live));
        Self { id }
    }
}

#[wasm_bindgen]
impl DashboardHandle {
    /// Cancel the refresh and clock timers.
    pub fn stop(&mut self) {
        let live = RUNNING.with(|running| running.borrow_mut().remove(&self.id));
        if let Some(mut live) = live {
            live.stop();
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        RUNNING.with(|running| {
            running
                .borrow()
                .get(&self.id)
                .is_some_and(PollerHandle::is_running)
        })
    }
}

/// Parse `startDashboard` options; `undefined` and `null` mean defaults.
pub fn parse_options(options: &JsValue) -> Result<DashboardConfig, ConfigError> {
    if options.is_undefined() || options.is_null() {
        return Ok(DashboardConfig::default());
    }
    let config: DashboardConfig = options
        .into_serde()
        .map_err(|e| ConfigError::InvalidOptions(e.to_string()))?;
    config.poller.validate()?;
    Ok(config)
}

/// Start the live poller on `scheduler` and, unless disabled, load the
/// fixing cards once.
pub fn launch<V>(
    config: DashboardConfig,
    source: Rc<dyn HttpSource>,
    clock: Rc<dyn TimeProvider>,
    view: Rc<V>,
    scheduler: Rc<dyn Scheduler>,
) -> Result<DashboardHandle, ConfigError>
where
    V: DashboardView + 'static,
{
    let poller = live_data_poller(config.poller, Rc::clone(&source), clock, Rc::clone(&view))?;

    if config.load_fixings {
        scheduler.spawn(
            async move {
                load_fixing_cards(source.as_ref(), view.as_ref()).await;
            }
            .boxed_local(),
        );
    }

    Ok(DashboardHandle::track(poller.start(scheduler)))
}

#[wasm_bindgen(js_name = startDashboard)]
pub fn start_dashboard(options: JsValue) -> Result<DashboardHandle, JsValue> {
    let to_js = |e: ConfigError| JsValue::from_str(&e.to_string());
    let config = parse_options(&options).map_err(to_js)?;
    let source: Rc<dyn HttpSource> = Rc::new(GlooHttpSource::new(config.base_url.clone()));

    let handle = launch(
        config,
        source,
        Rc::new(BrowserTimeProvider::new()),
        Rc::new(DomDashboardView::new()),
        Rc::new(BrowserScheduler),
    )
    .map_err(to_js)?;

    log_info!(LogComponent::Presentation("WASM"), "🚀 Dashboard started");
    Ok(handle)
}
