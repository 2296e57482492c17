//! DOM writes for the dashboard page.

use crate::application::ports::{DashboardView, StatusSink};
use crate::domain::{
    logging::LogComponent,
    market_data::{FixingCard, PriceDisplay, PricePoint, Symbol},
};
use crate::{log_debug, log_warn};
use gloo::utils::format::JsValueSerdeExt;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit, Element};

pub const STATUS_ELEMENT_ID: &str = "lastUpdate";
pub const CHART_UPDATE_EVENT: &str = "dashboard:chart-update";

/// Payload of the `dashboard:chart-update` event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartUpdateDetail {
    pub symbol: Symbol,
    pub labels: Vec<String>,
    pub closes: Vec<f64>,
}

impl ChartUpdateDetail {
    pub fn from_points(symbol: Symbol, points: &[PricePoint], label: impl Fn(&str) -> String) -> Self {
        Self {
            symbol,
            labels: points
                .iter()
                .map(|p| p.datetime.as_deref().map(&label).unwrap_or_default())
                .collect(),
            closes: points.iter().map(|p| p.close).collect(),
        }
    }
}

/// Writes into the elements of the server-rendered dashboard template.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomDashboardView;

impl DomDashboardView {
    pub fn new() -> Self {
        Self
    }

    fn element(id: &str) -> Option<Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    fn locale_time(datetime: &str) -> String {
        let date = js_sys::Date::new(&JsValue::from_str(datetime));
        String::from(date.to_locale_time_string("default"))
    }

    fn dispatch_chart_event(detail: &ChartUpdateDetail) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("Document not available"))?;
        let payload = JsValue::from_serde(detail).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let init = CustomEventInit::new();
        init.set_detail(&payload);
        let event = CustomEvent::new_with_event_init_dict(CHART_UPDATE_EVENT, &init)?;
        document.dispatch_event(&event)?;
        Ok(())
    }
}

impl StatusSink for DomDashboardView {
    fn set_status(&self, text: &str) {
        match Self::element(STATUS_ELEMENT_ID) {
            Some(element) => element.set_text_content(Some(text)),
            None => log_warn!(
                LogComponent::Infrastructure("UI"),
                "Status element '{}' not found in DOM",
                STATUS_ELEMENT_ID
            ),
        }
    }
}

impl DashboardView for DomDashboardView {
    fn update_chart(&self, symbol: Symbol, points: &[PricePoint]) {
        let detail = ChartUpdateDetail::from_points(symbol, points, Self::locale_time);
        if let Err(e) = Self::dispatch_chart_event(&detail) {
            log_warn!(
                LogComponent::Infrastructure("UI"),
                "Failed to publish {} chart update: {:?}",
                symbol,
                e
            );
        }
    }

    fn update_price(&self, symbol: Symbol, display: &PriceDisplay) {
        let Some(price_element) = Self::element(&symbol.price_element_id()) else {
            log_debug!(
                LogComponent::Infrastructure("UI"),
                "Price element for {} not found (optional)",
                symbol
            );
            return;
        };
        price_element.set_text_content(Some(&display.price_text));

        if let (Some(change), Some(change_element)) =
            (display.change, Self::element(&symbol.change_element_id()))
        {
            change_element.set_text_content(Some(&change.text()));
            change_element.set_class_name(change.direction.css_class());
        }
    }

    fn update_fixing_card(&self, card: FixingCard, html: &str) {
        match Self::element(card.element_id()) {
            Some(element) => element.set_inner_html(html),
            None => log_warn!(
                LogComponent::Infrastructure("UI"),
                "Fixing card '{}' not found in DOM",
                card.element_id()
            ),
        }
    }
}
