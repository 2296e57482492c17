use crate::application::config::PollerConfig;
use crate::application::poller::{Poller, PollerDeps};
use crate::application::ports::{DashboardView, HttpSource, StatusSink};
use crate::domain::{
    errors::{ConfigError, PollError},
    logging::{LogComponent, TimeProvider},
    market_data::{FixingCard, FixingRates, MarketSnapshot, PriceDisplay},
};
use crate::{log_debug, log_error, log_info};
use futures::future::join_all;
use std::rc::Rc;
use strum::IntoEnumIterator;

const COMPONENT: LogComponent = LogComponent::Application("Dashboard");

/// Push one snapshot to the view, symbol by symbol.
///
/// Each present, non-empty series updates its chart with every point and its
/// price card with the last point. Absent symbols leave their cards alone.
pub fn dispatch_snapshot(view: &dyn DashboardView, snapshot: &MarketSnapshot) {
    for (symbol, points) in snapshot.non_empty_series() {
        log_debug!(COMPONENT, "Updating {} chart with {} points", symbol, points.len());
        view.update_chart(symbol, points);
        if let Some(latest) = points.last() {
            view.update_price(symbol, &PriceDisplay::from_point(symbol, latest));
        }
    }
}

/// Poller for `/api/live-data` wired to a dashboard view.
pub fn live_data_poller<V>(
    config: PollerConfig,
    source: Rc<dyn HttpSource>,
    clock: Rc<dyn TimeProvider>,
    view: Rc<V>,
) -> Result<Poller<MarketSnapshot>, ConfigError>
where
    V: DashboardView + 'static,
{
    let status: Rc<dyn StatusSink> = view.clone();
    let deps = PollerDeps {
        source,
        clock,
        status,
    };
    Poller::new(
        config,
        deps,
        move |snapshot: MarketSnapshot| {
            log_debug!(
                COMPONENT,
                "📊 Received snapshot (server time {})",
                snapshot.timestamp().unwrap_or("n/a")
            );
            dispatch_snapshot(view.as_ref(), &snapshot);
        },
        |error: &PollError| {
            log_debug!(COMPONENT, "Keeping stale cards after failure: {}", error);
        },
    )
}

/// Fetch every fixing card once and render the ones that answer.
///
/// Returns how many cards were rendered; failed cards keep their content.
pub async fn load_fixing_cards(source: &dyn HttpSource, view: &dyn DashboardView) -> usize {
    let results = join_all(FixingCard::iter().map(|card| async move {
        let rates = fetch_fixing(source, card).await;
        (card, rates)
    }))
    .await;

    let mut rendered = 0;
    for (card, rates) in results {
        match rates {
            Ok(rates) => {
                view.update_fixing_card(card, &rates.to_card_html());
                rendered += 1;
            }
            Err(error) => {
                log_error!(COMPONENT, "❌ Failed to load {}: {}", card, error);
            }
        }
    }

    log_info!(COMPONENT, "Loaded {rendered} fixing cards");
    rendered
}

async fn fetch_fixing(source: &dyn HttpSource, card: FixingCard) -> Result<FixingRates, PollError> {
    let endpoint = card.endpoint();
    let body = source.get_text(&endpoint).await?;
    Ok(serde_json::from_str(&body)?)
}
