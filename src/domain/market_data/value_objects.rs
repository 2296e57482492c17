use serde::Serialize;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - tracked market symbol.
///
/// The lowercase name doubles as the JSON key in the live-data payload and
/// as the prefix of the `{symbol}Price` / `{symbol}Change` element ids.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Vix,
    Dxy,
    EurUsd,
}

impl Symbol {
    /// Decimal places used when rendering the close price.
    pub fn price_precision(&self) -> usize {
        match self {
            Symbol::EurUsd => 5,
            Symbol::Vix | Symbol::Dxy => 2,
        }
    }

    pub fn price_element_id(&self) -> String {
        format!("{}Price", self.as_ref())
    }

    pub fn change_element_id(&self) -> String {
        format!("{}Change", self.as_ref())
    }
}

/// Value Object - one of the three fixing cards on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum FixingCard {
    LastFixing,
    LiveFixing,
    AdjustedRate,
}

impl FixingCard {
    /// Element id of the card body, e.g. `last-fixing`.
    pub fn element_id(&self) -> &str {
        self.as_ref()
    }

    /// Backend path serving the card's `{EUR, USD}` payload.
    pub fn endpoint(&self) -> String {
        format!("/admin/api/{}", self.as_ref())
    }
}

/// Direction of the intraday move, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
}

impl ChangeDirection {
    pub fn css_class(&self) -> &'static str {
        match self {
            ChangeDirection::Up => "price-change price-up",
            ChangeDirection::Down => "price-change price-down",
        }
    }
}
