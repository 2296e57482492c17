use super::entities::PricePoint;
use super::value_objects::{ChangeDirection, Symbol};

/// Percent move from open to close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub percent: f64,
    pub direction: ChangeDirection,
}

impl PriceChange {
    /// `None` when the point has no usable open price.
    pub fn from_point(point: &PricePoint) -> Option<Self> {
        let open = point.open.filter(|open| *open != 0.0 && open.is_finite())?;
        let percent = (point.close - open) / open * 100.0;
        let direction = if percent >= 0.0 {
            ChangeDirection::Up
        } else {
            ChangeDirection::Down
        };
        Some(Self { percent, direction })
    }

    /// Signed, two decimals, percent suffix: `+2.78%`, `-0.07%`.
    pub fn text(&self) -> String {
        format!("{:+.2}%", nudge_exact_half(self.percent, 2))
    }
}

/// Everything the price card shows for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDisplay {
    pub price_text: String,
    pub change: Option<PriceChange>,
}

impl PriceDisplay {
    pub fn from_point(symbol: Symbol, point: &PricePoint) -> Self {
        Self {
            price_text: to_fixed(point.close, symbol.price_precision()),
            change: PriceChange::from_point(point),
        }
    }
}

/// Fixed-point text where an exact half rounds away from zero: `104.125`
/// gives `104.13`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, nudge_exact_half(value, digits))
}

/// `{:.N}` breaks exact ties to even. A value is an exact tie at `digits`
/// decimals iff `|value| * 2^(digits + 1)` is an odd integer; ties move one
/// ulp away from zero, everything else is returned unchanged.
fn nudge_exact_half(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let scaled = value.abs() * 2f64.powi(digits as i32 + 1);
    if scaled.fract() == 0.0 && scaled % 2.0 == 1.0 {
        f64::from_bits(value.to_bits() + 1)
    } else {
        value
    }
}
