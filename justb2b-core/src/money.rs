use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All customer-facing amounts are rounded to two decimal places.
pub const PRICE_SCALE: u32 = 2;

/// Half-up is the merchant-facing default; half-even is available for
/// stores that reconcile against banking exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    #[default]
    HalfUp,
    HalfEven,
}

impl RoundingMode {
    fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Round `amount` to price scale under the given mode.
pub fn round_amount(amount: Decimal, mode: RoundingMode) -> Decimal {
    amount.round_dp_with_strategy(PRICE_SCALE, mode.strategy())
}

/// Gross amount for a tax-exclusive `net` under `tax_rate` (e.g. 0.23).
///
/// A missing or zero rate leaves the amount unchanged apart from rounding.
pub fn gross_from_net(net: Decimal, tax_rate: Option<Decimal>, mode: RoundingMode) -> Decimal {
    match tax_rate {
        Some(rate) if !rate.is_zero() => round_amount(net * (Decimal::ONE + rate), mode),
        _ => round_amount(net, mode),
    }
}

/// Net amount backed out of a tax-inclusive `gross` under `tax_rate`.
pub fn net_from_gross(gross: Decimal, tax_rate: Option<Decimal>, mode: RoundingMode) -> Decimal {
    match tax_rate {
        Some(rate) if !rate.is_zero() => round_amount(gross / (Decimal::ONE + rate), mode),
        _ => round_amount(gross, mode),
    }
}

/// A resolved unit price carrying both tax-exclusive and tax-inclusive
/// amounts, each already rounded to price scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub net: Decimal,
    pub gross: Decimal,
}

impl Price {
    /// Build from a net amount, deriving gross under the product's rate.
    pub fn from_net(net: Decimal, tax_rate: Option<Decimal>, mode: RoundingMode) -> Self {
        Price {
            net: round_amount(net, mode),
            gross: gross_from_net(net, tax_rate, mode),
        }
    }

    /// Build from a gross amount, deriving net under the product's rate.
    pub fn from_gross(gross: Decimal, tax_rate: Option<Decimal>, mode: RoundingMode) -> Self {
        Price {
            net: net_from_gross(gross, tax_rate, mode),
            gross: round_amount(gross, mode),
        }
    }

    pub fn zero() -> Self {
        Price {
            net: Decimal::ZERO,
            gross: Decimal::ZERO,
        }
    }
}

/// Render an amount with the store currency symbol, e.g. `"123.00 zł"`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    format!("{:.2} {}", amount, symbol)
}
