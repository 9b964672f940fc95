use crate::models::Cart;
use justb2b_core::app_config::ShippingSettings;
use justb2b_core::customer::CustomerStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One candidate shipping rate as the host presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub id: String,
    pub label: String,
    pub cost: Decimal,
}

/// Free-shipping adjustment over the host's candidate rates.
pub struct ShippingPolicy<'a> {
    settings: &'a ShippingSettings,
}

impl<'a> ShippingPolicy<'a> {
    pub fn new(settings: &'a ShippingSettings) -> Self {
        Self { settings }
    }

    /// Gross order value this customer must reach for free shipping.
    pub fn free_threshold(&self, status: CustomerStatus) -> Decimal {
        if status.is_b2b_accepted() {
            self.settings.b2b_free_threshold
        } else {
            self.settings.standard_free_threshold
        }
    }

    /// Zero the cost of every rate whose label contains the configured
    /// carrier pattern (case-insensitive) once the gross subtotal reaches
    /// the threshold. Other rates pass through untouched.
    pub fn adjust(
        &self,
        cart: &Cart,
        status: CustomerStatus,
        mut rates: Vec<ShippingRate>,
    ) -> Vec<ShippingRate> {
        let subtotal = cart.gross_subtotal();
        if subtotal < self.free_threshold(status) {
            return rates;
        }

        let pattern = self.settings.free_carrier_pattern.to_lowercase();
        for rate in rates.iter_mut() {
            if rate.label.to_lowercase().contains(&pattern) {
                debug!(rate_id = %rate.id, %subtotal, "shipping rate zeroed");
                rate.cost = Decimal::ZERO;
            }
        }
        rates
    }
}
