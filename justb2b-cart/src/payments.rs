use justb2b_core::app_config::PaymentSettings;
use justb2b_core::customer::CustomerStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Payment gateway entry as the host lists it at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentGateway {
    pub id: String,
    pub title: String,
}

/// Extra order fee to hand back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLine {
    pub label: String,
    pub amount: Decimal,
}

/// Gateway availability, surcharges and the coupon switch.
pub struct PaymentPolicy<'a> {
    settings: &'a PaymentSettings,
}

impl<'a> PaymentPolicy<'a> {
    pub fn new(settings: &'a PaymentSettings) -> Self {
        Self { settings }
    }

    /// The B2B-only gateway is withheld from everyone else; accepted
    /// customers see it under the deferred-payment title.
    pub fn available_gateways(
        &self,
        status: CustomerStatus,
        gateways: Vec<PaymentGateway>,
    ) -> Vec<PaymentGateway> {
        gateways
            .into_iter()
            .filter_map(|mut gateway| {
                if gateway.id == self.settings.b2b_only_gateway {
                    if status.is_b2b_accepted() {
                        gateway.title = self.settings.b2b_gateway_title.clone();
                    } else {
                        debug!(gateway = %gateway.id, "gateway withheld from non-B2B checkout");
                        return None;
                    }
                }
                Some(gateway)
            })
            .collect()
    }

    /// Fee charged for the selected gateway, from the configured table.
    pub fn surcharge(&self, selected_gateway: &str) -> Option<FeeLine> {
        self.settings
            .surcharges
            .get(selected_gateway)
            .map(|amount| FeeLine {
                label: self.settings.surcharge_label.clone(),
                amount: *amount,
            })
    }

    /// Coupon redemption switch. Accepted B2B customers buy at net
    /// conditions and never stack coupons on top; everyone else keeps
    /// whatever the host decided.
    pub fn coupons_enabled(&self, status: CustomerStatus, host_default: bool) -> bool {
        if status.is_b2b_accepted() {
            false
        } else {
            host_default
        }
    }
}
