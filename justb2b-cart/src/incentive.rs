use crate::models::{Cart, CartLine, LineKey, LineKind};
use justb2b_catalog::product::ProductId;
use justb2b_core::app_config::IncentiveSettings;
use justb2b_core::customer::CustomerStatus;
use justb2b_core::money::{round_amount, Price, RoundingMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One free-sample tier with its label already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveTier {
    pub threshold_net: Decimal,
    pub sample_count: u32,
    pub label: String,
    pub sample_product_id: Option<ProductId>,
}

/// Default line label, e.g. `"Mix próbek, 5 próbek - przy zamówieniu 1000 zł"`.
pub fn default_label(sample_count: u32, threshold_net: Decimal) -> String {
    format!(
        "Mix próbek, {} próbek - przy zamówieniu {} zł",
        sample_count,
        threshold_net.normalize()
    )
}

/// Tier table ordered by threshold. The highest threshold the net subtotal
/// reaches wins; thresholds are inclusive lower bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveTable {
    tiers: Vec<IncentiveTier>,
}

impl IncentiveTable {
    pub fn new(mut tiers: Vec<IncentiveTier>) -> Self {
        tiers.sort_by(|a, b| a.threshold_net.cmp(&b.threshold_net));
        Self { tiers }
    }

    pub fn from_settings(settings: &IncentiveSettings) -> Self {
        let tiers = settings
            .tiers
            .iter()
            .map(|t| IncentiveTier {
                threshold_net: t.threshold_net,
                sample_count: t.sample_count,
                label: t
                    .label
                    .clone()
                    .unwrap_or_else(|| default_label(t.sample_count, t.threshold_net)),
                sample_product_id: t.sample_product_id.map(ProductId),
            })
            .collect();
        Self::new(tiers)
    }

    pub fn select(&self, net_subtotal: Decimal) -> Option<&IncentiveTier> {
        self.tiers
            .iter()
            .rev()
            .find(|t| t.threshold_net <= net_subtotal)
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// What the reconciler did to the incentive line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveAdjustment {
    Unchanged,
    Inserted,
    Replaced,
    QuantityPinned,
    Removed,
}

/// Keeps the cart's incentive line consistent with the tier the customer
/// has earned.
pub struct IncentiveReconciler {
    table: IncentiveTable,
    sample_price: Price,
}

impl IncentiveReconciler {
    pub fn new(table: IncentiveTable, sample_unit_price: Decimal, rounding: RoundingMode) -> Self {
        let amount = round_amount(sample_unit_price, rounding);
        Self {
            table,
            // Samples are flat-priced; no tax applies to the line.
            sample_price: Price {
                net: amount,
                gross: amount,
            },
        }
    }

    pub fn from_settings(settings: &IncentiveSettings, rounding: RoundingMode) -> Self {
        Self::new(
            IncentiveTable::from_settings(settings),
            settings.sample_unit_price,
            rounding,
        )
    }

    /// Bring the cart to the state the tier table dictates: exactly one
    /// incentive line at quantity 1 when a tier is earned, none otherwise.
    /// Non-accepted carts never carry an incentive line, so a stale one
    /// left over from a status change is dropped here too.
    pub fn reconcile(&self, cart: &mut Cart, status: CustomerStatus) -> IncentiveAdjustment {
        if !status.is_b2b_accepted() {
            return self.clear(cart);
        }

        let subtotal = cart.customer_net_subtotal();
        let Some(tier) = self.table.select(subtotal) else {
            return self.clear(cart);
        };

        let wanted = LineKind::Incentive {
            product_id: tier.sample_product_id,
            sample_count: tier.sample_count,
            label: tier.label.clone(),
        };

        let mut matching: Option<LineKey> = None;
        let mut stale: Vec<LineKey> = Vec::new();
        for line in cart.lines.iter().filter(|l| l.is_incentive()) {
            if matching.is_none() && line.kind == wanted {
                matching = Some(line.key);
            } else {
                stale.push(line.key);
            }
        }
        let had_stale = !stale.is_empty();
        for key in stale {
            cart.remove(key);
        }

        match matching {
            Some(key) => {
                let line = cart
                    .lines
                    .iter_mut()
                    .find(|l| l.key == key)
                    .filter(|l| l.quantity != 1);
                match line {
                    Some(line) => {
                        debug!(sample_count = tier.sample_count, "incentive quantity pinned back to 1");
                        line.quantity = 1;
                        IncentiveAdjustment::QuantityPinned
                    }
                    None if had_stale => IncentiveAdjustment::Replaced,
                    None => IncentiveAdjustment::Unchanged,
                }
            }
            None => {
                cart.lines.push(CartLine {
                    key: LineKey::generate(),
                    kind: wanted,
                    quantity: 1,
                    unit_price: self.sample_price,
                });
                info!(
                    sample_count = tier.sample_count,
                    threshold = %tier.threshold_net,
                    "incentive line added"
                );
                if had_stale {
                    IncentiveAdjustment::Replaced
                } else {
                    IncentiveAdjustment::Inserted
                }
            }
        }
    }

    fn clear(&self, cart: &mut Cart) -> IncentiveAdjustment {
        let before = cart.len();
        cart.lines.retain(|l| !l.is_incentive());
        if cart.len() != before {
            info!("incentive line removed");
            IncentiveAdjustment::Removed
        } else {
            IncentiveAdjustment::Unchanged
        }
    }
}
