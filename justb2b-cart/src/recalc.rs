use crate::incentive::{IncentiveAdjustment, IncentiveReconciler};
use crate::models::Cart;
use crate::pricing_pass::apply_price_overrides;
use justb2b_catalog::pricing::PriceResolver;
use justb2b_catalog::product::Catalog;
use justb2b_core::app_config::Settings;
use justb2b_core::customer::CustomerStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Caps how often totals may be recomputed within one calculation cycle.
///
/// Pinning quantities and swapping the incentive line re-trigger the
/// host's totals hook, which would re-enter us. The pipeline reaches its
/// fixed point within two passes; anything past that is the recursion
/// feeding itself and is skipped.
#[derive(Debug, Clone)]
pub struct RecalcGuard {
    passes: u32,
    max_passes: u32,
}

impl RecalcGuard {
    pub const DEFAULT_MAX_PASSES: u32 = 2;

    pub fn new() -> Self {
        Self::with_max_passes(Self::DEFAULT_MAX_PASSES)
    }

    pub fn with_max_passes(max_passes: u32) -> Self {
        Self {
            passes: 0,
            max_passes,
        }
    }

    /// Register a pass. `false` means the cap is spent and the caller
    /// must not recompute.
    pub fn begin(&mut self) -> bool {
        if self.passes >= self.max_passes {
            return false;
        }
        self.passes += 1;
        true
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn reset(&mut self) {
        self.passes = 0;
    }
}

impl Default for RecalcGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Tier basis: net value of customer-chosen lines only.
    pub customer_net_subtotal: Decimal,
    pub net_subtotal: Decimal,
    pub gross_subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecalcOutcome {
    /// The re-entrancy cap was hit; the cart is exactly as it was.
    Skipped,
    Completed {
        overridden_lines: usize,
        incentive: IncentiveAdjustment,
        totals: CartTotals,
    },
}

/// One customer's per-cycle calculation pipeline: price overrides, then
/// incentive reconciliation.
///
/// A calculator is built for one customer and must not be reused for
/// another, since resolved prices depend on the customer's status.
pub struct CartCalculator<'a> {
    catalog: &'a Catalog,
    settings: &'a Settings,
    status: CustomerStatus,
    reconciler: IncentiveReconciler,
    resolver: PriceResolver<'a>,
    guard: RecalcGuard,
}

impl<'a> CartCalculator<'a> {
    pub fn new(catalog: &'a Catalog, status: CustomerStatus, settings: &'a Settings) -> Self {
        Self {
            catalog,
            settings,
            status,
            reconciler: IncentiveReconciler::from_settings(&settings.incentive, settings.rounding),
            resolver: PriceResolver::new(catalog, status, settings.rounding),
            guard: RecalcGuard::new(),
        }
    }

    /// Start a fresh cycle: the pass cap rearms and cached price
    /// resolutions are dropped, so product edits made between requests
    /// are picked up.
    pub fn begin_cycle(&mut self) {
        self.guard.reset();
        self.resolver = PriceResolver::new(self.catalog, self.status, self.settings.rounding);
    }

    pub fn recalculate(&mut self, cart: &mut Cart) -> RecalcOutcome {
        if !self.guard.begin() {
            debug!(passes = self.guard.passes(), "recalculation re-entry skipped");
            return RecalcOutcome::Skipped;
        }

        let overridden_lines = apply_price_overrides(cart, &mut self.resolver);
        let incentive = self.reconciler.reconcile(cart, self.status);
        let totals = CartTotals {
            customer_net_subtotal: cart.customer_net_subtotal(),
            net_subtotal: cart.net_subtotal(),
            gross_subtotal: cart.gross_subtotal(),
        };

        info!(
            pass = self.guard.passes(),
            overridden_lines,
            ?incentive,
            customer_net = %totals.customer_net_subtotal,
            "cart recalculated"
        );

        RecalcOutcome::Completed {
            overridden_lines,
            incentive,
            totals,
        }
    }
}
