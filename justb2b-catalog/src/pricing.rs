use crate::product::{Catalog, ProductId};
use justb2b_core::customer::CustomerStatus;
use justb2b_core::money::{Price, RoundingMode};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Resolves the price a given customer pays for a given product.
///
/// Accepted B2B customers with a per-product net price get that net price,
/// gross derived under the product's tax rate. Everyone else pays the
/// host's display price (sale price when set, regular price otherwise),
/// net backed out of it.
///
/// Resolutions are memoized, so a resolver instance is valid for one
/// customer within one calculation cycle. It must never be shared across
/// customers.
pub struct PriceResolver<'a> {
    catalog: &'a Catalog,
    status: CustomerStatus,
    rounding: RoundingMode,
    memo: HashMap<ProductId, Option<Price>>,
}

impl<'a> PriceResolver<'a> {
    pub fn new(catalog: &'a Catalog, status: CustomerStatus, rounding: RoundingMode) -> Self {
        Self {
            catalog,
            status,
            rounding,
            memo: HashMap::new(),
        }
    }

    pub fn status(&self) -> CustomerStatus {
        self.status
    }

    /// Price for `id`, or `None` when the product is unknown or carries no
    /// price at all.
    pub fn resolve(&mut self, id: ProductId) -> Option<Price> {
        if let Some(cached) = self.memo.get(&id) {
            return *cached;
        }
        let resolved = self.compute(id);
        self.memo.insert(id, resolved);
        resolved
    }

    /// The price to force onto a cart line, or `None` when the host price
    /// must stand.
    ///
    /// Only accepted B2B customers buying a product with an effective net
    /// price get an override; in every other case the host keeps control,
    /// so sale prices and third-party adjustments still apply.
    pub fn override_for_cart(&mut self, id: ProductId) -> Option<Price> {
        if !self.status.is_b2b_accepted() {
            return None;
        }
        let Some(product) = self.catalog.get(id) else {
            warn!(product_id = %id, "cart line product missing from catalog, host price kept");
            return None;
        };
        product.effective_net_b2b_price()?;
        self.resolve(id)
    }

    fn compute(&self, id: ProductId) -> Option<Price> {
        let product = self.catalog.get(id)?;
        let rate = product.tax_rate;

        if self.status.is_b2b_accepted() {
            if let Some(net) = product.effective_net_b2b_price() {
                debug!(product_id = %id, %net, "applying B2B net price");
                return Some(Price::from_net(net, rate, self.rounding));
            }
        }

        product
            .display_price_gross()
            .map(|gross| Price::from_gross(gross, rate, self.rounding))
    }
}
