use crate::product::{Product, ProductId, ProductType};
use justb2b_core::customer::CustomerStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Who is looking at the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub status: CustomerStatus,
    pub is_admin: bool,
}

impl Viewer {
    pub fn new(status: CustomerStatus) -> Self {
        Self {
            status,
            is_admin: false,
        }
    }

    /// Shop staff; bypasses every visibility rule.
    pub fn admin() -> Self {
        Self {
            status: CustomerStatus::B2c,
            is_admin: true,
        }
    }

    pub fn sees_restricted(&self) -> bool {
        self.is_admin || self.status.is_b2b_accepted()
    }
}

/// Outcome of a direct product-page request.
///
/// Denied products read as not found, never as forbidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Granted,
    NotFound,
}

/// Gate for products reserved to accepted B2B customers.
pub struct CatalogFilter {
    restricted: HashSet<ProductId>,
}

impl CatalogFilter {
    pub fn new(restricted: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            restricted: restricted.into_iter().collect(),
        }
    }

    pub fn is_restricted(&self, id: ProductId) -> bool {
        self.restricted.contains(&id)
    }

    pub fn allows(&self, viewer: &Viewer, id: ProductId) -> bool {
        !self.is_restricted(id) || viewer.sees_restricted()
    }

    pub fn access(&self, viewer: &Viewer, id: ProductId) -> AccessDecision {
        if self.allows(viewer, id) {
            AccessDecision::Granted
        } else {
            debug!(product_id = %id, status = %viewer.status, "restricted product hidden");
            AccessDecision::NotFound
        }
    }

    /// Subtract restricted ids from a host-supplied listing.
    ///
    /// Ids the catalog does not know pass through untouched; only
    /// membership in the restricted set removes an id.
    pub fn filter_ids(&self, viewer: &Viewer, ids: &[ProductId]) -> Vec<ProductId> {
        ids.iter()
            .copied()
            .filter(|id| self.allows(viewer, *id))
            .collect()
    }

    /// Baseline every product-feed listing applies before B2B rules:
    /// in stock, carrying a price, and of simple type.
    pub fn listing_baseline(product: &Product) -> bool {
        product.in_stock && product.has_price() && product.product_type == ProductType::Simple
    }

    pub fn visible_in_listing(&self, viewer: &Viewer, product: &Product) -> bool {
        Self::listing_baseline(product) && self.allows(viewer, product.id)
    }
}
