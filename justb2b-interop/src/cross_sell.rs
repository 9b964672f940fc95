use justb2b_cart::Cart;
use justb2b_catalog::product::{Catalog, ProductId};
use justb2b_catalog::visibility::{CatalogFilter, Viewer};
use justb2b_core::app_config::CrossSellSettings;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Picks companion products for the "added to cart" popup.
pub struct CrossSellPicker<'a> {
    catalog: &'a Catalog,
    filter: &'a CatalogFilter,
    limit: usize,
}

impl<'a> CrossSellPicker<'a> {
    pub fn new(catalog: &'a Catalog, filter: &'a CatalogFilter, settings: &CrossSellSettings) -> Self {
        Self {
            catalog,
            filter,
            limit: settings.limit,
        }
    }

    /// Companions for the product just added to the cart.
    ///
    /// Candidates share a category with the added product, are in stock,
    /// visible to the viewer, and not already in the cart. Up to the
    /// configured limit are drawn at random.
    pub fn pick(&self, added: ProductId, cart: &Cart, viewer: &Viewer) -> Vec<ProductId> {
        self.pick_with(added, cart, viewer, &mut rand::thread_rng())
    }

    /// `pick` with a caller-supplied randomness source.
    pub fn pick_with<R: Rng>(
        &self,
        added: ProductId,
        cart: &Cart,
        viewer: &Viewer,
        rng: &mut R,
    ) -> Vec<ProductId> {
        let Some(anchor) = self.catalog.get(added) else {
            return Vec::new();
        };

        let in_cart: Vec<ProductId> = cart.lines.iter().filter_map(|l| l.product_id()).collect();

        let mut candidates: Vec<ProductId> = self
            .catalog
            .products()
            .filter(|p| p.id != added)
            .filter(|p| p.in_stock)
            .filter(|p| p.shares_category_with(anchor))
            .filter(|p| !in_cart.contains(&p.id))
            .filter(|p| self.filter.allows(viewer, p.id))
            .map(|p| p.id)
            .collect();

        // Catalog iteration order is arbitrary; sort first so the draw
        // depends only on the rng.
        candidates.sort();
        candidates.shuffle(rng);
        candidates.truncate(self.limit);

        debug!(added = %added, suggested = candidates.len(), "cross-sell selection");
        candidates
    }
}
