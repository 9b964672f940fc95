use justb2b_cart::Cart;
use justb2b_catalog::product::{Catalog, ProductId};
use justb2b_catalog::visibility::{CatalogFilter, Viewer};
use justb2b_core::app_config::Settings;
use justb2b_core::customer::CustomerStatus;
use justb2b_core::money::format_amount;

/// Product ids a table-style listing should render for `viewer`.
///
/// The table baseline keeps simple, in-stock, priced products; B2B
/// visibility then drops restricted ids for viewers without access.
/// Output is sorted by id so the feed renders stably.
pub fn table_product_ids(
    catalog: &Catalog,
    filter: &CatalogFilter,
    viewer: &Viewer,
) -> Vec<ProductId> {
    let mut ids: Vec<ProductId> = catalog
        .products()
        .filter(|p| filter.visible_in_listing(viewer, p))
        .map(|p| p.id)
        .collect();
    ids.sort();
    ids
}

/// Running cart total shown in the table header.
///
/// Accepted B2B customers see the net total marked "netto", since that is
/// the amount their sample tiers are measured in. Everyone else sees the
/// usual gross total.
pub fn cart_total_caption(cart: &Cart, status: CustomerStatus, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    if status.is_b2b_accepted() {
        format!("{} netto", format_amount(cart.net_subtotal(), symbol))
    } else {
        format_amount(cart.gross_subtotal(), symbol)
    }
}
