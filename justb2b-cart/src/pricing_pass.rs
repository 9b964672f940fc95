use crate::models::{Cart, LineKind};
use justb2b_catalog::pricing::PriceResolver;

/// Force resolved net prices onto the cart's product lines.
///
/// Only lines the resolver claims are touched; everything else keeps the
/// host price, so sale prices and third-party adjustments stay in effect
/// for customers outside the net-pricing program. Lines whose product has
/// vanished from the catalog are skipped, never failed.
pub fn apply_price_overrides(cart: &mut Cart, resolver: &mut PriceResolver<'_>) -> usize {
    let mut overridden = 0;
    for line in cart.lines.iter_mut() {
        let LineKind::Product { product_id } = &line.kind else {
            continue;
        };
        if let Some(price) = resolver.override_for_cart(*product_id) {
            line.unit_price = price;
            overridden += 1;
        }
    }
    overridden
}
