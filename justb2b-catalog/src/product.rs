use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Host-owned product identifier (the platform's integer post id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product types as the host reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Simple,
    Variable,
    Grouped,
    External,
}

/// Snapshot of a host product with the B2B attributes layered on.
///
/// `regular_price` and `sale_price` are tax-inclusive, as the host stores
/// them. `b2b_net_price` is the per-product tax-exclusive price maintained
/// by the merchant; absent or non-positive values mean the product has no
/// B2B price and sells at retail conditions for everyone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub product_type: ProductType,
    pub regular_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub b2b_net_price: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub in_stock: bool,
    pub category_ids: Vec<u64>,
}

impl Product {
    /// The B2B net price, when one actually applies.
    ///
    /// Only simple products carry net pricing; a zero or negative stored
    /// value counts as "not set".
    pub fn effective_net_b2b_price(&self) -> Option<Decimal> {
        if self.product_type != ProductType::Simple {
            return None;
        }
        match self.b2b_net_price {
            Some(net) if net > Decimal::ZERO => Some(net),
            _ => None,
        }
    }

    pub fn tax_rate_or_zero(&self) -> Decimal {
        self.tax_rate.unwrap_or(Decimal::ZERO)
    }

    /// The gross price the host would show: sale price when one is set,
    /// regular price otherwise.
    pub fn display_price_gross(&self) -> Option<Decimal> {
        self.sale_price.or(self.regular_price)
    }

    pub fn has_price(&self) -> bool {
        matches!(self.display_price_gross(), Some(p) if p > Decimal::ZERO)
    }

    pub fn shares_category_with(&self, other: &Product) -> bool {
        self.category_ids
            .iter()
            .any(|c| other.category_ids.contains(c))
    }
}

/// In-memory product index, fed from host snapshots.
pub struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
        }
    }

    pub fn upsert(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn simple_product(id: u64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Produkt {}", id),
            product_type: ProductType::Simple,
            regular_price: Some(dec!(123.00)),
            sale_price: None,
            b2b_net_price: Some(dec!(80.00)),
            tax_rate: Some(dec!(0.23)),
            in_stock: true,
            category_ids: vec![7],
        }
    }

    #[test]
    fn test_effective_net_requires_positive_value() {
        let mut product = simple_product(1);
        assert_eq!(product.effective_net_b2b_price(), Some(dec!(80.00)));

        product.b2b_net_price = Some(Decimal::ZERO);
        assert_eq!(product.effective_net_b2b_price(), None);

        product.b2b_net_price = None;
        assert_eq!(product.effective_net_b2b_price(), None);
    }

    #[test]
    fn test_effective_net_requires_simple_type() {
        let mut product = simple_product(1);
        product.product_type = ProductType::Variable;
        assert_eq!(product.effective_net_b2b_price(), None);
    }

    #[test]
    fn test_sale_price_wins_display() {
        let mut product = simple_product(1);
        product.sale_price = Some(dec!(99.00));
        assert_eq!(product.display_price_gross(), Some(dec!(99.00)));
    }

    #[test]
    fn test_shares_category() {
        let a = simple_product(1);
        let mut b = simple_product(2);
        assert!(a.shares_category_with(&b));
        b.category_ids = vec![9];
        assert!(!a.shares_category_with(&b));
    }

    #[test]
    fn test_catalog_upsert_replaces() {
        let mut catalog = Catalog::new();
        catalog.upsert(simple_product(1));
        let mut updated = simple_product(1);
        updated.in_stock = false;
        catalog.upsert(updated);

        assert_eq!(catalog.len(), 1);
        assert!(!catalog.get(ProductId(1)).unwrap().in_stock);
    }
}
