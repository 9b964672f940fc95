use justb2b_catalog::product::ProductId;
use justb2b_core::money::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session-scoped identifier for one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineKey(pub Uuid);

impl LineKey {
    pub fn generate() -> Self {
        LineKey(Uuid::new_v4())
    }
}

/// What a cart line represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineKind {
    /// A product the customer put in the cart.
    Product { product_id: ProductId },
    /// The free-sample line the reconciler manages. Customers cannot
    /// remove it or change its quantity.
    Incentive {
        /// Host product backing the line, when the shop has one.
        product_id: Option<ProductId>,
        sample_count: u32,
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: LineKey,
    pub kind: LineKind,
    pub quantity: u32,
    pub unit_price: Price,
}

impl CartLine {
    pub fn product(product_id: ProductId, quantity: u32, unit_price: Price) -> Self {
        CartLine {
            key: LineKey::generate(),
            kind: LineKind::Product { product_id },
            quantity,
            unit_price,
        }
    }

    pub fn is_incentive(&self) -> bool {
        matches!(self.kind, LineKind::Incentive { .. })
    }

    pub fn product_id(&self) -> Option<ProductId> {
        match &self.kind {
            LineKind::Product { product_id } => Some(*product_id),
            LineKind::Incentive { product_id, .. } => *product_id,
        }
    }

    pub fn line_net(&self) -> Decimal {
        self.unit_price.net * Decimal::from(self.quantity)
    }

    pub fn line_gross(&self) -> Decimal {
        self.unit_price.gross * Decimal::from(self.quantity)
    }

    pub fn user_can_remove(&self) -> bool {
        !self.is_incentive()
    }

    pub fn user_can_change_quantity(&self) -> bool {
        !self.is_incentive()
    }
}

/// One customer's cart. One cart belongs to one session; there is no
/// concurrent mutation to guard against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    pub fn add_product(&mut self, product_id: ProductId, quantity: u32, unit_price: Price) -> LineKey {
        let line = CartLine::product(product_id, quantity, unit_price);
        let key = line.key;
        self.lines.push(line);
        key
    }

    pub fn line(&self, key: LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.key == key)
    }

    pub fn remove(&mut self, key: LineKey) {
        self.lines.retain(|l| l.key != key);
    }

    pub fn incentive_line(&self) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.is_incentive())
    }

    /// Net value of what the customer actually put in the cart. This is
    /// the incentive tier basis, so the incentive line itself is excluded
    /// to keep the computation free of feedback.
    pub fn customer_net_subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|l| !l.is_incentive())
            .map(|l| l.line_net())
            .sum()
    }

    /// Net value over every line, incentive included.
    pub fn net_subtotal(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_net()).sum()
    }

    /// Gross value over every line; this is the free-shipping basis.
    pub fn gross_subtotal(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_gross()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
