use crate::product::Product;
use justb2b_core::customer::CustomerStatus;
use justb2b_core::money::{format_amount, Price, RoundingMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net/gross pair shown in the B2B block on a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub net: Decimal,
    pub gross: Decimal,
    /// Tax rate as a percentage (`23.00` for a 0.23 rate). Absent when the
    /// product is untaxed, which also drops the VAT note.
    pub vat_percent: Option<Decimal>,
}

impl PriceBreakdown {
    /// Breakdown for the product page, or `None` when the block is not
    /// shown: the viewer is not an accepted B2B customer, or the product
    /// has no effective net price.
    pub fn for_product(
        product: &Product,
        status: CustomerStatus,
        rounding: RoundingMode,
    ) -> Option<Self> {
        if !status.is_b2b_accepted() {
            return None;
        }
        let net = product.effective_net_b2b_price()?;
        let price = Price::from_net(net, product.tax_rate, rounding);
        let rate = product.tax_rate_or_zero();

        Some(PriceBreakdown {
            net: price.net,
            gross: price.gross,
            vat_percent: if rate > Decimal::ZERO {
                Some(rate * Decimal::ONE_HUNDRED)
            } else {
                None
            },
        })
    }

    pub fn format_net(&self, symbol: &str) -> String {
        format_amount(self.net, symbol)
    }

    pub fn format_gross(&self, symbol: &str) -> String {
        format_amount(self.gross, symbol)
    }

    /// The small print next to the gross amount, e.g. `"incl. 23.00% VAT"`.
    pub fn vat_note(&self) -> Option<String> {
        self.vat_percent
            .map(|percent| format!("incl. {:.2}% VAT", percent))
    }
}
