pub mod cross_sell;
pub mod dynamic_pricing;
pub mod product_table;

pub use cross_sell::CrossSellPicker;
pub use dynamic_pricing::{allow_rule, SuppressionDirectives};
pub use product_table::{cart_total_caption, table_product_ids};
