pub mod display;
pub mod pricing;
pub mod product;
pub mod visibility;

pub use display::PriceBreakdown;
pub use pricing::PriceResolver;
pub use product::{Catalog, Product, ProductId, ProductType};
pub use visibility::{AccessDecision, CatalogFilter, Viewer};
