pub mod incentive;
pub mod models;
pub mod payments;
pub mod pricing_pass;
pub mod recalc;
pub mod shipping;

pub use incentive::{IncentiveAdjustment, IncentiveReconciler, IncentiveTable, IncentiveTier};
pub use models::{Cart, CartLine, LineKey, LineKind};
pub use payments::{FeeLine, PaymentGateway, PaymentPolicy};
pub use recalc::{CartCalculator, CartTotals, RecalcGuard, RecalcOutcome};
pub use shipping::{ShippingPolicy, ShippingRate};
