use justb2b_core::customer::CustomerStatus;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stand-down orders for a host-side dynamic pricing engine.
///
/// Accepted B2B customers buy at fixed net prices, so a discount engine
/// running over the same cart would fight the override pass. Each flag
/// tells the host adapter to switch off one of the engine's entry points;
/// `true` always means "stand down". The default leaves the engine
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressionDirectives {
    /// Master switch over the engine's rule calculations.
    pub suppress_rules: bool,
    /// Skip the engine's initial cart pass on page load.
    pub skip_cart_processing_on_load: bool,
    /// Skip the engine's reprocessing after cart totals settle.
    pub skip_reprocess_after_totals: bool,
    /// Keep the engine out of the checkout review refresh.
    pub disable_checkout_review_reprocess: bool,
    pub disable_ajax_strategy: bool,
    pub disable_rest_strategy: bool,
    pub disable_cron_strategy: bool,
    /// Stop the engine rewriting displayed price markup.
    pub skip_price_html_modification: bool,
}

impl SuppressionDirectives {
    /// Every entry point switched off.
    pub fn full() -> Self {
        Self {
            suppress_rules: true,
            skip_cart_processing_on_load: true,
            skip_reprocess_after_totals: true,
            disable_checkout_review_reprocess: true,
            disable_ajax_strategy: true,
            disable_rest_strategy: true,
            disable_cron_strategy: true,
            skip_price_html_modification: true,
        }
    }

    /// Directives for the current customer.
    ///
    /// Accepted B2B customers force full suppression. Everyone else gets
    /// `host` back unchanged, so merchant-configured engine behavior
    /// stays in charge of retail carts.
    pub fn for_status(status: CustomerStatus, host: Self) -> Self {
        if status.is_b2b_accepted() {
            debug!(status = %status, "suppressing dynamic pricing engine");
            Self::full()
        } else {
            host
        }
    }
}

/// Per-rule safety net under the master switch.
///
/// The engine asks before applying each individual rule. Accepted B2B
/// customers get an unconditional no; everyone else keeps the engine's
/// own verdict.
pub fn allow_rule(status: CustomerStatus, engine_allows: bool) -> bool {
    if status.is_b2b_accepted() {
        false
    } else {
        engine_allows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_forces_full_suppression() {
        let directives =
            SuppressionDirectives::for_status(CustomerStatus::B2bAccepted, SuppressionDirectives::default());
        assert_eq!(directives, SuppressionDirectives::full());
        assert!(directives.suppress_rules);
        assert!(directives.skip_price_html_modification);
    }

    #[test]
    fn test_host_values_pass_through_for_retail() {
        // The merchant already disabled the cron strategy on their own.
        let host = SuppressionDirectives {
            disable_cron_strategy: true,
            ..SuppressionDirectives::default()
        };

        for status in [
            CustomerStatus::Guest,
            CustomerStatus::B2c,
            CustomerStatus::B2bPending,
        ] {
            let directives = SuppressionDirectives::for_status(status, host);
            assert_eq!(directives, host);
            assert!(!directives.suppress_rules);
        }
    }

    #[test]
    fn test_rule_blocked_only_for_accepted() {
        assert!(!allow_rule(CustomerStatus::B2bAccepted, true));
        assert!(allow_rule(CustomerStatus::B2c, true));
        assert!(allow_rule(CustomerStatus::B2bPending, true));
        assert!(!allow_rule(CustomerStatus::Guest, false));
    }
}
