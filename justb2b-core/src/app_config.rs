use crate::money::RoundingMode;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

/// Store-level settings. Every field has a shipped default, so a host that
/// provides no config files still gets the stock Polish-market behavior.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    pub currency_symbol: String,
    pub rounding: RoundingMode,
    pub incentive: IncentiveSettings,
    pub shipping: ShippingSettings,
    pub payments: PaymentSettings,
    pub registration: RegistrationSettings,
    pub cross_sell: CrossSellSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency_symbol: "zł".to_string(),
            rounding: RoundingMode::HalfUp,
            incentive: IncentiveSettings::default(),
            shipping: ShippingSettings::default(),
            payments: PaymentSettings::default(),
            registration: RegistrationSettings::default(),
            cross_sell: CrossSellSettings::default(),
        }
    }
}

/// One free-sample tier. Tiers are keyed by the net order subtotal the
/// customer must reach; the highest reached tier wins.
#[derive(Debug, Deserialize, Clone)]
pub struct IncentiveTierSetting {
    pub threshold_net: Decimal,
    pub sample_count: u32,
    /// Override for the generated line label.
    #[serde(default)]
    pub label: Option<String>,
    /// Host product backing the sample line, when the shop has one per tier.
    #[serde(default)]
    pub sample_product_id: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IncentiveSettings {
    pub tiers: Vec<IncentiveTierSetting>,
    /// Unit price carried by the sample line. Samples are free of charge.
    pub sample_unit_price: Decimal,
}

impl Default for IncentiveSettings {
    fn default() -> Self {
        let tier = |threshold: u32, count: u32| IncentiveTierSetting {
            threshold_net: Decimal::from(threshold),
            sample_count: count,
            label: None,
            sample_product_id: None,
        };
        IncentiveSettings {
            tiers: vec![
                tier(1000, 5),
                tier(2000, 10),
                tier(3000, 15),
                tier(5000, 20),
            ],
            sample_unit_price: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ShippingSettings {
    /// Gross order value at which accepted B2B customers ship free.
    pub b2b_free_threshold: Decimal,
    /// Gross order value at which everyone else ships free.
    pub standard_free_threshold: Decimal,
    /// Case-insensitive substring matched against rate labels when the
    /// threshold is reached.
    pub free_carrier_pattern: String,
}

impl Default for ShippingSettings {
    fn default() -> Self {
        ShippingSettings {
            b2b_free_threshold: Decimal::from(1000),
            standard_free_threshold: Decimal::from(600),
            free_carrier_pattern: "inpost".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PaymentSettings {
    /// Gateway id offered exclusively to accepted B2B customers.
    pub b2b_only_gateway: String,
    /// Title the B2B-only gateway is shown under.
    pub b2b_gateway_title: String,
    /// Per-gateway order surcharge, keyed by gateway id.
    pub surcharges: HashMap<String, Decimal>,
    pub surcharge_label: String,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        let mut surcharges = HashMap::new();
        surcharges.insert("cod".to_string(), Decimal::new(500, 2));
        PaymentSettings {
            b2b_only_gateway: "bacs".to_string(),
            b2b_gateway_title: "Przelew bankowy z terminem 14 dni".to_string(),
            surcharges,
            surcharge_label: "Opłata za pobranie".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RegistrationSettings {
    /// Host form id treated as the B2B application form.
    pub b2b_form_id: u64,
    /// Recipient of the "new application" notification.
    pub admin_email: String,
    /// The applicant's user id is appended to build the review link.
    pub review_url_base: String,
    pub login_url: String,
    pub password_reset_url: String,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        RegistrationSettings {
            b2b_form_id: 1,
            admin_email: String::new(),
            review_url_base: "/wp-admin/user-edit.php?user_id=".to_string(),
            login_url: "/moje-konto/".to_string(),
            password_reset_url: "/moje-konto/lost-password/".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CrossSellSettings {
    /// How many companion products the cart popup suggests.
    pub limit: usize,
}

impl Default for CrossSellSettings {
    fn default() -> Self {
        CrossSellSettings { limit: 3 }
    }
}

impl Settings {
    /// Layered load: shipped defaults, then `config/default`, the
    /// `RUN_MODE` file and `config/local`, then `JUSTB2B__*` env vars.
    /// Every file source is optional since hosts usually embed us with
    /// defaults only.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        tracing::debug!(%run_mode, "loading layered settings");

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("JUSTB2B").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
