use justb2b_core::customer::CustomerStatus;
use justb2b_core::pii::Masked;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Checkout billing fields under B2B management, with their host form
/// keys and the profile attributes backing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingField {
    FirstName,
    LastName,
    Company,
    Address1,
    Address2,
    Country,
    State,
    City,
    Postcode,
    Phone,
    Email,
    Invoice,
    Nip,
}

impl BillingField {
    pub const ALL: [BillingField; 13] = [
        BillingField::FirstName,
        BillingField::LastName,
        BillingField::Company,
        BillingField::Address1,
        BillingField::Address2,
        BillingField::Country,
        BillingField::State,
        BillingField::City,
        BillingField::Postcode,
        BillingField::Phone,
        BillingField::Email,
        BillingField::Invoice,
        BillingField::Nip,
    ];

    /// The host's checkout form key.
    pub fn host_key(&self) -> &'static str {
        match self {
            BillingField::FirstName => "billing_first_name",
            BillingField::LastName => "billing_last_name",
            BillingField::Company => "billing_company",
            BillingField::Address1 => "billing_address_1",
            BillingField::Address2 => "billing_address_2",
            BillingField::Country => "billing_country",
            BillingField::State => "billing_state",
            BillingField::City => "billing_city",
            BillingField::Postcode => "billing_postcode",
            BillingField::Phone => "billing_phone",
            BillingField::Email => "billing_email",
            BillingField::Invoice => "billing_faktura",
            BillingField::Nip => "billing_nip",
        }
    }

    /// The attribute key the profile is stored under.
    pub fn profile_key(&self) -> &'static str {
        match self {
            BillingField::FirstName => "justb2b_firstname",
            BillingField::LastName => "justb2b_lastname",
            BillingField::Company => "justb2b_company",
            BillingField::Address1 => "justb2b_address_1",
            BillingField::Address2 => "justb2b_address_2",
            BillingField::Country => "justb2b_country",
            BillingField::State => "justb2b_state",
            BillingField::City => "justb2b_city",
            BillingField::Postcode => "justb2b_postcode",
            BillingField::Phone => "justb2b_phone",
            BillingField::Email => "email",
            BillingField::Invoice => "justb2b_invoice",
            BillingField::Nip => "justb2b_nip",
        }
    }

    pub fn from_host_key(key: &str) -> Option<Self> {
        BillingField::ALL.iter().copied().find(|f| f.host_key() == key)
    }
}

/// The business billing data kept on the customer's account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub phone: Option<Masked<String>>,
    pub email: Option<Masked<String>>,
    pub invoice: bool,
    pub nip: Option<Masked<String>>,
}

impl BusinessProfile {
    pub fn value_for(&self, field: BillingField) -> Option<&str> {
        match field {
            BillingField::FirstName => self.first_name.as_deref(),
            BillingField::LastName => self.last_name.as_deref(),
            BillingField::Company => self.company.as_deref(),
            BillingField::Address1 => self.address_1.as_deref(),
            BillingField::Address2 => self.address_2.as_deref(),
            BillingField::Country => self.country.as_deref(),
            BillingField::State => self.state.as_deref(),
            BillingField::City => self.city.as_deref(),
            BillingField::Postcode => self.postcode.as_deref(),
            BillingField::Phone => self.phone.as_ref().map(|m| m.as_inner().as_str()),
            BillingField::Email => self.email.as_ref().map(|m| m.as_inner().as_str()),
            BillingField::Invoice => {
                if self.invoice {
                    Some("1")
                } else {
                    None
                }
            }
            BillingField::Nip => self.nip.as_ref().map(|m| m.as_inner().as_str()),
        }
    }

    /// Replace posted checkout billing data with the stored profile.
    ///
    /// Accepted customers cannot order under ad-hoc billing details:
    /// every stored non-empty value wins over what was posted, and the
    /// invoice flag is forced on. Other statuses keep their posted data.
    pub fn apply_checkout_override(
        &self,
        status: CustomerStatus,
        mut posted: HashMap<String, String>,
    ) -> HashMap<String, String> {
        if !status.is_b2b_accepted() {
            return posted;
        }
        for field in BillingField::ALL {
            if let Some(value) = self.value_for(field) {
                if !value.is_empty() {
                    posted.insert(field.host_key().to_string(), value.to_string());
                }
            }
        }
        posted.insert(BillingField::Invoice.host_key().to_string(), "1".to_string());
        posted
    }

    /// Default value for a checkout input while the application is under
    /// review. Pending customers still type their own data; stored values
    /// only prefill.
    pub fn prefill_value(&self, status: CustomerStatus, host_key: &str) -> Option<String> {
        if !status.is_b2b_pending() {
            return None;
        }
        let field = BillingField::from_host_key(host_key)?;
        self.value_for(field)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Accepted customers may only edit their billing country; the rest of
/// the address comes from the managed profile.
pub fn editable_billing_fields(status: CustomerStatus, fields: Vec<String>) -> Vec<String> {
    if status.is_b2b_accepted() {
        fields
            .into_iter()
            .filter(|f| f == BillingField::Country.host_key())
            .collect()
    } else {
        fields
    }
}

/// Banner shown while the application is in review.
pub fn pending_review_notice(status: CustomerStatus) -> Option<&'static str> {
    if status.is_b2b_pending() {
        Some("Your business application is under review but meanwhile you can order as regular user.")
    } else {
        None
    }
}
