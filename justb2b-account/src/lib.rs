pub mod billing;
pub mod nip;
pub mod registration;

pub use billing::{editable_billing_fields, pending_review_notice, BillingField, BusinessProfile};
pub use nip::{is_valid_nip, normalize_nip, parse_whitelist_address, CompanyAddress};
pub use registration::{
    dispatch_notification, CustomerAccount, EmailMessage, NotificationSink, RegistrationError,
    RegistrationManager,
};
