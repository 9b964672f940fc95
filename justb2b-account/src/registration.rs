use async_trait::async_trait;
use justb2b_core::app_config::RegistrationSettings;
use justb2b_core::customer::{CustomerId, CustomerStatus, StatusError};
use justb2b_core::pii::Masked;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

/// Customer record as mirrored from the host's user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAccount {
    pub id: CustomerId,
    pub display_name: String,
    pub username: String,
    pub email: Masked<String>,
    pub status: CustomerStatus,
}

/// Outgoing notification, ready for the host's mailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub id: Uuid,
    pub to: Masked<String>,
    pub subject: String,
    pub body: String,
}

/// Host-side mail delivery.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one message.
    async fn deliver(
        &self,
        message: EmailMessage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Send a message without letting delivery problems surface.
///
/// Registration must never fail because the mailer did; errors are
/// logged and dropped.
pub async fn dispatch_notification(sink: &dyn NotificationSink, message: EmailMessage) {
    let subject = message.subject.clone();
    if let Err(err) = sink.deliver(message).await {
        warn!(%subject, error = %err, "notification delivery failed");
    }
}

/// Drives the B2B application lifecycle: form submission puts a customer
/// under review, administrative approval unlocks B2B terms.
pub struct RegistrationManager {
    accounts: HashMap<CustomerId, CustomerAccount>,
    settings: RegistrationSettings,
}

impl RegistrationManager {
    pub fn new(settings: RegistrationSettings) -> Self {
        Self {
            accounts: HashMap::new(),
            settings,
        }
    }

    pub fn register_account(&mut self, account: CustomerAccount) {
        self.accounts.insert(account.id, account);
    }

    pub fn account(&self, id: CustomerId) -> Option<&CustomerAccount> {
        self.accounts.get(&id)
    }

    pub fn status(&self, id: CustomerId) -> Option<CustomerStatus> {
        self.accounts.get(&id).map(|a| a.status)
    }

    /// Handle a registration form submission.
    ///
    /// Only the configured B2B form counts; other forms are ignored. A
    /// repeat submission from a customer already under review (or already
    /// accepted) is a no-op, so the admin is not notified twice. Returns
    /// the admin notification to send.
    pub fn submit_application(
        &mut self,
        id: CustomerId,
        form_id: u64,
    ) -> Result<Option<EmailMessage>, RegistrationError> {
        if form_id != self.settings.b2b_form_id {
            return Ok(None);
        }
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(RegistrationError::UnknownCustomer(id))?;

        if account.status.is_b2b_pending() || account.status.is_b2b_accepted() {
            return Ok(None);
        }

        account.status = account.status.transition(CustomerStatus::B2bPending)?;
        info!(customer_id = %id, "B2B application submitted");

        let review_link = format!("{}{}", self.settings.review_url_base, id);
        let body = format!(
            "A new B2B account request has been submitted by {} ({}).\n\n\
             You can review and approve this request by visiting: {}",
            account.display_name,
            account.email.as_inner(),
            review_link
        );
        Ok(Some(EmailMessage {
            id: Uuid::new_v4(),
            to: Masked::new(self.settings.admin_email.clone()),
            subject: "New B2B Account Request".to_string(),
            body,
        }))
    }

    /// Approve a pending application.
    ///
    /// The customer notification fires only on the transition into the
    /// accepted status; approving an already-accepted account again sends
    /// nothing. Returns the customer notification to send.
    pub fn approve(&mut self, id: CustomerId) -> Result<Option<EmailMessage>, RegistrationError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(RegistrationError::UnknownCustomer(id))?;

        if account.status.is_b2b_accepted() {
            return Ok(None);
        }

        account.status = account.status.transition(CustomerStatus::B2bAccepted)?;
        info!(customer_id = %id, "B2B application approved");

        let body = format!(
            "Dziękujemy za dołączenie do panelu B2B.\n\n\
             Cieszymy się, że jesteś z nami.\n\n\
             W panelu B2B masz dostęp do pełnej oferty produktów, cen hurtowych, \
             nowości oraz funkcji dedykowanych naszym partnerom biznesowym.\n\n\
             Twoje dane logowania:\n\
             Nazwa użytkownika: {}\n\
             Zaloguj się tutaj: {}\n\
             Jeśli potrzebujesz zresetować hasło, odwiedź: {}\n\n\
             W razie pytań nasz zespół pozostaje do Twojej dyspozycji.\n\n\
             Życzymy udanych zakupów i owocnej współpracy.",
            account.username, self.settings.login_url, self.settings.password_reset_url
        );
        Ok(Some(EmailMessage {
            id: Uuid::new_v4(),
            to: account.email.clone(),
            subject: "Your B2B Account Has Been Approved".to_string(),
            body,
        }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Unknown customer: {0}")]
    UnknownCustomer(CustomerId),

    #[error("{0}")]
    Status(#[from] StatusError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn manager() -> RegistrationManager {
        let mut manager = RegistrationManager::new(RegistrationSettings {
            admin_email: "sklep@example.pl".to_string(),
            ..RegistrationSettings::default()
        });
        manager.register_account(CustomerAccount {
            id: CustomerId(42),
            display_name: "Anna Kowalska".to_string(),
            username: "akowalska".to_string(),
            email: Masked::new("anna@example.pl".to_string()),
            status: CustomerStatus::Guest,
        });
        manager
    }

    #[test]
    fn test_submission_moves_to_pending_and_notifies_admin() {
        let mut manager = manager();
        let mail = manager.submit_application(CustomerId(42), 1).unwrap().unwrap();

        assert_eq!(manager.status(CustomerId(42)), Some(CustomerStatus::B2bPending));
        assert_eq!(mail.to.as_inner(), "sklep@example.pl");
        assert_eq!(mail.subject, "New B2B Account Request");
        assert!(mail.body.contains("Anna Kowalska"));
        assert!(mail.body.contains("user-edit.php?user_id=42"));
    }

    #[test]
    fn test_other_forms_are_ignored() {
        let mut manager = manager();
        let mail = manager.submit_application(CustomerId(42), 7).unwrap();

        assert!(mail.is_none());
        assert_eq!(manager.status(CustomerId(42)), Some(CustomerStatus::Guest));
    }

    #[test]
    fn test_repeat_submission_sends_nothing() {
        let mut manager = manager();
        assert!(manager.submit_application(CustomerId(42), 1).unwrap().is_some());
        assert!(manager.submit_application(CustomerId(42), 1).unwrap().is_none());
    }

    #[test]
    fn test_unknown_customer_is_an_error() {
        let mut manager = manager();
        let result = manager.submit_application(CustomerId(999), 1);
        assert!(matches!(
            result,
            Err(RegistrationError::UnknownCustomer(CustomerId(999)))
        ));
    }

    #[test]
    fn test_approval_notifies_customer_once() {
        let mut manager = manager();
        manager.submit_application(CustomerId(42), 1).unwrap();

        let mail = manager.approve(CustomerId(42)).unwrap().unwrap();
        assert_eq!(manager.status(CustomerId(42)), Some(CustomerStatus::B2bAccepted));
        assert_eq!(mail.to.as_inner(), "anna@example.pl");
        assert!(mail.body.contains("Nazwa użytkownika: akowalska"));
        assert!(mail.body.contains("/moje-konto/"));

        // Re-saving an accepted account must not fire a second mail.
        assert!(manager.approve(CustomerId(42)).unwrap().is_none());
    }

    #[test]
    fn test_approval_requires_pending_application() {
        let mut manager = manager();
        let result = manager.approve(CustomerId(42));
        assert!(matches!(result, Err(RegistrationError::Status(_))));
    }

    struct RecordingSink {
        sent: Mutex<Vec<EmailMessage>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn deliver(
            &self,
            message: EmailMessage,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl NotificationSink for FailingSink {
        async fn deliver(
            &self,
            _message: EmailMessage,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("smtp unreachable".into())
        }
    }

    #[tokio::test]
    async fn test_dispatch_delivers_through_sink() {
        let sink = RecordingSink {
            sent: Mutex::new(Vec::new()),
        };
        let mut manager = manager();
        let mail = manager.submit_application(CustomerId(42), 1).unwrap().unwrap();

        dispatch_notification(&sink, mail).await;
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_swallows_delivery_failure() {
        let mut manager = manager();
        let mail = manager.submit_application(CustomerId(42), 1).unwrap().unwrap();

        // Must not panic or propagate.
        dispatch_notification(&FailingSink, mail).await;
        assert_eq!(manager.status(CustomerId(42)), Some(CustomerStatus::B2bPending));
    }
}
