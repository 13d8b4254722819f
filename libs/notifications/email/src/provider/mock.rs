//! In-memory provider that records what would have been sent

use super::{EmailProvider, SendResult};
use crate::models::Email;
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Clones share the same outbox.
#[derive(Clone, Default)]
pub struct MockSmtpProvider {
    sent_emails: Arc<Mutex<Vec<Email>>>,
    failure_message: Option<String>,
}

impl MockSmtpProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every send fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent_emails: Arc::default(),
            failure_message: Some(message.into()),
        }
    }

    pub async fn sent_emails(&self) -> Vec<Email> {
        self.sent_emails.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent_emails.lock().await.len()
    }

    pub async fn was_sent_to(&self, address: &str) -> bool {
        self.sent_emails.lock().await.iter().any(|e| e.to == address)
    }
}

#[async_trait]
impl EmailProvider for MockSmtpProvider {
    async fn send(&self, email: &Email) -> Result<SendResult> {
        if let Some(message) = &self.failure_message {
            return Err(eyre::eyre!(message.clone()));
        }

        self.sent_emails.lock().await.push(email.clone());
        Ok(SendResult {
            message_id: format!("mock-{}", email.id),
        })
    }

    async fn health_check(&self) -> Result<()> {
        match &self.failure_message {
            Some(_) => Err(eyre::eyre!("Mock health check failed")),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_outbox() {
        let provider = MockSmtpProvider::new();
        let observer = provider.clone();

        let email = Email::new("jane@mail.com", "Verification email").with_html("<a>link</a>");
        provider.send(&email).await.unwrap();

        assert_eq!(observer.sent_count().await, 1);
        assert!(observer.was_sent_to("jane@mail.com").await);
        assert!(!observer.was_sent_to("john@mail.com").await);
    }

    #[tokio::test]
    async fn test_failing_provider_records_nothing() {
        let provider = MockSmtpProvider::failing("relay refused");

        let email = Email::new("jane@mail.com", "Subject").with_text("Body");
        let err = provider.send(&email).await.unwrap_err();

        assert!(err.to_string().contains("relay refused"));
        assert_eq!(provider.sent_count().await, 0);
        assert!(provider.health_check().await.is_err());
    }
}
