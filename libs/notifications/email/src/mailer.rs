//! High-level mail facade used by the domain services.

use crate::error::{NotificationError, NotificationResult};
use crate::models::Email;
use crate::provider::EmailProvider;
use crate::templates::{TemplateEngine, ORDER_CONFIRMATION_TEMPLATE, VERIFICATION_TEMPLATE};
use core_config::{env_required, ConfigError, FromEnv};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Environment variables:
/// - `BASE_URL` (required): public origin used to build verification links
#[derive(Clone, Debug)]
pub struct MailerConfig {
    pub base_url: String,
}

impl MailerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl FromEnv for MailerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_required("BASE_URL")?))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub price: f64,
    pub count: u32,
    pub total: f64,
}

#[derive(Clone, Debug)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub to: String,
    pub client_name: String,
    pub items: Vec<OrderLine>,
    pub total_price: f64,
}

/// Renders a template and hands it to the provider, returning once the
/// provider has accepted or refused the message.
#[derive(Clone)]
pub struct Mailer {
    provider: Arc<dyn EmailProvider>,
    templates: Arc<TemplateEngine>,
    config: MailerConfig,
}

impl Mailer {
    pub fn new(provider: Arc<dyn EmailProvider>, config: MailerConfig) -> NotificationResult<Self> {
        let templates =
            TemplateEngine::new().map_err(|e| NotificationError::Template(e.to_string()))?;

        Ok(Self {
            provider,
            templates: Arc::new(templates),
            config,
        })
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/api/users/verify/{}",
            self.config.base_url.trim_end_matches('/'),
            token
        )
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn send_verification(&self, to: &str, token: &str) -> NotificationResult<()> {
        let data = json!({ "verification_link": self.verification_link(token) });
        self.deliver(to, VERIFICATION_TEMPLATE, &data).await
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn send_order_confirmation(&self, order: &OrderConfirmation) -> NotificationResult<()> {
        let data = json!({
            "order_id": order.order_id,
            "client_name": order.client_name,
            "items": order.items,
            "total_price": order.total_price,
        });
        self.deliver(&order.to, ORDER_CONFIRMATION_TEMPLATE, &data).await
    }

    async fn deliver(
        &self,
        to: &str,
        template: &str,
        data: &serde_json::Value,
    ) -> NotificationResult<()> {
        let rendered = self
            .templates
            .render(template, data)
            .map_err(|e| NotificationError::Template(e.to_string()))?;

        let mut email = Email::new(to, rendered.subject);
        email.body_text = rendered.body_text;
        email.body_html = rendered.body_html;

        match self.provider.send(&email).await {
            Ok(result) => {
                tracing::debug!(template, message_id = %result.message_id, "Email delivered");
                Ok(())
            }
            Err(err) => {
                tracing::error!(template, provider = self.provider.name(), error = %err, "Email delivery failed");
                Err(err.into())
            }
        }
    }
}
