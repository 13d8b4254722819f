//! Transactional email for the marketplace.
//!
//! ## Components
//!
//! - **Models**: [`Email`]
//! - **Providers**: [`SmtpProvider`] (lettre) and [`MockSmtpProvider`] for tests
//! - **Templates**: Handlebars-based [`TemplateEngine`] with the verification
//!   and order-confirmation templates registered
//! - **Mailer**: [`Mailer`] renders a template and sends it, awaiting the
//!   provider before returning
//!
//! ```ignore
//! use email::{Mailer, MailerConfig, SmtpConfig, SmtpProvider};
//! use core_config::FromEnv;
//!
//! let provider = SmtpProvider::new(SmtpConfig::from_env()?)?;
//! let mailer = Mailer::new(Arc::new(provider), MailerConfig::from_env()?)?;
//! mailer.send_verification("jane@mail.com", &token).await?;
//! ```

pub mod error;
pub mod mailer;
pub mod models;
pub mod provider;
pub mod templates;

pub use error::{NotificationError, NotificationResult};
pub use mailer::{Mailer, MailerConfig, OrderConfirmation, OrderLine};
pub use models::Email;
pub use provider::{EmailProvider, MockSmtpProvider, SendResult, SmtpConfig, SmtpProvider};
pub use templates::{EmailTemplate, RenderedTemplate, TemplateEngine};
