//! Email template management with Handlebars
//!
//! [`TemplateEngine`] ships with the two transactional templates the
//! marketplace sends:
//! - `verification`: link that confirms a newly registered address
//! - `order_confirmation`: summary of a freshly placed order

use eyre::{eyre, Result};
use handlebars::Handlebars;
use serde_json::Value;
use std::collections::HashMap;

pub const VERIFICATION_TEMPLATE: &str = "verification";
pub const ORDER_CONFIRMATION_TEMPLATE: &str = "order_confirmation";

/// Rendered template result
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

/// Email template definition
#[derive(Clone, Debug)]
pub struct EmailTemplate {
    pub name: String,
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

/// Handlebars-based template engine
///
/// Supports:
/// - Variables: `{{name}}`
/// - Loops: `{{#each items}}...{{/each}}`
/// - Raw HTML: `{{{unescaped}}}`
///
/// Strict mode is on, so a template referencing a missing field fails to
/// render instead of sending a half-empty email.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    templates: HashMap<String, EmailTemplate>,
}

impl TemplateEngine {
    /// Create a new TemplateEngine with the default templates registered
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        let mut engine = Self {
            handlebars,
            templates: HashMap::new(),
        };
        engine.register_defaults()?;

        Ok(engine)
    }

    /// Register a template, replacing any previous one with the same name
    pub fn register(&mut self, template: EmailTemplate) -> Result<()> {
        self.handlebars
            .register_template_string(&format!("{}_subject", template.name), &template.subject)
            .map_err(|e| eyre!("Failed to register subject template: {}", e))?;

        if let Some(text) = &template.body_text {
            self.handlebars
                .register_template_string(&format!("{}_text", template.name), text)
                .map_err(|e| eyre!("Failed to register text template: {}", e))?;
        }

        if let Some(html) = &template.body_html {
            self.handlebars
                .register_template_string(&format!("{}_html", template.name), html)
                .map_err(|e| eyre!("Failed to register HTML template: {}", e))?;
        }

        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Render a template by name
    pub fn render(&self, name: &str, data: &Value) -> Result<RenderedTemplate> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| eyre!("Template not found: {}", name))?;

        let subject = self
            .handlebars
            .render(&format!("{}_subject", name), data)
            .map_err(|e| eyre!("Failed to render subject: {}", e))?;

        let body_text = template
            .body_text
            .as_ref()
            .map(|_| {
                self.handlebars
                    .render(&format!("{}_text", name), data)
                    .map_err(|e| eyre!("Failed to render text: {}", e))
            })
            .transpose()?;

        let body_html = template
            .body_html
            .as_ref()
            .map(|_| {
                self.handlebars
                    .render(&format!("{}_html", name), data)
                    .map_err(|e| eyre!("Failed to render HTML: {}", e))
            })
            .transpose()?;

        Ok(RenderedTemplate {
            subject,
            body_text,
            body_html,
        })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }

    fn register_defaults(&mut self) -> Result<()> {
        self.register(EmailTemplate {
            name: VERIFICATION_TEMPLATE.to_string(),
            subject: "Verification email".to_string(),
            body_text: None,
            body_html: Some(
                r#"<a target="_blank" href="{{{verification_link}}}">Click here to verify your email</a>"#
                    .to_string(),
            ),
        })?;

        self.register(EmailTemplate {
            name: ORDER_CONFIRMATION_TEMPLATE.to_string(),
            subject: "Order id: {{order_id}}".to_string(),
            body_text: None,
            body_html: Some(
                concat!(
                    "<p>Thank for your order, {{client_name}}! <br> Let's start processing it! ",
                    "<br> <br> Order details: <br> <br> ",
                    "{{#each items}}{{name}}: {{count}}, <br> price: {{price}}, <br> total: {{total}}, <br> <br> {{/each}}",
                    "----------------------------------------------------  <br> <br> ",
                    "<b> Total price: {{total_price}}</b> </p>",
                )
                .to_string(),
            ),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_registered() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.has_template(VERIFICATION_TEMPLATE));
        assert!(engine.has_template(ORDER_CONFIRMATION_TEMPLATE));
        assert_eq!(engine.list_templates().len(), 2);
    }

    #[test]
    fn test_render_verification() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                VERIFICATION_TEMPLATE,
                &json!({ "verification_link": "http://localhost:3000/api/users/verify/abc" }),
            )
            .unwrap();

        assert_eq!(rendered.subject, "Verification email");
        assert!(rendered.body_text.is_none());
        let html = rendered.body_html.unwrap();
        assert!(html.contains(r#"href="http://localhost:3000/api/users/verify/abc""#));
        assert!(html.contains("Click here to verify your email"));
    }

    #[test]
    fn test_render_order_confirmation_lists_items() {
        let engine = TemplateEngine::new().unwrap();
        let data = json!({
            "order_id": "6650c0ffee",
            "client_name": "Jane",
            "items": [
                { "name": "Aspirin", "count": 2, "price": 10.25, "total": 20.5 },
                { "name": "Vitamin C", "count": 1, "price": 5, "total": 5 }
            ],
            "total_price": 25.5
        });

        let rendered = engine.render(ORDER_CONFIRMATION_TEMPLATE, &data).unwrap();
        assert_eq!(rendered.subject, "Order id: 6650c0ffee");

        let html = rendered.body_html.unwrap();
        assert!(html.contains("Thank for your order, Jane!"));
        assert!(html.contains("Aspirin: 2, <br> price: 10.25, <br> total: 20.5,"));
        assert!(html.contains("Vitamin C: 1, <br> price: 5, <br> total: 5,"));
        assert!(html.contains("<b> Total price: 25.5</b>"));
    }

    #[test]
    fn test_render_missing_field_fails() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.render(VERIFICATION_TEMPLATE, &json!({})).is_err());
    }

    #[test]
    fn test_render_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("welcome", &json!({})).unwrap_err();
        assert!(err.to_string().contains("Template not found"));
    }

    #[test]
    fn test_register_custom_template() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register(EmailTemplate {
                name: "notice".to_string(),
                subject: "Hi {{name}}".to_string(),
                body_text: Some("Plain {{name}}".to_string()),
                body_html: None,
            })
            .unwrap();

        let rendered = engine.render("notice", &json!({ "name": "Bob" })).unwrap();
        assert_eq!(rendered.subject, "Hi Bob");
        assert_eq!(rendered.body_text.as_deref(), Some("Plain Bob"));
    }
}
