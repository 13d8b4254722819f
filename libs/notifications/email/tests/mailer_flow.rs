//! End-to-end rendering through the public API with the mock provider.

use email::{Mailer, MailerConfig, MockSmtpProvider, OrderConfirmation, OrderLine};
use std::sync::Arc;

#[tokio::test]
async fn verification_then_order_share_one_outbox() {
    let provider = MockSmtpProvider::new();
    let mailer = Mailer::new(
        Arc::new(provider.clone()),
        MailerConfig::new("https://shop.example.com"),
    )
    .unwrap();

    mailer
        .send_verification("jane@mail.com", "0f8fad5bd9cb469fa165")
        .await
        .unwrap();

    let order = OrderConfirmation {
        order_id: "665a00000000000000000001".into(),
        to: "jane@mail.com".into(),
        client_name: "Jane".into(),
        items: vec![
            OrderLine { name: "Tea".into(), price: 4.5, count: 2, total: 9.0 },
            OrderLine { name: "Honey".into(), price: 7.25, count: 1, total: 7.25 },
        ],
        total_price: 16.25,
    };
    mailer.send_order_confirmation(&order).await.unwrap();

    let sent = provider.sent_emails().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].subject, "Verification email");
    assert_eq!(sent[1].subject, "Order id: 665a00000000000000000001");

    let html = sent[1].body_html.as_deref().unwrap();
    let tea = html.find("Tea: 2").unwrap();
    let honey = html.find("Honey: 1").unwrap();
    assert!(tea < honey);
    assert!(html.contains("Thank for your order, Jane!"));
    assert_eq!(mailer.provider_name(), "mock");
}
