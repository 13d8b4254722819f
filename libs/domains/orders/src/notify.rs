//! Order confirmation email, sent once per created order.

use async_trait::async_trait;
use crud::{CreateHook, CrudError, CrudResult};
use email::{Mailer, OrderConfirmation, OrderLine};
use tracing::instrument;

use crate::error::OrderResult;
use crate::models::Order;

#[derive(Clone)]
pub struct OrderEmailHook {
    mailer: Mailer,
}

impl OrderEmailHook {
    pub fn new(mailer: Mailer) -> Self {
        Self { mailer }
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn notify(&self, order: &Order) -> OrderResult<()> {
        self.mailer
            .send_order_confirmation(&confirmation(order))
            .await?;
        Ok(())
    }
}

pub fn confirmation(order: &Order) -> OrderConfirmation {
    OrderConfirmation {
        order_id: order.id.clone(),
        to: order.client.email.clone(),
        client_name: order.client.name.clone(),
        items: order
            .items
            .iter()
            .map(|item| OrderLine {
                name: item.name.clone(),
                price: item.price,
                count: item.count,
                total: item.total,
            })
            .collect(),
        total_price: order.total_price,
    }
}

#[async_trait]
impl CreateHook<Order> for OrderEmailHook {
    async fn after_create(&self, order: &Order) -> CrudResult<()> {
        self.notify(order).await.map_err(|e| {
            tracing::error!(order_id = %order.id, error = %e, "Order confirmation not sent");
            CrudError::Internal(e.to_string())
        })
    }
}
