use async_trait::async_trait;
use crud::{CrudResult, CrudService, Predicate};
use domain_orders::Order;

/// Orders a user has placed, newest first with the seller joined in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderHistory: Send + Sync + 'static {
    async fn for_client(&self, user_id: &str) -> CrudResult<Vec<Order>>;
}

#[async_trait]
impl OrderHistory for CrudService<Order> {
    async fn for_client(&self, user_id: &str) -> CrudResult<Vec<Order>> {
        self.find_all(vec![Predicate::new("client._id", user_id)]).await
    }
}
