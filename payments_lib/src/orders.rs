//! Order reads, published to the order cache.

use std::sync::Arc;

use payments_api::types::{Order, OrderID, Page, UserID};
use payments_api::{Client, PageQuery};

use crate::cache::ResourceCache;
use crate::error::PaymentsError;

/// Fetch client for orders.
pub struct OrderService {
    client: Client,
    cache: Arc<ResourceCache<Order>>,
}

impl OrderService {
    pub fn new(client: Client) -> Self {
        Self::with_cache(client, Arc::new(ResourceCache::new()))
    }

    pub fn with_cache(client: Client, cache: Arc<ResourceCache<Order>>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &Arc<ResourceCache<Order>> {
        &self.cache
    }

    pub async fn get(&self, id: OrderID) -> Result<Order, PaymentsError> {
        let order = self.client.get_order(id).await?;
        self.cache.publish_item(&order);
        Ok(order)
    }

    pub async fn list(&self, query: &PageQuery) -> Result<Page<Order>, PaymentsError> {
        let page = self.client.get_orders(query).await?;
        self.cache.publish_page(&page);
        Ok(page)
    }

    pub async fn by_user(&self, user_id: UserID) -> Result<Vec<Order>, PaymentsError> {
        let orders = self.client.get_orders_by_user(user_id).await?;
        self.cache.publish_list(&orders);
        Ok(orders)
    }
}
