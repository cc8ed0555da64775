//! Payment reads and writes, with reads published to the payment cache.

use std::sync::Arc;

use payments_api::types::{
    CreatePaymentRequest, Order, OrderID, Page, PayOrderRequest, Payment, PaymentID,
    PaymentStatus, UserID,
};
use payments_api::{Client, PageQuery, PaymentSearchQuery, TotalQuery};

use crate::cache::ResourceCache;
use crate::error::PaymentsError;

/// Fetch client for payments.
///
/// Every successful read overwrites the matching slot in [`ResourceCache`];
/// failed reads and all writes leave the cache alone.
pub struct PaymentService {
    client: Client,
    cache: Arc<ResourceCache<Payment>>,
}

impl PaymentService {
    pub fn new(client: Client) -> Self {
        Self::with_cache(client, Arc::new(ResourceCache::new()))
    }

    /// Shares an existing cache, e.g. one also read by a view.
    pub fn with_cache(client: Client, cache: Arc<ResourceCache<Payment>>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &Arc<ResourceCache<Payment>> {
        &self.cache
    }

    /// Fetches one page of payments.
    pub async fn list(&self, query: &PageQuery) -> Result<Page<Payment>, PaymentsError> {
        let page = self.client.get_payments(query).await?;
        self.cache.publish_page(&page);
        Ok(page)
    }

    pub async fn get(&self, id: PaymentID) -> Result<Payment, PaymentsError> {
        let payment = self.client.get_payment(id).await?;
        self.cache.publish_item(&payment);
        Ok(payment)
    }

    pub async fn by_user(&self, user_id: UserID) -> Result<Vec<Payment>, PaymentsError> {
        let payments = self.client.get_payments_by_user(user_id).await?;
        self.cache.publish_list(&payments);
        Ok(payments)
    }

    pub async fn by_order(&self, order_id: OrderID) -> Result<Vec<Payment>, PaymentsError> {
        let payments = self.client.get_payments_by_order(order_id).await?;
        self.cache.publish_list(&payments);
        Ok(payments)
    }

    pub async fn by_status(&self, status: &PaymentStatus) -> Result<Vec<Payment>, PaymentsError> {
        let payments = self.client.get_payments_by_status(status).await?;
        self.cache.publish_list(&payments);
        Ok(payments)
    }

    /// Returns exactly what the server matched; no client-side filtering.
    pub async fn search(&self, query: &PaymentSearchQuery) -> Result<Vec<Payment>, PaymentsError> {
        let payments = self.client.search_payments(query).await?;
        self.cache.publish_list(&payments);
        Ok(payments)
    }

    /// Sum of all payments in the window. Totals are not cached.
    pub async fn total(&self, window: &TotalQuery) -> Result<f64, PaymentsError> {
        Ok(self.client.get_total(window).await?)
    }

    pub async fn user_total(
        &self,
        user_id: UserID,
        window: &TotalQuery,
    ) -> Result<f64, PaymentsError> {
        Ok(self.client.get_user_total(user_id, window).await?)
    }

    pub async fn create(&self, request: &CreatePaymentRequest) -> Result<Payment, PaymentsError> {
        Ok(self.client.create_payment(request).await?)
    }

    /// Submits a `PENDING` payment for the full order total.
    pub async fn pay_order(&self, order: &Order) -> Result<Payment, PaymentsError> {
        let request = PayOrderRequest::new(order.id, order.user_id, order.total_price);
        tracing::info!(
            "Submitting payment of {:.2} for order {} (user {})",
            request.payment_amount,
            request.order_id,
            request.user_id
        );
        Ok(self.client.pay_order(&request).await?)
    }
}
