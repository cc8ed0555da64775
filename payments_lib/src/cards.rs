//! Payment card management for the session user.

use std::sync::Arc;

use payments_api::types::{
    CardID, CreatePaymentCardRequest, Page, PaymentCard, UpdatePaymentCardRequest,
};
use payments_api::{Client, PageQuery};

use crate::cache::ResourceCache;
use crate::error::PaymentsError;
use crate::session::Session;

/// Fetch client for the session user's payment cards.
pub struct PaymentCardService {
    client: Client,
    cache: Arc<ResourceCache<PaymentCard>>,
}

impl PaymentCardService {
    pub fn new(client: Client) -> Self {
        Self::with_cache(client, Arc::new(ResourceCache::new()))
    }

    pub fn with_cache(client: Client, cache: Arc<ResourceCache<PaymentCard>>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &Arc<ResourceCache<PaymentCard>> {
        &self.cache
    }

    /// All of the user's cards, active or not.
    pub async fn list(&self, session: &Session) -> Result<Vec<PaymentCard>, PaymentsError> {
        let cards = self.client.get_cards(session.user_id()).await?;
        self.cache.publish_list(&cards);
        Ok(cards)
    }

    pub async fn list_paged(
        &self,
        session: &Session,
        query: &PageQuery,
    ) -> Result<Page<PaymentCard>, PaymentsError> {
        let page = self.client.get_cards_paged(session.user_id(), query).await?;
        self.cache.publish_page(&page);
        Ok(page)
    }

    pub async fn create(
        &self,
        session: &Session,
        request: &CreatePaymentCardRequest,
    ) -> Result<PaymentCard, PaymentsError> {
        Ok(self.client.create_card(session.user_id(), request).await?)
    }

    pub async fn update(
        &self,
        session: &Session,
        card_id: CardID,
        request: &UpdatePaymentCardRequest,
    ) -> Result<PaymentCard, PaymentsError> {
        Ok(self
            .client
            .update_card(session.user_id(), card_id, request)
            .await?)
    }

    pub async fn update_status(
        &self,
        session: &Session,
        card_id: CardID,
        active: bool,
    ) -> Result<PaymentCard, PaymentsError> {
        Ok(self
            .client
            .update_card_status(session.user_id(), card_id, active)
            .await?)
    }

    pub async fn delete(&self, session: &Session, card_id: CardID) -> Result<(), PaymentsError> {
        Ok(self.client.delete_card(session.user_id(), card_id).await?)
    }
}
