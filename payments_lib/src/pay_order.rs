//! The pay-order workflow: load an order, pick a card, submit payment.

use std::time::Duration;

use payments_api::types::{CardID, Order, OrderID, Payment, PaymentCard};

use crate::cards::PaymentCardService;
use crate::error::PaymentsError;
use crate::orders::OrderService;
use crate::payments::PaymentService;
use crate::session::Session;

pub const ORDER_LOAD_ERROR: &str = "Failed to load order";
pub const PAYMENT_FAILED: &str = "Payment failed. Please try again.";
pub const PAYMENT_SUCCEEDED: &str = "Payment successful!";

/// Where to go after a successful payment, and how long to wait first.
pub const REDIRECT_PATH: &str = "/orders";
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub path: &'static str,
    pub after: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PayOutcome {
    pub payment: Payment,
    pub redirect: Redirect,
}

/// State for paying a single order.
///
/// Load failures never abort the workflow; they are recorded as messages
/// and the rest of the state stays usable, so the caller can retry.
pub struct PayOrderFlow<'a> {
    orders: &'a OrderService,
    cards: &'a PaymentCardService,
    payments: &'a PaymentService,
    session: Session,
    loading: bool,
    processing: bool,
    order: Option<Order>,
    /// Active cards only.
    available_cards: Vec<PaymentCard>,
    selected_card: Option<CardID>,
    warning: Option<String>,
    error: Option<String>,
    success: Option<String>,
}

impl<'a> PayOrderFlow<'a> {
    pub fn new(
        orders: &'a OrderService,
        cards: &'a PaymentCardService,
        payments: &'a PaymentService,
        session: Session,
    ) -> Self {
        Self {
            orders,
            cards,
            payments,
            session,
            loading: false,
            processing: false,
            order: None,
            available_cards: Vec::new(),
            selected_card: None,
            warning: None,
            error: None,
            success: None,
        }
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn available_cards(&self) -> &[PaymentCard] {
        &self.available_cards
    }

    pub fn selected_card(&self) -> Option<CardID> {
        self.selected_card
    }

    /// Set when the order is not awaiting payment. Not an error.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// True once an order and a card are in place and nothing is in flight.
    pub fn can_pay(&self) -> bool {
        self.order.is_some() && self.selected_card.is_some() && !self.processing
    }

    /// Loads the order, then the session user's cards.
    pub async fn load(&mut self, order_id: OrderID) {
        self.load_order(order_id).await;
        self.load_cards().await;
    }

    /// Replaces whatever order was loaded before. On failure no order is kept.
    pub async fn load_order(&mut self, order_id: OrderID) {
        self.loading = true;
        self.warning = None;
        self.error = None;
        self.success = None;
        match self.orders.get(order_id).await {
            Ok(order) => {
                if !order.status.is_awaiting_payment() {
                    tracing::warn!("Order {} is not payable (status {})", order.id, order.status);
                    self.warning = Some(format!(
                        "This order cannot be paid (status: {})",
                        order.status
                    ));
                }
                self.order = Some(order);
            }
            Err(e) => {
                tracing::error!("Failed to load order {}: {}", order_id, e);
                self.order = None;
                self.error = Some(ORDER_LOAD_ERROR.to_string());
            }
        }
        self.loading = false;
    }

    /// Loads cards and pre-selects the first active one, falling back to the
    /// first card of any status.
    pub async fn load_cards(&mut self) {
        match self.cards.list(&self.session).await {
            Ok(cards) => {
                self.selected_card = cards
                    .iter()
                    .find(|c| c.active)
                    .or_else(|| cards.first())
                    .map(|c| c.id);
                self.available_cards = cards.into_iter().filter(|c| c.active).collect();
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load payment cards for user {}: {}",
                    self.session.user_id(),
                    e
                );
            }
        }
    }

    /// Selects one of the active cards.
    pub fn select_card(&mut self, card_id: CardID) -> Result<(), PaymentsError> {
        if !self.available_cards.iter().any(|c| c.id == card_id) {
            return Err(PaymentsError::InvalidInput(format!(
                "card {} is not an active card of user {}",
                card_id,
                self.session.user_id()
            )));
        }
        self.selected_card = Some(card_id);
        Ok(())
    }

    /// Submits payment for the loaded order.
    ///
    /// Returns `None` when there is nothing to pay with or the submission
    /// failed; in the latter case [`PayOrderFlow::error`] holds
    /// [`PAYMENT_FAILED`] and all loaded state is kept for a retry.
    pub async fn pay(&mut self) -> Option<PayOutcome> {
        if !self.can_pay() {
            tracing::warn!("Payment requested without an order and a selected card");
            return None;
        }
        let order = self.order.clone()?;

        self.processing = true;
        self.error = None;

        let outcome = match self.payments.pay_order(&order).await {
            Ok(payment) => {
                tracing::info!("Payment {} created for order {}", payment.id, order.id);
                self.success = Some(PAYMENT_SUCCEEDED.to_string());
                Some(PayOutcome {
                    payment,
                    redirect: Redirect {
                        path: REDIRECT_PATH,
                        after: REDIRECT_DELAY,
                    },
                })
            }
            Err(e) => {
                tracing::error!("Payment for order {} failed: {}", order.id, e);
                self.error = Some(PAYMENT_FAILED.to_string());
                None
            }
        };
        self.processing = false;
        outcome
    }
}
