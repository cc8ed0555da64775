use chrono::NaiveDateTime;
use url::Url;

use crate::types::{OrderID, PaymentStatus, UserID};

use super::Query;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Sparse criteria for `GET /payments/search`. Unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentSearchQuery {
    pub user_id: Option<UserID>,
    pub order_id: Option<OrderID>,
    pub status: Option<PaymentStatus>,
}

impl Query for PaymentSearchQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(user_id) = self.user_id {
            url.query_pairs_mut()
                .append_pair("userId", &user_id.to_string());
        }
        if let Some(order_id) = self.order_id {
            url.query_pairs_mut()
                .append_pair("orderId", &order_id.to_string());
        }
        if let Some(status) = self.status.as_ref().filter(|s| !s.as_str().is_empty()) {
            url.query_pairs_mut().append_pair("status", status.as_str());
        }
        url
    }
}

impl PaymentSearchQuery {
    pub fn with_user_id(mut self, user_id: UserID) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_order_id(mut self, order_id: OrderID) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Date window for the payment total endpoints. Both bounds are required.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TotalQuery {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TotalQuery {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }
}

impl Query for TotalQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("startDate", &self.start.format(DATE_TIME_FORMAT).to_string())
            .append_pair("endDate", &self.end.format(DATE_TIME_FORMAT).to_string());
        url
    }
}
