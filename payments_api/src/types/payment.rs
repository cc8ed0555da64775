use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{OrderID, PaymentStatus};

pub type PaymentID = i64;
pub type UserID = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentID,
    pub order_id: OrderID,
    pub user_id: UserID,
    pub payment_amount: f64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub payment_date: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub order_id: OrderID,
    pub user_id: UserID,
    pub payment_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
}

/// Body of `POST /payments/pay`. The status is always `PENDING` on submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayOrderRequest {
    pub order_id: OrderID,
    pub user_id: UserID,
    pub payment_amount: f64,
    pub status: PaymentStatus,
}

impl PayOrderRequest {
    pub fn new(order_id: OrderID, user_id: UserID, payment_amount: f64) -> Self {
        Self {
            order_id,
            user_id,
            payment_amount,
            status: PaymentStatus::Pending,
        }
    }
}
