use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{OrderStatus, UserID};

pub type OrderID = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderID,
    pub user_id: UserID,
    pub status: OrderStatus,
    pub total_price: f64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
