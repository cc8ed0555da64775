use serde::{Deserialize, Serialize};

use super::UserID;

pub type CardID = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCard {
    pub id: CardID,
    pub user_id: UserID,
    pub card_number: String,
    pub card_holder_name: String,
    pub expiration_date: String,
    #[serde(default)]
    pub card_type: Option<String>,
    pub active: bool,
}

impl PaymentCard {
    /// Card number with everything but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() <= 4 {
            return digits.into_iter().collect();
        }
        let last: String = digits[digits.len() - 4..].iter().collect();
        format!("**** {}", last)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentCardRequest {
    pub card_number: String,
    pub card_holder_name: String,
    pub expiration_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
}

/// Partial update; only present fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentCardRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
}
