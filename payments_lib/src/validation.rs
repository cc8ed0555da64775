//! Validation of user-supplied input before it reaches the API.

use chrono::{NaiveDate, NaiveDateTime};
use payments_api::types::PaymentStatus;
use url::Url;

use crate::error::PaymentsError;

pub const MAX_PAGE_SIZE: u32 = 100;
pub const MAX_HOLDER_NAME_LENGTH: usize = 80;

pub fn validate_page_size(size: u32) -> Result<u32, PaymentsError> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(PaymentsError::InvalidInput(format!(
            "page size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, size
        )));
    }
    Ok(size)
}

/// Accepts an absolute http(s) URL.
pub fn validate_api_url(input: &str) -> Result<String, PaymentsError> {
    let url = Url::parse(input.trim())
        .map_err(|e| PaymentsError::InvalidInput(format!("invalid API URL '{}': {}", input, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(input.trim().trim_end_matches('/').to_string()),
        other => Err(PaymentsError::InvalidInput(format!(
            "API URL must use http or https, got '{}'",
            other
        ))),
    }
}

/// Normalizes a status string to the server's upper-case form.
pub fn validate_payment_status(input: &str) -> Result<PaymentStatus, PaymentsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PaymentsError::InvalidInput(
            "payment status cannot be empty".to_string(),
        ));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(PaymentsError::InvalidInput(format!(
            "invalid payment status '{}'",
            input
        )));
    }
    Ok(PaymentStatus::from(trimmed.to_ascii_uppercase().replace('-', "_")))
}

pub fn validate_id(id: i64, what: &str) -> Result<i64, PaymentsError> {
    if id <= 0 {
        return Err(PaymentsError::InvalidInput(format!(
            "{} must be a positive integer, got {}",
            what, id
        )));
    }
    Ok(id)
}

pub fn validate_amount(amount: f64) -> Result<f64, PaymentsError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(PaymentsError::InvalidInput(format!(
            "amount must be a positive number, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Strips spaces and dashes; 12 to 19 digits.
pub fn validate_card_number(input: &str) -> Result<String, PaymentsError> {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(PaymentsError::InvalidInput(
            "card number must be 12 to 19 digits".to_string(),
        ));
    }
    Ok(digits)
}

pub fn validate_holder_name(input: &str) -> Result<String, PaymentsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PaymentsError::InvalidInput(
            "card holder name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_HOLDER_NAME_LENGTH {
        return Err(PaymentsError::InvalidInput(format!(
            "card holder name too long (max {} characters)",
            MAX_HOLDER_NAME_LENGTH
        )));
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(PaymentsError::InvalidInput(
            "card holder name contains control characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Expiration in `MM/YY` form.
pub fn validate_expiration(input: &str) -> Result<String, PaymentsError> {
    let trimmed = input.trim();
    let invalid = || {
        PaymentsError::InvalidInput(format!(
            "expiration must be MM/YY, got '{}'",
            input
        ))
    };
    let (month, year) = trimmed.split_once('/').ok_or_else(invalid)?;
    if month.len() != 2 || year.len() != 2 {
        return Err(invalid());
    }
    let month: u32 = month.parse().map_err(|_| invalid())?;
    year.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Parses `YYYY-MM-DD` (start of day) or a full `YYYY-MM-DDTHH:MM:SS`.
pub fn validate_date_time(input: &str) -> Result<NaiveDateTime, PaymentsError> {
    let trimmed = input.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            PaymentsError::InvalidInput(format!(
                "invalid date '{}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
                input
            ))
        })
}

pub fn validate_date_range(
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<(NaiveDateTime, NaiveDateTime), PaymentsError> {
    if start > end {
        return Err(PaymentsError::InvalidInput(format!(
            "start {} is after end {}",
            start, end
        )));
    }
    Ok((start, end))
}
