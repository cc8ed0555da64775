//! Explicit session context for calls that act on behalf of a user.

use payments_api::types::UserID;

use crate::error::PaymentsError;
use crate::validation;

/// The user on whose behalf requests are made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    user_id: UserID,
}

impl Session {
    pub fn new(user_id: UserID) -> Result<Self, PaymentsError> {
        Ok(Self {
            user_id: validation::validate_id(user_id, "user id")?,
        })
    }

    pub fn user_id(&self) -> UserID {
        self.user_id
    }
}
