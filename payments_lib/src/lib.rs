//! Library layer for the payment administration client.
//!
//! Wraps the `payments_api` HTTP client with per-resource services that
//! publish every successful read into a last-result cache, plus the
//! session, configuration, list and pay-order state used by front ends.

pub mod cache;
pub mod cards;
pub mod config;
pub mod error;
pub mod orders;
pub mod pay_order;
pub mod payments;
pub mod payments_list;
pub mod session;
pub mod validation;

pub use payments_api;
pub use payments_api::types;
pub use payments_api::{
    Client, ErrorKind, PageQuery, Paged, PaymentSearchQuery, Query, SortDirection, TotalQuery,
};

pub use cache::{CacheSlot, Listing, ResourceCache};
pub use cards::PaymentCardService;
pub use config::{Config, ConfigError};
pub use error::PaymentsError;
pub use orders::OrderService;
pub use pay_order::{PayOrderFlow, PayOutcome, Redirect};
pub use payments::PaymentService;
pub use payments_list::{PaymentsListController, PaymentsView};
pub use session::Session;
