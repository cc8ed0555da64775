mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::{Error, ErrorKind};
pub use self::query::{
    PageQuery, Paged, PaymentSearchQuery, Query, QueryCommon, SortDirection, TotalQuery,
};
