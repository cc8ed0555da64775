mod common;
pub use self::common::{PageQuery, Paged, Query, QueryCommon, SortDirection};

mod payment;
pub use self::payment::{PaymentSearchQuery, TotalQuery};
