mod page;
pub use self::page::Page;

mod status;
pub use self::status::{OrderStatus, PaymentStatus, StatusTone};

mod payment;
pub use self::payment::{CreatePaymentRequest, PayOrderRequest, Payment, PaymentID, UserID};

mod payment_card;
pub use self::payment_card::{
    CardID, CreatePaymentCardRequest, PaymentCard, UpdatePaymentCardRequest,
};

mod order;
pub use self::order::{Order, OrderID};
