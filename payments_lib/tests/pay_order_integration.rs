use payments_lib::pay_order::{
    ORDER_LOAD_ERROR, PAYMENT_FAILED, PAYMENT_SUCCEEDED, REDIRECT_DELAY, REDIRECT_PATH,
};
use payments_lib::{
    Client, OrderService, PayOrderFlow, PaymentCardService, PaymentService, Session,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../payments_api/tests/fixtures/{}", name)).unwrap()
}

struct Services {
    orders: OrderService,
    cards: PaymentCardService,
    payments: PaymentService,
}

impl Services {
    fn new(mock_server: &MockServer) -> Self {
        let client = Client::new(&mock_server.uri()).unwrap();
        Self {
            orders: OrderService::new(client.clone()),
            cards: PaymentCardService::new(client.clone()),
            payments: PaymentService::new(client),
        }
    }

    fn flow(&self) -> PayOrderFlow<'_> {
        PayOrderFlow::new(
            &self.orders,
            &self.cards,
            &self.payments,
            Session::new(1).unwrap(),
        )
    }
}

async fn mount_order(mock_server: &MockServer, fixture: &str) {
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
        .mount(mock_server)
        .await;
}

async fn mount_cards(mock_server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/api/v1/users/1/payment-cards"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn preselects_first_active_card() {
    let mock_server = MockServer::start().await;
    mount_order(&mock_server, "order_pending.json").await;
    mount_cards(&mock_server, load_fixture("cards.json")).await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();
    flow.load(42).await;

    assert_eq!(flow.order().unwrap().id, 42);
    assert_eq!(flow.selected_card(), Some(2));
    assert_eq!(flow.available_cards().len(), 1);
    assert!(flow.warning().is_none());
    assert!(flow.error().is_none());
    assert!(flow.can_pay());
}

#[tokio::test]
async fn falls_back_to_first_card_when_none_active() {
    let mock_server = MockServer::start().await;
    mount_order(&mock_server, "order_pending.json").await;
    let mut cards: serde_json::Value = serde_json::from_str(&load_fixture("cards.json")).unwrap();
    cards[1]["active"] = serde_json::Value::Bool(false);
    mount_cards(&mock_server, cards.to_string()).await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();
    flow.load(42).await;

    assert_eq!(flow.selected_card(), Some(1));
    assert!(flow.available_cards().is_empty());
    assert!(flow.can_pay());
}

#[tokio::test]
async fn paid_order_loads_with_warning() {
    let mock_server = MockServer::start().await;
    mount_order(&mock_server, "order_paid.json").await;
    mount_cards(&mock_server, load_fixture("cards.json")).await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();
    flow.load(42).await;

    assert!(flow.order().is_some());
    assert_eq!(
        flow.warning(),
        Some("This order cannot be paid (status: PAID)")
    );
    assert!(flow.error().is_none());
    assert!(flow.can_pay());
}

#[tokio::test]
async fn order_load_failure_is_an_error_not_a_warning() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_cards(&mock_server, load_fixture("cards.json")).await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();
    flow.load(42).await;

    assert!(flow.order().is_none());
    assert_eq!(flow.error(), Some(ORDER_LOAD_ERROR));
    assert!(flow.warning().is_none());
    assert!(!flow.can_pay());
    assert!(flow.pay().await.is_none());
}

#[tokio::test]
async fn card_load_failure_only_blocks_payment() {
    let mock_server = MockServer::start().await;
    mount_order(&mock_server, "order_pending.json").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/1/payment-cards"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payments/pay"))
        .respond_with(ResponseTemplate::new(201).set_body_string(load_fixture("payment.json")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();
    flow.load(42).await;

    assert!(flow.order().is_some());
    assert!(flow.error().is_none());
    assert_eq!(flow.selected_card(), None);
    assert!(flow.pay().await.is_none());
}

#[tokio::test]
async fn pay_submits_order_total_and_redirects() {
    let mock_server = MockServer::start().await;
    mount_order(&mock_server, "order_pending.json").await;
    mount_cards(&mock_server, load_fixture("cards.json")).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payments/pay"))
        .and(body_json(serde_json::json!({
            "orderId": 42,
            "userId": 1,
            "paymentAmount": 129.5,
            "status": "PENDING"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string(load_fixture("payment.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();
    flow.load(42).await;

    let outcome = flow.pay().await.unwrap();
    assert_eq!(outcome.payment.id, 101);
    assert_eq!(outcome.redirect.path, REDIRECT_PATH);
    assert_eq!(outcome.redirect.after, REDIRECT_DELAY);
    assert_eq!(flow.success(), Some(PAYMENT_SUCCEEDED));
    assert!(!flow.is_processing());
}

#[tokio::test]
async fn failed_payment_keeps_state_for_retry() {
    let mock_server = MockServer::start().await;
    mount_order(&mock_server, "order_pending.json").await;
    mount_cards(&mock_server, load_fixture("cards.json")).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payments/pay"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/payments/pay"))
        .respond_with(ResponseTemplate::new(201).set_body_string(load_fixture("payment.json")))
        .mount(&mock_server)
        .await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();
    flow.load(42).await;

    assert!(flow.pay().await.is_none());
    assert_eq!(flow.error(), Some(PAYMENT_FAILED));
    assert!(flow.success().is_none());
    assert_eq!(flow.order().unwrap().id, 42);
    assert_eq!(flow.selected_card(), Some(2));
    assert!(flow.can_pay());

    assert!(flow.pay().await.is_some());
    assert!(flow.error().is_none());
    assert_eq!(flow.success(), Some(PAYMENT_SUCCEEDED));
}

#[tokio::test]
async fn only_active_cards_can_be_selected() {
    let mock_server = MockServer::start().await;
    mount_order(&mock_server, "order_pending.json").await;
    mount_cards(&mock_server, load_fixture("cards.json")).await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();
    flow.load(42).await;

    assert!(flow.select_card(1).is_err());
    assert_eq!(flow.selected_card(), Some(2));
    assert!(flow.select_card(2).is_ok());
}

#[tokio::test]
async fn reloading_replaces_previous_order_state() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("order_paid.json")))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_order(&mock_server, "order_pending.json").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/43"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_cards(&mock_server, load_fixture("cards.json")).await;

    let services = Services::new(&mock_server);
    let mut flow = services.flow();

    flow.load(42).await;
    assert!(flow.warning().is_some());

    flow.load_order(42).await;
    assert_eq!(flow.order().unwrap().id, 42);
    assert!(flow.order().unwrap().status.is_awaiting_payment());
    assert!(flow.warning().is_none());
    assert!(flow.can_pay());

    flow.load_order(43).await;
    assert!(flow.order().is_none());
    assert_eq!(flow.error(), Some(ORDER_LOAD_ERROR));
    assert!(!flow.can_pay());
    assert!(flow.pay().await.is_none());
    assert!(mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .all(|r| r.method.as_str() != "POST"));
}
