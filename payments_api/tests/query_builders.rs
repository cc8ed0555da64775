use payments_api::types::PaymentStatus;
use payments_api::{PageQuery, Paged, PaymentSearchQuery, Query, SortDirection};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

#[test]
fn page_query_defaults_send_nothing() {
    let url = PageQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), None);
}

#[test]
fn page_query_with_page_only() {
    let url = PageQuery::default().with_page(3).add_to_url(&base_url());
    assert_eq!(url.query(), Some("page=3"));
}

#[test]
fn page_query_with_size_only() {
    let url = PageQuery::default().with_size(25).add_to_url(&base_url());
    assert_eq!(url.query(), Some("size=25"));
}

#[test]
fn page_query_sort_variants() {
    let url = PageQuery::default()
        .with_sort("id")
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("sort=id"));

    let url = PageQuery::default()
        .with_sort_by("paymentAmount", SortDirection::Asc)
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("sort=paymentAmount%2Casc"));
}

#[test]
fn page_query_empty_sort_is_omitted() {
    let url = PageQuery::default()
        .with_page(0)
        .with_sort("")
        .add_to_url(&base_url());
    assert_eq!(url.query(), Some("page=0"));
}

#[test]
fn page_query_filters_are_appended() {
    let url = PageQuery::default()
        .with_size(10)
        .with_filter("userId", "3")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("size=10"));
    assert!(query.contains("userId=3"));
    assert!(!query.contains("page="));
}

#[test]
fn sort_direction_parses() {
    assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
    assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
    assert!("sideways".parse::<SortDirection>().is_err());
}

#[test]
fn search_query_empty_status_is_omitted() {
    let url = PaymentSearchQuery::default()
        .with_status(PaymentStatus::from(""))
        .add_to_url(&base_url());
    assert_eq!(url.query(), None);
}

#[test]
fn search_query_all_fields() {
    let url = PaymentSearchQuery::default()
        .with_user_id(1)
        .with_order_id(2)
        .with_status(PaymentStatus::Pending)
        .add_to_url(&base_url());
    insta::assert_snapshot!(url.to_string(), @"https://example.com/?userId=1&orderId=2&status=PENDING");
}
