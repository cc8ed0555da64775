use payments_lib::types::{Order, Payment, PaymentCard};
use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> Value {
    let path = workspace_root()
        .join("payments_api/tests/fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn extract_content(fixture: &Value) -> Value {
    fixture["content"].clone()
}

/// Round-trip through the typed model, the way `--output json` produces it.
fn as_cli_output<T>(data: &Value) -> Value
where
    T: serde::de::DeserializeOwned + serde::Serialize,
{
    let items: Vec<T> = serde_json::from_value(data.clone()).expect("fixture matches model");
    serde_json::to_value(items).expect("model serializes")
}

fn assert_conforms(schema_name: &str, data: &Value, what: &str) {
    let schema = load_schema(schema_name);
    let validator = jsonschema::draft202012::new(&schema)
        .unwrap_or_else(|e| panic!("{schema_name} compiles: {e}"));
    if let Err(e) = validator.validate(data) {
        panic!("{what} failed validation against {schema_name}: {e}");
    }
}

fn assert_rejected(schema_name: &str, data: &Value, why: &str) {
    let schema = load_schema(schema_name);
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(validator.validate(data).is_err(), "schema should reject {why}");
}

// ---------------------------------------------------------------------------
// Positive validation: fixtures and serialized models conform
// ---------------------------------------------------------------------------

#[test]
fn test_payments_page_conforms_to_schema() {
    let data = extract_content(&load_fixture("payments_page.json"));
    assert_conforms("payment.schema.json", &data, "payments page");
    assert_conforms(
        "payment.schema.json",
        &as_cli_output::<Payment>(&data),
        "serialized payments",
    );
}

#[test]
fn test_payments_with_unknown_status_and_null_date_conform() {
    let data = load_fixture("payments.json");
    assert_conforms("payment.schema.json", &data, "payments list");
    assert_conforms(
        "payment.schema.json",
        &as_cli_output::<Payment>(&data),
        "serialized payments",
    );
}

#[test]
fn test_cards_fixture_conforms_to_schema() {
    let data = load_fixture("cards.json");
    assert_conforms("payment_card.schema.json", &data, "cards");
    assert_conforms(
        "payment_card.schema.json",
        &as_cli_output::<PaymentCard>(&data),
        "serialized cards",
    );
}

#[test]
fn test_orders_fixture_conforms_to_schema() {
    let data = extract_content(&load_fixture("orders_page.json"));
    assert_conforms("order.schema.json", &data, "orders page");
    assert_conforms(
        "order.schema.json",
        &as_cli_output::<Order>(&data),
        "serialized orders",
    );
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn test_payment_schema_rejects_missing_required_field() {
    let mut data = load_fixture("payments.json");
    data[0]
        .as_object_mut()
        .expect("payment is an object")
        .remove("orderId");
    assert_rejected("payment.schema.json", &data, "payment missing orderId");
}

#[test]
fn test_payment_schema_rejects_string_amount() {
    let mut data = load_fixture("payments.json");
    data[0]
        .as_object_mut()
        .expect("payment is an object")
        .insert("paymentAmount".to_string(), Value::String("30.49".to_string()));
    assert_rejected("payment.schema.json", &data, "string paymentAmount");
}

#[test]
fn test_card_schema_rejects_bad_expiration() {
    let mut data = load_fixture("cards.json");
    data[0]
        .as_object_mut()
        .expect("card is an object")
        .insert("expirationDate".to_string(), Value::String("2027-12".to_string()));
    assert_rejected("payment_card.schema.json", &data, "expiration not in MM/YY");
}

#[test]
fn test_order_schema_rejects_lowercase_status() {
    let mut data = extract_content(&load_fixture("orders_page.json"));
    data[0]
        .as_object_mut()
        .expect("order is an object")
        .insert("status".to_string(), Value::String("pending".to_string()));
    assert_rejected("order.schema.json", &data, "lowercase status");
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn test_order_schema_rejects_additional_properties() {
    let mut data = extract_content(&load_fixture("orders_page.json"));
    data[0]
        .as_object_mut()
        .expect("order is an object")
        .insert("bogusField".to_string(), Value::Number(123.into()));
    assert_rejected("order.schema.json", &data, "additional properties");
}

#[test]
fn test_empty_array_conforms_to_all_schemas() {
    let empty = serde_json::json!([]);

    for schema_name in [
        "payment.schema.json",
        "payment_card.schema.json",
        "order.schema.json",
    ] {
        assert_conforms(schema_name, &empty, "empty array");
    }
}
