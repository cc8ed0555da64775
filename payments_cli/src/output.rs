use std::time::Duration;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use payments_lib::types::{Order, Payment, PaymentCard, StatusTone};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::xml_output;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "table" => OutputFormat::Table,
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "md" | "markdown" => OutputFormat::Markdown,
            "xml" => OutputFormat::Xml,
            other => bail!("unknown output format '{}' (expected table, json, csv, md, xml)", other),
        })
    }
}

#[derive(Tabled, Serialize)]
struct PaymentRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Order")]
    #[serde(rename = "Order")]
    order: i64,
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    user: i64,
    #[tabled(rename = "Amount")]
    #[serde(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Tabled, Serialize)]
struct CardRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Number")]
    #[serde(rename = "Number")]
    number: String,
    #[tabled(rename = "Holder")]
    #[serde(rename = "Holder")]
    holder: String,
    #[tabled(rename = "Expires")]
    #[serde(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    card_type: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
}

#[derive(Tabled, Serialize)]
struct OrderRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "User")]
    #[serde(rename = "User")]
    user: i64,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

// -- Row builders --

/// Status text, with a marker for its tone when `decorate` is set.
fn status_cell(status: &str, tone: StatusTone, decorate: bool) -> String {
    if !decorate {
        return status.to_string();
    }
    match tone {
        StatusTone::Success => format!("{} ✓", status),
        StatusTone::Danger => format!("{} ✗", status),
        StatusTone::Warning => format!("{} …", status),
        StatusTone::Neutral => status.to_string(),
    }
}

fn build_payment_rows(payments: &[Payment], decorate: bool) -> Vec<PaymentRow> {
    payments
        .iter()
        .map(|p| PaymentRow {
            id: p.id,
            order: p.order_id,
            user: p.user_id,
            amount: format_amount(p.payment_amount),
            status: status_cell(p.status.as_str(), p.status.tone(), decorate),
            date: p
                .payment_date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_card_rows(cards: &[PaymentCard]) -> Vec<CardRow> {
    cards
        .iter()
        .map(|c| CardRow {
            id: c.id,
            number: c.masked_number(),
            holder: c.card_holder_name.clone(),
            expires: c.expiration_date.clone(),
            card_type: c.card_type.clone().unwrap_or_default(),
            active: if c.active { "yes" } else { "no" }.to_string(),
        })
        .collect()
}

fn build_order_rows(orders: &[Order], decorate: bool) -> Vec<OrderRow> {
    orders
        .iter()
        .map(|o| OrderRow {
            id: o.id,
            user: o.user_id,
            status: status_cell(o.status.as_str(), o.status.tone(), decorate),
            total: format_amount(o.total_price),
            created: o
                .created_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

// -- Printing --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json | OutputFormat::Xml => {
            bail!("{:?} output is not tabular", format)
        }
    }
    Ok(())
}

pub fn print_payments(payments: &[Payment], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&payments),
        OutputFormat::Xml => println!("{}", xml_output::payments_to_xml(payments)?),
        _ => print_rows(
            build_payment_rows(payments, *format == OutputFormat::Table),
            format,
        )?,
    }
    Ok(())
}

pub fn print_cards(cards: &[PaymentCard], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&cards),
        OutputFormat::Xml => println!("{}", xml_output::cards_to_xml(cards)?),
        _ => print_rows(build_card_rows(cards), format)?,
    }
    Ok(())
}

pub fn print_orders(orders: &[Order], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&orders),
        OutputFormat::Xml => println!("{}", xml_output::orders_to_xml(orders)?),
        _ => print_rows(
            build_order_rows(orders, *format == OutputFormat::Table),
            format,
        )?,
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Spinner on stderr while a request is in flight. Hidden when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
        let path = format!("{}/../payments_api/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
        let text = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    fn load_payments() -> Vec<Payment> {
        load_fixture("payments.json")
    }

    fn load_cards() -> Vec<PaymentCard> {
        load_fixture("cards.json")
    }

    fn load_orders() -> Vec<Order> {
        let page: serde_json::Value = load_fixture("orders_page.json");
        serde_json::from_value(page["content"].clone()).unwrap()
    }

    fn csv_from_rows<T: Serialize>(rows: &[T]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.serialize(row).unwrap();
        }
        wtr.flush().unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("md").unwrap(), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("xml").unwrap(), OutputFormat::Xml);
        assert!(OutputFormat::parse("yaml").is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(19.99), "19.99");
        assert_eq!(format_amount(75.0), "75.00");
    }

    #[test]
    fn test_status_cell_markers() {
        assert_eq!(status_cell("PAID", StatusTone::Success, true), "PAID ✓");
        assert_eq!(status_cell("FAILED", StatusTone::Danger, true), "FAILED ✗");
        assert_eq!(status_cell("PENDING", StatusTone::Warning, true), "PENDING …");
        assert_eq!(status_cell("ODD", StatusTone::Neutral, true), "ODD");
        assert_eq!(status_cell("PAID", StatusTone::Success, false), "PAID");
    }

    #[test]
    fn test_build_payment_rows_mapping() {
        let rows = build_payment_rows(&load_payments(), false);
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.id, 102);
        assert_eq!(row.order, 501);
        assert_eq!(row.status, "FAILED");
        assert_eq!(row.amount, "30.49");
        assert_eq!(row.date, "2024-03-02 10:15");

        let refunded = &rows[1];
        assert_eq!(refunded.status, "REFUNDED");
        assert_eq!(refunded.date, "");
    }

    #[test]
    fn test_build_card_rows_masks_numbers() {
        let rows = build_card_rows(&load_cards());
        assert_eq!(rows[0].number, "**** 1111");
        assert_eq!(rows[0].active, "no");
        assert_eq!(rows[1].card_type, "MASTERCARD");
        assert_eq!(rows[1].active, "yes");
    }

    #[test]
    fn test_build_order_rows_decorated() {
        let rows = build_order_rows(&load_orders(), true);
        assert_eq!(rows[0].status, "PENDING …");
        assert_eq!(rows[1].status, "PAID ✓");
        assert_eq!(rows[2].status, "CANCELLED ✗");
        assert_eq!(rows[2].created, "");
        assert_eq!(rows[2].total, "5.25");
    }

    #[test]
    fn test_csv_headers() {
        let csv = csv_from_rows(&build_payment_rows(&load_payments(), false));
        assert_eq!(csv.lines().next().unwrap(), "ID,Order,User,Amount,Status,Date");

        let csv = csv_from_rows(&build_card_rows(&load_cards()));
        assert_eq!(csv.lines().next().unwrap(), "ID,Number,Holder,Expires,Type,Active");

        let csv = csv_from_rows(&build_order_rows(&load_orders(), false));
        assert_eq!(csv.lines().next().unwrap(), "ID,User,Status,Total,Created");
    }

    #[test]
    fn test_csv_never_contains_full_card_number() {
        let csv = csv_from_rows(&build_card_rows(&load_cards()));
        assert!(!csv.contains("4111111111111111"));
    }

    #[test]
    fn test_markdown_structure() {
        let rows = build_payment_rows(&load_payments(), false);
        let mut table = Table::new(&rows);
        table.with(Style::markdown());
        let md = table.to_string();

        assert!(md.contains('|'));
        assert!(md.contains("---"));
        let header_line = md.lines().next().unwrap();
        assert!(header_line.contains("Amount"));
        assert!(header_line.contains("Status"));
    }

    #[test]
    fn test_json_payments_serializable() {
        let val = serde_json::to_value(load_payments()).unwrap();
        assert_eq!(val.as_array().unwrap().len(), 2);
        assert_eq!(val[1]["status"], "REFUNDED");
    }
}
