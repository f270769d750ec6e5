//! Invoice numbering format and total calculation.
//!
//! Run with: `cargo test --test invoice_math_test`
use rust_decimal::Decimal;

use studio_backend::db::invoices::{calculate_totals, format_invoice_number};
use studio_backend::models::invoice_items::CreateInvoiceItem;

fn item(quantity: &str, unit_price: &str) -> CreateInvoiceItem {
    CreateInvoiceItem {
        description: "work".to_string(),
        quantity: quantity.parse().unwrap(),
        unit_price: unit_price.parse().unwrap(),
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn test_totals_with_ten_percent_tax() {
    let items = vec![item("2", "10.00"), item("1", "5.00")];

    let (subtotal, tax_amount, total) = calculate_totals(&items, dec("10"));

    assert_eq!(subtotal, dec("25.00"));
    assert_eq!(tax_amount, dec("2.50"));
    assert_eq!(total, dec("27.50"));
}

#[test]
fn test_totals_with_zero_tax() {
    let items = vec![item("3", "99.99")];

    let (subtotal, tax_amount, total) = calculate_totals(&items, Decimal::ZERO);

    assert_eq!(subtotal, dec("299.97"));
    assert_eq!(tax_amount, Decimal::ZERO);
    assert_eq!(total, dec("299.97"));
}

#[test]
fn test_totals_round_to_cents() {
    // 7.5% of 19.99 is 1.49925 and must land on whole cents.
    let items = vec![item("1", "19.99")];

    let (subtotal, tax_amount, total) = calculate_totals(&items, dec("7.5"));

    assert_eq!(subtotal, dec("19.99"));
    assert_eq!(tax_amount, dec("1.50"));
    assert_eq!(total, dec("21.49"));
}

#[test]
fn test_totals_of_empty_item_list() {
    let (subtotal, tax_amount, total) = calculate_totals(&[], dec("20"));

    assert_eq!(subtotal, Decimal::ZERO);
    assert_eq!(tax_amount, Decimal::ZERO);
    assert_eq!(total, Decimal::ZERO);
}

#[test]
fn test_invoice_number_zero_pads_to_four() {
    assert_eq!(format_invoice_number("INV", 2025, 7), "INV-2025-0007");
    assert_eq!(format_invoice_number("INV", 2025, 42), "INV-2025-0042");
}

#[test]
fn test_invoice_number_grows_past_four_digits() {
    assert_eq!(format_invoice_number("INV", 2025, 12345), "INV-2025-12345");
}
