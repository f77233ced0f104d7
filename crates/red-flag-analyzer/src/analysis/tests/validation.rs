use serde_json::json;

use super::common::*;
use crate::analysis::domain::{BusinessType, PayablePeriod};
use crate::analysis::validation::{RecordGuard, ValidationError};

#[test]
fn guard_maps_camel_case_payload_onto_record() {
    let payload = json!({
        "payablePeriod": "weekly",
        "businessType": "wholesaler",
        "monthlyRevenue": 40000,
        "installmentObligation": 9000.5,
        "highPersonalExpenses": true,
        "salesHistory": [
            { "date": "2025-01-31", "amount": 300 },
            { "date": "2025-02-28", "amount": 200 },
            { "amount": 100 }
        ],
        "paymentHistory": [{ "daysLate": 3, "skipped": false }],
        "borrowerName": "ignored by the engine"
    });

    let record = RecordGuard
        .record_from_payload(payload)
        .expect("payload is well formed");

    assert_eq!(record.payable_period, Some(PayablePeriod::Weekly));
    assert_eq!(record.business_type, Some(BusinessType::Wholesaler));
    assert_eq!(record.installment_obligation, Some(9000.5));
    assert_eq!(record.high_personal_expenses, Some(true));
    assert_eq!(record.high_personal_expense, None);
    let sales = record.sales_history.expect("sales captured");
    assert_eq!(sales.len(), 3);
    assert!(sales[2].date.is_none());
    let payments = record.payment_history.expect("payments captured");
    assert_eq!(payments[0].days_late, Some(3.0));
    assert!(!payments[0].partial_payment);
}

#[test]
fn nulls_read_as_absent() {
    let payload = json!({
        "dbr": null,
        "payablePeriod": null,
        "bankDeposits": [{ "amount": 10, "date": null }],
        "paymentHistory": [{ "daysLate": null, "skipped": null }]
    });

    let record = RecordGuard
        .record_from_payload(payload)
        .expect("nulls are tolerated");

    assert_eq!(record.dbr, None);
    assert_eq!(record.payable_period, None);
    let payments = record.payment_history.expect("payments captured");
    assert_eq!(payments[0].days_late, None);
    assert!(!payments[0].skipped);
}

#[test]
fn non_object_payload_is_rejected() {
    let error = RecordGuard
        .record_from_payload(json!([1, 2, 3]))
        .expect_err("array payload");

    assert_eq!(error, ValidationError::NotAnObject);
    assert_eq!(error.field(), None);
}

#[test]
fn numeric_field_holding_text_names_the_field() {
    let mut payload = clean_payload();
    payload["dbr"] = json!("seventy");

    let error = RecordGuard
        .record_from_payload(payload)
        .expect_err("text dbr");

    assert_eq!(
        error,
        ValidationError::InvalidType {
            field: "dbr".to_string(),
            expected: "a number",
        }
    );
}

#[test]
fn boolean_field_holding_number_is_rejected() {
    let error = RecordGuard
        .record_from_payload(json!({ "activeDefault": 1 }))
        .expect_err("numeric boolean");

    assert_eq!(error.field(), Some("activeDefault"));
}

#[test]
fn out_of_domain_payable_period_is_rejected() {
    let error = RecordGuard
        .record_from_payload(json!({ "payablePeriod": "daily" }))
        .expect_err("daily period");

    match error {
        ValidationError::OutOfDomain {
            field,
            value,
            allowed,
        } => {
            assert_eq!(field, "payablePeriod");
            assert_eq!(value, "daily");
            assert_eq!(allowed, "monthly, weekly");
        }
        other => panic!("expected out of domain error, got {other:?}"),
    }
}

#[test]
fn series_must_be_an_array_of_objects() {
    let error = RecordGuard
        .record_from_payload(json!({ "bankDeposits": { "amount": 10 } }))
        .expect_err("object series");
    assert_eq!(error.field(), Some("bankDeposits"));

    let error = RecordGuard
        .record_from_payload(json!({ "salesHistory": [{ "amount": 1 }, 5] }))
        .expect_err("scalar entry");
    assert_eq!(error.field(), Some("salesHistory[1]"));
}

#[test]
fn entries_need_their_measure() {
    let error = RecordGuard
        .record_from_payload(json!({ "inventoryHistory": [{ "amount": 10 }] }))
        .expect_err("stock missing");
    assert_eq!(
        error,
        ValidationError::MissingField {
            field: "inventoryHistory[0].stock".to_string(),
        }
    );

    let error = RecordGuard
        .record_from_payload(json!({ "expenseHistory": [{ "amount": "12" }] }))
        .expect_err("text amount");
    assert_eq!(error.field(), Some("expenseHistory[0].amount"));

    let error = RecordGuard
        .record_from_payload(json!({ "paymentHistory": [{ "partialPayment": "yes" }] }))
        .expect_err("text flag");
    assert_eq!(error.field(), Some("paymentHistory[0].partialPayment"));
}

#[test]
fn entry_dates_must_parse_and_move_forward() {
    let error = RecordGuard
        .record_from_payload(json!({ "bankDeposits": [{ "amount": 1, "date": "31/01/2025" }] }))
        .expect_err("bad date");
    assert!(matches!(error, ValidationError::InvalidDate { .. }));

    let error = RecordGuard
        .record_from_payload(json!({
            "purchaseHistory": [
                { "amount": 1, "date": "2025-03-01" },
                { "amount": 2 },
                { "amount": 3, "date": "2025-02-01" }
            ]
        }))
        .expect_err("dates go backwards");
    assert_eq!(
        error,
        ValidationError::OutOfOrder {
            field: "purchaseHistory".to_string(),
            index: 2,
        }
    );
}
