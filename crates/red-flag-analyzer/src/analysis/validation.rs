use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::domain::{ApplicantRecord, BusinessType, PayablePeriod};

/// Shape errors raised before a payload reaches the rule engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("applicant payload must be a JSON object")]
    NotAnObject,
    #[error("field `{field}` must be {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },
    #[error("field `{field}` has unsupported value '{value}' (expected one of: {allowed})")]
    OutOfDomain {
        field: String,
        value: String,
        allowed: String,
    },
    #[error("field `{field}` is required")]
    MissingField { field: String },
    #[error("field `{field}` must be a YYYY-MM-DD date, found '{value}'")]
    InvalidDate { field: String, value: String },
    #[error("series `{field}` is not chronological at entry {index}")]
    OutOfOrder { field: String, index: usize },
    #[error("payload could not be mapped onto an applicant record: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Name of the offending field, when the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidType { field, .. }
            | ValidationError::OutOfDomain { field, .. }
            | ValidationError::MissingField { field }
            | ValidationError::InvalidDate { field, .. }
            | ValidationError::OutOfOrder { field, .. } => Some(field),
            ValidationError::NotAnObject | ValidationError::Malformed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Number,
    Boolean,
    PayablePeriod,
    BusinessType,
    Series(EntryKind),
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    Payment,
    Amount,
    Inventory,
}

const SCHEMA: &[(&str, FieldKind)] = &[
    ("activeDefault", FieldKind::Boolean),
    ("monthlyRevenue", FieldKind::Number),
    ("lastMonthExpense", FieldKind::Number),
    ("installmentObligation", FieldKind::Number),
    ("payablePeriod", FieldKind::PayablePeriod),
    ("dbr", FieldKind::Number),
    ("currentLiabilityRatio", FieldKind::Number),
    ("profitabilityRatio", FieldKind::Number),
    ("businessType", FieldKind::BusinessType),
    ("leverageRatio", FieldKind::Number),
    ("loanTenor", FieldKind::Number),
    ("rentDeedPeriod", FieldKind::Number),
    ("blacklistedIndustry", FieldKind::Boolean),
    ("verifiedTradeLicense", FieldKind::Boolean),
    ("collateralDisputes", FieldKind::Boolean),
    ("weakGuarantor", FieldKind::Boolean),
    ("yearsOfOperation", FieldKind::Number),
    ("tradeLicenseAge", FieldKind::Number),
    ("customerConcentration", FieldKind::Number),
    ("supplierConcentration", FieldKind::Number),
    ("seasonalRevenue", FieldKind::Number),
    ("highPersonalExpenses", FieldKind::Boolean),
    ("frequentRelocation", FieldKind::Boolean),
    ("overstatedSales", FieldKind::Boolean),
    ("informalBorrowing", FieldKind::Boolean),
    ("reputationIssues", FieldKind::Boolean),
    ("pendingLegalDisputes", FieldKind::Boolean),
    ("noDigitalFootprint", FieldKind::Boolean),
    ("poorRecordKeeping", FieldKind::Boolean),
    ("lowTransactionFrequency", FieldKind::Boolean),
    ("industryExternalShocks", FieldKind::Boolean),
    ("paymentHistory", FieldKind::Series(EntryKind::Payment)),
    ("bankDeposits", FieldKind::Series(EntryKind::Amount)),
    ("inventoryHistory", FieldKind::Series(EntryKind::Inventory)),
    ("purchaseHistory", FieldKind::Series(EntryKind::Amount)),
    ("salesHistory", FieldKind::Series(EntryKind::Amount)),
    ("expenseHistory", FieldKind::Series(EntryKind::Amount)),
    ("cashHeavyFlow", FieldKind::Boolean),
    ("reportedSalesMismatch", FieldKind::Boolean),
    ("stockSalesGap", FieldKind::Boolean),
    ("unreportedSales", FieldKind::Boolean),
    ("missingDataFields", FieldKind::Boolean),
    ("inconsistentReporting", FieldKind::Boolean),
    ("docMismatch", FieldKind::Boolean),
    ("highPersonalExpense", FieldKind::Boolean),
    ("salaryBurdenHigh", FieldKind::Boolean),
];

/// Guard responsible for turning raw intake payloads into `ApplicantRecord` values.
#[derive(Debug, Clone, Default)]
pub struct RecordGuard;

impl RecordGuard {
    /// Check every known field's shape, then map the payload onto a typed record.
    ///
    /// `null` reads as absent and unknown fields are ignored.
    pub fn record_from_payload(&self, payload: Value) -> Result<ApplicantRecord, ValidationError> {
        let Value::Object(mut fields) = payload else {
            return Err(ValidationError::NotAnObject);
        };

        fields.retain(|_, value| !value.is_null());
        for (name, kind) in SCHEMA {
            if let Some(value) = fields.get_mut(*name) {
                check_field(name, *kind, value)?;
            }
        }

        serde_json::from_value(Value::Object(fields))
            .map_err(|err| ValidationError::Malformed(err.to_string()))
    }
}

fn check_field(name: &str, kind: FieldKind, value: &mut Value) -> Result<(), ValidationError> {
    match kind {
        FieldKind::Number => expect_number(name, value),
        FieldKind::Boolean => expect_boolean(name, value),
        FieldKind::PayablePeriod => expect_label(
            name,
            value,
            &PayablePeriod::ordered().map(PayablePeriod::label),
        ),
        FieldKind::BusinessType => expect_label(
            name,
            value,
            &BusinessType::ordered().map(BusinessType::label),
        ),
        FieldKind::Series(entry) => check_series(name, entry, value),
    }
}

fn expect_number(field: &str, value: &Value) -> Result<(), ValidationError> {
    if value.is_number() {
        Ok(())
    } else {
        Err(ValidationError::InvalidType {
            field: field.to_string(),
            expected: "a number",
        })
    }
}

fn expect_boolean(field: &str, value: &Value) -> Result<(), ValidationError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(ValidationError::InvalidType {
            field: field.to_string(),
            expected: "a boolean",
        })
    }
}

fn expect_label(field: &str, value: &Value, allowed: &[&str]) -> Result<(), ValidationError> {
    let raw = value.as_str().ok_or_else(|| ValidationError::InvalidType {
        field: field.to_string(),
        expected: "a string",
    })?;

    if allowed.contains(&raw) {
        Ok(())
    } else {
        Err(ValidationError::OutOfDomain {
            field: field.to_string(),
            value: raw.to_string(),
            allowed: allowed.join(", "),
        })
    }
}

fn check_series(name: &str, kind: EntryKind, value: &mut Value) -> Result<(), ValidationError> {
    let entries = value.as_array_mut().ok_or_else(|| ValidationError::InvalidType {
        field: name.to_string(),
        expected: "an array",
    })?;

    let mut previous_date: Option<NaiveDate> = None;
    for (index, entry) in entries.iter_mut().enumerate() {
        let path = format!("{name}[{index}]");
        let entry = entry.as_object_mut().ok_or_else(|| ValidationError::InvalidType {
            field: path.clone(),
            expected: "an object",
        })?;
        entry.retain(|_, value| !value.is_null());

        check_entry(&path, kind, entry)?;

        if let Some(date) = entry_date(&path, entry)? {
            if previous_date.is_some_and(|previous| date < previous) {
                return Err(ValidationError::OutOfOrder {
                    field: name.to_string(),
                    index,
                });
            }
            previous_date = Some(date);
        }
    }

    Ok(())
}

fn check_entry(path: &str, kind: EntryKind, entry: &Map<String, Value>) -> Result<(), ValidationError> {
    match kind {
        EntryKind::Payment => {
            if let Some(value) = entry.get("daysLate") {
                expect_number(&format!("{path}.daysLate"), value)?;
            }
            for key in ["skipped", "partialPayment"] {
                if let Some(value) = entry.get(key) {
                    expect_boolean(&format!("{path}.{key}"), value)?;
                }
            }
            Ok(())
        }
        EntryKind::Amount => required_number(path, "amount", entry.get("amount")),
        EntryKind::Inventory => required_number(path, "stock", entry.get("stock")),
    }
}

fn required_number(path: &str, key: &str, value: Option<&Value>) -> Result<(), ValidationError> {
    let field = format!("{path}.{key}");
    match value {
        Some(value) => expect_number(&field, value),
        None => Err(ValidationError::MissingField { field }),
    }
}

fn entry_date(path: &str, entry: &Map<String, Value>) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(value) = entry.get("date") else {
        return Ok(None);
    };
    let field = format!("{path}.date");
    let raw = value.as_str().ok_or_else(|| ValidationError::InvalidType {
        field: field.clone(),
        expected: "a string",
    })?;

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}
