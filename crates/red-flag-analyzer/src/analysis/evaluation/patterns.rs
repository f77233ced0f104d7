//! Trend and statistical checks over the applicant's historical series.
//!
//! Every check is gated on the minimum series length it needs; a shorter or missing series
//! means the flag does not fire.

use super::super::domain::{AmountEntry, ApplicantRecord, InventoryEntry, PaymentEntry};
use super::super::flags::PatternFlag;

pub(crate) type PatternRule = fn(&ApplicantRecord) -> Option<PatternFlag>;

const MIN_PAYMENT_ENTRIES: usize = 3;
const DEPOSIT_SPIKE_MULTIPLE: f64 = 2.5;
const PURCHASE_STOCK_MULTIPLE: f64 = 1.5;
const INVENTORY_BUILDUP_STOCK: f64 = 1000.0;
const SALES_WINDOW: usize = 3;
const SALES_VOLATILITY_RATIO: f64 = 0.4;
const EXPENSE_SPIKE_MULTIPLE: f64 = 1.7;

/// Pattern rules in reporting order.
pub(crate) const PATTERN_RULES: &[PatternRule] = &[
    late_repay_trend,
    |record| {
        payments(record)?
            .iter()
            .any(|entry| entry.skipped)
            .then_some(PatternFlag::SkippedInstalment)
    },
    |record| {
        payments(record)?
            .iter()
            .any(|entry| entry.partial_payment)
            .then_some(PatternFlag::PartialPayments)
    },
    seasonal_spikes,
    |record| indicator(record.cash_heavy_flow, PatternFlag::CashHeavyFlow),
    |record| indicator(record.reported_sales_mismatch, PatternFlag::InconsistentDeposits),
    high_purchase_low_stock,
    inventory_buildup,
    |record| {
        latest_stock_and_purchase(record)?;
        indicator(record.stock_sales_gap, PatternFlag::StockSalesGap)
    },
    declining_sales,
    volatile_sales,
    |record| {
        sales_window(record)?;
        indicator(record.unreported_sales, PatternFlag::UnreportedSales)
    },
    expense_spike,
    |record| indicator(record.high_personal_expense, PatternFlag::HighPersonalExpense),
    |record| indicator(record.salary_burden_high, PatternFlag::SalaryBurdenHigh),
    |record| indicator(record.missing_data_fields, PatternFlag::MissingDataFields),
    |record| indicator(record.inconsistent_reporting, PatternFlag::InconsistentReporting),
    |record| indicator(record.doc_mismatch, PatternFlag::DocMismatch),
];

pub(crate) fn pattern_flags(record: &ApplicantRecord) -> Vec<PatternFlag> {
    PATTERN_RULES.iter().filter_map(|rule| rule(record)).collect()
}

fn indicator(value: Option<bool>, flag: PatternFlag) -> Option<PatternFlag> {
    (value == Some(true)).then_some(flag)
}

fn payments(record: &ApplicantRecord) -> Option<&[PaymentEntry]> {
    record
        .payment_history
        .as_deref()
        .filter(|history| history.len() >= MIN_PAYMENT_ENTRIES)
}

fn latest_stock_and_purchase(record: &ApplicantRecord) -> Option<(&InventoryEntry, &AmountEntry)> {
    let inventory = record.inventory_history.as_deref()?.last()?;
    let purchase = record.purchase_history.as_deref()?.last()?;
    Some((inventory, purchase))
}

/// Last three sales amounts, oldest first.
fn sales_window(record: &ApplicantRecord) -> Option<[f64; SALES_WINDOW]> {
    let sales = record.sales_history.as_deref()?;
    let window = sales.get(sales.len().checked_sub(SALES_WINDOW)?..)?;
    Some([window[0].amount, window[1].amount, window[2].amount])
}

/// Any single step where the delay grows counts, not only a sustained trend.
pub(crate) fn late_repay_trend(record: &ApplicantRecord) -> Option<PatternFlag> {
    payments(record)?
        .windows(2)
        .any(|pair| match (pair[0].days_late, pair[1].days_late) {
            (Some(previous), Some(current)) => current > previous,
            _ => false,
        })
        .then_some(PatternFlag::LateRepayTrend)
}

pub(crate) fn seasonal_spikes(record: &ApplicantRecord) -> Option<PatternFlag> {
    let deposits = record.bank_deposits.as_deref().filter(|d| !d.is_empty())?;
    let mean = deposits.iter().map(|entry| entry.amount).sum::<f64>() / deposits.len() as f64;
    let ceiling = mean * DEPOSIT_SPIKE_MULTIPLE;
    deposits
        .iter()
        .any(|entry| entry.amount > ceiling)
        .then_some(PatternFlag::SeasonalSpikes)
}

pub(crate) fn high_purchase_low_stock(record: &ApplicantRecord) -> Option<PatternFlag> {
    let (inventory, purchase) = latest_stock_and_purchase(record)?;
    (purchase.amount > inventory.stock * PURCHASE_STOCK_MULTIPLE)
        .then_some(PatternFlag::HighPurchaseLowStock)
}

/// Needs two sales entries to tell whether sell-through is slowing.
pub(crate) fn inventory_buildup(record: &ApplicantRecord) -> Option<PatternFlag> {
    let (inventory, _) = latest_stock_and_purchase(record)?;
    let sales = record.sales_history.as_deref()?;
    let [.., previous, latest] = sales else {
        return None;
    };
    (inventory.stock > INVENTORY_BUILDUP_STOCK && latest.amount < previous.amount)
        .then_some(PatternFlag::InventoryBuildup)
}

pub(crate) fn declining_sales(record: &ApplicantRecord) -> Option<PatternFlag> {
    let [a, b, c] = sales_window(record)?;
    (a > b && b > c).then_some(PatternFlag::DecliningSales3m)
}

/// A zero middle month has no meaningful swing ratio, so it never fires.
pub(crate) fn volatile_sales(record: &ApplicantRecord) -> Option<PatternFlag> {
    let [a, b, _] = sales_window(record)?;
    if b == 0.0 {
        return None;
    }
    ((a - b).abs() / b > SALES_VOLATILITY_RATIO).then_some(PatternFlag::VolatileSales)
}

pub(crate) fn expense_spike(record: &ApplicantRecord) -> Option<PatternFlag> {
    let expenses = record.expense_history.as_deref()?;
    let [.., previous, latest] = expenses else {
        return None;
    };
    (latest.amount > previous.amount * EXPENSE_SPIKE_MULTIPLE)
        .then_some(PatternFlag::ExpenseSpikeUnexplained)
}
