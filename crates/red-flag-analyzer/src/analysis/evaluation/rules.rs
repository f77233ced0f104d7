//! Static threshold and indicator rules over the flat fields of an applicant record.
//!
//! Each rule is a standalone predicate. A comparison only fires when every operand it reads
//! is present; a boolean rule only fires on an explicit value.

use super::super::domain::{ApplicantRecord, BusinessType};
use super::super::flags::{HardFlag, SoftFlag};

pub(crate) type HardRule = fn(&ApplicantRecord) -> Option<HardFlag>;
pub(crate) type SoftRule = fn(&ApplicantRecord) -> Option<SoftFlag>;

const RATIO_CEILING: f64 = 60.0;
const WHOLESALER_MIN_PROFITABILITY: f64 = 3.0;
const RETAILER_MIN_PROFITABILITY: f64 = 10.0;
const RENT_DEED_TENOR_MULTIPLE: f64 = 2.0;
const RENT_DEED_MIN_YEARS: f64 = 1.0;
const MIN_OPERATING_YEARS: f64 = 2.0;
const CUSTOMER_CONCENTRATION_CAP: f64 = 50.0;
const SUPPLIER_CONCENTRATION_CAP: f64 = 70.0;
const SEASONAL_REVENUE_CAP: f64 = 50.0;

/// Hard rules in reporting order.
pub(crate) const HARD_RULES: &[HardRule] = &[
    active_default,
    revenue_below_installment,
    debt_burden_ratio,
    current_liability_ratio,
    wholesaler_profitability,
    retailer_profitability,
    leverage_ratio,
    short_rent_deed,
    blacklisted_industry,
    unverified_trade_license,
    collateral_disputed,
];

/// Soft rules in reporting order.
pub(crate) const SOFT_RULES: &[SoftRule] = &[
    |record| when(record.weak_guarantor, SoftFlag::WeakGuarantor),
    |record| {
        below(record.years_of_operation, MIN_OPERATING_YEARS)
            .then_some(SoftFlag::ShortOperatingHistory)
    },
    |record| {
        below(record.trade_license_age, MIN_OPERATING_YEARS).then_some(SoftFlag::YoungTradeLicense)
    },
    expense_exceeds_revenue,
    |record| {
        above(record.customer_concentration, CUSTOMER_CONCENTRATION_CAP)
            .then_some(SoftFlag::CustomerConcentration)
    },
    |record| {
        above(record.supplier_concentration, SUPPLIER_CONCENTRATION_CAP)
            .then_some(SoftFlag::SupplierConcentration)
    },
    |record| {
        above(record.seasonal_revenue, SEASONAL_REVENUE_CAP).then_some(SoftFlag::SeasonalRevenue)
    },
    |record| when(record.high_personal_expenses, SoftFlag::PersonalWithdrawals),
    |record| when(record.frequent_relocation, SoftFlag::FrequentRelocation),
    |record| when(record.overstated_sales, SoftFlag::OverstatedSales),
    |record| when(record.informal_borrowing, SoftFlag::InformalBorrowing),
    |record| when(record.reputation_issues, SoftFlag::ReputationIssues),
    |record| when(record.pending_legal_disputes, SoftFlag::PendingLegalDisputes),
    |record| when(record.no_digital_footprint, SoftFlag::NoDigitalFootprint),
    |record| when(record.poor_record_keeping, SoftFlag::PoorRecordKeeping),
    |record| when(record.low_transaction_frequency, SoftFlag::LowTransactionFrequency),
    |record| when(record.industry_external_shocks, SoftFlag::IndustryExternalShocks),
];

pub(crate) fn hard_flags(record: &ApplicantRecord) -> Vec<HardFlag> {
    HARD_RULES.iter().filter_map(|rule| rule(record)).collect()
}

pub(crate) fn soft_flags(record: &ApplicantRecord) -> Vec<SoftFlag> {
    SOFT_RULES.iter().filter_map(|rule| rule(record)).collect()
}

fn when<F>(indicator: Option<bool>, flag: F) -> Option<F> {
    (indicator == Some(true)).then_some(flag)
}

fn at_least(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|value| value >= threshold)
}

fn at_most(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|value| value <= threshold)
}

fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|value| value > threshold)
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|value| value < threshold)
}

pub(crate) fn active_default(record: &ApplicantRecord) -> Option<HardFlag> {
    when(record.active_default, HardFlag::ActiveDefault)
}

/// Skipped entirely without a payable period: too little data to normalize the obligation.
pub(crate) fn revenue_below_installment(record: &ApplicantRecord) -> Option<HardFlag> {
    let period = record.payable_period?;
    let revenue = period.period_revenue(record.monthly_revenue?);
    let obligation = record.installment_obligation?;
    (revenue < obligation).then_some(HardFlag::RevenueBelowInstallment)
}

pub(crate) fn debt_burden_ratio(record: &ApplicantRecord) -> Option<HardFlag> {
    at_least(record.dbr, RATIO_CEILING).then_some(HardFlag::DebtBurdenRatio)
}

pub(crate) fn current_liability_ratio(record: &ApplicantRecord) -> Option<HardFlag> {
    at_least(record.current_liability_ratio, RATIO_CEILING)
        .then_some(HardFlag::CurrentLiabilityRatio)
}

pub(crate) fn wholesaler_profitability(record: &ApplicantRecord) -> Option<HardFlag> {
    (record.business_type == Some(BusinessType::Wholesaler)
        && at_most(record.profitability_ratio, WHOLESALER_MIN_PROFITABILITY))
    .then_some(HardFlag::WholesalerProfitability)
}

pub(crate) fn retailer_profitability(record: &ApplicantRecord) -> Option<HardFlag> {
    (record.business_type == Some(BusinessType::Retailer)
        && at_most(record.profitability_ratio, RETAILER_MIN_PROFITABILITY))
    .then_some(HardFlag::RetailerProfitability)
}

pub(crate) fn leverage_ratio(record: &ApplicantRecord) -> Option<HardFlag> {
    at_least(record.leverage_ratio, RATIO_CEILING).then_some(HardFlag::LeverageRatio)
}

/// Needs the deed period; the tenor comparison is dropped when no tenor was captured.
pub(crate) fn short_rent_deed(record: &ApplicantRecord) -> Option<HardFlag> {
    let deed = record.rent_deed_period?;
    let shorter_than_tenor = record
        .loan_tenor
        .is_some_and(|tenor| deed < tenor * RENT_DEED_TENOR_MULTIPLE);
    (shorter_than_tenor || deed < RENT_DEED_MIN_YEARS).then_some(HardFlag::ShortRentDeed)
}

pub(crate) fn blacklisted_industry(record: &ApplicantRecord) -> Option<HardFlag> {
    when(record.blacklisted_industry, HardFlag::BlacklistedIndustry)
}

/// Fires on an explicit `false` only; a record that never reported verification is not flagged.
pub(crate) fn unverified_trade_license(record: &ApplicantRecord) -> Option<HardFlag> {
    (record.verified_trade_license == Some(false)).then_some(HardFlag::UnverifiedTradeLicense)
}

pub(crate) fn collateral_disputed(record: &ApplicantRecord) -> Option<HardFlag> {
    when(record.collateral_disputes, HardFlag::CollateralDisputed)
}

fn expense_exceeds_revenue(record: &ApplicantRecord) -> Option<SoftFlag> {
    let expense = record.last_month_expense?;
    let revenue = record.monthly_revenue?;
    (expense > revenue).then_some(SoftFlag::ExpenseExceedsRevenue)
}
