use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Billing cadence used to normalize revenue against the installment obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayablePeriod {
    Monthly,
    Weekly,
}

impl PayablePeriod {
    pub const fn ordered() -> [Self; 2] {
        [Self::Monthly, Self::Weekly]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
        }
    }

    /// Scale a monthly revenue figure down to one payable period.
    pub fn period_revenue(self, monthly_revenue: f64) -> f64 {
        match self {
            Self::Monthly => monthly_revenue,
            Self::Weekly => monthly_revenue / 4.0,
        }
    }
}

/// Trading model, which determines the profitability floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Wholesaler,
    Retailer,
}

impl BusinessType {
    pub const fn ordered() -> [Self; 2] {
        [Self::Wholesaler, Self::Retailer]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Wholesaler => "wholesaler",
            Self::Retailer => "retailer",
        }
    }
}

/// One installment in the applicant's repayment history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_late: Option<f64>,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub partial_payment: bool,
}

/// Monetary observation used by the deposit, purchase, sales, and expense series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub amount: f64,
}

impl AmountEntry {
    pub fn new(amount: f64) -> Self {
        Self { date: None, amount }
    }
}

/// Stock-on-hand observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub stock: f64,
}

impl InventoryEntry {
    pub fn new(stock: f64) -> Self {
        Self { date: None, stock }
    }
}

/// Borrower snapshot evaluated by the red-flag engine.
///
/// Every field is optional so that an absent value never reads as `false` or zero; each rule
/// states which fields it needs before it can fire. Series are ordered oldest to newest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantRecord {
    // Financials & credit ratios
    pub active_default: Option<bool>,
    pub monthly_revenue: Option<f64>,
    pub last_month_expense: Option<f64>,
    pub installment_obligation: Option<f64>,
    pub payable_period: Option<PayablePeriod>,
    pub dbr: Option<f64>,
    pub current_liability_ratio: Option<f64>,
    pub profitability_ratio: Option<f64>,
    pub business_type: Option<BusinessType>,
    pub leverage_ratio: Option<f64>,

    // Compliance
    pub loan_tenor: Option<f64>,
    pub rent_deed_period: Option<f64>,
    pub blacklisted_industry: Option<bool>,
    pub verified_trade_license: Option<bool>,
    pub collateral_disputes: Option<bool>,

    // Grade limiters
    pub weak_guarantor: Option<bool>,
    pub years_of_operation: Option<f64>,
    pub trade_license_age: Option<f64>,
    pub customer_concentration: Option<f64>,
    pub supplier_concentration: Option<f64>,
    pub seasonal_revenue: Option<f64>,
    pub high_personal_expenses: Option<bool>,
    pub frequent_relocation: Option<bool>,
    pub overstated_sales: Option<bool>,
    pub informal_borrowing: Option<bool>,
    pub reputation_issues: Option<bool>,
    pub pending_legal_disputes: Option<bool>,
    pub no_digital_footprint: Option<bool>,
    pub poor_record_keeping: Option<bool>,
    pub low_transaction_frequency: Option<bool>,
    pub industry_external_shocks: Option<bool>,

    // Historical series
    pub payment_history: Option<Vec<PaymentEntry>>,
    pub bank_deposits: Option<Vec<AmountEntry>>,
    pub inventory_history: Option<Vec<InventoryEntry>>,
    pub purchase_history: Option<Vec<AmountEntry>>,
    pub sales_history: Option<Vec<AmountEntry>>,
    pub expense_history: Option<Vec<AmountEntry>>,

    // Indicators precomputed upstream of the engine
    pub cash_heavy_flow: Option<bool>,
    pub reported_sales_mismatch: Option<bool>,
    pub stock_sales_gap: Option<bool>,
    pub unreported_sales: Option<bool>,
    pub missing_data_fields: Option<bool>,
    pub inconsistent_reporting: Option<bool>,
    pub doc_mismatch: Option<bool>,
    pub high_personal_expense: Option<bool>,
    pub salary_burden_high: Option<bool>,
}

impl ApplicantRecord {
    /// Borrower used to pre-fill intake forms and CLI demos.
    pub fn sample() -> Self {
        Self {
            monthly_revenue: Some(150_000.0),
            last_month_expense: Some(50_000.0),
            installment_obligation: Some(50_000.0),
            payable_period: Some(PayablePeriod::Monthly),
            dbr: Some(35.0),
            current_liability_ratio: Some(55.0),
            profitability_ratio: Some(12.0),
            business_type: Some(BusinessType::Retailer),
            leverage_ratio: Some(40.0),
            loan_tenor: Some(6.0),
            rent_deed_period: Some(12.0),
            blacklisted_industry: Some(false),
            verified_trade_license: Some(true),
            collateral_disputes: Some(false),
            weak_guarantor: Some(false),
            years_of_operation: Some(3.0),
            trade_license_age: Some(3.0),
            customer_concentration: Some(60.0),
            supplier_concentration: Some(80.0),
            seasonal_revenue: Some(30.0),
            high_personal_expenses: Some(false),
            frequent_relocation: Some(false),
            overstated_sales: Some(false),
            informal_borrowing: Some(false),
            reputation_issues: Some(false),
            pending_legal_disputes: Some(false),
            no_digital_footprint: Some(false),
            poor_record_keeping: Some(true),
            low_transaction_frequency: Some(false),
            industry_external_shocks: Some(false),
            ..Self::default()
        }
    }
}

/// Identifier wrapper for stored analyses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(pub String);

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
