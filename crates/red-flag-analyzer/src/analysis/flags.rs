use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Auto-reject signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardFlag {
    ActiveDefault,
    RevenueBelowInstallment,
    DebtBurdenRatio,
    CurrentLiabilityRatio,
    WholesalerProfitability,
    RetailerProfitability,
    LeverageRatio,
    ShortRentDeed,
    BlacklistedIndustry,
    UnverifiedTradeLicense,
    CollateralDisputed,
}

impl HardFlag {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::ActiveDefault,
            Self::RevenueBelowInstallment,
            Self::DebtBurdenRatio,
            Self::CurrentLiabilityRatio,
            Self::WholesalerProfitability,
            Self::RetailerProfitability,
            Self::LeverageRatio,
            Self::ShortRentDeed,
            Self::BlacklistedIndustry,
            Self::UnverifiedTradeLicense,
            Self::CollateralDisputed,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ActiveDefault => "Active default/NPL with existing lender",
            Self::RevenueBelowInstallment => "Revenue doesn't meet installment obligation",
            Self::DebtBurdenRatio => "DBR ≥ 60%",
            Self::CurrentLiabilityRatio => "Current liability ratio ≥ 60%",
            Self::WholesalerProfitability => "Profitability below minimum threshold (Wholesaler)",
            Self::RetailerProfitability => "Profitability below minimum threshold (Retailer)",
            Self::LeverageRatio => "Leverage ratio ≥ 60%",
            Self::ShortRentDeed => "Rent deed period < 2x loan tenor or < 1 year",
            Self::BlacklistedIndustry => "Business in blacklisted/prohibited industry",
            Self::UnverifiedTradeLicense => "Unverified trade license/address",
            Self::CollateralDisputed => "Collateral already encumbered/disputed",
        }
    }
}

/// Grade-limiting signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoftFlag {
    WeakGuarantor,
    ShortOperatingHistory,
    YoungTradeLicense,
    ExpenseExceedsRevenue,
    CustomerConcentration,
    SupplierConcentration,
    SeasonalRevenue,
    PersonalWithdrawals,
    FrequentRelocation,
    OverstatedSales,
    InformalBorrowing,
    ReputationIssues,
    PendingLegalDisputes,
    NoDigitalFootprint,
    PoorRecordKeeping,
    LowTransactionFrequency,
    IndustryExternalShocks,
}

impl SoftFlag {
    pub const fn ordered() -> [Self; 17] {
        [
            Self::WeakGuarantor,
            Self::ShortOperatingHistory,
            Self::YoungTradeLicense,
            Self::ExpenseExceedsRevenue,
            Self::CustomerConcentration,
            Self::SupplierConcentration,
            Self::SeasonalRevenue,
            Self::PersonalWithdrawals,
            Self::FrequentRelocation,
            Self::OverstatedSales,
            Self::InformalBorrowing,
            Self::ReputationIssues,
            Self::PendingLegalDisputes,
            Self::NoDigitalFootprint,
            Self::PoorRecordKeeping,
            Self::LowTransactionFrequency,
            Self::IndustryExternalShocks,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WeakGuarantor => "Weak guarantor",
            Self::ShortOperatingHistory => "Years of operation < 2 years",
            Self::YoungTradeLicense => "Trade license age < 2 years",
            Self::ExpenseExceedsRevenue => "Expense > revenue (last month)",
            Self::CustomerConcentration => "High customer concentration (>50%)",
            Self::SupplierConcentration => "High supplier concentration (>70%)",
            Self::SeasonalRevenue => "High seasonality risk (≥50% sales in few months)",
            Self::PersonalWithdrawals => "High personal expense withdrawals",
            Self::FrequentRelocation => "Frequent shop relocation",
            Self::OverstatedSales => "Overstated sales vs verifiable deposits",
            Self::InformalBorrowing => "High informal borrowings dependence",
            Self::ReputationIssues => "Reputation issues reported locally",
            Self::PendingLegalDisputes => "Pending legal disputes / cases",
            Self::NoDigitalFootprint => "No digital footprint / no MFS usage",
            Self::PoorRecordKeeping => "Poor record-keeping (no ledgers)",
            Self::LowTransactionFrequency => "Low transaction frequency in bank/MFS",
            Self::IndustryExternalShocks => "Industry facing external shocks",
        }
    }
}

/// Behavioral signals derived from the historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternFlag {
    LateRepayTrend,
    SkippedInstalment,
    PartialPayments,
    SeasonalSpikes,
    CashHeavyFlow,
    InconsistentDeposits,
    HighPurchaseLowStock,
    InventoryBuildup,
    StockSalesGap,
    DecliningSales3m,
    VolatileSales,
    UnreportedSales,
    ExpenseSpikeUnexplained,
    HighPersonalExpense,
    SalaryBurdenHigh,
    MissingDataFields,
    InconsistentReporting,
    DocMismatch,
}

impl PatternFlag {
    pub const fn ordered() -> [Self; 18] {
        [
            Self::LateRepayTrend,
            Self::SkippedInstalment,
            Self::PartialPayments,
            Self::SeasonalSpikes,
            Self::CashHeavyFlow,
            Self::InconsistentDeposits,
            Self::HighPurchaseLowStock,
            Self::InventoryBuildup,
            Self::StockSalesGap,
            Self::DecliningSales3m,
            Self::VolatileSales,
            Self::UnreportedSales,
            Self::ExpenseSpikeUnexplained,
            Self::HighPersonalExpense,
            Self::SalaryBurdenHigh,
            Self::MissingDataFields,
            Self::InconsistentReporting,
            Self::DocMismatch,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LateRepayTrend => "LATE_REPAY_TREND",
            Self::SkippedInstalment => "SKIPPED_INSTALMENT",
            Self::PartialPayments => "PARTIAL_PAYMENTS",
            Self::SeasonalSpikes => "SEASONAL_SPIKES",
            Self::CashHeavyFlow => "CASH_HEAVY_FLOW",
            Self::InconsistentDeposits => "INCONSISTENT_DEPOSITS",
            Self::HighPurchaseLowStock => "HIGH_PURCHASE_LOW_STOCK",
            Self::InventoryBuildup => "INVENTORY_BUILDUP",
            Self::StockSalesGap => "STOCK_SALES_GAP",
            Self::DecliningSales3m => "DECLINING_SALES_3M",
            Self::VolatileSales => "VOLATILE_SALES",
            Self::UnreportedSales => "UNREPORTED_SALES",
            Self::ExpenseSpikeUnexplained => "EXPENSE_SPIKE_UNEXPLAINED",
            Self::HighPersonalExpense => "HIGH_PERSONAL_EXPENSE",
            Self::SalaryBurdenHigh => "SALARY_BURDEN_HIGH",
            Self::MissingDataFields => "MISSING_DATA_FIELDS",
            Self::InconsistentReporting => "INCONSISTENT_REPORTING",
            Self::DocMismatch => "DOC_MISMATCH",
        }
    }
}

// Flags travel over the wire as their display text so stored analyses stay readable.
macro_rules! label_serde {
    ($flag:ty, $kind:literal) => {
        impl Serialize for $flag {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $flag {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$flag>::ordered()
                    .into_iter()
                    .find(|flag| flag.label() == raw)
                    .ok_or_else(|| D::Error::custom(format!("unknown {} flag '{raw}'", $kind)))
            }
        }

        impl std::fmt::Display for $flag {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

label_serde!(HardFlag, "hard");
label_serde!(SoftFlag, "soft");
label_serde!(PatternFlag, "pattern");

/// Flags raised by one evaluation, in rule-evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet {
    pub hard: Vec<HardFlag>,
    pub soft: Vec<SoftFlag>,
    pub pattern: Vec<PatternFlag>,
}

impl FlagSet {
    pub fn is_clean(&self) -> bool {
        self.hard.is_empty() && self.soft.is_empty() && self.pattern.is_empty()
    }
}
