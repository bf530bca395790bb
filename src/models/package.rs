//! Compensation package comparison models.
//!
//! A [`PackageInput`] describes one job offer: how the salary is quoted, the
//! regime and benefits, and an optional equity grant. Comparing several of
//! them yields a [`PackageComparison`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BenefitElections, Currency, EquityConfig, OtherBenefit, SalaryCalculation, YearlyEquity};

/// Period a salary amount is quoted for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// Per hour worked.
    Hourly,
    /// Per day.
    Daily,
    /// Per week.
    Weekly,
    /// Per fortnight.
    Biweekly,
    /// Per month.
    #[default]
    Monthly,
}

/// How a package quotes its salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryQuote {
    /// Quoted amount.
    pub amount: Decimal,
    /// Currency of `amount`.
    #[serde(default)]
    pub currency: Currency,
    /// USD to MXN rate; the fiscal year's rate when absent.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    /// Period `amount` is quoted for.
    #[serde(default)]
    pub pay_frequency: PayFrequency,
    /// Weekly hours for hourly salaries; 40 when absent.
    #[serde(default)]
    pub hours_per_week: Option<Decimal>,
}

/// Regime-specific elections of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PackageRegime {
    /// Salaried employee with its benefit elections.
    SueldosYSalarios(BenefitElections),
    /// Independent worker under RESICO.
    Resico {
        /// Days per year taken off without pay.
        #[serde(default)]
        unpaid_vacation_days: u32,
    },
}

/// Equity grant offered with a package, in USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityGrant {
    /// Initial grant value.
    pub initial_grant_usd: Decimal,
    /// Whether yearly refreshers are offered.
    #[serde(default)]
    pub has_refreshers: bool,
    /// Lower bound of the yearly refresher.
    #[serde(default)]
    pub refresher_min_usd: Decimal,
    /// Upper bound of the yearly refresher.
    #[serde(default)]
    pub refresher_max_usd: Decimal,
}

/// One job offer to compare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInput {
    /// Display name; "Paquete N" when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Salary quote.
    pub salary: SalaryQuote,
    /// Regime and its elections.
    pub regime: PackageRegime,
    /// Years with the employer, used by the SBC integration factor.
    #[serde(default)]
    pub years_of_service: Option<u32>,
    /// Other benefits ("otras prestaciones").
    #[serde(default)]
    pub other_benefits: Vec<OtherBenefit>,
    /// Optional equity grant.
    #[serde(default)]
    pub equity: Option<EquityGrant>,
}

/// The evaluated result of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageResult {
    /// Display name of the package.
    pub package_name: String,
    /// Regime calculation for the resolved monthly salary.
    pub calculation: SalaryCalculation,
    /// Equity configuration, when a grant was offered.
    pub equity_config: Option<EquityConfig>,
    /// Vesting schedule, empty without a grant.
    pub equity_schedule: Vec<YearlyEquity>,
}

/// Fiscal parameters the comparison was computed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYearSummary {
    /// The calendar year.
    pub year: i32,
    /// Monthly UMA.
    pub uma_monthly: Decimal,
    /// USD to MXN exchange rate.
    pub usd_mxn_rate: Decimal,
}

/// Results of comparing several packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageComparison {
    /// Evaluated packages in input order, skipped packages excluded.
    pub results: Vec<PackageResult>,
    /// Index into `results` of the package with the highest yearly net.
    pub best_package_index: usize,
    /// Fiscal year the packages were evaluated under.
    pub fiscal_year: FiscalYearSummary,
}

impl PackageComparison {
    /// Returns the package with the highest yearly net.
    pub fn best_package(&self) -> Option<&PackageResult> {
        self.results.get(self.best_package_index)
    }
}
