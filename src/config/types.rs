//! Configuration types for fiscal-year parameters.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a fiscal configuration directory.
//! Every rate is stored as a fraction (`0.0192` for 1.92%).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters of a single fiscal year.
///
/// Values are published by the government (UMA, minimum wage, subsidy) or
/// refreshed by an external process (exchange rate). The engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Identifier used to key the bracket tables of this year.
    pub id: u32,
    /// The calendar year (e.g., 2025).
    pub year: i32,
    /// The date from which these parameters apply.
    pub effective_date: NaiveDate,
    /// Whether this is the fiscal year used for new calculations.
    #[serde(default)]
    pub is_active: bool,
    /// Daily UMA (Unidad de Medida y Actualización).
    pub uma_daily: Decimal,
    /// Monthly UMA.
    pub uma_monthly: Decimal,
    /// Annual UMA.
    pub uma_annual: Decimal,
    /// UMI value (Unidad Mixta Infonavit).
    pub umi_value: Decimal,
    /// General daily minimum wage.
    pub smg_general: Decimal,
    /// Daily minimum wage in the northern border free zone.
    pub smg_border: Decimal,
    /// Fraction of gross salary granted as employment subsidy.
    pub subsidy_factor: Decimal,
    /// Monthly gross salary up to which the subsidy applies.
    pub subsidy_threshold_monthly: Decimal,
    /// Savings-fund cap expressed as a multiple of the annual UMA.
    #[serde(default = "default_savings_fund_cap_uma_factor")]
    pub savings_fund_cap_uma_factor: Decimal,
    /// Maximum legal savings-fund contribution percentage.
    #[serde(default = "default_savings_fund_max_percentage")]
    pub savings_fund_max_percentage: Decimal,
    /// Pantry voucher cap expressed as a multiple of the monthly UMA.
    #[serde(default = "default_pantry_vouchers_uma_cap")]
    pub pantry_vouchers_uma_cap: Decimal,
    /// USD to MXN exchange rate.
    #[serde(default = "default_usd_mxn_rate")]
    pub usd_mxn_rate: Decimal,
}

fn default_savings_fund_cap_uma_factor() -> Decimal {
    Decimal::new(13, 1)
}

fn default_savings_fund_max_percentage() -> Decimal {
    Decimal::from(13)
}

fn default_pantry_vouchers_uma_cap() -> Decimal {
    Decimal::ONE
}

fn default_usd_mxn_rate() -> Decimal {
    Decimal::from(20)
}

/// One row of the monthly ISR table.
///
/// The last row of a table has no upper limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrBracket {
    /// Lower limit of the row (inclusive).
    pub lower_limit: Decimal,
    /// Upper limit of the row (inclusive), `None` when unbounded.
    pub upper_limit: Option<Decimal>,
    /// Fixed fee charged for income reaching this row.
    pub fixed_fee: Decimal,
    /// Marginal rate applied to the surplus over the lower limit.
    pub surplus_rate: Decimal,
}

impl IsrBracket {
    /// Returns true when `income` falls within `[lower_limit, upper_limit]`.
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.lower_limit && self.upper_limit.is_none_or(|upper| income <= upper)
    }
}

/// An IMSS contribution concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImssConcept {
    /// Name of the concept (e.g., "Invalidez y Vida").
    pub name: String,
    /// Rate paid by the worker.
    pub worker_rate: Decimal,
    /// Rate paid by the employer.
    pub employer_rate: Decimal,
    /// Cap on the daily contribution base, in UMA multiples.
    #[serde(default)]
    pub base_cap_in_umas: Option<u32>,
    /// False when the employer rate is looked up progressively.
    #[serde(default = "default_is_fixed_rate")]
    pub is_fixed_rate: bool,
}

fn default_is_fixed_rate() -> bool {
    true
}

/// Progressive employer rate row for "Cesantía en Edad Avanzada y Vejez".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CesantiaBracket {
    /// Lower bound of the daily salary in UMAs (inclusive).
    pub lower_bound_uma: Decimal,
    /// Upper bound of the daily salary in UMAs (inclusive), `None` when unbounded.
    pub upper_bound_uma: Option<Decimal>,
    /// Employer rate for salaries in this row.
    pub employer_rate: Decimal,
}

impl CesantiaBracket {
    /// Returns true when `salary_in_umas` falls within this row.
    pub fn contains(&self, salary_in_umas: Decimal) -> bool {
        salary_in_umas >= self.lower_bound_uma
            && self
                .upper_bound_uma
                .is_none_or(|upper| salary_in_umas <= upper)
    }
}

/// Flat-rate row of the monthly RESICO table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResicoBracket {
    /// Highest monthly income covered by this row (inclusive).
    pub upper_limit: Decimal,
    /// Flat rate applied to the whole income.
    pub applicable_rate: Decimal,
}

/// Structure of `fiscal_years.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FiscalYearsFile {
    /// All configured fiscal years.
    pub fiscal_years: Vec<FiscalYear>,
}

/// Structure of `imss_concepts.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImssConceptsFile {
    /// All IMSS contribution concepts.
    pub concepts: Vec<ImssConcept>,
}

/// Bracket tables for one fiscal year, from `tables/<year>.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FiscalTables {
    /// The fiscal year these tables belong to.
    pub fiscal_year_id: u32,
    /// Monthly ISR table.
    pub isr_brackets: Vec<IsrBracket>,
    /// Progressive Cesantía employer table.
    #[serde(default)]
    pub cesantia_brackets: Vec<CesantiaBracket>,
    /// Monthly RESICO table.
    #[serde(default)]
    pub resico_brackets: Vec<ResicoBracket>,
}

impl FiscalTables {
    /// Returns the first income the ISR table leaves uncovered, if any.
    ///
    /// A covering table starts at zero, each row begins where the previous
    /// one ends, and the last row is unbounded.
    pub fn isr_coverage_gap(&self) -> Option<Decimal> {
        let mut rows: Vec<&IsrBracket> = self.isr_brackets.iter().collect();
        rows.sort_by(|a, b| a.lower_limit.cmp(&b.lower_limit));

        let mut covered_to = Decimal::ZERO;
        for row in rows {
            if row.lower_limit > covered_to {
                return Some(covered_to);
            }
            match row.upper_limit {
                Some(upper) => covered_to = covered_to.max(upper),
                None => return None,
            }
        }
        Some(covered_to)
    }
}

/// The complete fiscal configuration.
///
/// Aggregates fiscal years, IMSS concepts and the bracket tables of every
/// year. Tables are sorted on construction so lookups can scan in order.
#[derive(Debug, Clone)]
pub struct FiscalConfig {
    /// Fiscal years sorted by effective date (oldest first).
    fiscal_years: Vec<FiscalYear>,
    /// IMSS contribution concepts.
    imss_concepts: Vec<ImssConcept>,
    /// Bracket tables keyed by fiscal year id.
    tables: HashMap<u32, FiscalTables>,
}

impl FiscalConfig {
    /// Creates a new FiscalConfig from its component parts.
    pub fn new(
        fiscal_years: Vec<FiscalYear>,
        imss_concepts: Vec<ImssConcept>,
        tables: Vec<FiscalTables>,
    ) -> Self {
        let mut sorted_years = fiscal_years;
        sorted_years.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));

        let tables = tables
            .into_iter()
            .map(|mut t| {
                t.isr_brackets.sort_by(|a, b| a.lower_limit.cmp(&b.lower_limit));
                t.cesantia_brackets
                    .sort_by(|a, b| a.lower_bound_uma.cmp(&b.lower_bound_uma));
                t.resico_brackets
                    .sort_by(|a, b| a.upper_limit.cmp(&b.upper_limit));
                (t.fiscal_year_id, t)
            })
            .collect();

        Self {
            fiscal_years: sorted_years,
            imss_concepts,
            tables,
        }
    }

    /// Returns all fiscal years, oldest first.
    pub fn fiscal_years(&self) -> &[FiscalYear] {
        &self.fiscal_years
    }

    /// Returns the IMSS contribution concepts.
    pub fn imss_concepts(&self) -> &[ImssConcept] {
        &self.imss_concepts
    }

    /// Returns the bracket tables of a fiscal year, if configured.
    pub fn tables(&self, fiscal_year_id: u32) -> Option<&FiscalTables> {
        self.tables.get(&fiscal_year_id)
    }
}
