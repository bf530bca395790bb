//! Core data models for the TotalComp MX engine.
//!
//! This module contains the inputs and outputs of every calculator.

mod benefit;
mod equity;
mod package;
mod regime;
mod salary_calculation;

pub use benefit::{Cadence, Currency, OtherBenefit, OtherBenefitResult};
pub use equity::{EquityConfig, YearlyEquity};
pub use package::{
    EquityGrant, FiscalYearSummary, PackageComparison, PackageInput, PackageRegime, PackageResult,
    PayFrequency, SalaryQuote,
};
pub use regime::{BenefitElections, RegimeInput, ResicoInput, SueldosInput};
pub use salary_calculation::{AuditStep, Regime, SalaryCalculation};
