//! Regime inputs.
//!
//! A calculation runs under exactly one regime. [`RegimeInput`] is the closed
//! set of regimes, each carrying the inputs its calculator needs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OtherBenefit, Regime};

fn default_years_of_service() -> u32 {
    1
}

fn default_aguinaldo_days() -> u32 {
    15
}

fn default_vacation_days() -> u32 {
    12
}

fn default_prima_vacacional_percent() -> Decimal {
    Decimal::from(25)
}

fn default_fondo_ahorro_percent() -> Decimal {
    Decimal::from(13)
}

/// Benefit elections of a salaried package.
///
/// Amounts and days only matter when the matching `has_*` flag is set. The
/// defaults are the legal minimums (15 days of aguinaldo, 12 vacation days
/// at 25%) and the usual 13% savings fund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitElections {
    /// Whether the package pays a year-end bonus.
    #[serde(default)]
    pub has_aguinaldo: bool,
    /// Days of salary paid as year-end bonus.
    #[serde(default = "default_aguinaldo_days")]
    pub aguinaldo_days: u32,
    /// Whether the package includes pantry vouchers.
    #[serde(default)]
    pub has_vales_despensa: bool,
    /// Monthly pantry voucher amount.
    #[serde(default)]
    pub vales_despensa_amount: Decimal,
    /// Whether the package pays a vacation bonus.
    #[serde(default)]
    pub has_prima_vacacional: bool,
    /// Vacation days per year.
    #[serde(default = "default_vacation_days")]
    pub vacation_days: u32,
    /// Vacation bonus as a percent of vacation salary.
    #[serde(default = "default_prima_vacacional_percent")]
    pub prima_vacacional_percent: Decimal,
    /// Whether the package includes a savings fund.
    #[serde(default)]
    pub has_fondo_ahorro: bool,
    /// Savings-fund contribution as a percent of gross salary.
    #[serde(default = "default_fondo_ahorro_percent")]
    pub fondo_ahorro_percent: Decimal,
    /// Whether the worker has an Infonavit mortgage.
    #[serde(default)]
    pub has_infonavit_credit: bool,
}

impl Default for BenefitElections {
    fn default() -> Self {
        Self {
            has_aguinaldo: false,
            aguinaldo_days: default_aguinaldo_days(),
            has_vales_despensa: false,
            vales_despensa_amount: Decimal::ZERO,
            has_prima_vacacional: false,
            vacation_days: default_vacation_days(),
            prima_vacacional_percent: default_prima_vacacional_percent(),
            has_fondo_ahorro: false,
            fondo_ahorro_percent: default_fondo_ahorro_percent(),
            has_infonavit_credit: false,
        }
    }
}

/// Inputs of the Sueldos y Salarios calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SueldosInput {
    /// Gross monthly salary in MXN.
    pub gross_monthly_salary: Decimal,
    /// Completed years with the employer, used by the SBC integration factor.
    #[serde(default = "default_years_of_service")]
    pub years_of_service: u32,
    /// Benefit elections.
    #[serde(default)]
    pub benefits: BenefitElections,
    /// Other benefits ("otras prestaciones").
    #[serde(default)]
    pub other_benefits: Vec<OtherBenefit>,
    /// USD to MXN rate for USD benefits; the fiscal year's rate when absent.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
}

impl SueldosInput {
    /// Creates an input with no benefits elected and one year of service.
    pub fn new(gross_monthly_salary: Decimal) -> Self {
        Self {
            gross_monthly_salary,
            years_of_service: default_years_of_service(),
            benefits: BenefitElections::default(),
            other_benefits: Vec::new(),
            exchange_rate: None,
        }
    }
}

/// Inputs of the RESICO calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResicoInput {
    /// Monthly income in MXN.
    pub monthly_income: Decimal,
    /// Days per year taken off without pay.
    #[serde(default)]
    pub unpaid_vacation_days: u32,
    /// Other benefits ("otras prestaciones").
    #[serde(default)]
    pub other_benefits: Vec<OtherBenefit>,
    /// USD to MXN rate for USD benefits; the fiscal year's rate when absent.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
}

impl ResicoInput {
    /// Creates an input with no unpaid days and no other benefits.
    pub fn new(monthly_income: Decimal) -> Self {
        Self {
            monthly_income,
            unpaid_vacation_days: 0,
            other_benefits: Vec::new(),
            exchange_rate: None,
        }
    }
}

/// A calculation request under one of the two regimes.
///
/// # Example
///
/// ```
/// use totalcomp_engine::models::{Regime, RegimeInput};
///
/// let input: RegimeInput = serde_json::from_str(
///     r#"{"regime": "resico", "monthly_income": "30000", "unpaid_vacation_days": 10}"#,
/// ).unwrap();
/// assert_eq!(input.regime(), Regime::Resico);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum RegimeInput {
    /// Salaried employee.
    SueldosYSalarios(SueldosInput),
    /// Independent worker under RESICO.
    Resico(ResicoInput),
}

impl RegimeInput {
    /// Returns the regime of this input.
    pub fn regime(&self) -> Regime {
        match self {
            RegimeInput::SueldosYSalarios(_) => Regime::SueldosYSalarios,
            RegimeInput::Resico(_) => Regime::Resico,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sueldos_input_applies_defaults() {
        let json = r#"{
            "regime": "sueldos_y_salarios",
            "gross_monthly_salary": "45000",
            "benefits": {"has_aguinaldo": true, "has_prima_vacacional": true}
        }"#;

        let input: RegimeInput = serde_json::from_str(json).unwrap();
        let RegimeInput::SueldosYSalarios(input) = input else {
            panic!("Expected Sueldos y Salarios input");
        };
        assert_eq!(input.years_of_service, 1);
        assert!(input.benefits.has_aguinaldo);
        assert_eq!(input.benefits.aguinaldo_days, 15);
        assert_eq!(input.benefits.vacation_days, 12);
        assert_eq!(input.benefits.prima_vacacional_percent, Decimal::from(25));
        assert!(!input.benefits.has_fondo_ahorro);
        assert!(input.exchange_rate.is_none());
    }

    #[test]
    fn test_deserialize_unknown_regime_fails() {
        let json = r#"{"regime": "honorarios", "monthly_income": "1000"}"#;
        assert!(serde_json::from_str::<RegimeInput>(json).is_err());
    }

    #[test]
    fn test_regime_of_input() {
        let input = RegimeInput::SueldosYSalarios(SueldosInput::new(Decimal::from(20000)));
        assert_eq!(input.regime(), Regime::SueldosYSalarios);
    }
}
