//! Salary calculation result models.
//!
//! This module contains the [`SalaryCalculation`] type that captures every
//! output of a regime calculation, together with the [`AuditStep`]s that
//! explain how each figure was obtained.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OtherBenefitResult;

/// The tax regime a calculation was performed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Salaried employees (LISR Title IV, Chapter I).
    #[default]
    SueldosYSalarios,
    /// Régimen Simplificado de Confianza for independent workers.
    Resico,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use totalcomp_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "isr_monthly".to_string(),
///     rule_name: "Monthly ISR".to_string(),
///     legal_ref: "LISR Art. 96".to_string(),
///     input: serde_json::json!({"gross_salary": "20000.00"}),
///     output: serde_json::json!({"isr": "2000.00"}),
///     reasoning: "Bracket 0.00-∞ at 10%".to_string(),
/// };
/// assert_eq!(step.rule_id, "isr_monthly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the law or regulation behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The full breakdown of a compensation package.
///
/// Monetary fields are in MXN and rounded to two decimals. Fields that do not
/// apply to the regime stay at zero (RESICO has no IMSS, subsidy or SBC).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCalculation {
    /// The regime the package was calculated under.
    pub regime: Regime,

    // Monthly
    /// Gross monthly salary.
    pub gross_salary: Decimal,
    /// Monthly ISR withheld.
    pub isr_tax: Decimal,
    /// Employment subsidy credited against ISR.
    pub subsidio_empleo: Decimal,
    /// Worker IMSS contributions.
    pub imss_worker: Decimal,
    /// Daily contribution base (Salario Base de Cotización).
    pub sbc: Decimal,
    /// Monthly savings-fund deduction.
    pub fondo_ahorro_employee: Decimal,
    /// Monthly pantry vouchers added to net pay.
    pub vales_despensa_monthly: Decimal,
    /// Net of monthly other benefits added to net pay.
    pub other_benefits_monthly_net: Decimal,
    /// Net of annual other benefits added to yearly net.
    pub other_benefits_annual_net: Decimal,
    /// Monthly take-home pay.
    pub net_salary: Decimal,

    // Yearly components
    /// Year-end bonus before ISR.
    pub aguinaldo_gross: Decimal,
    /// ISR on the year-end bonus.
    pub aguinaldo_isr: Decimal,
    /// Year-end bonus after ISR.
    pub aguinaldo_net: Decimal,
    /// Vacation bonus before ISR.
    pub prima_vacacional_gross: Decimal,
    /// ISR on the vacation bonus.
    pub prima_vacacional_isr: Decimal,
    /// Vacation bonus after ISR.
    pub prima_vacacional_net: Decimal,
    /// Savings fund returned at year end (employee plus employer match).
    pub fondo_ahorro_yearly: Decimal,

    // Employer contributions (non-liquid)
    /// Monthly employer contribution to the housing fund.
    pub infonavit_employer_monthly: Decimal,
    /// Annual employer contribution to the housing fund.
    pub infonavit_employer_annual: Decimal,
    /// Monthly employer IMSS contributions.
    pub imss_employer_monthly: Decimal,
    /// Annual employer IMSS contributions.
    pub imss_employer_annual: Decimal,
    /// Whether the worker has an Infonavit mortgage.
    pub has_infonavit_credit: bool,

    // Totals
    /// Salary times twelve, without benefits.
    pub yearly_gross_base: Decimal,
    /// Total annual compensation, employer contributions included.
    pub yearly_gross: Decimal,
    /// Total annual take-home.
    pub yearly_net: Decimal,
    /// Yearly net spread over twelve months.
    pub monthly_adjusted: Decimal,

    // RESICO
    /// Days off without pay.
    pub unpaid_vacation_days: u32,
    /// Income lost to unpaid days off.
    pub unpaid_vacation_loss: Decimal,

    /// Processed other benefits, in input order.
    pub other_benefits: Vec<OtherBenefitResult>,
    /// Ordered audit trace of the calculation.
    pub audit_steps: Vec<AuditStep>,
}

impl SalaryCalculation {
    /// Appends an audit step numbered after the existing ones.
    pub(crate) fn record_step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        legal_ref: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.audit_steps.len() as u32 + 1;
        self.audit_steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            legal_ref: legal_ref.to_string(),
            input,
            output,
            reasoning,
        });
    }
}
