//! RESICO (Régimen Simplificado de Confianza) calculator.
//!
//! RESICO taxes the whole monthly income at the flat rate of its bracket.
//! There are no IMSS contributions, employment subsidy or SBC, and days off
//! are unpaid.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::config::{FiscalDataSource, FiscalYear};
use crate::error::{EngineError, EngineResult};
use crate::models::{Regime, ResicoInput, SalaryCalculation};

use super::benefits::{BenefitTaxation, process_other_benefits};
use super::rounding::{DAYS_PER_MONTH, MONTHS_PER_YEAR, round_money};

/// Legal reference of the RESICO table.
pub const RESICO_REF: &str = "LISR Art. 113-E";

/// Calculates a package under RESICO.
///
/// # Errors
///
/// - `InvalidInput` when the monthly income is negative
/// - `ResicoBracketNotFound` when the income exceeds every configured limit
/// - Any error raised by `source`
///
/// # Example
///
/// ```no_run
/// use totalcomp_engine::calculation::calculate_resico;
/// use totalcomp_engine::config::ConfigLoader;
/// use totalcomp_engine::models::ResicoInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/mx")?;
/// let fiscal_year = loader.active_fiscal_year()?;
///
/// let mut input = ResicoInput::new(Decimal::from(30_000));
/// input.unpaid_vacation_days = 10;
///
/// let result = calculate_resico(&input, fiscal_year, &loader)?;
/// println!("ISR: {}, yearly net: {}", result.isr_tax, result.yearly_net);
/// # Ok::<(), totalcomp_engine::error::EngineError>(())
/// ```
pub fn calculate_resico<S>(
    input: &ResicoInput,
    fiscal_year: &FiscalYear,
    source: &S,
) -> EngineResult<SalaryCalculation>
where
    S: FiscalDataSource + ?Sized,
{
    let income = input.monthly_income;
    if income < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "monthly_income".to_string(),
            message: format!("must not be negative, got {}", income),
        });
    }

    let bracket = source
        .get_resico_bracket(fiscal_year.id, income)?
        .ok_or(EngineError::ResicoBracketNotFound { income })?;

    let mut calc = SalaryCalculation {
        regime: Regime::Resico,
        gross_salary: income,
        unpaid_vacation_days: input.unpaid_vacation_days,
        ..Default::default()
    };

    calc.isr_tax = round_money(income * bracket.applicable_rate);
    calc.net_salary = round_money(income - calc.isr_tax);
    calc.record_step(
        "resico_isr",
        "RESICO Flat Rate",
        RESICO_REF,
        json!({
            "monthly_income": income.to_string(),
            "bracket_upper_limit": bracket.upper_limit.to_string()
        }),
        json!({
            "rate": bracket.applicable_rate.to_string(),
            "isr": calc.isr_tax.to_string()
        }),
        format!(
            "Income up to ${} taxed at a flat {} on the whole amount",
            bracket.upper_limit, bracket.applicable_rate
        ),
    );

    if !input.other_benefits.is_empty() {
        let exchange_rate = input.exchange_rate.unwrap_or(fiscal_year.usd_mxn_rate);
        let processed = process_other_benefits(
            &input.other_benefits,
            income,
            exchange_rate,
            &BenefitTaxation::FlatRate(bracket.applicable_rate),
        );

        calc.other_benefits_monthly_net = processed.monthly_net;
        calc.other_benefits_annual_net = processed.annual_net;
        calc.net_salary += processed.monthly_net;
        calc.record_step(
            "other_benefits",
            "Otras Prestaciones",
            RESICO_REF,
            json!({
                "count": processed.results.len(),
                "exchange_rate": exchange_rate.to_string()
            }),
            json!({
                "monthly_net": processed.monthly_net.to_string(),
                "annual_net": processed.annual_net.to_string()
            }),
            format!(
                "Taxable benefits taxed at the income's flat rate of {}",
                bracket.applicable_rate
            ),
        );
        calc.other_benefits = processed.results;
    }

    if input.unpaid_vacation_days > 0 {
        let daily_income = income / DAYS_PER_MONTH;
        calc.unpaid_vacation_loss =
            round_money(daily_income * Decimal::from(input.unpaid_vacation_days));
        calc.record_step(
            "unpaid_vacation",
            "Unpaid Vacation",
            RESICO_REF,
            json!({
                "unpaid_vacation_days": input.unpaid_vacation_days,
                "monthly_income": income.to_string()
            }),
            json!({ "loss": calc.unpaid_vacation_loss.to_string() }),
            format!(
                "{} days without income at ${} per day",
                input.unpaid_vacation_days,
                round_money(daily_income)
            ),
        );
    }

    calc.yearly_gross_base = round_money(income * MONTHS_PER_YEAR) - calc.unpaid_vacation_loss;
    calc.yearly_gross = calc.yearly_gross_base;
    calc.yearly_net = calc.net_salary * MONTHS_PER_YEAR + calc.other_benefits_annual_net
        - calc.unpaid_vacation_loss;
    calc.monthly_adjusted = round_money(calc.yearly_net / MONTHS_PER_YEAR);
    calc.record_step(
        "yearly_totals",
        "Yearly Totals",
        RESICO_REF,
        json!({ "net_salary": calc.net_salary.to_string() }),
        json!({
            "yearly_gross": calc.yearly_gross.to_string(),
            "yearly_net": calc.yearly_net.to_string(),
            "monthly_adjusted": calc.monthly_adjusted.to_string()
        }),
        "Twelve months of net income plus annual benefits, less unpaid days".to_string(),
    );

    debug!(
        income = %income,
        rate = %bracket.applicable_rate,
        yearly_net = %calc.yearly_net,
        "Calculated RESICO package"
    );

    Ok(calc)
}
