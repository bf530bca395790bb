//! Sueldos y Salarios (salaried employee) calculator.
//!
//! The calculation starts from the monthly base (ISR, employment subsidy,
//! worker IMSS and SBC), applies the monthly benefit elections, adds the
//! yearly bonuses and the employer contributions, and closes with the yearly
//! totals. Each stage records an [`AuditStep`](crate::models::AuditStep).

use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::config::{FiscalDataSource, FiscalYear, IsrBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::{Regime, SalaryCalculation, SueldosInput};

use super::benefits::{BenefitTaxation, process_other_benefits};
use super::imss::{calculate_imss_employer, calculate_imss_worker, calculate_sbc};
use super::isr::{
    ARTICLE_174_REF, ISR_TABLE_REF, calculate_article_174_tax, calculate_isr, load_isr_brackets,
};
use super::rounding::{DAYS_PER_MONTH, MONTHS_PER_YEAR, round_money};

/// Daily UMAs of aguinaldo exempt from ISR.
pub const AGUINALDO_EXEMPT_UMAS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Daily UMAs of prima vacacional exempt from ISR.
pub const PRIMA_VACACIONAL_EXEMPT_UMAS: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Employer Infonavit contribution as a fraction of the monthly SBC.
pub const INFONAVIT_EMPLOYER_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Returns the part of a bonus above its exempt amount.
///
/// # Example
///
/// ```
/// use totalcomp_engine::calculation::taxable_excess;
/// use rust_decimal::Decimal;
///
/// let exempt = Decimal::new(339420, 2);
/// assert_eq!(taxable_excess(Decimal::new(339420, 2), exempt), Decimal::ZERO);
/// assert_eq!(taxable_excess(Decimal::new(339520, 2), exempt), Decimal::ONE);
/// ```
pub fn taxable_excess(gross: Decimal, exempt: Decimal) -> Decimal {
    (gross - exempt).max(Decimal::ZERO)
}

fn validate_salary(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", amount),
        });
    }
    Ok(())
}

/// Calculates the monthly base of a salaried employee.
///
/// This is the first stage of [`calculate_sueldos_y_salarios`] on its own:
/// monthly ISR, employment subsidy (when gross is at or under the threshold),
/// worker IMSS and SBC. Net salary is `gross - ISR + subsidy - IMSS worker`.
///
/// # Errors
///
/// - `InvalidInput` when `gross` is negative
/// - `IsrBracketsNotFound` when the fiscal year has no ISR table
/// - Any error raised by `source`
///
/// # Example
///
/// ```no_run
/// use totalcomp_engine::calculation::calculate_monthly_base;
/// use totalcomp_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/mx")?;
/// let fiscal_year = loader.active_fiscal_year()?;
/// let result = calculate_monthly_base(Decimal::from(25_000), 3, fiscal_year, &loader)?;
/// println!("Net: {}", result.net_salary);
/// # Ok::<(), totalcomp_engine::error::EngineError>(())
/// ```
pub fn calculate_monthly_base<S>(
    gross: Decimal,
    years_of_service: u32,
    fiscal_year: &FiscalYear,
    source: &S,
) -> EngineResult<SalaryCalculation>
where
    S: FiscalDataSource + ?Sized,
{
    validate_salary("gross_monthly_salary", gross)?;
    let brackets = load_isr_brackets(fiscal_year, source)?;
    monthly_base(gross, years_of_service, fiscal_year, source, &brackets)
}

fn monthly_base<S>(
    gross: Decimal,
    years_of_service: u32,
    fiscal_year: &FiscalYear,
    source: &S,
    brackets: &[IsrBracket],
) -> EngineResult<SalaryCalculation>
where
    S: FiscalDataSource + ?Sized,
{
    let mut calc = SalaryCalculation {
        regime: Regime::SueldosYSalarios,
        gross_salary: gross,
        ..Default::default()
    };

    calc.isr_tax = calculate_isr(gross, brackets);
    calc.record_step(
        "isr_monthly",
        "Monthly ISR",
        ISR_TABLE_REF,
        json!({ "gross_salary": gross.to_string() }),
        json!({ "isr": calc.isr_tax.to_string() }),
        format!("Monthly ISR table applied to gross salary ${}", gross),
    );

    if gross <= fiscal_year.subsidy_threshold_monthly {
        calc.subsidio_empleo = round_money(gross * fiscal_year.subsidy_factor);
    }
    calc.record_step(
        "employment_subsidy",
        "Subsidio para el Empleo",
        "Decreto Subsidio para el Empleo",
        json!({
            "gross_salary": gross.to_string(),
            "threshold": fiscal_year.subsidy_threshold_monthly.to_string(),
            "factor": fiscal_year.subsidy_factor.to_string()
        }),
        json!({ "subsidio_empleo": calc.subsidio_empleo.to_string() }),
        if calc.subsidio_empleo.is_zero() {
            format!(
                "Gross salary above the ${} threshold: no subsidy",
                fiscal_year.subsidy_threshold_monthly
            )
        } else {
            format!(
                "Gross salary at or under the ${} threshold: {} of gross",
                fiscal_year.subsidy_threshold_monthly, fiscal_year.subsidy_factor
            )
        },
    );

    calc.imss_worker = calculate_imss_worker(gross, fiscal_year, source)?;
    calc.record_step(
        "imss_worker",
        "IMSS Worker Contributions",
        "LSS Arts. 25, 106, 107, 147, 168",
        json!({ "gross_salary": gross.to_string() }),
        json!({ "imss_worker": calc.imss_worker.to_string() }),
        "Flat worker rates per concept on the base capped at each concept's UMA multiple"
            .to_string(),
    );

    calc.sbc = calculate_sbc(gross, years_of_service, fiscal_year);
    calc.record_step(
        "sbc",
        "Salario Base de Cotización",
        "LSS Art. 27",
        json!({
            "gross_salary": gross.to_string(),
            "years_of_service": years_of_service
        }),
        json!({ "sbc": calc.sbc.to_string() }),
        format!(
            "Daily salary integrated for {} year(s) of service, capped at 25 UMAs",
            years_of_service
        ),
    );

    calc.net_salary = round_money(gross - calc.isr_tax + calc.subsidio_empleo - calc.imss_worker);

    Ok(calc)
}

/// Calculates the full package of a salaried employee.
///
/// # Arguments
///
/// * `input` - Salary, years of service, benefit elections and other benefits
/// * `fiscal_year` - The fiscal year to calculate under
/// * `source` - Lookup for ISR, IMSS and Cesantía tables
///
/// # Returns
///
/// A [`SalaryCalculation`] with every monthly, yearly and employer figure
/// filled in, or an error if a required table is missing.
///
/// # Example
///
/// ```no_run
/// use totalcomp_engine::calculation::calculate_sueldos_y_salarios;
/// use totalcomp_engine::config::ConfigLoader;
/// use totalcomp_engine::models::SueldosInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/mx")?;
/// let fiscal_year = loader.active_fiscal_year()?;
///
/// let mut input = SueldosInput::new(Decimal::from(45_000));
/// input.benefits.has_aguinaldo = true;
/// input.benefits.has_prima_vacacional = true;
///
/// let result = calculate_sueldos_y_salarios(&input, fiscal_year, &loader)?;
/// println!("Yearly net: {}", result.yearly_net);
/// # Ok::<(), totalcomp_engine::error::EngineError>(())
/// ```
pub fn calculate_sueldos_y_salarios<S>(
    input: &SueldosInput,
    fiscal_year: &FiscalYear,
    source: &S,
) -> EngineResult<SalaryCalculation>
where
    S: FiscalDataSource + ?Sized,
{
    let gross = input.gross_monthly_salary;
    validate_salary("gross_monthly_salary", gross)?;

    let brackets = load_isr_brackets(fiscal_year, source)?;
    let elections = &input.benefits;
    let mut calc = monthly_base(gross, input.years_of_service, fiscal_year, source, &brackets)?;
    let daily_salary = gross / DAYS_PER_MONTH;

    if elections.has_fondo_ahorro {
        let requested = gross * elections.fondo_ahorro_percent / Decimal::ONE_HUNDRED;
        let cap = fiscal_year.uma_annual * fiscal_year.savings_fund_cap_uma_factor / MONTHS_PER_YEAR;
        let deduction = round_money(requested.min(cap));

        calc.fondo_ahorro_employee = deduction;
        calc.net_salary -= deduction;
        calc.record_step(
            "fondo_ahorro",
            "Fondo de Ahorro",
            "LISR Art. 93 fr. XI",
            json!({
                "percent": elections.fondo_ahorro_percent.to_string(),
                "monthly_cap": round_money(cap).to_string()
            }),
            json!({ "fondo_ahorro_employee": deduction.to_string() }),
            format!(
                "{}% of gross deducted monthly, capped at {} annual UMAs / 12",
                elections.fondo_ahorro_percent, fiscal_year.savings_fund_cap_uma_factor
            ),
        );
    }

    if elections.has_vales_despensa {
        let cap = fiscal_year.uma_monthly * fiscal_year.pantry_vouchers_uma_cap;
        let vales = round_money(elections.vales_despensa_amount.min(cap));

        calc.vales_despensa_monthly = vales;
        calc.net_salary += vales;
        calc.record_step(
            "vales_despensa",
            "Vales de Despensa",
            "LISR Art. 27 fr. XI",
            json!({
                "requested": elections.vales_despensa_amount.to_string(),
                "cap": cap.to_string()
            }),
            json!({ "vales_despensa_monthly": vales.to_string() }),
            format!("Pantry vouchers added to net pay, capped at ${}", cap),
        );
    }

    if !input.other_benefits.is_empty() {
        let exchange_rate = input.exchange_rate.unwrap_or(fiscal_year.usd_mxn_rate);
        let processed = process_other_benefits(
            &input.other_benefits,
            gross,
            exchange_rate,
            &BenefitTaxation::Progressive {
                monthly_salary: gross,
                brackets: &brackets,
            },
        );

        calc.other_benefits_monthly_net = processed.monthly_net;
        calc.other_benefits_annual_net = processed.annual_net;
        calc.net_salary += processed.monthly_net;
        calc.record_step(
            "other_benefits",
            "Otras Prestaciones",
            ARTICLE_174_REF,
            json!({
                "count": processed.results.len(),
                "exchange_rate": exchange_rate.to_string()
            }),
            json!({
                "monthly_net": processed.monthly_net.to_string(),
                "annual_net": processed.annual_net.to_string()
            }),
            "Annual taxable benefits taxed with Article 174, monthly ones with the monthly table"
                .to_string(),
        );
        calc.other_benefits = processed.results;
    }

    if elections.has_aguinaldo {
        let exempt = AGUINALDO_EXEMPT_UMAS * fiscal_year.uma_daily;
        calc.aguinaldo_gross = round_money(daily_salary * Decimal::from(elections.aguinaldo_days));
        let taxable = taxable_excess(calc.aguinaldo_gross, exempt);
        calc.aguinaldo_isr = calculate_article_174_tax(gross, taxable, &brackets);
        calc.aguinaldo_net = calc.aguinaldo_gross - calc.aguinaldo_isr;
        calc.record_step(
            "aguinaldo",
            "Aguinaldo",
            "LISR Art. 93 fr. XIV",
            json!({
                "days": elections.aguinaldo_days,
                "exempt": exempt.to_string()
            }),
            json!({
                "gross": calc.aguinaldo_gross.to_string(),
                "taxable": taxable.to_string(),
                "isr": calc.aguinaldo_isr.to_string()
            }),
            format!(
                "{} days of salary, first 30 UMAs exempt, excess taxed with Article 174",
                elections.aguinaldo_days
            ),
        );
    }

    if elections.has_prima_vacacional {
        let exempt = PRIMA_VACACIONAL_EXEMPT_UMAS * fiscal_year.uma_daily;
        let vacation_salary = daily_salary * Decimal::from(elections.vacation_days);
        calc.prima_vacacional_gross =
            round_money(vacation_salary * elections.prima_vacacional_percent / Decimal::ONE_HUNDRED);
        let taxable = taxable_excess(calc.prima_vacacional_gross, exempt);
        calc.prima_vacacional_isr = calculate_article_174_tax(gross, taxable, &brackets);
        calc.prima_vacacional_net = calc.prima_vacacional_gross - calc.prima_vacacional_isr;
        calc.record_step(
            "prima_vacacional",
            "Prima Vacacional",
            "LISR Art. 93 fr. XIV",
            json!({
                "vacation_days": elections.vacation_days,
                "percent": elections.prima_vacacional_percent.to_string(),
                "exempt": exempt.to_string()
            }),
            json!({
                "gross": calc.prima_vacacional_gross.to_string(),
                "taxable": taxable.to_string(),
                "isr": calc.prima_vacacional_isr.to_string()
            }),
            format!(
                "{}% of {} vacation days, first 15 UMAs exempt, excess taxed with Article 174",
                elections.prima_vacacional_percent, elections.vacation_days
            ),
        );
    }

    // Employer matches the employee contribution.
    calc.fondo_ahorro_yearly = calc.fondo_ahorro_employee * MONTHS_PER_YEAR * Decimal::TWO;

    calc.infonavit_employer_monthly =
        round_money(calc.sbc * DAYS_PER_MONTH * INFONAVIT_EMPLOYER_RATE);
    calc.infonavit_employer_annual = calc.infonavit_employer_monthly * MONTHS_PER_YEAR;
    calc.has_infonavit_credit = elections.has_infonavit_credit;
    calc.record_step(
        "infonavit_employer",
        "Infonavit Employer Contribution",
        "Ley del Infonavit Art. 29",
        json!({
            "sbc": calc.sbc.to_string(),
            "has_infonavit_credit": calc.has_infonavit_credit
        }),
        json!({ "monthly": calc.infonavit_employer_monthly.to_string() }),
        "5% of the monthly SBC paid by the employer".to_string(),
    );

    calc.imss_employer_monthly = calculate_imss_employer(gross, fiscal_year, source)?;
    calc.imss_employer_annual = calc.imss_employer_monthly * MONTHS_PER_YEAR;
    calc.record_step(
        "imss_employer",
        "IMSS Employer Contributions",
        "LSS Arts. 25, 106, 107, 147, 168, 211",
        json!({ "gross_salary": gross.to_string() }),
        json!({ "monthly": calc.imss_employer_monthly.to_string() }),
        "Employer rates per concept with the progressive Cesantía rate".to_string(),
    );

    calc.yearly_gross_base = round_money(gross * MONTHS_PER_YEAR);
    calc.yearly_gross = calc.yearly_gross_base
        + calc.aguinaldo_gross
        + calc.prima_vacacional_gross
        + calc.infonavit_employer_annual
        + calc.imss_employer_annual;
    calc.yearly_net = calc.net_salary * MONTHS_PER_YEAR
        + calc.aguinaldo_net
        + calc.prima_vacacional_net
        + calc.fondo_ahorro_yearly
        + calc.other_benefits_annual_net;
    calc.monthly_adjusted = round_money(calc.yearly_net / MONTHS_PER_YEAR);
    calc.record_step(
        "yearly_totals",
        "Yearly Totals",
        "LFT Arts. 80, 87",
        json!({ "net_salary": calc.net_salary.to_string() }),
        json!({
            "yearly_gross": calc.yearly_gross.to_string(),
            "yearly_net": calc.yearly_net.to_string(),
            "monthly_adjusted": calc.monthly_adjusted.to_string()
        }),
        "Twelve months of net pay plus yearly bonuses, savings fund and annual benefits"
            .to_string(),
    );

    debug!(
        gross = %gross,
        net_salary = %calc.net_salary,
        yearly_net = %calc.yearly_net,
        "Calculated Sueldos y Salarios package"
    );

    Ok(calc)
}
