//! Progressive income tax (ISR) evaluation.
//!
//! This module evaluates the monthly ISR table and implements the Article 174
//! method for taxing annual bonuses (aguinaldo, prima vacacional, and other
//! annual payments) at the marginal rate they would add to a monthly salary.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::{FiscalDataSource, FiscalYear, IsrBracket};
use crate::error::{EngineError, EngineResult};

use super::rounding::{DAYS_PER_MONTH, DAYS_PER_YEAR, round_money};

/// Legal reference of the monthly ISR table.
pub const ISR_TABLE_REF: &str = "LISR Art. 96";

/// Legal reference of the annualized bonus method.
pub const ARTICLE_174_REF: &str = "RLISR Art. 174";

/// Calculates the monthly ISR on an income.
///
/// Brackets are scanned in ascending order and the first row with
/// `lower_limit <= income <= upper_limit` applies:
/// `fixed_fee + (income - lower_limit) * surplus_rate`.
///
/// # Arguments
///
/// * `income` - The monthly taxable income
/// * `brackets` - The ISR table, sorted by lower limit
///
/// # Returns
///
/// The tax rounded to cents. When no row matches (an empty table, or an income
/// falling between two rows) the tax is zero and a warning is logged.
///
/// # Example
///
/// ```
/// use totalcomp_engine::calculation::calculate_isr;
/// use totalcomp_engine::config::IsrBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![IsrBracket {
///     lower_limit: Decimal::ZERO,
///     upper_limit: None,
///     fixed_fee: Decimal::ZERO,
///     surplus_rate: Decimal::new(10, 2),
/// }];
///
/// assert_eq!(calculate_isr(Decimal::from(20_000), &brackets), Decimal::from(2_000));
/// ```
pub fn calculate_isr(income: Decimal, brackets: &[IsrBracket]) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match brackets.iter().find(|bracket| bracket.contains(income)) {
        Some(bracket) => {
            round_money(bracket.fixed_fee + (income - bracket.lower_limit) * bracket.surplus_rate)
        }
        None => {
            warn!(
                income = %income,
                brackets = brackets.len(),
                "No ISR bracket matches income, using zero tax"
            );
            Decimal::ZERO
        }
    }
}

/// Calculates the ISR on an annual bonus using the Article 174 method.
///
/// The bonus is prorated to a monthly share (`bonus / 365 * 30.4`), the
/// additional tax that share causes on top of the monthly salary gives an
/// effective rate, and that rate is applied to the whole bonus.
///
/// # Arguments
///
/// * `monthly_salary` - The ordinary monthly salary
/// * `annual_bonus` - The taxable part of the annual bonus
/// * `brackets` - The ISR table, sorted by lower limit
///
/// # Returns
///
/// The tax rounded to cents; zero when the bonus is not positive or the
/// table yields a negative rate.
///
/// # Example
///
/// ```
/// use totalcomp_engine::calculation::calculate_article_174_tax;
/// use totalcomp_engine::config::IsrBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![IsrBracket {
///     lower_limit: Decimal::ZERO,
///     upper_limit: None,
///     fixed_fee: Decimal::ZERO,
///     surplus_rate: Decimal::new(10, 2),
/// }];
///
/// let tax = calculate_article_174_tax(Decimal::from(20_000), Decimal::from(3_650), &brackets);
/// assert_eq!(tax, Decimal::from(365));
/// ```
pub fn calculate_article_174_tax(
    monthly_salary: Decimal,
    annual_bonus: Decimal,
    brackets: &[IsrBracket],
) -> Decimal {
    if annual_bonus <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let monthly_share = annual_bonus / DAYS_PER_YEAR * DAYS_PER_MONTH;
    if monthly_share.is_zero() {
        return Decimal::ZERO;
    }

    let tax_with_share = calculate_isr(monthly_salary + monthly_share, brackets);
    let tax_salary_only = calculate_isr(monthly_salary, brackets);
    let effective_rate = (tax_with_share - tax_salary_only) / monthly_share;

    if effective_rate.is_sign_negative() {
        warn!(
            monthly_salary = %monthly_salary,
            annual_bonus = %annual_bonus,
            "Negative Article 174 rate, check the ISR table for gaps"
        );
        return Decimal::ZERO;
    }

    round_money(annual_bonus * effective_rate)
}

/// Loads the ISR table of a fiscal year.
///
/// Returns `IsrBracketsNotFound` when the table is empty, since every salaried
/// calculation needs it.
pub fn load_isr_brackets<S>(fiscal_year: &FiscalYear, source: &S) -> EngineResult<Vec<IsrBracket>>
where
    S: FiscalDataSource + ?Sized,
{
    let brackets = source.get_isr_brackets(fiscal_year.id)?;
    if brackets.is_empty() {
        return Err(EngineError::IsrBracketsNotFound {
            fiscal_year_id: fiscal_year.id,
        });
    }
    Ok(brackets)
}
