//! Other benefits ("otras prestaciones") processing.
//!
//! This module normalizes each user-declared benefit to MXN and taxes it
//! according to the regime, keeping monthly and annual nets apart.

use rust_decimal::Decimal;

use crate::config::IsrBracket;
use crate::models::{Cadence, Currency, OtherBenefit, OtherBenefitResult};

use super::isr::{calculate_article_174_tax, calculate_isr};
use super::rounding::{MONTHS_PER_YEAR, round_money};

/// How taxable benefits are taxed.
#[derive(Debug, Clone, Copy)]
pub enum BenefitTaxation<'a> {
    /// Salaried regime: Article 174 for annual benefits, the monthly ISR table
    /// on the benefit alone for monthly benefits.
    Progressive {
        /// Ordinary monthly salary used as the Article 174 base.
        monthly_salary: Decimal,
        /// The ISR table.
        brackets: &'a [IsrBracket],
    },
    /// RESICO: the flat rate of the income's bracket.
    FlatRate(Decimal),
}

/// The processed benefits of a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedBenefits {
    /// Per-benefit results, in input order.
    pub results: Vec<OtherBenefitResult>,
    /// Sum of nets of monthly benefits.
    pub monthly_net: Decimal,
    /// Sum of nets of annual benefits.
    pub annual_net: Decimal,
}

/// Resolves the MXN amount of a benefit.
///
/// A percentage benefit is that percent of `monthly_gross * 12`; other benefits
/// are converted with `exchange_rate` when declared in USD.
pub fn benefit_amount_mxn(
    benefit: &OtherBenefit,
    monthly_gross: Decimal,
    exchange_rate: Decimal,
) -> Decimal {
    if benefit.is_percentage {
        return round_money(monthly_gross * MONTHS_PER_YEAR * benefit.amount / Decimal::ONE_HUNDRED);
    }

    match benefit.currency {
        Currency::Mxn => benefit.amount,
        Currency::Usd => round_money(benefit.amount * exchange_rate),
    }
}

/// Processes a list of benefits.
///
/// # Arguments
///
/// * `benefits` - The declared benefits
/// * `monthly_gross` - Gross monthly salary, the base of percentage benefits
/// * `exchange_rate` - USD to MXN rate
/// * `taxation` - How taxable benefits are taxed
///
/// # Example
///
/// ```
/// use totalcomp_engine::calculation::{BenefitTaxation, process_other_benefits};
/// use totalcomp_engine::models::{Cadence, Currency, OtherBenefit};
/// use rust_decimal::Decimal;
///
/// let benefits = vec![OtherBenefit {
///     name: "Bono anual".to_string(),
///     amount: Decimal::from(1_000),
///     currency: Currency::Usd,
///     cadence: Cadence::Annual,
///     tax_free: false,
///     is_percentage: false,
/// }];
///
/// let processed = process_other_benefits(
///     &benefits,
///     Decimal::from(30_000),
///     Decimal::from(20),
///     &BenefitTaxation::FlatRate(Decimal::new(11, 3)),
/// );
/// assert_eq!(processed.results[0].amount, Decimal::from(20_000));
/// assert_eq!(processed.results[0].isr, Decimal::from(220));
/// assert_eq!(processed.annual_net, Decimal::from(19_780));
/// ```
pub fn process_other_benefits(
    benefits: &[OtherBenefit],
    monthly_gross: Decimal,
    exchange_rate: Decimal,
    taxation: &BenefitTaxation<'_>,
) -> ProcessedBenefits {
    let mut processed = ProcessedBenefits::default();

    for benefit in benefits {
        let amount = benefit_amount_mxn(benefit, monthly_gross, exchange_rate);
        let cadence = benefit.effective_cadence();

        let isr = if benefit.tax_free {
            Decimal::ZERO
        } else {
            match *taxation {
                BenefitTaxation::Progressive {
                    monthly_salary,
                    brackets,
                } => match cadence {
                    Cadence::Annual => calculate_article_174_tax(monthly_salary, amount, brackets),
                    Cadence::Monthly => calculate_isr(amount, brackets),
                },
                BenefitTaxation::FlatRate(rate) => round_money(amount * rate),
            }
        };
        let net = round_money(amount - isr);

        match cadence {
            Cadence::Monthly => processed.monthly_net += net,
            Cadence::Annual => processed.annual_net += net,
        }

        processed.results.push(OtherBenefitResult {
            name: benefit.name.clone(),
            amount,
            tax_free: benefit.tax_free,
            isr,
            net,
            cadence,
        });
    }

    processed
}
