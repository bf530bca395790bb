//! Calculation logic for the TotalComp MX engine.
//!
//! This module contains the progressive ISR evaluator and the Article 174
//! bonus method, IMSS contributions and SBC, the other-benefits processor,
//! the Sueldos y Salarios and RESICO regime calculators, the equity vesting
//! scheduler, and package comparison.

mod benefits;
mod comparison;
mod equity;
mod imss;
mod isr;
mod regime;
mod resico;
mod rounding;
mod sueldos;

#[cfg(test)]
mod test_support;

pub use benefits::{BenefitTaxation, ProcessedBenefits, benefit_amount_mxn, process_other_benefits};
pub use comparison::{
    DEFAULT_HOURS_PER_WEEK, EQUITY_SCHEDULE_YEARS, EQUITY_VESTING_YEARS, FORTNIGHTS_PER_MONTH,
    MAX_MONTHLY_SALARY, PAID_DAYS_PER_MONTH, WEEKS_PER_MONTH, compare_packages, monthly_salary_mxn,
};
pub use equity::{calculate_equity_schedule, total_equity_over_years};
pub use imss::{
    CESANTIA_CONCEPT, SBC_BASE_FACTOR, SBC_CAP_UMAS, SBC_FACTOR_PER_YEAR, calculate_imss_employer,
    calculate_imss_worker, calculate_sbc,
};
pub use isr::{
    ARTICLE_174_REF, ISR_TABLE_REF, calculate_article_174_tax, calculate_isr, load_isr_brackets,
};
pub use regime::calculate_regime;
pub use resico::{RESICO_REF, calculate_resico};
pub use rounding::{DAYS_PER_MONTH, DAYS_PER_YEAR, MONTHS_PER_YEAR, round_money};
pub use sueldos::{
    AGUINALDO_EXEMPT_UMAS, INFONAVIT_EMPLOYER_RATE, PRIMA_VACACIONAL_EXEMPT_UMAS,
    calculate_monthly_base, calculate_sueldos_y_salarios, taxable_excess,
};
