//! Social security (IMSS) contributions.
//!
//! This module calculates the worker and employer IMSS contributions of a
//! monthly salary, and the daily contribution base (SBC) used for Infonavit.
//!
//! Every concept is charged on the monthly salary, with the daily salary
//! capped at the concept's UMA multiple. The employer rate of the Cesantía en
//! Edad Avanzada y Vejez concept is progressive: it is looked up by the
//! uncapped daily salary expressed in UMAs.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{FiscalDataSource, FiscalYear, ImssConcept};
use crate::error::{EngineError, EngineResult};

use super::rounding::{DAYS_PER_MONTH, round_money};

/// Name of the concept whose employer rate is progressive.
pub const CESANTIA_CONCEPT: &str = "Cesantía en Edad Avanzada y Vejez";

/// Base integration factor of the SBC (365 days plus 15 days of aguinaldo
/// and the vacation premium, over 365).
pub const SBC_BASE_FACTOR: Decimal = Decimal::from_parts(10493, 0, 0, false, 4);

/// Integration factor added per year of service.
pub const SBC_FACTOR_PER_YEAR: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// SBC cap in daily UMAs.
pub const SBC_CAP_UMAS: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Returns the monthly base a concept is charged on.
fn contribution_base(gross: Decimal, concept: &ImssConcept, fiscal_year: &FiscalYear) -> Decimal {
    let daily = gross / DAYS_PER_MONTH;
    match concept.base_cap_in_umas {
        Some(cap) if daily > Decimal::from(cap) * fiscal_year.uma_daily => {
            Decimal::from(cap) * fiscal_year.uma_daily * DAYS_PER_MONTH
        }
        _ => gross,
    }
}

fn is_progressive(concept: &ImssConcept) -> bool {
    !concept.is_fixed_rate && concept.name == CESANTIA_CONCEPT
}

/// Calculates the worker's monthly IMSS contributions.
///
/// Worker rates are flat for every concept.
///
/// # Example
///
/// ```no_run
/// use totalcomp_engine::calculation::calculate_imss_worker;
/// use totalcomp_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/mx")?;
/// let fiscal_year = loader.active_fiscal_year()?;
/// let imss = calculate_imss_worker(Decimal::from(20_000), fiscal_year, &loader)?;
/// println!("IMSS worker: {}", imss);
/// # Ok::<(), totalcomp_engine::error::EngineError>(())
/// ```
pub fn calculate_imss_worker<S>(
    gross: Decimal,
    fiscal_year: &FiscalYear,
    source: &S,
) -> EngineResult<Decimal>
where
    S: FiscalDataSource + ?Sized,
{
    let concepts = source.get_imss_concepts()?;

    let total: Decimal = concepts
        .iter()
        .map(|concept| contribution_base(gross, concept, fiscal_year) * concept.worker_rate)
        .sum();

    Ok(round_money(total))
}

/// Calculates the employer's monthly IMSS contributions.
///
/// # Returns
///
/// The rounded total, or an error if the concepts or the Cesantía table cannot
/// be read. A Cesantía salary outside every configured row falls back to the
/// concept's flat employer rate.
pub fn calculate_imss_employer<S>(
    gross: Decimal,
    fiscal_year: &FiscalYear,
    source: &S,
) -> EngineResult<Decimal>
where
    S: FiscalDataSource + ?Sized,
{
    let concepts = source.get_imss_concepts()?;

    let mut total = Decimal::ZERO;
    for concept in &concepts {
        let rate = if is_progressive(concept) {
            cesantia_employer_rate(gross, concept, fiscal_year, source)?
        } else {
            concept.employer_rate
        };
        total += contribution_base(gross, concept, fiscal_year) * rate;
    }

    Ok(round_money(total))
}

fn cesantia_employer_rate<S>(
    gross: Decimal,
    concept: &ImssConcept,
    fiscal_year: &FiscalYear,
    source: &S,
) -> EngineResult<Decimal>
where
    S: FiscalDataSource + ?Sized,
{
    let daily = gross / DAYS_PER_MONTH;
    let salary_in_umas =
        daily
            .checked_div(fiscal_year.uma_daily)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("UMA daily of fiscal year {} is zero", fiscal_year.id),
            })?;

    match source.get_cesantia_bracket(fiscal_year.id, salary_in_umas)? {
        Some(bracket) => {
            debug!(
                salary_in_umas = %salary_in_umas.round_dp(4),
                employer_rate = %bracket.employer_rate,
                "Progressive Cesantía rate"
            );
            Ok(bracket.employer_rate)
        }
        None => {
            warn!(
                fiscal_year_id = fiscal_year.id,
                salary_in_umas = %salary_in_umas.round_dp(4),
                "No Cesantía bracket matches, using flat employer rate"
            );
            Ok(concept.employer_rate)
        }
    }
}

/// Calculates the daily contribution base (Salario Base de Cotización).
///
/// `daily * (1.0493 + 0.001 * years_of_service)`, capped at 25 daily UMAs.
///
/// # Example
///
/// ```
/// # use totalcomp_engine::calculation::calculate_sbc;
/// # use totalcomp_engine::config::FiscalYear;
/// # use rust_decimal::Decimal;
/// # fn example(fiscal_year: &FiscalYear) {
/// let sbc = calculate_sbc(Decimal::from(20_000), 1, fiscal_year);
/// # }
/// ```
pub fn calculate_sbc(gross: Decimal, years_of_service: u32, fiscal_year: &FiscalYear) -> Decimal {
    let daily = gross / DAYS_PER_MONTH;
    let factor = SBC_BASE_FACTOR + SBC_FACTOR_PER_YEAR * Decimal::from(years_of_service);
    let cap = SBC_CAP_UMAS * fiscal_year.uma_daily;

    round_money((daily * factor).min(cap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{config_2025, dec, fiscal_year_2025};
    use crate::config::{CesantiaBracket, IsrBracket, ResicoBracket};

    /// A source whose Cesantía table never matches.
    struct NoCesantiaSource;

    impl FiscalDataSource for NoCesantiaSource {
        fn get_active_fiscal_year(&self) -> EngineResult<Option<FiscalYear>> {
            Ok(Some(fiscal_year_2025()))
        }

        fn get_isr_brackets(&self, _fiscal_year_id: u32) -> EngineResult<Vec<IsrBracket>> {
            Ok(vec![])
        }

        fn get_imss_concepts(&self) -> EngineResult<Vec<ImssConcept>> {
            config_2025().get_imss_concepts()
        }

        fn get_cesantia_bracket(
            &self,
            _fiscal_year_id: u32,
            _salary_in_umas: Decimal,
        ) -> EngineResult<Option<CesantiaBracket>> {
            Ok(None)
        }

        fn get_resico_bracket(
            &self,
            _fiscal_year_id: u32,
            _monthly_income: Decimal,
        ) -> EngineResult<Option<ResicoBracket>> {
            Ok(None)
        }
    }

    /// A source whose concept table cannot be read.
    struct FailingSource;

    impl FiscalDataSource for FailingSource {
        fn get_active_fiscal_year(&self) -> EngineResult<Option<FiscalYear>> {
            Ok(None)
        }

        fn get_isr_brackets(&self, _fiscal_year_id: u32) -> EngineResult<Vec<IsrBracket>> {
            Ok(vec![])
        }

        fn get_imss_concepts(&self) -> EngineResult<Vec<ImssConcept>> {
            Err(EngineError::ConfigNotFound {
                path: "imss_concepts.yaml".to_string(),
            })
        }

        fn get_cesantia_bracket(
            &self,
            _fiscal_year_id: u32,
            _salary_in_umas: Decimal,
        ) -> EngineResult<Option<CesantiaBracket>> {
            Ok(None)
        }

        fn get_resico_bracket(
            &self,
            _fiscal_year_id: u32,
            _monthly_income: Decimal,
        ) -> EngineResult<Option<ResicoBracket>> {
            Ok(None)
        }
    }

    // ==========================================================================
    // Worker
    // ==========================================================================

    #[test]
    fn test_worker_contributions_below_cap() {
        // 20000 * (0.0025 + 0.00375 + 0.00625 + 0.01125)
        let imss = calculate_imss_worker(dec("20000"), &fiscal_year_2025(), &config_2025()).unwrap();
        assert_eq!(imss, dec("475.00"));
    }

    #[test]
    fn test_worker_contributions_capped_at_25_umas() {
        // Base 25 * 113.14 * 30.4 = 85986.40
        let imss =
            calculate_imss_worker(dec("100000"), &fiscal_year_2025(), &config_2025()).unwrap();
        assert_eq!(imss, dec("2042.18"));
    }

    #[test]
    fn test_worker_contributions_ignore_cesantia_table() {
        let with_table =
            calculate_imss_worker(dec("20000"), &fiscal_year_2025(), &config_2025()).unwrap();
        let without_table =
            calculate_imss_worker(dec("20000"), &fiscal_year_2025(), &NoCesantiaSource).unwrap();
        assert_eq!(with_table, without_table);
    }

    #[test]
    fn test_worker_concept_error_propagates() {
        let result = calculate_imss_worker(dec("20000"), &fiscal_year_2025(), &FailingSource);
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    // ==========================================================================
    // Employer
    // ==========================================================================

    #[test]
    fn test_employer_contributions_top_cesantia_row() {
        // 657.89 daily is 5.8 UMAs: Cesantía at 6.422%
        // 20000 * (0.0704355 + 0.06422) = 2693.11
        let imss =
            calculate_imss_employer(dec("20000"), &fiscal_year_2025(), &config_2025()).unwrap();
        assert_eq!(imss, dec("2693.11"));
    }

    #[test]
    fn test_employer_contributions_low_cesantia_row() {
        // 164.47 daily is 1.45 UMAs: Cesantía at 3.544%
        // 5000 * (0.0704355 + 0.03544) = 529.3775
        let imss =
            calculate_imss_employer(dec("5000"), &fiscal_year_2025(), &config_2025()).unwrap();
        assert_eq!(imss, dec("529.38"));
    }

    #[test]
    fn test_employer_contributions_capped_base() {
        // 85986.40 * (0.0704355 + 0.06422) = 11578.5416852
        let imss =
            calculate_imss_employer(dec("100000"), &fiscal_year_2025(), &config_2025()).unwrap();
        assert_eq!(imss, dec("11578.54"));
    }

    #[test]
    fn test_employer_falls_back_to_flat_cesantia_rate() {
        // 20000 * (0.0704355 + 0.0315) = 2038.71
        let imss =
            calculate_imss_employer(dec("20000"), &fiscal_year_2025(), &NoCesantiaSource).unwrap();
        assert_eq!(imss, dec("2038.71"));
    }

    #[test]
    fn test_employer_zero_uma_is_calculation_error() {
        let fiscal_year = FiscalYear {
            uma_daily: Decimal::ZERO,
            ..fiscal_year_2025()
        };
        let result = calculate_imss_employer(dec("20000"), &fiscal_year, &config_2025());
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    // ==========================================================================
    // SBC
    // ==========================================================================

    #[test]
    fn test_sbc_first_year() {
        // 20000 / 30.4 * 1.0503 = 690.9868...
        assert_eq!(calculate_sbc(dec("20000"), 1, &fiscal_year_2025()), dec("690.99"));
    }

    #[test]
    fn test_sbc_grows_with_years_of_service() {
        // 20000 / 30.4 * 1.0543 = 693.6184...
        assert_eq!(calculate_sbc(dec("20000"), 5, &fiscal_year_2025()), dec("693.62"));
    }

    #[test]
    fn test_sbc_capped_at_25_umas() {
        assert_eq!(calculate_sbc(dec("150000"), 1, &fiscal_year_2025()), dec("2828.50"));
    }
}
