//! Dispatch over the two tax regimes.

use crate::config::{FiscalDataSource, FiscalYear};
use crate::error::EngineResult;
use crate::models::{RegimeInput, SalaryCalculation};

use super::resico::calculate_resico;
use super::sueldos::calculate_sueldos_y_salarios;

/// Calculates a package under the regime carried by `input`.
///
/// # Example
///
/// ```no_run
/// use totalcomp_engine::calculation::calculate_regime;
/// use totalcomp_engine::config::ConfigLoader;
/// use totalcomp_engine::models::RegimeInput;
///
/// let loader = ConfigLoader::load("./config/mx")?;
/// let fiscal_year = loader.active_fiscal_year()?;
/// let input: RegimeInput = serde_json::from_str(
///     r#"{"regime": "sueldos_y_salarios", "gross_monthly_salary": "35000"}"#,
/// ).unwrap();
///
/// let result = calculate_regime(&input, fiscal_year, &loader)?;
/// println!("Net: {}", result.net_salary);
/// # Ok::<(), totalcomp_engine::error::EngineError>(())
/// ```
pub fn calculate_regime<S>(
    input: &RegimeInput,
    fiscal_year: &FiscalYear,
    source: &S,
) -> EngineResult<SalaryCalculation>
where
    S: FiscalDataSource + ?Sized,
{
    match input {
        RegimeInput::SueldosYSalarios(input) => {
            calculate_sueldos_y_salarios(input, fiscal_year, source)
        }
        RegimeInput::Resico(input) => calculate_resico(input, fiscal_year, source),
    }
}
