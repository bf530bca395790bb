//! Comparison of compensation packages.
//!
//! Each package quotes a salary in some currency and pay period. The salary
//! is normalized to a monthly MXN amount, calculated under the package's
//! regime, and paired with the vesting schedule of its equity grant. The
//! package with the highest yearly net wins.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::{FiscalDataSource, FiscalYear};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Currency, EquityConfig, FiscalYearSummary, PackageComparison, PackageInput, PackageRegime,
    PackageResult, PayFrequency, RegimeInput, ResicoInput, SalaryQuote, SueldosInput,
};

use super::equity::calculate_equity_schedule;
use super::regime::calculate_regime;
use super::rounding::round_money;

/// Average weeks per month.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Fortnights per month (26 periods over 12 months).
pub const FORTNIGHTS_PER_MONTH: Decimal = Decimal::from_parts(217, 0, 0, false, 2);

/// Days per month for daily salaries.
pub const PAID_DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Weekly hours assumed for hourly salaries.
pub const DEFAULT_HOURS_PER_WEEK: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Highest monthly MXN salary accepted for comparison.
pub const MAX_MONTHLY_SALARY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Vesting period of offered grants.
pub const EQUITY_VESTING_YEARS: u32 = 4;

/// Years of vesting projected per package.
pub const EQUITY_SCHEDULE_YEARS: u32 = 4;

/// Converts a quoted salary to a monthly MXN amount.
///
/// USD amounts are converted first, with the quote's exchange rate or the
/// fiscal year's. The pay period is then scaled to a month: hourly by weekly
/// hours (40 by default) times 4.33, daily by 30, weekly by 4.33 and biweekly
/// by 2.17.
///
/// # Example
///
/// ```
/// use totalcomp_engine::calculation::monthly_salary_mxn;
/// use totalcomp_engine::models::{Currency, PayFrequency, SalaryQuote};
/// use rust_decimal::Decimal;
///
/// let quote = SalaryQuote {
///     amount: Decimal::from(1_000),
///     currency: Currency::Mxn,
///     exchange_rate: None,
///     pay_frequency: PayFrequency::Daily,
///     hours_per_week: None,
/// };
/// assert_eq!(monthly_salary_mxn(&quote, Decimal::from(20)), Decimal::from(30_000));
/// ```
pub fn monthly_salary_mxn(salary: &SalaryQuote, default_exchange_rate: Decimal) -> Decimal {
    let amount = match salary.currency {
        Currency::Mxn => salary.amount,
        Currency::Usd => salary.amount * salary.exchange_rate.unwrap_or(default_exchange_rate),
    };

    let monthly = match salary.pay_frequency {
        PayFrequency::Hourly => {
            amount * salary.hours_per_week.unwrap_or(DEFAULT_HOURS_PER_WEEK) * WEEKS_PER_MONTH
        }
        PayFrequency::Daily => amount * PAID_DAYS_PER_MONTH,
        PayFrequency::Weekly => amount * WEEKS_PER_MONTH,
        PayFrequency::Biweekly => amount * FORTNIGHTS_PER_MONTH,
        PayFrequency::Monthly => amount,
    };

    round_money(monthly)
}

fn regime_input(
    package: &PackageInput,
    monthly_salary: Decimal,
    exchange_rate: Decimal,
) -> RegimeInput {
    match &package.regime {
        PackageRegime::SueldosYSalarios(elections) => RegimeInput::SueldosYSalarios(SueldosInput {
            gross_monthly_salary: monthly_salary,
            years_of_service: package.years_of_service.unwrap_or(1),
            benefits: elections.clone(),
            other_benefits: package.other_benefits.clone(),
            exchange_rate: Some(exchange_rate),
        }),
        PackageRegime::Resico {
            unpaid_vacation_days,
        } => RegimeInput::Resico(ResicoInput {
            monthly_income: monthly_salary,
            unpaid_vacation_days: *unpaid_vacation_days,
            other_benefits: package.other_benefits.clone(),
            exchange_rate: Some(exchange_rate),
        }),
    }
}

fn equity_config(package: &PackageInput, fiscal_year: &FiscalYear) -> Option<EquityConfig> {
    let grant = package.equity.as_ref()?;
    if grant.initial_grant_usd <= Decimal::ZERO {
        return None;
    }

    let refresher = grant
        .has_refreshers
        .then_some((grant.refresher_min_usd, grant.refresher_max_usd));

    Some(EquityConfig::new(
        grant.initial_grant_usd,
        refresher,
        EQUITY_VESTING_YEARS,
        fiscal_year.usd_mxn_rate,
    ))
}

/// Compares packages under the active fiscal year.
///
/// Packages whose salary resolves to a non-positive monthly MXN amount are
/// skipped. Unnamed packages are
/// called "Paquete N" after their position in `packages`, starting at 1.
///
/// # Errors
///
/// - `NoActiveFiscalYear` when `source` has no active fiscal year
/// - `InvalidInput` when no package resolves to a positive salary, or a monthly
///   salary exceeds 1,000,000 MXN
/// - Any error raised by the regime calculators
///
/// # Example
///
/// ```no_run
/// use totalcomp_engine::calculation::compare_packages;
/// use totalcomp_engine::config::ConfigLoader;
/// use totalcomp_engine::models::PackageInput;
///
/// let loader = ConfigLoader::load("./config/mx")?;
/// let packages: Vec<PackageInput> = serde_json::from_str(r#"[
///     {"salary": {"amount": "50000"}, "regime": {"type": "sueldos_y_salarios"}},
///     {"salary": {"amount": "3000", "currency": "USD"}, "regime": {"type": "resico"}}
/// ]"#).unwrap();
///
/// let comparison = compare_packages(&packages, &loader)?;
/// if let Some(best) = comparison.best_package() {
///     println!("Best: {} ({})", best.package_name, best.calculation.yearly_net);
/// }
/// # Ok::<(), totalcomp_engine::error::EngineError>(())
/// ```
pub fn compare_packages<S>(packages: &[PackageInput], source: &S) -> EngineResult<PackageComparison>
where
    S: FiscalDataSource + ?Sized,
{
    let fiscal_year = source
        .get_active_fiscal_year()?
        .ok_or(EngineError::NoActiveFiscalYear)?;

    let monthly_salaries: Vec<Decimal> = packages
        .iter()
        .map(|p| monthly_salary_mxn(&p.salary, fiscal_year.usd_mxn_rate))
        .collect();

    if !monthly_salaries.iter().any(|salary| *salary > Decimal::ZERO) {
        return Err(EngineError::InvalidInput {
            field: "salary".to_string(),
            message: "at least one package needs a positive salary".to_string(),
        });
    }

    let mut results: Vec<PackageResult> = Vec::new();
    let mut best_package_index = 0;

    for (index, (package, &monthly_salary)) in packages.iter().zip(&monthly_salaries).enumerate() {
        let package_name = package
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Paquete {}", index + 1));

        if monthly_salary <= Decimal::ZERO {
            debug!(package = %package_name, "Skipping package without a positive salary");
            continue;
        }

        let exchange_rate = package.salary.exchange_rate.unwrap_or(fiscal_year.usd_mxn_rate);
        if monthly_salary > MAX_MONTHLY_SALARY {
            return Err(EngineError::InvalidInput {
                field: "salary".to_string(),
                message: format!(
                    "{}: monthly salary {} exceeds {}",
                    package_name, monthly_salary, MAX_MONTHLY_SALARY
                ),
            });
        }

        let input = regime_input(package, monthly_salary, exchange_rate);
        let calculation = calculate_regime(&input, &fiscal_year, source)?;

        let equity_config = equity_config(package, &fiscal_year);
        let equity_schedule = equity_config
            .as_ref()
            .map(|config| calculate_equity_schedule(config, EQUITY_SCHEDULE_YEARS))
            .unwrap_or_default();

        let beats_best = results
            .get(best_package_index)
            .is_some_and(|best| calculation.yearly_net > best.calculation.yearly_net);
        if beats_best {
            best_package_index = results.len();
        }

        results.push(PackageResult {
            package_name,
            calculation,
            equity_config,
            equity_schedule,
        });
    }

    if let Some(best) = results.get(best_package_index) {
        info!(
            packages = results.len(),
            best = %best.package_name,
            yearly_net = %best.calculation.yearly_net,
            fiscal_year = fiscal_year.year,
            "Compared compensation packages"
        );
    }

    Ok(PackageComparison {
        results,
        best_package_index,
        fiscal_year: FiscalYearSummary {
            year: fiscal_year.year,
            uma_monthly: fiscal_year.uma_monthly,
            usd_mxn_rate: fiscal_year.usd_mxn_rate,
        },
    })
}
