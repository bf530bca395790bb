//! Shared fixtures for calculation tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::{
    CesantiaBracket, FiscalConfig, FiscalTables, FiscalYear, ImssConcept, IsrBracket, ResicoBracket,
};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn fiscal_year_2025() -> FiscalYear {
    FiscalYear {
        id: 2,
        year: 2025,
        effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        is_active: true,
        uma_daily: dec("113.14"),
        uma_monthly: dec("3439.46"),
        uma_annual: dec("41273.52"),
        umi_value: dec("96.53"),
        smg_general: dec("278.80"),
        smg_border: dec("419.88"),
        subsidy_factor: dec("0.138"),
        subsidy_threshold_monthly: dec("10171.00"),
        savings_fund_cap_uma_factor: dec("1.3"),
        savings_fund_max_percentage: dec("13"),
        pantry_vouchers_uma_cap: dec("1"),
        usd_mxn_rate: dec("18.50"),
    }
}

fn concept(name: &str, worker: &str, employer: &str, is_fixed_rate: bool) -> ImssConcept {
    ImssConcept {
        name: name.to_string(),
        worker_rate: dec(worker),
        employer_rate: dec(employer),
        base_cap_in_umas: Some(25),
        is_fixed_rate,
    }
}

pub fn imss_concepts() -> Vec<ImssConcept> {
    vec![
        concept("Prestaciones en Dinero", "0.0025", "0.007", true),
        concept("Gastos Médicos Pensionados", "0.00375", "0.0105", true),
        concept("Invalidez y Vida", "0.00625", "0.0175", true),
        concept("Retiro", "0", "0.02", true),
        concept("Cesantía en Edad Avanzada y Vejez", "0.01125", "0.0315", false),
        concept("Guarderías", "0", "0.01", true),
        concept("Riesgos de Trabajo", "0", "0.0054355", true),
    ]
}

fn isr(lower: &str, upper: Option<&str>, fee: &str, rate: &str) -> IsrBracket {
    IsrBracket {
        lower_limit: dec(lower),
        upper_limit: upper.map(dec),
        fixed_fee: dec(fee),
        surplus_rate: dec(rate),
    }
}

pub fn isr_brackets_2025() -> Vec<IsrBracket> {
    vec![
        isr("0.00", Some("746.05"), "0.00", "0.0192"),
        isr("746.05", Some("6332.06"), "14.32", "0.064"),
        isr("6332.06", Some("11128.02"), "371.83", "0.1088"),
        isr("11128.02", Some("12935.83"), "893.63", "0.16"),
        isr("12935.83", Some("15487.72"), "1182.88", "0.1792"),
        isr("15487.72", Some("31236.50"), "1640.18", "0.2136"),
        isr("31236.50", Some("49233.01"), "5004.12", "0.2352"),
        isr("49233.01", Some("93993.91"), "9236.89", "0.30"),
        isr("93993.91", Some("125325.21"), "22665.17", "0.32"),
        isr("125325.21", Some("375975.62"), "32691.18", "0.34"),
        isr("375975.62", None, "117912.32", "0.35"),
    ]
}

fn cesantia(lower: &str, upper: Option<&str>, rate: &str) -> CesantiaBracket {
    CesantiaBracket {
        lower_bound_uma: dec(lower),
        upper_bound_uma: upper.map(dec),
        employer_rate: dec(rate),
    }
}

pub fn cesantia_brackets_2025() -> Vec<CesantiaBracket> {
    vec![
        cesantia("0", Some("1.00"), "0.0315"),
        cesantia("1.00", Some("1.50"), "0.03544"),
        cesantia("1.50", Some("2.00"), "0.04426"),
        cesantia("2.00", Some("2.50"), "0.04954"),
        cesantia("2.50", Some("3.00"), "0.05307"),
        cesantia("3.00", Some("3.50"), "0.05559"),
        cesantia("3.50", Some("4.00"), "0.05747"),
        cesantia("4.00", None, "0.06422"),
    ]
}

fn resico(upper: &str, rate: &str) -> ResicoBracket {
    ResicoBracket {
        upper_limit: dec(upper),
        applicable_rate: dec(rate),
    }
}

pub fn resico_brackets_2025() -> Vec<ResicoBracket> {
    vec![
        resico("25000.00", "0.01"),
        resico("50000.00", "0.011"),
        resico("83333.33", "0.015"),
        resico("208333.33", "0.02"),
        resico("291666.67", "0.025"),
    ]
}

/// The 2025 configuration as shipped under `config/mx`.
pub fn config_2025() -> FiscalConfig {
    FiscalConfig::new(
        vec![fiscal_year_2025()],
        imss_concepts(),
        vec![FiscalTables {
            fiscal_year_id: 2,
            isr_brackets: isr_brackets_2025(),
            cesantia_brackets: cesantia_brackets_2025(),
            resico_brackets: resico_brackets_2025(),
        }],
    )
}

/// A single 10% ISR row, a 2% RESICO rate and a 10,000 subsidy threshold.
pub fn flat_rate_config() -> (FiscalYear, FiscalConfig) {
    let fiscal_year = FiscalYear {
        subsidy_threshold_monthly: dec("10000"),
        ..fiscal_year_2025()
    };
    let config = FiscalConfig::new(
        vec![fiscal_year.clone()],
        imss_concepts(),
        vec![FiscalTables {
            fiscal_year_id: 2,
            isr_brackets: vec![isr("0", None, "0", "0.10")],
            cesantia_brackets: cesantia_brackets_2025(),
            resico_brackets: vec![resico("1000000", "0.02")],
        }],
    );
    (fiscal_year, config)
}
