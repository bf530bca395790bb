//! TotalComp MX: total compensation engine for Mexican employment
//!
//! This crate calculates taxes, social-security contributions, net pay and
//! yearly totals under the two Mexican regimes for individuals, "Sueldos y
//! Salarios" for salaried employees and RESICO for independent workers, and
//! projects equity vesting with yearly refreshers.
//!
//! Fiscal parameters (UMA, ISR, IMSS, Cesantía and RESICO tables) are read
//! through the [`config::FiscalDataSource`] trait. [`config::ConfigLoader`]
//! implements it over the YAML files shipped under `config/mx`.
//!
//! # Example
//!
//! ```no_run
//! use totalcomp_engine::calculation::calculate_regime;
//! use totalcomp_engine::config::ConfigLoader;
//! use totalcomp_engine::models::{RegimeInput, SueldosInput};
//! use rust_decimal::Decimal;
//!
//! let loader = ConfigLoader::load("./config/mx")?;
//! let fiscal_year = loader.active_fiscal_year()?;
//!
//! let input = RegimeInput::SueldosYSalarios(SueldosInput::new(Decimal::from(30_000)));
//! let result = calculate_regime(&input, fiscal_year, &loader)?;
//! println!("Net monthly: {}", result.net_salary);
//! # Ok::<(), totalcomp_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
