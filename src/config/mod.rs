//! Fiscal configuration for the TotalComp MX engine.
//!
//! This module provides the fiscal-year parameters and bracket tables the
//! calculators read, the [`FiscalDataSource`] trait through which they read
//! them, and a loader for the YAML files shipped under `config/`.
//!
//! # Example
//!
//! ```no_run
//! use totalcomp_engine::config::{ConfigLoader, FiscalDataSource};
//!
//! let loader = ConfigLoader::load("./config/mx").unwrap();
//! let fiscal_year = loader.get_active_fiscal_year().unwrap().unwrap();
//! let brackets = loader.get_isr_brackets(fiscal_year.id).unwrap();
//! println!("{} ISR brackets for {}", brackets.len(), fiscal_year.year);
//! ```

mod loader;
mod source;
mod types;

pub use loader::ConfigLoader;
pub use source::FiscalDataSource;
pub use types::{
    CesantiaBracket, FiscalConfig, FiscalTables, FiscalYear, FiscalYearsFile, ImssConcept,
    ImssConceptsFile, IsrBracket, ResicoBracket,
};
