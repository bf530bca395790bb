//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading fiscal
//! configurations from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::source::FiscalDataSource;
use super::types::{
    CesantiaBracket, FiscalConfig, FiscalTables, FiscalYear, FiscalYearsFile, ImssConcept,
    ImssConceptsFile, IsrBracket, ResicoBracket,
};

/// Loads and provides access to fiscal configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and answers fiscal-year and bracket queries through [`FiscalDataSource`].
///
/// # Directory Structure
///
/// ```text
/// config/mx/
/// ├── fiscal_years.yaml   # Fiscal years, exactly one flagged active
/// ├── imss_concepts.yaml  # IMSS contribution concepts
/// └── tables/
///     └── 2025.yaml       # ISR, Cesantía and RESICO brackets of one fiscal year
/// ```
///
/// # Example
///
/// ```no_run
/// use totalcomp_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/mx").unwrap();
/// let fiscal_year = loader.active_fiscal_year().unwrap();
/// println!("UMA daily for {}: {}", fiscal_year.year, fiscal_year.uma_daily);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: FiscalConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - More than one fiscal year is flagged active, a table file
    ///   references an unknown fiscal year, or an ISR table leaves incomes
    ///   uncovered (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let fiscal_years_path = path.join("fiscal_years.yaml");
        let fiscal_years = Self::load_yaml::<FiscalYearsFile>(&fiscal_years_path)?.fiscal_years;

        let active_count = fiscal_years.iter().filter(|fy| fy.is_active).count();
        if active_count > 1 {
            return Err(EngineError::ConfigParseError {
                path: fiscal_years_path.display().to_string(),
                message: format!("{} fiscal years flagged active, expected at most one", active_count),
            });
        }

        let concepts_path = path.join("imss_concepts.yaml");
        let concepts = Self::load_yaml::<ImssConceptsFile>(&concepts_path)?.concepts;

        let tables_dir = path.join("tables");
        let tables = Self::load_tables(&tables_dir)?;

        for table in &tables {
            if !fiscal_years.iter().any(|fy| fy.id == table.fiscal_year_id) {
                return Err(EngineError::ConfigParseError {
                    path: tables_dir.display().to_string(),
                    message: format!("tables reference unknown fiscal year {}", table.fiscal_year_id),
                });
            }
            if let Some(gap) = table.isr_coverage_gap() {
                return Err(EngineError::ConfigParseError {
                    path: tables_dir.display().to_string(),
                    message: format!(
                        "ISR table of fiscal year {} does not cover incomes from {}",
                        table.fiscal_year_id, gap
                    ),
                });
            }
        }

        info!(
            path = %path.display(),
            fiscal_years = fiscal_years.len(),
            imss_concepts = concepts.len(),
            tables = tables.len(),
            "Loaded fiscal configuration"
        );

        Ok(Self {
            config: FiscalConfig::new(fiscal_years, concepts, tables),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all bracket table files from the tables directory.
    fn load_tables(tables_dir: &Path) -> EngineResult<Vec<FiscalTables>> {
        let tables_dir_str = tables_dir.display().to_string();

        let entries = fs::read_dir(tables_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tables_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tables_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<FiscalTables>(&path)?;
                debug!(
                    path = %path.display(),
                    fiscal_year_id = table.fiscal_year_id,
                    isr_brackets = table.isr_brackets.len(),
                    "Loaded bracket tables"
                );
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no table files found)", tables_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying fiscal configuration.
    pub fn config(&self) -> &FiscalConfig {
        &self.config
    }

    /// Returns the active fiscal year.
    ///
    /// Returns `NoActiveFiscalYear` when no year is flagged active.
    pub fn active_fiscal_year(&self) -> EngineResult<&FiscalYear> {
        self.config
            .fiscal_years()
            .iter()
            .find(|fy| fy.is_active)
            .ok_or(EngineError::NoActiveFiscalYear)
    }

    /// Gets a fiscal year by its id.
    pub fn fiscal_year(&self, id: u32) -> EngineResult<&FiscalYear> {
        self.config
            .fiscal_years()
            .iter()
            .find(|fy| fy.id == id)
            .ok_or(EngineError::FiscalYearNotFound { id })
    }

    /// Gets the fiscal year in force on a given date.
    ///
    /// The method finds the most recent fiscal year whose effective date is on
    /// or before the given date.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use totalcomp_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/mx")?;
    /// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    /// let fiscal_year = loader.fiscal_year_for_date(date)?;
    /// println!("Fiscal year: {}", fiscal_year.year);
    /// # Ok::<(), totalcomp_engine::error::EngineError>(())
    /// ```
    pub fn fiscal_year_for_date(&self, date: NaiveDate) -> EngineResult<&FiscalYear> {
        self.config
            .fiscal_years()
            .iter()
            .rfind(|fy| fy.effective_date <= date)
            .ok_or(EngineError::NoActiveFiscalYear)
    }
}

impl FiscalDataSource for ConfigLoader {
    fn get_active_fiscal_year(&self) -> EngineResult<Option<FiscalYear>> {
        self.config.get_active_fiscal_year()
    }

    fn get_isr_brackets(&self, fiscal_year_id: u32) -> EngineResult<Vec<IsrBracket>> {
        self.config.get_isr_brackets(fiscal_year_id)
    }

    fn get_imss_concepts(&self) -> EngineResult<Vec<ImssConcept>> {
        self.config.get_imss_concepts()
    }

    fn get_cesantia_bracket(
        &self,
        fiscal_year_id: u32,
        salary_in_umas: Decimal,
    ) -> EngineResult<Option<CesantiaBracket>> {
        self.config.get_cesantia_bracket(fiscal_year_id, salary_in_umas)
    }

    fn get_resico_bracket(
        &self,
        fiscal_year_id: u32,
        monthly_income: Decimal,
    ) -> EngineResult<Option<ResicoBracket>> {
        self.config.get_resico_bracket(fiscal_year_id, monthly_income)
    }
}
