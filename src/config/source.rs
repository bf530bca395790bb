//! Read-only access to fiscal data.
//!
//! The calculators never read files or databases themselves. They go through
//! [`FiscalDataSource`], which mirrors the queries a storage layer answers.
//! [`FiscalConfig`] implements it over tables held in memory.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;

use super::types::{
    CesantiaBracket, FiscalConfig, FiscalYear, ImssConcept, IsrBracket, ResicoBracket,
};

/// Lookups the engine needs from the fiscal configuration store.
///
/// `Ok(None)` means "no row matched"; `Err` is reserved for failures of the
/// store itself. Implementations must be free of side effects visible to the
/// calculators so that identical inputs yield identical results.
pub trait FiscalDataSource {
    /// Returns the fiscal year flagged active, if any.
    fn get_active_fiscal_year(&self) -> EngineResult<Option<FiscalYear>>;

    /// Returns the monthly ISR table of a fiscal year, ordered by lower limit.
    ///
    /// An unknown fiscal year yields an empty table.
    fn get_isr_brackets(&self, fiscal_year_id: u32) -> EngineResult<Vec<IsrBracket>>;

    /// Returns every IMSS contribution concept.
    fn get_imss_concepts(&self) -> EngineResult<Vec<ImssConcept>>;

    /// Returns the Cesantía row whose bounds contain `salary_in_umas`.
    fn get_cesantia_bracket(
        &self,
        fiscal_year_id: u32,
        salary_in_umas: Decimal,
    ) -> EngineResult<Option<CesantiaBracket>>;

    /// Returns the RESICO row with the smallest upper limit that is at least
    /// `monthly_income`.
    fn get_resico_bracket(
        &self,
        fiscal_year_id: u32,
        monthly_income: Decimal,
    ) -> EngineResult<Option<ResicoBracket>>;
}

impl FiscalDataSource for FiscalConfig {
    fn get_active_fiscal_year(&self) -> EngineResult<Option<FiscalYear>> {
        Ok(self.fiscal_years().iter().find(|fy| fy.is_active).cloned())
    }

    fn get_isr_brackets(&self, fiscal_year_id: u32) -> EngineResult<Vec<IsrBracket>> {
        let brackets = self
            .tables(fiscal_year_id)
            .map(|t| t.isr_brackets.clone())
            .unwrap_or_default();
        debug!(fiscal_year_id, count = brackets.len(), "Loaded ISR brackets");
        Ok(brackets)
    }

    fn get_imss_concepts(&self) -> EngineResult<Vec<ImssConcept>> {
        Ok(self.imss_concepts().to_vec())
    }

    fn get_cesantia_bracket(
        &self,
        fiscal_year_id: u32,
        salary_in_umas: Decimal,
    ) -> EngineResult<Option<CesantiaBracket>> {
        Ok(self.tables(fiscal_year_id).and_then(|t| {
            t.cesantia_brackets
                .iter()
                .find(|b| b.contains(salary_in_umas))
                .cloned()
        }))
    }

    fn get_resico_bracket(
        &self,
        fiscal_year_id: u32,
        monthly_income: Decimal,
    ) -> EngineResult<Option<ResicoBracket>> {
        // Tables are sorted by upper limit, so the first hit is the smallest.
        Ok(self.tables(fiscal_year_id).and_then(|t| {
            t.resico_brackets
                .iter()
                .find(|b| monthly_income <= b.upper_limit)
                .cloned()
        }))
    }
}
