//! Error types for the TotalComp MX engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing compensation.
//! Missing configuration is always surfaced to the caller; the engine never
//! retries a lookup.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the TotalComp MX engine.
///
/// # Example
///
/// ```
/// use totalcomp_engine::error::EngineError;
///
/// let error = EngineError::IsrBracketsNotFound { fiscal_year_id: 7 };
/// assert_eq!(error.to_string(), "No ISR brackets configured for fiscal year 7");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No fiscal year is flagged as active.
    #[error("No active fiscal year configuration found")]
    NoActiveFiscalYear,

    /// A fiscal year was requested that is not configured.
    #[error("Fiscal year not found: {id}")]
    FiscalYearNotFound {
        /// The fiscal year id that was requested.
        id: u32,
    },

    /// The ISR table for a fiscal year is empty.
    #[error("No ISR brackets configured for fiscal year {fiscal_year_id}")]
    IsrBracketsNotFound {
        /// The fiscal year id.
        fiscal_year_id: u32,
    },

    /// No RESICO bracket covers the given monthly income.
    #[error("No RESICO bracket found for income {income}")]
    ResicoBracketNotFound {
        /// The monthly income that exceeded every configured limit.
        income: Decimal,
    },

    /// A caller-supplied value was invalid.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/fiscal_years.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/fiscal_years.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/tables/2025.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/tables/2025.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_no_active_fiscal_year_message() {
        assert_eq!(
            EngineError::NoActiveFiscalYear.to_string(),
            "No active fiscal year configuration found"
        );
    }

    #[test]
    fn test_resico_bracket_not_found_displays_income() {
        let error = EngineError::ResicoBracketNotFound {
            income: Decimal::from_str("350000.00").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No RESICO bracket found for income 350000.00"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "gross_monthly_salary".to_string(),
            message: "must be greater than 0".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'gross_monthly_salary': must be greater than 0"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_year() -> EngineResult<()> {
            Err(EngineError::NoActiveFiscalYear)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_year()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::NoActiveFiscalYear)
        ));
    }
}
