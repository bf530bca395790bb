//! Benefit line items declared by the user.
//!
//! This module defines [`OtherBenefit`] ("otras prestaciones") and the
//! [`OtherBenefitResult`] produced once a benefit has been taxed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency an amount is declared in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Mexican pesos.
    #[default]
    Mxn,
    /// US dollars, converted with the calculation's exchange rate.
    Usd,
}

/// How often a benefit is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Paid every month.
    #[default]
    Monthly,
    /// Paid once a year.
    Annual,
}

/// A user-declared extra compensation line.
///
/// A percentage benefit carries a percent of the gross annual salary in
/// `amount` and is always treated as annual, whatever `cadence` says.
///
/// # Example
///
/// ```
/// use totalcomp_engine::models::{Cadence, Currency, OtherBenefit};
/// use rust_decimal::Decimal;
///
/// let bonus: OtherBenefit = serde_json::from_str(
///     r#"{"name": "Bono de desempeño", "amount": "10", "is_percentage": true}"#,
/// ).unwrap();
///
/// assert_eq!(bonus.currency, Currency::Mxn);
/// assert_eq!(bonus.cadence, Cadence::Monthly);
/// assert_eq!(bonus.effective_cadence(), Cadence::Annual);
/// assert_eq!(bonus.amount, Decimal::from(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherBenefit {
    /// Display name of the benefit.
    pub name: String,
    /// Amount in `currency`, or a percent when `is_percentage` is set.
    pub amount: Decimal,
    /// Currency of `amount`.
    #[serde(default)]
    pub currency: Currency,
    /// Declared payment cadence.
    #[serde(default)]
    pub cadence: Cadence,
    /// Whether the benefit is exempt from ISR.
    #[serde(default)]
    pub tax_free: bool,
    /// Whether `amount` is a percent of the gross annual salary.
    #[serde(default)]
    pub is_percentage: bool,
}

impl OtherBenefit {
    /// Returns the cadence used for calculation.
    pub fn effective_cadence(&self) -> Cadence {
        if self.is_percentage {
            Cadence::Annual
        } else {
            self.cadence
        }
    }
}

/// A benefit after currency normalization and taxation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherBenefitResult {
    /// Display name of the benefit.
    pub name: String,
    /// Gross amount in MXN.
    pub amount: Decimal,
    /// Whether the benefit was exempt from ISR.
    pub tax_free: bool,
    /// ISR withheld on the benefit.
    pub isr: Decimal,
    /// Amount received after ISR.
    pub net: Decimal,
    /// Cadence used for calculation.
    pub cadence: Cadence,
}
