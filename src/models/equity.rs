//! Equity grant models.
//!
//! This module defines the [`EquityConfig`] consumed by the vesting scheduler
//! and the [`YearlyEquity`] rows it produces.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters of a stock grant with optional annual refreshers.
///
/// Amounts are in USD. Build it with [`EquityConfig::new`], which normalizes
/// the refresher range; the scheduler itself trusts the values it receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityConfig {
    /// Initial grant value in USD.
    pub initial_grant_usd: Decimal,
    /// Whether a refresher is granted every year.
    pub has_refreshers: bool,
    /// Lower bound of the yearly refresher in USD.
    pub refresher_min_usd: Decimal,
    /// Upper bound of the yearly refresher in USD.
    pub refresher_max_usd: Decimal,
    /// Years over which every grant vests evenly.
    pub vesting_years: u32,
    /// USD to MXN exchange rate.
    pub exchange_rate: Decimal,
}

impl EquityConfig {
    /// Creates a grant configuration.
    ///
    /// `refresher` is the `(min, max)` refresher range. A reversed range is
    /// swapped, and refreshers are only enabled when both bounds are positive.
    ///
    /// # Example
    ///
    /// ```
    /// use totalcomp_engine::models::EquityConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = EquityConfig::new(
    ///     Decimal::from(100_000),
    ///     Some((Decimal::from(40_000), Decimal::from(20_000))),
    ///     4,
    ///     Decimal::from(20),
    /// );
    /// assert!(config.has_refreshers);
    /// assert_eq!(config.refresher_min_usd, Decimal::from(20_000));
    /// assert_eq!(config.refresher_max_usd, Decimal::from(40_000));
    /// ```
    pub fn new(
        initial_grant_usd: Decimal,
        refresher: Option<(Decimal, Decimal)>,
        vesting_years: u32,
        exchange_rate: Decimal,
    ) -> Self {
        let (min, max) = match refresher {
            Some((min, max)) if min > max => (max, min),
            Some(range) => range,
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        Self {
            initial_grant_usd,
            has_refreshers: min > Decimal::ZERO && max > Decimal::ZERO,
            refresher_min_usd: min,
            refresher_max_usd: max,
            vesting_years,
            exchange_rate,
        }
    }

    /// Returns the refresher granted each year: the midpoint of the range.
    pub fn average_refresher(&self) -> Decimal {
        (self.refresher_min_usd + self.refresher_max_usd) / Decimal::TWO
    }
}

/// Vesting for one year of employment.
///
/// Year 0 is the join date and has nothing vested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyEquity {
    /// Years since joining.
    pub year: u32,
    /// USD vested from the initial grant.
    pub initial_grant_vested: Decimal,
    /// USD vested per refresher cohort, keyed by grant year.
    pub refresher_vested: BTreeMap<u32, Decimal>,
    /// USD vested from all refreshers.
    pub refresher_total: Decimal,
    /// USD vested in total.
    pub total_vested: Decimal,
    /// Total vested converted to MXN.
    pub total_vested_mxn: Decimal,
    /// USD value of the refresher granted this year.
    pub new_refresher_granted: Decimal,
}
