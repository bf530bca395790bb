//! Equity vesting schedule with refresher stacking.
//!
//! Every grant vests in equal yearly parts over `vesting_years`. The initial
//! grant vests from year 1. When refreshers are enabled, a refresher worth
//! the midpoint of the configured range is granted every year and vests
//! from the following year, so refresher cohorts stack on top of each other.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{EquityConfig, YearlyEquity};

use super::rounding::round_money;

/// Calculates the year-by-year vesting schedule of a grant.
///
/// # Arguments
///
/// * `config` - The grant parameters
/// * `years` - Number of years to project
///
/// # Returns
///
/// `years + 1` rows. Row 0 is the join date, with nothing vested. A config
/// with zero vesting years vests nothing.
///
/// # Example
///
/// ```
/// use totalcomp_engine::calculation::calculate_equity_schedule;
/// use totalcomp_engine::models::EquityConfig;
/// use rust_decimal::Decimal;
///
/// let config = EquityConfig::new(Decimal::from(100_000), None, 4, Decimal::from(20));
/// let schedule = calculate_equity_schedule(&config, 5);
///
/// assert_eq!(schedule.len(), 6);
/// assert_eq!(schedule[0].total_vested, Decimal::ZERO);
/// assert_eq!(schedule[1].total_vested, Decimal::from(25_000));
/// assert_eq!(schedule[1].total_vested_mxn, Decimal::from(500_000));
/// assert_eq!(schedule[5].total_vested, Decimal::ZERO);
/// ```
pub fn calculate_equity_schedule(config: &EquityConfig, years: u32) -> Vec<YearlyEquity> {
    let mut schedule = Vec::with_capacity(years as usize + 1);
    schedule.push(YearlyEquity::default());

    if config.vesting_years == 0 {
        schedule.extend((1..=years).map(|year| YearlyEquity {
            year,
            ..Default::default()
        }));
        return schedule;
    }

    let vesting_years = Decimal::from(config.vesting_years);
    let refresher_amount = if config.has_refreshers {
        config.average_refresher()
    } else {
        Decimal::ZERO
    };

    // Refresher amount keyed by the year it was granted.
    let mut refresher_grants: BTreeMap<u32, Decimal> = BTreeMap::new();

    for year in 1..=years {
        let initial = if year <= config.vesting_years {
            config.initial_grant_usd / vesting_years
        } else {
            Decimal::ZERO
        };

        let vesting: Vec<(u32, Decimal)> = refresher_grants
            .iter()
            .filter(|(grant_year, _)| year > **grant_year && year <= **grant_year + config.vesting_years)
            .map(|(grant_year, amount)| (*grant_year, *amount / vesting_years))
            .collect();

        let new_refresher_granted = if config.has_refreshers {
            refresher_grants.entry(year).or_insert(refresher_amount);
            round_money(refresher_amount)
        } else {
            Decimal::ZERO
        };

        // Totals come from unrounded parts; each field is rounded on output.
        let refresher_total: Decimal = vesting.iter().map(|(_, amount)| *amount).sum();
        let total_vested = initial + refresher_total;

        schedule.push(YearlyEquity {
            year,
            initial_grant_vested: round_money(initial),
            refresher_vested: vesting
                .into_iter()
                .map(|(grant_year, amount)| (grant_year, round_money(amount)))
                .collect(),
            refresher_total: round_money(refresher_total),
            total_vested: round_money(total_vested),
            total_vested_mxn: round_money(total_vested * config.exchange_rate),
            new_refresher_granted,
        });
    }

    debug!(
        years,
        vesting_years = config.vesting_years,
        has_refreshers = config.has_refreshers,
        "Calculated equity schedule"
    );

    schedule
}

/// Returns the total vested over `years`, as `(usd, mxn)`.
///
/// # Example
///
/// ```
/// use totalcomp_engine::calculation::total_equity_over_years;
/// use totalcomp_engine::models::EquityConfig;
/// use rust_decimal::Decimal;
///
/// let config = EquityConfig::new(Decimal::from(100_000), None, 4, Decimal::from(20));
/// let (usd, mxn) = total_equity_over_years(&config, 4);
/// assert_eq!(usd, Decimal::from(100_000));
/// assert_eq!(mxn, Decimal::from(2_000_000));
/// ```
pub fn total_equity_over_years(config: &EquityConfig, years: u32) -> (Decimal, Decimal) {
    calculate_equity_schedule(config, years)
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(usd, mxn), row| {
            (usd + row.total_vested, mxn + row.total_vested_mxn)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::dec;
    use proptest::prelude::*;

    fn with_refreshers() -> EquityConfig {
        EquityConfig::new(
            dec("100000"),
            Some((dec("10000"), dec("15000"))),
            4,
            dec("20"),
        )
    }

    #[test]
    fn test_initial_grant_vests_evenly() {
        let config = EquityConfig::new(dec("100000"), None, 4, dec("20"));
        let schedule = calculate_equity_schedule(&config, 6);

        assert_eq!(schedule.len(), 7);
        for row in &schedule[1..=4] {
            assert_eq!(row.initial_grant_vested, dec("25000.00"));
            assert_eq!(row.total_vested, dec("25000.00"));
        }
        for row in &schedule[5..] {
            assert_eq!(row.total_vested, Decimal::ZERO);
        }
    }

    #[test]
    fn test_years_are_numbered_from_zero() {
        let schedule = calculate_equity_schedule(&with_refreshers(), 3);
        let years: Vec<u32> = schedule.iter().map(|row| row.year).collect();
        assert_eq!(years, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_join_date_vests_nothing() {
        let schedule = calculate_equity_schedule(&with_refreshers(), 4);
        assert_eq!(schedule[0], YearlyEquity::default());
    }

    #[test]
    fn test_refreshers_stack() {
        let schedule = calculate_equity_schedule(&with_refreshers(), 4);

        assert_eq!(schedule[1].new_refresher_granted, dec("12500.00"));
        assert!(schedule[1].refresher_vested.is_empty());

        assert_eq!(schedule[2].refresher_vested.get(&1), Some(&dec("3125.00")));
        assert_eq!(schedule[2].refresher_total, dec("3125.00"));

        let cohorts: Vec<u32> = schedule[4].refresher_vested.keys().copied().collect();
        assert_eq!(cohorts, vec![1, 2, 3]);
        assert_eq!(schedule[4].refresher_total, dec("9375.00"));
        assert_eq!(schedule[4].total_vested, dec("34375.00"));
        assert_eq!(schedule[4].total_vested_mxn, dec("687500.00"));
    }

    #[test]
    fn test_refresher_cohort_stops_after_vesting_years() {
        let schedule = calculate_equity_schedule(&with_refreshers(), 6);

        // Cohort 1 vests in years 2 through 5
        assert!(schedule[5].refresher_vested.contains_key(&1));
        assert!(!schedule[6].refresher_vested.contains_key(&1));
        assert_eq!(schedule[6].refresher_vested.len(), 4);
    }

    #[test]
    fn test_uneven_grant_totals_round_once() {
        let config = EquityConfig::new(
            dec("100000"),
            Some((dec("10000"), dec("10000"))),
            3,
            dec("17.5"),
        );
        let schedule = calculate_equity_schedule(&config, 3);

        // 33333.33... + 2 * 3333.33... rounds as a whole, not per part
        assert_eq!(schedule[3].initial_grant_vested, dec("33333.33"));
        assert_eq!(schedule[3].refresher_vested.get(&1), Some(&dec("3333.33")));
        assert_eq!(schedule[3].refresher_total, dec("6666.67"));
        assert_eq!(schedule[3].total_vested, dec("40000.00"));
        assert_eq!(schedule[3].total_vested_mxn, dec("700000.00"));
    }

    #[test]
    fn test_zero_vesting_years_vests_nothing() {
        let config = EquityConfig::new(dec("100000"), Some((dec("1"), dec("2"))), 0, dec("20"));
        let schedule = calculate_equity_schedule(&config, 4);

        assert_eq!(schedule.len(), 5);
        assert!(schedule.iter().all(|row| row.total_vested.is_zero()));
    }

    #[test]
    fn test_zero_years_returns_join_date_only() {
        let schedule = calculate_equity_schedule(&with_refreshers(), 0);
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_total_with_refreshers_over_four_years() {
        // 100000 + 3125 + 6250 + 9375
        let (usd, mxn) = total_equity_over_years(&with_refreshers(), 4);
        assert_eq!(usd, dec("118750.00"));
        assert_eq!(mxn, dec("2375000.00"));
    }

    proptest! {
        #[test]
        fn prop_initial_grant_sum_within_rounding(
            cents in 0i64..100_000_000,
            vesting_years in 1u32..10,
        ) {
            let grant = Decimal::new(cents, 2);
            let config = EquityConfig::new(grant, None, vesting_years, dec("18.5"));
            let schedule = calculate_equity_schedule(&config, vesting_years);

            let vested: Decimal = schedule.iter().map(|row| row.initial_grant_vested).sum();
            let tolerance = Decimal::new(i64::from(vesting_years), 2);
            prop_assert!((vested - grant).abs() <= tolerance);
        }

        #[test]
        fn prop_no_refreshers_means_empty_cohorts(
            cents in 0i64..100_000_000,
            years in 0u32..12,
        ) {
            let config = EquityConfig::new(Decimal::new(cents, 2), None, 4, dec("20"));
            for row in calculate_equity_schedule(&config, years) {
                prop_assert!(row.refresher_vested.is_empty());
                prop_assert_eq!(row.new_refresher_granted, Decimal::ZERO);
            }
        }
    }
}
