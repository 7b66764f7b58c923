// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period-over-period spending summary.
//!
//! A summary compares a period against the immediately preceding window of
//! the same length, ranks the biggest spending categories and lays out one
//! entry per calendar day.

use crate::errors::{Result, SummaryError};
use crate::ledger::{self, LedgerFilter};
use crate::models::{CategoryBucket, DaySummary, OTHER_LABEL, SummaryResult};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use std::collections::HashMap;

pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;
pub const TOP_CATEGORIES: usize = 3;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SummaryError::InvalidRange {
                from: start,
                to: end,
            });
        }
        Ok(Self { start, end })
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The adjacent window of equal length that ends the day before `start`.
    pub fn previous(&self) -> Result<Period> {
        let days = self.len_days();
        Ok(Period {
            start: days_before(self.start, days)?,
            end: days_before(self.end, days)?,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|d| *d <= self.end)
    }
}

fn days_before(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    date.checked_sub_signed(Duration::days(days))
        .ok_or(SummaryError::DateOutOfRange { date, days })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub account_id: Option<String>,
}

/// Applies the default range: `to` falls back to `today`, `from` to
/// thirty days before the resolved `to`.
pub fn resolve_period(query: &SummaryQuery, today: NaiveDate) -> Result<Period> {
    let end = query.to.unwrap_or(today);
    let start = match query.from {
        Some(from) => from,
        None => days_before(end, DEFAULT_LOOKBACK_DAYS)?,
    };
    Period::new(start, end)
}

/// Relative change from `previous` to `current`, in percent.
///
/// A zero base reports 0 when nothing changed and 100 otherwise.
pub fn calculate_percentage(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return if current == 0 { 0.0 } else { 100.0 };
    }
    ((current as f64 - previous as f64) / (previous as f64).abs()) * 100.0
}

/// Keeps the largest buckets and folds the remainder into "Other".
pub fn bucket_categories(mut ranked: Vec<CategoryBucket>) -> Vec<CategoryBucket> {
    // stable: equal values keep the order they arrived in
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    if ranked.len() <= TOP_CATEGORIES {
        return ranked;
    }
    let rest = ranked.split_off(TOP_CATEGORIES);
    let value = rest.iter().map(|b| b.value).sum();
    ranked.push(CategoryBucket {
        name: OTHER_LABEL.to_string(),
        value,
    });
    ranked
}

/// One entry per day of `period`; days without activity are zeroed.
pub fn fill_missing_days(active: &[DaySummary], period: &Period) -> Vec<DaySummary> {
    let by_date: HashMap<NaiveDate, &DaySummary> = active.iter().map(|d| (d.date, d)).collect();
    period
        .days()
        .map(|date| {
            by_date
                .get(&date)
                .map(|d| **d)
                .unwrap_or_else(|| DaySummary::empty(date))
        })
        .collect()
}

/// Builds the summary for `user` over the range described by `query`.
///
/// Fails with [`SummaryError::Unauthorized`] before touching the ledger when
/// there is no user.
pub fn compute_summary(
    conn: &Connection,
    user: Option<&str>,
    query: &SummaryQuery,
    today: NaiveDate,
) -> Result<SummaryResult> {
    let Some(user_id) = user.map(str::trim).filter(|u| !u.is_empty()) else {
        tracing::warn!("summary requested without an authenticated user");
        return Err(SummaryError::Unauthorized);
    };

    let period = resolve_period(query, today)?;
    let last_period = period.previous()?;
    let filter = LedgerFilter {
        user_id: user_id.to_string(),
        account_id: query
            .account_id
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
    };
    tracing::debug!(
        user = %filter.user_id,
        account = ?filter.account_id,
        start = %period.start,
        end = %period.end,
        last_start = %last_period.start,
        last_end = %last_period.end,
        "computing summary"
    );

    let current = ledger::totals_for_range(conn, &filter, &period)?;
    let last = ledger::totals_for_range(conn, &filter, &last_period)?;

    let categories = bucket_categories(ledger::category_spending(conn, &filter, &period)?);
    let days = fill_missing_days(&ledger::active_days(conn, &filter, &period)?, &period);

    Ok(SummaryResult {
        remaining_amount: current.remaining,
        remaining_change: calculate_percentage(current.remaining, last.remaining),
        income_amount: current.income,
        income_change: calculate_percentage(current.income, last.income),
        expenses_amount: current.expenses,
        expenses_change: calculate_percentage(current.expenses, last.expenses),
        categories,
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn bucket(name: &str, value: i64) -> CategoryBucket {
        CategoryBucket {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn percentage_handles_zero_base() {
        assert_eq!(calculate_percentage(0, 0), 0.0);
        assert_eq!(calculate_percentage(42, 0), 100.0);
        assert_eq!(calculate_percentage(-42, 0), 100.0);
    }

    #[test]
    fn percentage_is_relative_to_absolute_previous() {
        assert_eq!(calculate_percentage(150, 100), 50.0);
        assert_eq!(calculate_percentage(50, 100), -50.0);
        // expenses grow more negative: -150 vs -100
        assert_eq!(calculate_percentage(-150, -100), -50.0);
        assert_eq!(calculate_percentage(0, -200), 100.0);
    }

    #[test]
    fn previous_period_is_adjacent_and_equal_length() {
        let period = Period::new(d("2025-03-01"), d("2025-03-10")).unwrap();
        let last = period.previous().unwrap();
        assert_eq!(period.len_days(), 10);
        assert_eq!(last.len_days(), 10);
        assert_eq!(last.start, d("2025-02-19"));
        assert_eq!(last.end, d("2025-02-28"));
        assert!(last.end < period.start);
        assert_eq!(last.end + Duration::days(1), period.start);
    }

    #[test]
    fn single_day_period_compares_with_day_before() {
        let period = Period::new(d("2025-01-01"), d("2025-01-01")).unwrap();
        let last = period.previous().unwrap();
        assert_eq!(period.len_days(), 1);
        assert_eq!(last.start, d("2024-12-31"));
        assert_eq!(last.end, d("2024-12-31"));
    }

    #[test]
    fn resolve_defaults_to_last_thirty_days() {
        let today = d("2025-06-15");
        let period = resolve_period(&SummaryQuery::default(), today).unwrap();
        assert_eq!(period.end, today);
        assert_eq!(period.start, d("2025-05-16"));
        assert_eq!(period.len_days(), 31);
    }

    #[test]
    fn resolve_anchors_default_from_on_explicit_to() {
        let query = SummaryQuery {
            to: Some(d("2025-02-10")),
            ..Default::default()
        };
        let period = resolve_period(&query, d("2025-06-15")).unwrap();
        assert_eq!(period.start, d("2025-01-11"));
        assert_eq!(period.end, d("2025-02-10"));
    }

    #[test]
    fn resolve_rejects_inverted_range() {
        let query = SummaryQuery {
            from: Some(d("2025-02-10")),
            to: Some(d("2025-02-01")),
            ..Default::default()
        };
        let err = resolve_period(&query, d("2025-06-15")).unwrap_err();
        assert!(matches!(err, SummaryError::InvalidRange { .. }));
    }

    #[test]
    fn buckets_fold_overflow_into_other() {
        let out = bucket_categories(vec![
            bucket("Rent", 500),
            bucket("Food", 300),
            bucket("Fuel", 150),
            bucket("Books", 30),
            bucket("Games", 20),
        ]);
        assert_eq!(
            out,
            vec![
                bucket("Rent", 500),
                bucket("Food", 300),
                bucket("Fuel", 150),
                bucket("Other", 50),
            ]
        );
    }

    #[test]
    fn buckets_without_overflow_have_no_other() {
        let out = bucket_categories(vec![bucket("Rent", 500), bucket("Food", 300)]);
        assert_eq!(out, vec![bucket("Rent", 500), bucket("Food", 300)]);

        let three = bucket_categories(vec![bucket("A", 3), bucket("B", 2), bucket("C", 1)]);
        assert_eq!(three.len(), 3);
        assert!(three.iter().all(|b| b.name != OTHER_LABEL));

        assert!(bucket_categories(Vec::new()).is_empty());
    }

    #[test]
    fn buckets_are_ranked_before_truncation() {
        let out = bucket_categories(vec![
            bucket("Small", 1),
            bucket("Big", 900),
            bucket("Mid", 40),
            bucket("Large", 600),
        ]);
        let names: Vec<_> = out.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Big", "Large", "Mid", "Other"]);
        assert_eq!(out[3].value, 1);
    }

    #[test]
    fn fill_missing_days_zeroes_gaps() {
        let period = Period::new(d("2025-01-01"), d("2025-01-05")).unwrap();
        let active = vec![
            DaySummary {
                date: d("2025-01-02"),
                income: 1000,
                expenses: 250,
            },
            DaySummary {
                date: d("2025-01-04"),
                income: 0,
                expenses: 75,
            },
        ];
        let days = fill_missing_days(&active, &period);
        assert_eq!(days.len(), 5);
        assert_eq!(days[0], DaySummary::empty(d("2025-01-01")));
        assert_eq!(days[1], active[0]);
        assert_eq!(days[2], DaySummary::empty(d("2025-01-03")));
        assert_eq!(days[3], active[1]);
        assert_eq!(days[4], DaySummary::empty(d("2025-01-05")));
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn fill_missing_days_spans_month_boundary() {
        let period = Period::new(d("2024-02-27"), d("2024-03-02")).unwrap();
        let days = fill_missing_days(&[], &period);
        let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(
            dates,
            ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01", "2024-03-02"]
        );
    }

    #[test]
    fn previous_period_before_earliest_date_is_an_error() {
        let start = NaiveDate::MIN + Duration::days(4);
        let period = Period::new(start, start + Duration::days(5)).unwrap();
        let err = period.previous().unwrap_err();
        assert!(matches!(err, SummaryError::DateOutOfRange { days: 6, .. }));
    }

    #[test]
    fn default_from_before_earliest_date_is_an_error() {
        let query = SummaryQuery {
            to: Some(NaiveDate::MIN + Duration::days(10)),
            ..Default::default()
        };
        let err = resolve_period(&query, d("2025-06-15")).unwrap_err();
        assert!(matches!(err, SummaryError::DateOutOfRange { days: 30, .. }));
    }

    #[test]
    fn unauthorized_never_queries() {
        // no schema: any query would fail with a storage error instead
        let conn = Connection::open_in_memory().unwrap();
        let today = d("2025-01-31");
        for user in [None, Some(""), Some("   ")] {
            let err = compute_summary(&conn, user, &SummaryQuery::default(), today).unwrap_err();
            assert!(matches!(err, SummaryError::Unauthorized));
        }
    }
}
