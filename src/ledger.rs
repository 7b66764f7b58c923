// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only aggregate queries over the transaction ledger.
//!
//! Every query is scoped to one user through account ownership, optionally
//! narrowed to a single account, and bounded by an inclusive date range.

use crate::errors::Result;
use crate::models::{CategoryBucket, DaySummary, PeriodTotals, UNCATEGORIZED_LABEL};
use crate::summary::Period;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

// ?1 user, ?2 account (NULL = all), ?3 start, ?4 end
const SCOPE: &str = "a.user_id = ?1
    AND (?2 IS NULL OR t.account_id = ?2)
    AND t.date >= ?3
    AND t.date <= ?4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerFilter {
    pub user_id: String,
    pub account_id: Option<String>,
}

/// Aggregates as SQLite returns them: `SUM` over no rows is NULL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawTotals {
    pub income: Option<i64>,
    pub expenses: Option<i64>,
    pub remaining: Option<i64>,
}

impl From<RawTotals> for PeriodTotals {
    fn from(raw: RawTotals) -> Self {
        PeriodTotals {
            income: raw.income.unwrap_or(0),
            expenses: raw.expenses.unwrap_or(0),
            remaining: raw.remaining.unwrap_or(0),
        }
    }
}

pub fn raw_totals(conn: &Connection, filter: &LedgerFilter, period: &Period) -> Result<RawTotals> {
    let sql = format!(
        "SELECT SUM(CASE WHEN t.amount >= 0 THEN t.amount ELSE 0 END),
                SUM(CASE WHEN t.amount < 0 THEN t.amount ELSE 0 END),
                SUM(t.amount)
         FROM transactions t
         INNER JOIN accounts a ON t.account_id = a.id
         WHERE {SCOPE}"
    );
    let raw = conn.query_row(
        &sql,
        params![filter.user_id, filter.account_id, period.start, period.end],
        |r| {
            Ok(RawTotals {
                income: r.get(0)?,
                expenses: r.get(1)?,
                remaining: r.get(2)?,
            })
        },
    )?;
    Ok(raw)
}

/// Income, expenses and net over `period`, with empty aggregates read as zero.
pub fn totals_for_range(
    conn: &Connection,
    filter: &LedgerFilter,
    period: &Period,
) -> Result<PeriodTotals> {
    Ok(raw_totals(conn, filter, period)?.into())
}

/// Absolute expense totals per category name, largest first.
///
/// Ties are broken by name so repeated calls return the same order.
pub fn category_spending(
    conn: &Connection,
    filter: &LedgerFilter,
    period: &Period,
) -> Result<Vec<CategoryBucket>> {
    let sql = format!(
        "SELECT COALESCE(c.name, ?5) AS category_name, SUM(ABS(t.amount)) AS spent
         FROM transactions t
         INNER JOIN accounts a ON t.account_id = a.id
         LEFT JOIN categories c ON t.category_id = c.id AND c.user_id = a.user_id
         WHERE {SCOPE} AND t.amount < 0
         GROUP BY COALESCE(c.name, ?5)
         ORDER BY spent DESC, category_name ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            filter.user_id,
            filter.account_id,
            period.start,
            period.end,
            UNCATEGORIZED_LABEL
        ],
        |r| {
            Ok(CategoryBucket {
                name: r.get(0)?,
                value: r.get(1)?,
            })
        },
    )?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// Per-day income and absolute expenses for days with at least one
/// transaction, oldest first.
pub fn active_days(
    conn: &Connection,
    filter: &LedgerFilter,
    period: &Period,
) -> Result<Vec<DaySummary>> {
    let sql = format!(
        "SELECT t.date,
                SUM(CASE WHEN t.amount >= 0 THEN t.amount ELSE 0 END),
                SUM(CASE WHEN t.amount < 0 THEN -t.amount ELSE 0 END)
         FROM transactions t
         INNER JOIN accounts a ON t.account_id = a.id
         WHERE {SCOPE}
         GROUP BY t.date
         ORDER BY t.date"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![filter.user_id, filter.account_id, period.start, period.end],
        |r| {
            Ok(DaySummary {
                date: r.get::<_, NaiveDate>(0)?,
                income: r.get(1)?,
                expenses: r.get(2)?,
            })
        },
    )?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}
