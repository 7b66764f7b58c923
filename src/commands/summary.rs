// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::USER_ENV;
use crate::errors::SummaryError;
use crate::models::SummaryResult;
use crate::summary::{compute_summary, SummaryQuery};
use crate::utils::{fmt_amount, fmt_percentage, maybe_print_json, parse_optional_date, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, user: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let query = query_from_args(sub)?;
    let today = chrono::Utc::now().date_naive();
    let summary = match compute_summary(conn, user, &query, today) {
        Err(SummaryError::Unauthorized) => bail!(
            "Unauthorized: no user identity (pass --user, set {} or run `tallyboard session login`)",
            USER_ENV
        ),
        other => other?,
    };

    if maybe_print_json(sub.get_flag("json"), &summary_json(&summary))? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(&["Metric", "Amount", "Change"], overview_rows(&summary))
    );
    println!(
        "{}",
        pretty_table(&["Category", "Spent"], category_rows(&summary))
    );
    if sub.get_flag("days") {
        println!(
            "{}",
            pretty_table(&["Date", "Income", "Expenses"], day_rows(&summary))
        );
    }
    Ok(())
}

/// Response envelope for `--json`; amounts stay in miliunits.
pub fn summary_json(summary: &SummaryResult) -> serde_json::Value {
    json!({ "data": summary })
}

pub fn query_from_args(sub: &clap::ArgMatches) -> Result<SummaryQuery> {
    Ok(SummaryQuery {
        from: parse_optional_date(sub.get_one::<String>("from").map(String::as_str))?,
        to: parse_optional_date(sub.get_one::<String>("to").map(String::as_str))?,
        account_id: sub.get_one::<String>("account").cloned(),
    })
}

pub fn overview_rows(summary: &SummaryResult) -> Vec<Vec<String>> {
    vec![
        vec![
            "Remaining".into(),
            fmt_amount(summary.remaining_amount),
            fmt_percentage(summary.remaining_change),
        ],
        vec![
            "Income".into(),
            fmt_amount(summary.income_amount),
            fmt_percentage(summary.income_change),
        ],
        vec![
            "Expenses".into(),
            fmt_amount(summary.expenses_amount),
            fmt_percentage(summary.expenses_change),
        ],
    ]
}

pub fn category_rows(summary: &SummaryResult) -> Vec<Vec<String>> {
    summary
        .categories
        .iter()
        .map(|c| vec![c.name.clone(), fmt_amount(c.value)])
        .collect()
}

pub fn day_rows(summary: &SummaryResult) -> Vec<Vec<String>> {
    summary
        .days
        .iter()
        .map(|d| vec![d.date.to_string(), fmt_amount(d.income), fmt_amount(d.expenses)])
        .collect()
}
