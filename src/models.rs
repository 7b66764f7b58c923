// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label used for expenses that carry no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Label of the synthetic bucket that absorbs categories beyond the top ones.
pub const OTHER_LABEL: &str = "Other";

/// Income, expenses and net for one period, in miliunits.
///
/// `income` is never negative, `expenses` is never positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub income: i64,
    pub expenses: i64,
    pub remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub name: String,
    pub value: i64, // absolute spend
}

/// One calendar day of activity. Both fields are non-negative miliunits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub income: i64,
    pub expenses: i64,
}

impl DaySummary {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            income: 0,
            expenses: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub remaining_amount: i64,
    pub remaining_change: f64,
    pub income_amount: i64,
    pub income_change: f64,
    pub expenses_amount: i64,
    pub expenses_change: f64,
    pub categories: Vec<CategoryBucket>,
    pub days: Vec<DaySummary>,
}
