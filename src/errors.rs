// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by the summary aggregator.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
    #[error("Date out of range: cannot step {days} days back from {date}")]
    DateOutOfRange { date: NaiveDate, days: i64 },
    #[error("Ledger query failed: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, SummaryError>;
