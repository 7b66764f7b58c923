// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::utils::get_setting;
use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

pub const DB_ENV: &str = "TALLYBOARD_DB";
pub const USER_ENV: &str = "TALLYBOARD_USER";
/// Settings key holding the identity of the logged-in user.
pub const SESSION_KEY: &str = "session_user";

fn first_present<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

/// `--db`, then `TALLYBOARD_DB`, then the platform data dir.
pub fn resolve_db_path(flag: Option<&str>) -> Result<PathBuf> {
    match first_present([flag.map(str::to_string), std::env::var(DB_ENV).ok()]) {
        Some(p) => Ok(PathBuf::from(p)),
        None => db::default_db_path(),
    }
}

/// `--user`, then `TALLYBOARD_USER`, then the stored session.
pub fn resolve_user(conn: &Connection, flag: Option<&str>) -> Result<Option<String>> {
    if let Some(user) = first_present([flag.map(str::to_string), std::env::var(USER_ENV).ok()]) {
        return Ok(Some(user));
    }
    Ok(first_present([get_setting(conn, SESSION_KEY)?]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_present_skips_blank_candidates() {
        let picked = first_present([None, Some("  ".into()), Some(" user_2 ".into())]);
        assert_eq!(picked.as_deref(), Some("user_2"));
        assert_eq!(first_present([None, Some(String::new())]), None);
    }

    #[test]
    fn flag_wins_over_stored_session() {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        crate::utils::set_setting(&conn, SESSION_KEY, "stored").unwrap();
        let user = resolve_user(&conn, Some("from_flag")).unwrap();
        assert_eq!(user.as_deref(), Some("from_flag"));
    }

    #[test]
    fn explicit_db_path_is_used_verbatim() {
        let path = resolve_db_path(Some("/tmp/ledger.sqlite")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/ledger.sqlite"));
    }
}
