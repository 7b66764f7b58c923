// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::SESSION_KEY;
use crate::utils::{clear_setting, get_setting, set_setting};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let user = sub
                .get_one::<String>("USER_ID")
                .map(|s| s.trim())
                .unwrap_or_default();
            login(conn, user)?;
            println!("Logged in as '{}'", user);
        }
        Some(("logout", _)) => {
            if logout(conn)? {
                println!("Logged out");
            } else {
                println!("No active session");
            }
        }
        Some(("show", _)) => match get_setting(conn, SESSION_KEY)? {
            Some(user) => println!("{}", user),
            None => println!("No active session"),
        },
        _ => {}
    }
    Ok(())
}

pub fn login(conn: &Connection, user: &str) -> Result<()> {
    let user = user.trim();
    if user.is_empty() {
        bail!("User id must not be empty");
    }
    set_setting(conn, SESSION_KEY, user)?;
    tracing::info!(user, "session opened");
    Ok(())
}

pub fn logout(conn: &Connection) -> Result<bool> {
    let removed = clear_setting(conn, SESSION_KEY)?;
    if removed {
        tracing::info!("session closed");
    }
    Ok(removed)
}
