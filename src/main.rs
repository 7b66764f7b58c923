// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use tallyboard::{cli, commands, config, db};

fn main() -> Result<()> {
    tallyboard::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = config::resolve_db_path(matches.get_one::<String>("db").map(String::as_str))?;
    let conn = db::open_at(&db_path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db_path.display());
        }
        Some(("summary", sub)) => {
            let user =
                config::resolve_user(&conn, matches.get_one::<String>("user").map(String::as_str))?;
            commands::summary::handle(&conn, user.as_deref(), sub)?
        }
        Some(("session", sub)) => commands::session::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
