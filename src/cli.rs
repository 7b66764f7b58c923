// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, command, Command};

pub fn build_cli() -> Command {
    command!()
        .arg(
            arg!(--db <PATH> "SQLite database to use (overrides TALLYBOARD_DB)")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(--user <ID> "Authenticated user id (overrides TALLYBOARD_USER and the session)")
                .required(false)
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(
            Command::new("summary")
                .about("Income, expenses and top categories against the previous period")
                .arg(
                    arg!(--from <DATE> "First day, YYYY-MM-DD (default: 30 days before --to)")
                        .required(false),
                )
                .arg(arg!(--to <DATE> "Last day, YYYY-MM-DD (default: today)").required(false))
                .arg(arg!(--account <ID> "Only include this account").required(false))
                .arg(arg!(--json "Print the summary as JSON (amounts in miliunits)"))
                .arg(arg!(--days "Also print the day-by-day series")),
        )
        .subcommand(
            Command::new("session")
                .about("Manage the stored user identity")
                .subcommand_required(true)
                .subcommand(
                    Command::new("login")
                        .about("Remember a user id for later commands")
                        .arg(arg!(<USER_ID> "User id to store")),
                )
                .subcommand(Command::new("logout").about("Forget the stored user id"))
                .subcommand(Command::new("show").about("Print the stored user id")),
        )
}
