// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Command, arg, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print raw JSON"))
        .arg(arg!(--jsonl "Print JSON lines"))
}

pub fn build_cli() -> Command {
    Command::new("fundclip")
        .about("Personal mutual-fund portfolio, SIP, and NAV-history tracking CLI")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(false)
        .subcommand(
            Command::new("signup")
                .about("Create an account")
                .arg(arg!(--name <NAME>).required(true))
                .arg(arg!(--"login-id" <LOGIN_ID>).required(true))
                .arg(arg!(--password <PASSWORD>).required(true)),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and persist the session")
                .arg(arg!(--"login-id" <LOGIN_ID>).required(true))
                .arg(arg!(--password <PASSWORD>).required(true)),
        )
        .subcommand(Command::new("logout").about("Clear the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in user"))
        .subcommand(
            Command::new("user")
                .about("User account management")
                .subcommand(json_flags(Command::new("list").about("List all users")))
                .subcommand(
                    Command::new("show")
                        .about("Show a user (defaults to the session user)")
                        .arg(arg!(--id <ID>).required(false)),
                )
                .subcommand(
                    Command::new("update")
                        .about("Update profile fields of the session user")
                        .arg(arg!(--name <NAME>).required(false))
                        .arg(arg!(--password <PASSWORD>).required(false)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a user account (defaults to the session user)")
                        .arg(arg!(--id <ID>).required(false)),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Aggregate portfolio views")
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Portfolio summary across funds")
                        .arg(arg!(--extra "Include XIRR and realized-gain extras")),
                ))
                .subcommand(
                    Command::new("chart")
                        .about("Monthly portfolio performance")
                        .arg(arg!(--window <WINDOW>).default_value("MAX")),
                )
                .subcommand(
                    Command::new("quote")
                        .about("A little investing wisdom")
                        .arg(arg!(--all "Print every quote")),
                ),
        )
        .subcommand(
            Command::new("fund")
                .about("Per-fund views and attributes")
                .subcommand(json_flags(
                    Command::new("search")
                        .about("Search mutual funds by name")
                        .arg(arg!(<TEXT> "Search text")),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Fund detail: summary, unit lots, SIPs, latest NAV")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64))),
                ))
                .subcommand(
                    Command::new("nav")
                        .about("NAV history chart for a fund")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(--window <WINDOW>).default_value("1Y"))
                        .arg(arg!(--points "List every windowed point")),
                )
                .subcommand(
                    Command::new("chart")
                        .about("Monthly performance vs benchmark for a fund")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(--window <WINDOW>).default_value("MAX")),
                )
                .subcommand(
                    Command::new("set-tag")
                        .about("Set or clear the free-text tag")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(--tag <TAG>).required(false)),
                )
                .subcommand(
                    Command::new("set-emergency")
                        .about("Mark or unmark the fund as emergency money")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(<STATE> "on or off")),
                )
                .subcommand(
                    Command::new("set-benchmark")
                        .about("Set or clear the comparison benchmark")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(--benchmark <NAME>).required(false)),
                )
                .subcommand(Command::new("benchmarks").about("List valid benchmark names"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a fund and all its records")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(--name <FUND_NAME>).required(true))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(true))
                        .arg(arg!(--"type" <TYPE> "BUY|SELL|DIVIDEND|SWP|STP").required(true))
                        .arg(arg!(--amount <AMOUNT>).required(false))
                        .arg(arg!(--units <UNITS>).required(false)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(arg!(--id <TX_ID>).required(true)),
                )
                .subcommand(
                    Command::new("import")
                        .about("Bulk-record transactions from a CSV file")
                        .arg(arg!(--path <CSV>).required(true)),
                )
                .subcommand(
                    Command::new("export")
                        .about("Export a fund's unit lots")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(--format <FORMAT> "csv|json").required(true))
                        .arg(arg!(--out <PATH>).required(true)),
                ),
        )
        .subcommand(
            Command::new("sip")
                .about("Systematic investment plans")
                .subcommand(
                    Command::new("add")
                        .about("Register a SIP")
                        .arg(arg!(--fund <FUND_ID>).required(true).value_parser(value_parser!(i64)))
                        .arg(arg!(--name <FUND_NAME>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List registered SIPs")))
                .subcommand(
                    Command::new("update")
                        .about("Change the amount of a SIP")
                        .arg(arg!(--id <SIP_ID>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a SIP")
                        .arg(arg!(--id <SIP_ID>).required(true)),
                )
                .subcommand(
                    Command::new("execute")
                        .about("Bulk-record one BUY per registered SIP")
                        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(true))
                        .arg(arg!(--"dry-run" "Show the batch without submitting")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check backend reachability and session state"))
}
