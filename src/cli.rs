// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .value_parser(["all", "month", "year"])
        .default_value("all")
        .help("Restrict to the current month or year")
}

pub fn build_cli() -> Command {
    Command::new("budgetbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Flat-file personal finance ledger")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .help("Directory holding budget_data.csv and user_profile.csv"),
        )
        .subcommand(Command::new("init").about("Create the data files if missing"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .about("Append a transaction")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["income", "expense", "savings"]),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Omit for expenses to ask the AI service"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(period_arg())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense", "savings"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("show").about("Show one transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ))
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries over the ledger")
                .subcommand(json_flags(
                    Command::new("balance").about("Income minus expenses").arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("month")
                        .about("Monthly summary")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month")),
                ))
                .subcommand(json_flags(
                    Command::new("overview").about("Financial overview").arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Expense totals per category")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .about("Monthly totals per transaction type")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("running")
                        .about("Running balance in date order")
                        .arg(period_arg()),
                )),
        )
        .subcommand(
            Command::new("profile")
                .about("User profile settings")
                .subcommand(json_flags(Command::new("show").about("Print all settings")))
                .subcommand(
                    Command::new("set")
                        .about("Set one setting and save the profile")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                )
                .subcommand(Command::new("reset").about("Replace the profile with defaults")),
        )
        .subcommand(
            Command::new("import")
                .about("Replace the ledger with an external table")
                .subcommand(
                    Command::new("transactions").arg(
                        Arg::new("path")
                            .long("path")
                            .required(true)
                            .help("CSV or .json file with type, amount, description, category, date"),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the ledger to a file")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(period_arg()),
                ),
        )
        .subcommand(
            Command::new("advise")
                .about("AI-generated guidance")
                .subcommand(Command::new("analysis").about("Spending analysis").arg(period_arg()))
                .subcommand(
                    Command::new("budget")
                        .about("Budget recommendations")
                        .arg(period_arg())
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .help("Monthly income, defaults to the profile value"),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Validate and repair the ledger file"))
        .subcommand(Command::new("sample").about("Append demo data and a sample profile"))
}
