//! splitledger CLI
//!
//! Settle shared group expenses from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Plan settlements from a JSON file
//! splitledger settle --input expenses.json
//!
//! # Output as JSON
//! splitledger settle --input expenses.json --format json
//!
//! # Show net balances only
//! splitledger balances --input expenses.json
//!
//! # Generate a random group for testing
//! splitledger generate --participants 8 --expenses 25
//! ```

use rust_decimal::Decimal;
use splitledger::core::balance::BalanceSheet;
use splitledger::core::expense::{Expense, ExpenseSet};
use splitledger::core::participant::ParticipantId;
use splitledger::settlement::planner::SettlementPlanner;
use splitledger::settlement::summary::PlanSummary;
use splitledger::simulation::group_gen::{generate_random_group, GroupConfig};
use std::collections::HashMap;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"splitledger — greedy settlement planner for shared group expenses

USAGE:
    splitledger <COMMAND> [OPTIONS]

COMMANDS:
    settle      Aggregate expenses and plan pairwise settlements
    balances    Show net balances per participant
    generate    Generate a random expense group (for testing)
    help        Show this message

OPTIONS (settle, balances):
    --input <FILE>      Path to JSON expenses file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --participants <N>  Number of participants (default: 10)
    --expenses <N>      Number of expenses (default: 30)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    splitledger settle --input expenses.json
    splitledger settle --input expenses.json --format json
    splitledger balances --input expenses.json
    splitledger generate --participants 8 --expenses 25 --output group.json"#
    );
}

/// JSON schema for input expenses.
#[derive(serde::Deserialize)]
struct ExpenseInput {
    payer: String,
    amount: String,
    shares: HashMap<String, String>,
    #[serde(default)]
    note: Option<String>,
}

#[derive(serde::Deserialize)]
struct ExpensesFile {
    expenses: Vec<ExpenseInput>,
}

/// JSON output schema for settlement plans.
#[derive(serde::Serialize)]
struct PlanOutput {
    transfer_count: usize,
    total_transferred: String,
    residual: String,
    exhaustive: bool,
    settlements: Vec<SettlementOutput>,
}

#[derive(serde::Serialize)]
struct SettlementOutput {
    from: String,
    to: String,
    amount: String,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    participant: String,
    balance: String,
    status: String,
}

fn parse_decimal(value: &str, what: &str) -> Decimal {
    value.parse().unwrap_or_else(|e| {
        eprintln!("Invalid {} '{}': {}", what, value, e);
        process::exit(1);
    })
}

fn load_expenses(path: &str) -> ExpenseSet {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: ExpensesFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "expenses": [
    {{ "payer": "alice", "amount": "90", "shares": {{ "alice": "50", "bob": "50" }} }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut set = ExpenseSet::new();
    for input in file.expenses {
        let amount = parse_decimal(&input.amount, "amount");
        let shares: HashMap<ParticipantId, Decimal> = input
            .shares
            .iter()
            .map(|(name, percent)| {
                (
                    ParticipantId::new(name.as_str()),
                    parse_decimal(percent, "share percentage"),
                )
            })
            .collect();

        let expense = Expense::new(ParticipantId::new(&input.payer), amount, shares)
            .unwrap_or_else(|e| {
                eprintln!("Invalid expense (payer {}): {}", input.payer, e);
                process::exit(1);
            });
        let expense = match input.note {
            Some(note) => expense.with_note(note),
            None => expense,
        };
        set.add(expense);
    }
    set
}

/// Parse the shared `--input` / `--format` option pair.
fn parse_io_options(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn cmd_settle(args: &[String]) {
    let (path, format) = parse_io_options(args);

    let set = load_expenses(&path);
    let sheet = BalanceSheet::from_expenses(&set);
    let plan = SettlementPlanner::plan(&sheet);

    if format == "json" {
        let output = PlanOutput {
            transfer_count: plan.transfer_count(),
            total_transferred: plan.total_transferred().to_string(),
            residual: plan.residual().to_string(),
            exhaustive: plan.is_exhaustive(),
            settlements: plan
                .settlements()
                .iter()
                .map(|s| SettlementOutput {
                    from: s.from.to_string(),
                    to: s.to.to_string(),
                    amount: s.amount.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", plan);

        let summary = PlanSummary::from_plan(&plan, &sheet);
        println!("{}", summary);
    }
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_io_options(args);

    let set = load_expenses(&path);
    let sheet = BalanceSheet::from_expenses(&set);

    let mut entries: Vec<(&ParticipantId, &Decimal)> = sheet.all_balances().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    if format == "json" {
        let output: Vec<BalanceOutput> = entries
            .iter()
            .map(|(participant, balance)| BalanceOutput {
                participant: participant.to_string(),
                balance: balance.to_string(),
                status: if **balance > Decimal::ZERO {
                    "CREDITOR".to_string()
                } else if **balance < Decimal::ZERO {
                    "DEBTOR".to_string()
                } else {
                    "SETTLED".to_string()
                },
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("=== Balances ===");
        for (participant, balance) in entries {
            println!("  {:<20} {}", participant.to_string(), balance);
        }
        if !sheet.is_balanced() {
            println!("\nWarning: balances do not net to zero (bad share sums?)");
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut participants = 10usize;
    let mut expense_count = 30usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                participants = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--participants requires a number");
                        process::exit(1);
                    });
            }
            "--expenses" => {
                i += 1;
                expense_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--expenses requires a number");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = GroupConfig {
        participant_count: participants,
        expense_count,
        ..Default::default()
    };

    let set = generate_random_group(&config);

    #[derive(serde::Serialize)]
    struct OutputExpense {
        payer: String,
        amount: String,
        shares: HashMap<String, String>,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        expenses: Vec<OutputExpense>,
    }

    let output = OutputFile {
        expenses: set
            .expenses()
            .iter()
            .map(|e| OutputExpense {
                payer: e.payer().to_string(),
                amount: e.amount().to_string(),
                shares: e
                    .shares()
                    .iter()
                    .map(|(p, pct)| (p.to_string(), pct.to_string()))
                    .collect(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses across {} participants → {}",
            set.len(),
            participants,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "balances" => cmd_balances(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
