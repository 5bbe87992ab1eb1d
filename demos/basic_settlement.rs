//! Basic expense settlement example.
//!
//! Demonstrates how splitledger turns a list of shared expenses into
//! a short list of pairwise transfers.

use rust_decimal_macros::dec;
use splitledger::core::balance::BalanceSheet;
use splitledger::core::expense::{Expense, ExpenseSet};
use splitledger::core::participant::ParticipantId;
use splitledger::settlement::planner::SettlementPlanner;
use splitledger::settlement::summary::PlanSummary;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  splitledger: Basic Settlement Example       ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let alice = ParticipantId::new("alice");
    let bob = ParticipantId::new("bob");
    let carol = ParticipantId::new("carol");

    // A weekend of shared expenses, split evenly three ways.
    let even = |names: [&ParticipantId; 3]| {
        names
            .into_iter()
            .zip([dec!(34), dec!(33), dec!(33)])
            .map(|(p, pct)| (p.clone(), pct))
            .collect()
    };

    let mut set = ExpenseSet::new();
    set.add(
        Expense::new(alice.clone(), dec!(120), even([&alice, &bob, &carol]))
            .unwrap()
            .with_note("hotel"),
    );
    set.add(
        Expense::new(bob.clone(), dec!(45), even([&alice, &bob, &carol]))
            .unwrap()
            .with_note("dinner"),
    );
    set.add(
        Expense::new(carol.clone(), dec!(30), even([&alice, &bob, &carol]))
            .unwrap()
            .with_note("museum tickets"),
    );

    println!("━━━ Balances ━━━\n");
    let sheet = BalanceSheet::from_expenses(&set);
    for participant in [&alice, &bob, &carol] {
        let balance = sheet.balance(participant);
        let status = if balance > dec!(0) {
            "CREDITOR"
        } else if balance < dec!(0) {
            "DEBTOR"
        } else {
            "SETTLED"
        };
        println!("  {:<10} {:>10}  [{}]", participant, balance, status);
    }
    println!();

    let plan = SettlementPlanner::plan(&sheet);
    println!("{}", plan);

    let summary = PlanSummary::from_plan(&plan, &sheet);
    println!("{}", summary);
}
