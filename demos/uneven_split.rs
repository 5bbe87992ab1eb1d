//! Uneven percentage splits and the greedy matching order.
//!
//! The worked example: A fronts 100 and B fronts 50, both split
//! 50/30/20 across A, B, and C. C never fronts anything and is owed
//! 30, so the plan routes both debts to C, largest debtor first.

use rust_decimal_macros::dec;
use splitledger::core::expense::{Expense, ExpenseSet};
use splitledger::core::participant::ParticipantId;
use splitledger::settlement::planner::SettlementPlanner;
use std::collections::HashMap;

fn main() {
    let a = ParticipantId::new("A");
    let b = ParticipantId::new("B");
    let c = ParticipantId::new("C");

    let split: HashMap<ParticipantId, _> = [
        (a.clone(), dec!(50)),
        (b.clone(), dec!(30)),
        (c.clone(), dec!(20)),
    ]
    .into_iter()
    .collect();

    let mut set = ExpenseSet::new();
    set.add(Expense::new(a.clone(), dec!(100), split.clone()).unwrap());
    set.add(Expense::new(b.clone(), dec!(50), split).unwrap());

    let plan = SettlementPlanner::settle(&set);

    // A nets -25, B nets -5, C nets +30:
    //   A pays C 25, then B pays C 5.
    println!("{}", plan);
}
