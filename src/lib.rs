//! # splitledger
//!
//! Greedy settlement planner for shared group expenses.
//!
//! Given a sequence of expenses with percentage splits, this crate
//! computes each participant's net balance and a short ordered list of
//! pairwise transfers that settles the whole group.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: participants, expenses, balance sheets
//! - **settlement** — Greedy largest-debtor/largest-creditor planning
//! - **simulation** — Random expense-group generation for testing
//!
//! The two stages are pure: expenses → balances → settlements, with no
//! I/O and no shared state. Persistence, accounts, and transport belong
//! to the surrounding system.

pub mod core;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::BalanceSheet;
    pub use crate::core::expense::{Expense, ExpenseError, ExpenseSet};
    pub use crate::core::participant::ParticipantId;
    pub use crate::settlement::planner::{Settlement, SettlementPlan, SettlementPlanner};
    pub use crate::settlement::summary::PlanSummary;
}
