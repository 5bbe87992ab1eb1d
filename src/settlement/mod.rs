//! Settlement planning: greedy debtor/creditor matching and plan summaries.

pub mod planner;
pub mod summary;
