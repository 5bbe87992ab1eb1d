//! Foundational types: participants, expenses, balance sheets.

pub mod balance;
pub mod expense;
pub mod participant;
