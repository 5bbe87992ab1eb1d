use crate::core::participant::ParticipantId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from expense construction.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("expense amount must be positive, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("share percentage for {participant} must be in 0-100, got {percent}")]
    InvalidSharePercent {
        participant: ParticipantId,
        percent: Decimal,
    },
    #[error("share percentages must sum to 100, got {sum}")]
    ShareSumMismatch { sum: Decimal },
}

/// A single shared expense: one payer fronted the full amount,
/// responsibility is split across participants by percentage.
///
/// The percentages in `shares` are expected to sum to exactly 100.
/// [`Expense::new`] enforces this; [`Expense::new_unchecked`] does not,
/// matching callers that keep validation at a different layer. Balances
/// aggregated from unchecked expenses with a bad share sum will not net
/// to zero, and the planner reports the difference as residual.
///
/// # Examples
///
/// ```
/// use splitledger::core::expense::Expense;
/// use splitledger::core::participant::ParticipantId;
/// use rust_decimal_macros::dec;
///
/// let dinner = Expense::new(
///     ParticipantId::new("alice"),
///     dec!(90),
///     [
///         (ParticipantId::new("alice"), dec!(50)),
///         (ParticipantId::new("bob"), dec!(50)),
///     ]
///     .into_iter()
///     .collect(),
/// )
/// .unwrap();
///
/// assert_eq!(dinner.amount(), dec!(90));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense record.
    id: Uuid,
    /// The participant who paid the full amount up front.
    payer: ParticipantId,
    /// The total amount paid. Must be positive.
    amount: Decimal,
    /// Percentage of responsibility per participant (0-100).
    shares: HashMap<ParticipantId, Decimal>,
    /// When this expense record was created.
    created_at: DateTime<Utc>,
    /// Optional free-form description.
    note: Option<String>,
}

impl Expense {
    /// Create a new expense, validating amount and share percentages.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseError::InvalidAmount`] if `amount` is not positive,
    /// [`ExpenseError::InvalidSharePercent`] if any percentage falls outside
    /// 0-100, and [`ExpenseError::ShareSumMismatch`] if the percentages do
    /// not sum to exactly 100.
    pub fn new(
        payer: ParticipantId,
        amount: Decimal,
        shares: HashMap<ParticipantId, Decimal>,
    ) -> Result<Self, ExpenseError> {
        if amount <= Decimal::ZERO {
            return Err(ExpenseError::InvalidAmount { amount });
        }
        for (participant, percent) in &shares {
            if *percent < Decimal::ZERO || *percent > Decimal::ONE_HUNDRED {
                return Err(ExpenseError::InvalidSharePercent {
                    participant: participant.clone(),
                    percent: *percent,
                });
            }
        }
        let sum: Decimal = shares.values().sum();
        if sum != Decimal::ONE_HUNDRED {
            return Err(ExpenseError::ShareSumMismatch { sum });
        }
        Ok(Self::new_unchecked(payer, amount, shares))
    }

    /// Create an expense without validating amount or share percentages.
    ///
    /// Callers own the sum-to-100 invariant; see the type-level docs for
    /// the downstream behavior when it is violated.
    pub fn new_unchecked(
        payer: ParticipantId,
        amount: Decimal,
        shares: HashMap<ParticipantId, Decimal>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payer,
            amount,
            shares,
            created_at: Utc::now(),
            note: None,
        }
    }

    /// Create an expense with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        payer: ParticipantId,
        amount: Decimal,
        shares: HashMap<ParticipantId, Decimal>,
    ) -> Result<Self, ExpenseError> {
        let mut expense = Self::new(payer, amount, shares)?;
        expense.id = id;
        Ok(expense)
    }

    /// Set a description string.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn payer(&self) -> &ParticipantId {
        &self.payer
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn shares(&self) -> &HashMap<ParticipantId, Decimal> {
        &self.shares
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// An ordered collection of expenses from a single group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseSet {
    expenses: Vec<Expense>,
}

impl ExpenseSet {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
        }
    }

    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Total amount paid across all expenses.
    pub fn gross_total(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount()).sum()
    }

    /// All unique participants referenced in this set, as payer or share-holder.
    pub fn participants(&self) -> Vec<ParticipantId> {
        let mut participants: Vec<ParticipantId> = self
            .expenses
            .iter()
            .flat_map(|e| {
                std::iter::once(e.payer().clone()).chain(e.shares().keys().cloned())
            })
            .collect();
        participants.sort();
        participants.dedup();
        participants
    }
}

impl FromIterator<Expense> for ExpenseSet {
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn even_shares(names: &[&str]) -> HashMap<ParticipantId, Decimal> {
        let percent = Decimal::ONE_HUNDRED / Decimal::from(names.len() as u64);
        names
            .iter()
            .map(|n| (ParticipantId::new(*n), percent))
            .collect()
    }

    #[test]
    fn test_expense_creation() {
        let e = Expense::new(
            ParticipantId::new("alice"),
            dec!(100),
            even_shares(&["alice", "bob"]),
        )
        .unwrap();
        assert_eq!(e.payer().as_str(), "alice");
        assert_eq!(e.amount(), dec!(100));
        assert_eq!(e.shares().len(), 2);
    }

    #[test]
    fn test_expense_zero_amount_rejected() {
        let err = Expense::new(
            ParticipantId::new("alice"),
            Decimal::ZERO,
            even_shares(&["alice", "bob"]),
        )
        .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidAmount { .. }));
    }

    #[test]
    fn test_expense_negative_amount_rejected() {
        let err = Expense::new(
            ParticipantId::new("alice"),
            dec!(-50),
            even_shares(&["alice", "bob"]),
        )
        .unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidAmount { .. }));
    }

    #[test]
    fn test_expense_share_sum_rejected() {
        let shares: HashMap<_, _> = [
            (ParticipantId::new("alice"), dec!(60)),
            (ParticipantId::new("bob"), dec!(60)),
        ]
        .into_iter()
        .collect();
        let err = Expense::new(ParticipantId::new("alice"), dec!(100), shares).unwrap_err();
        assert!(matches!(err, ExpenseError::ShareSumMismatch { sum } if sum == dec!(120)));
    }

    #[test]
    fn test_expense_out_of_range_percent_rejected() {
        let shares: HashMap<_, _> = [
            (ParticipantId::new("alice"), dec!(150)),
            (ParticipantId::new("bob"), dec!(-50)),
        ]
        .into_iter()
        .collect();
        let err = Expense::new(ParticipantId::new("alice"), dec!(100), shares).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidSharePercent { .. }));
    }

    #[test]
    fn test_unchecked_accepts_bad_sum() {
        let shares: HashMap<_, _> = [(ParticipantId::new("bob"), dec!(150))]
            .into_iter()
            .collect();
        let e = Expense::new_unchecked(ParticipantId::new("alice"), dec!(100), shares);
        assert_eq!(e.amount(), dec!(100));
    }

    #[test]
    fn test_expense_set_gross() {
        let mut set = ExpenseSet::new();
        set.add(
            Expense::new(
                ParticipantId::new("alice"),
                dec!(100),
                even_shares(&["alice", "bob"]),
            )
            .unwrap(),
        );
        set.add(
            Expense::new(
                ParticipantId::new("bob"),
                dec!(200),
                even_shares(&["alice", "bob"]),
            )
            .unwrap(),
        );
        assert_eq!(set.gross_total(), dec!(300));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_expense_set_participants() {
        let mut set = ExpenseSet::new();
        set.add(
            Expense::new(
                ParticipantId::new("alice"),
                dec!(100),
                even_shares(&["bob", "carol"]),
            )
            .unwrap(),
        );
        let participants = set.participants();
        assert_eq!(participants.len(), 3);
    }
}
