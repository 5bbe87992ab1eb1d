use crate::core::expense::{Expense, ExpenseSet};
use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Net balance per participant, aggregated from a set of expenses.
///
/// A positive balance means the participant is owed money by the group
/// (net creditor). A negative balance means the participant owes money
/// into the group (net debtor).
///
/// The sheet is derived state: it is recomputed from scratch on every
/// aggregation and never persisted by this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// ParticipantId -> net balance.
    /// Positive = net creditor, negative = net debtor.
    balances: HashMap<ParticipantId, Decimal>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a full expense set into net balances, in input order.
    pub fn from_expenses(expenses: &ExpenseSet) -> Self {
        let mut sheet = Self::new();
        for expense in expenses.expenses() {
            sheet.apply_expense(expense);
        }
        sheet
    }

    /// Apply a single expense: the payer fronted the full amount, every
    /// share-holder picks up `percentage / 100 * amount` of responsibility.
    ///
    /// A participant who is both payer and share-holder nets
    /// `amount * (percentage/100 - 1)`. No share-sum validation happens
    /// here; see [`crate::core::expense::Expense::new`].
    pub fn apply_expense(&mut self, expense: &Expense) {
        *self
            .balances
            .entry(expense.payer().clone())
            .or_insert(Decimal::ZERO) -= expense.amount();

        for (person, percent) in expense.shares() {
            let share_amount = *percent / Decimal::ONE_HUNDRED * expense.amount();
            *self.balances.entry(person.clone()).or_insert(Decimal::ZERO) += share_amount;
        }
    }

    /// Shift a participant's balance by `delta`, creating the entry if absent.
    ///
    /// Used to replay settlement transfers against a sheet.
    pub fn adjust(&mut self, participant: &ParticipantId, delta: Decimal) {
        *self
            .balances
            .entry(participant.clone())
            .or_insert(Decimal::ZERO) += delta;
    }

    /// Net balance of one participant; zero if never seen.
    pub fn balance(&self, participant: &ParticipantId) -> Decimal {
        self.balances
            .get(participant)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// All balance entries, including exact zeroes.
    pub fn all_balances(&self) -> &HashMap<ParticipantId, Decimal> {
        &self.balances
    }

    /// Whether the sheet nets to exactly zero.
    ///
    /// Holds whenever every aggregated expense had shares summing to 100;
    /// an unchecked expense with a bad sum breaks it.
    pub fn is_balanced(&self) -> bool {
        self.balances.values().sum::<Decimal>() == Decimal::ZERO
    }

    /// Sum of all positive balances: the total amount that has to move
    /// for the group to settle.
    pub fn total_outstanding(&self) -> Decimal {
        self.balances
            .values()
            .filter(|v| **v > Decimal::ZERO)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expense(payer: &str, amount: Decimal, shares: &[(&str, Decimal)]) -> Expense {
        Expense::new(
            ParticipantId::new(payer),
            amount,
            shares
                .iter()
                .map(|(n, p)| (ParticipantId::new(*n), *p))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_expense_balances() {
        let mut sheet = BalanceSheet::new();
        sheet.apply_expense(&expense(
            "alice",
            dec!(100),
            &[("alice", dec!(50)), ("bob", dec!(50))],
        ));

        // alice paid 100, is responsible for 50: net -50
        assert_eq!(sheet.balance(&ParticipantId::new("alice")), dec!(-50));
        assert_eq!(sheet.balance(&ParticipantId::new("bob")), dec!(50));
        assert!(sheet.is_balanced());
    }

    #[test]
    fn test_uneven_split_balances() {
        let mut set = ExpenseSet::new();
        let split = &[("A", dec!(50)), ("B", dec!(30)), ("C", dec!(20))];
        set.add(expense("A", dec!(100), split));
        set.add(expense("B", dec!(50), split));

        let sheet = BalanceSheet::from_expenses(&set);
        assert_eq!(sheet.balance(&ParticipantId::new("A")), dec!(-25));
        assert_eq!(sheet.balance(&ParticipantId::new("B")), dec!(-5));
        assert_eq!(sheet.balance(&ParticipantId::new("C")), dec!(30));
        assert!(sheet.is_balanced());
        assert_eq!(sheet.total_outstanding(), dec!(30));
    }

    #[test]
    fn test_payer_outside_shares() {
        // alice fronts the money but holds no share: nets the full amount negative
        let mut sheet = BalanceSheet::new();
        sheet.apply_expense(&expense(
            "alice",
            dec!(60),
            &[("bob", dec!(50)), ("carol", dec!(50))],
        ));
        assert_eq!(sheet.balance(&ParticipantId::new("alice")), dec!(-60));
        assert_eq!(sheet.balance(&ParticipantId::new("bob")), dec!(30));
        assert_eq!(sheet.balance(&ParticipantId::new("carol")), dec!(30));
    }

    #[test]
    fn test_unseen_participant_is_zero() {
        let sheet = BalanceSheet::new();
        assert_eq!(sheet.balance(&ParticipantId::new("ghost")), Decimal::ZERO);
    }

    #[test]
    fn test_unchecked_bad_sum_unbalances_sheet() {
        let shares: HashMap<ParticipantId, Decimal> =
            [(ParticipantId::new("bob"), dec!(60))].into_iter().collect();
        let e = Expense::new_unchecked(ParticipantId::new("alice"), dec!(100), shares);

        let mut sheet = BalanceSheet::new();
        sheet.apply_expense(&e);
        // alice -100, bob +60: 40 unaccounted for
        assert!(!sheet.is_balanced());
    }
}
