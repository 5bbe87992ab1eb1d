//! Random expense-group generation.
//!
//! Builds random groups of participants with randomized expenses and
//! percentage splits, for benchmarks and CLI test data.

use crate::core::expense::{Expense, ExpenseSet};
use crate::core::participant::ParticipantId;
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Configuration for generating a random expense group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of participants in the group.
    pub participant_count: usize,
    /// Number of expenses to generate.
    pub expense_count: usize,
    /// Minimum expense amount.
    pub min_amount: Decimal,
    /// Maximum expense amount.
    pub max_amount: Decimal,
    /// Maximum number of share-holders per expense.
    pub max_shares: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            participant_count: 10,
            expense_count: 30,
            min_amount: Decimal::from(5),
            max_amount: Decimal::from(500),
            max_shares: 5,
        }
    }
}

/// Split 100 percentage points across `count` share-holders.
///
/// Random integer weights, scaled so the parts sum to exactly 100;
/// the rounding remainder lands on the last share-holder.
fn random_split(rng: &mut impl Rng, count: usize) -> Vec<Decimal> {
    let weights: Vec<u64> = (0..count).map(|_| rng.gen_range(1..=100)).collect();
    let total: u64 = weights.iter().sum();

    let mut parts: Vec<u64> = weights.iter().map(|w| w * 100 / total).collect();
    let assigned: u64 = parts.iter().sum();
    if let Some(last) = parts.last_mut() {
        *last += 100 - assigned;
    }
    parts.into_iter().map(Decimal::from).collect()
}

/// Generate a random expense group for testing.
///
/// Every generated expense has an integer amount and integer share
/// percentages summing to exactly 100, so the aggregated balance sheet
/// always nets to zero.
pub fn generate_random_group(config: &GroupConfig) -> ExpenseSet {
    let mut rng = rand::thread_rng();
    let mut set = ExpenseSet::new();

    let participants: Vec<ParticipantId> = (0..config.participant_count)
        .map(|i| ParticipantId::new(format!("member-{:03}", i)))
        .collect();

    let min: u64 = config.min_amount.to_string().parse().unwrap_or(5);
    let max: u64 = config.max_amount.to_string().parse().unwrap_or(500);

    for _ in 0..config.expense_count {
        let payer = participants[rng.gen_range(0..participants.len())].clone();
        let amount = Decimal::from(rng.gen_range(min..=max));

        let share_count = rng
            .gen_range(1..=config.max_shares)
            .min(participants.len());
        let mut holders: Vec<ParticipantId> = Vec::with_capacity(share_count);
        while holders.len() < share_count {
            let candidate = participants[rng.gen_range(0..participants.len())].clone();
            if !holders.contains(&candidate) {
                holders.push(candidate);
            }
        }

        let split = random_split(&mut rng, holders.len());
        let shares: HashMap<ParticipantId, Decimal> =
            holders.into_iter().zip(split).collect();

        set.add(
            Expense::new(payer, amount, shares)
                .expect("generated shares always sum to 100"),
        );
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance::BalanceSheet;

    #[test]
    fn test_random_split_sums_to_100() {
        let mut rng = rand::thread_rng();
        for count in 1..=8 {
            let split = random_split(&mut rng, count);
            assert_eq!(split.len(), count);
            assert_eq!(split.iter().sum::<Decimal>(), Decimal::ONE_HUNDRED);
        }
    }

    #[test]
    fn test_generated_group_shape() {
        let config = GroupConfig {
            participant_count: 6,
            expense_count: 20,
            ..Default::default()
        };
        let set = generate_random_group(&config);
        assert_eq!(set.len(), 20);
        assert!(set.participants().len() <= 6);
    }

    #[test]
    fn test_generated_group_balances() {
        let set = generate_random_group(&GroupConfig::default());
        let sheet = BalanceSheet::from_expenses(&set);
        assert!(sheet.is_balanced());
    }
}
