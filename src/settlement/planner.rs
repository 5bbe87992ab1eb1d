use crate::core::balance::BalanceSheet;
use crate::core::expense::ExpenseSet;
use crate::core::participant::ParticipantId;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single pairwise transfer: `from` (debtor) pays `to` (creditor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    /// Always positive.
    pub amount: Decimal,
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} to {}", self.from, self.amount, self.to)
    }
}

/// Result of planning settlements over a balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Transfers in greedy processing order.
    settlements: Vec<Settlement>,
    /// Sum of all transfer amounts.
    total_transferred: Decimal,
    /// How many participants entered the plan owing money.
    debtor_count: usize,
    /// How many participants entered the plan being owed money.
    creditor_count: usize,
    /// Debt (negative) or credit (positive) left unmatched when one side
    /// ran out. Zero whenever the input sheet nets to zero.
    residual: Decimal,
}

impl SettlementPlan {
    /// The ordered sequence of transfers.
    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    /// Number of transfers in the plan.
    pub fn transfer_count(&self) -> usize {
        self.settlements.len()
    }

    /// Sum of all transfer amounts.
    pub fn total_transferred(&self) -> Decimal {
        self.total_transferred
    }

    pub fn debtor_count(&self) -> usize {
        self.debtor_count
    }

    pub fn creditor_count(&self) -> usize {
        self.creditor_count
    }

    /// Balance left unmatched after planning; non-zero only when the
    /// input sheet did not net to zero (bad share sums upstream).
    pub fn residual(&self) -> Decimal {
        self.residual
    }

    /// Whether the plan fully clears the sheet it was computed from.
    pub fn is_exhaustive(&self) -> bool {
        self.residual == Decimal::ZERO
    }

    /// Replay every transfer against a sheet: each `from` participant's
    /// balance rises by the amount paid, each `to` falls by the amount
    /// received. Applying a plan to the sheet it was computed from brings
    /// every matched balance to exactly zero.
    pub fn apply_to(&self, sheet: &mut BalanceSheet) {
        for s in &self.settlements {
            sheet.adjust(&s.from, s.amount);
            sheet.adjust(&s.to, -s.amount);
        }
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Plan ===")?;
        writeln!(f, "Transfers:     {}", self.transfer_count())?;
        writeln!(f, "Total moved:   {}", self.total_transferred)?;
        writeln!(f, "Debtors:       {}", self.debtor_count)?;
        writeln!(f, "Creditors:     {}", self.creditor_count)?;
        if !self.is_exhaustive() {
            writeln!(f, "Residual:      {}", self.residual)?;
        }
        for s in &self.settlements {
            writeln!(f, "  {}", s)?;
        }
        Ok(())
    }
}

/// The settlement planner.
///
/// Matches the largest debtor against the largest creditor until one side
/// is exhausted, emitting one transfer per match.
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// The full pipeline: aggregate expenses into balances, then plan.
    pub fn settle(expenses: &ExpenseSet) -> SettlementPlan {
        let sheet = BalanceSheet::from_expenses(expenses);
        Self::plan(&sheet)
    }

    /// Plan settlements for an already-aggregated balance sheet.
    ///
    /// # Algorithm
    ///
    /// 1. Partition participants into debtors (balance < 0) and creditors
    ///    (balance > 0); exact zeroes need no transfer.
    /// 2. Sort debtors most-negative-first and creditors largest-first.
    ///    Equal balances fall back to participant-id order so the plan is
    ///    deterministic across runs.
    /// 3. Match front against front: transfer `min(-debt, credit)`, shrink
    ///    the side with remainder, drop the exhausted side (both on an
    ///    exact match).
    ///
    /// Every iteration fully exhausts at least one participant, so the
    /// loop runs at most `debtors + creditors - 1` times. The planner is
    /// total: an unbalanced sheet leaves one side with a remainder, which
    /// is reported as [`SettlementPlan::residual`] rather than an error.
    pub fn plan(sheet: &BalanceSheet) -> SettlementPlan {
        let mut debtors: Vec<(ParticipantId, Decimal)> = Vec::new();
        let mut creditors: Vec<(ParticipantId, Decimal)> = Vec::new();

        for (participant, &balance) in sheet.all_balances() {
            if balance < Decimal::ZERO {
                debtors.push((participant.clone(), balance));
            } else if balance > Decimal::ZERO {
                creditors.push((participant.clone(), balance));
            }
        }

        debtors.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        creditors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let debtor_count = debtors.len();
        let creditor_count = creditors.len();
        debug!(
            "planning settlements: {} debtors, {} creditors",
            debtor_count, creditor_count
        );

        let mut settlements = Vec::new();
        let mut total_transferred = Decimal::ZERO;

        // Consumed from the front. A partially settled party keeps its
        // slot with the reduced remainder rather than being re-sorted.
        let mut d = 0;
        let mut c = 0;
        while d < debtors.len() && c < creditors.len() {
            let debt = debtors[d].1;
            let credit = creditors[c].1;
            let settle_amount = (-debt).min(credit);

            debug!(
                "{} -> {}: {}",
                debtors[d].0, creditors[c].0, settle_amount
            );
            settlements.push(Settlement {
                from: debtors[d].0.clone(),
                to: creditors[c].0.clone(),
                amount: settle_amount,
            });
            total_transferred += settle_amount;

            if -debt > credit {
                debtors[d].1 = debt + settle_amount;
                c += 1;
            } else if -debt < credit {
                creditors[c].1 = credit - settle_amount;
                d += 1;
            } else {
                d += 1;
                c += 1;
            }
        }

        // One side may run dry first when the sheet does not net to zero.
        let residual = if d < debtors.len() {
            debtors[d..].iter().map(|(_, b)| *b).sum()
        } else {
            creditors[c..].iter().map(|(_, b)| *b).sum()
        };

        SettlementPlan {
            settlements,
            total_transferred,
            debtor_count,
            creditor_count,
            residual,
        }
    }
}
