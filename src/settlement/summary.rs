use crate::core::balance::BalanceSheet;
use crate::core::participant::ParticipantId;
use crate::settlement::planner::SettlementPlan;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-participant view of a settlement plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Total each debtor pays out across all their transfers.
    pub outgoing: HashMap<ParticipantId, Decimal>,
    /// Total each creditor receives across all their transfers.
    pub incoming: HashMap<ParticipantId, Decimal>,
    /// Amount that has to move for the group to settle.
    pub total_outstanding: Decimal,
    /// Amount the plan actually moves.
    pub total_transferred: Decimal,
}

impl PlanSummary {
    /// Compute per-participant totals from a plan and the sheet it was
    /// planned over.
    ///
    /// For a balanced sheet, each participant's outgoing total equals the
    /// absolute value of their negative balance and each incoming total
    /// equals their positive balance.
    pub fn from_plan(plan: &SettlementPlan, sheet: &BalanceSheet) -> Self {
        let mut outgoing: HashMap<ParticipantId, Decimal> = HashMap::new();
        let mut incoming: HashMap<ParticipantId, Decimal> = HashMap::new();

        for s in plan.settlements() {
            *outgoing.entry(s.from.clone()).or_insert(Decimal::ZERO) += s.amount;
            *incoming.entry(s.to.clone()).or_insert(Decimal::ZERO) += s.amount;
        }

        PlanSummary {
            outgoing,
            incoming,
            total_outstanding: sheet.total_outstanding(),
            total_transferred: plan.total_transferred(),
        }
    }
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Plan Summary ===")?;
        writeln!(f, "Outstanding: {}", self.total_outstanding)?;
        writeln!(f, "Transferred: {}", self.total_transferred)?;

        let mut payers: Vec<_> = self.outgoing.iter().collect();
        payers.sort_by(|a, b| a.0.cmp(b.0));
        writeln!(f, "\nPays out:")?;
        for (participant, amount) in payers {
            writeln!(f, "  {} pays {}", participant, amount)?;
        }

        let mut receivers: Vec<_> = self.incoming.iter().collect();
        receivers.sort_by(|a, b| a.0.cmp(b.0));
        writeln!(f, "\nReceives:")?;
        for (participant, amount) in receivers {
            writeln!(f, "  {} receives {}", participant, amount)?;
        }
        Ok(())
    }
}
