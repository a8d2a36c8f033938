use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Amount, Expense, ExpenseId, UserId};

/// Totals shown at the top of the dashboard for one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Sum of the amounts of every expense the viewer paid
    pub total_paid: Amount,
    /// What the viewer owes to other payers
    pub you_owe: Amount,
    /// What other participants owe the viewer on expenses the viewer paid
    pub you_are_owed: Amount,
}

/// Aggregate the viewer's balance over a snapshot of expenses.
///
/// Shares and amounts are treated as independent facts: nothing here assumes
/// the shares of an expense add up to its amount. An expense without a share
/// entry for the viewer only counts towards `total_paid` (when the viewer paid
/// it) and contributes nothing else.
///
/// Totals saturate at the bounds of `Decimal` instead of overflowing.
pub fn compute_summary(viewer: UserId, expenses: &[Expense]) -> BalanceSummary {
    expenses
        .iter()
        .fold(BalanceSummary::default(), |mut summary, expense| {
            let viewer_share = expense.share_for(viewer).map(|share| share.share_amount);

            if expense.is_paid_by(viewer) {
                summary.total_paid = summary.total_paid.saturating_add(expense.amount);
                if let Some(share) = viewer_share {
                    let owed_to_viewer = expense.amount.saturating_sub(share);
                    summary.you_are_owed = summary.you_are_owed.saturating_add(owed_to_viewer);
                }
            } else if let Some(share) = viewer_share {
                summary.you_owe = summary.you_owe.saturating_add(share);
            }

            summary
        })
}

/// How the viewer takes part in a single expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Involvement {
    /// The viewer paid and holds this share of the cost
    YourShare(Amount),
    /// Someone else paid and the viewer owes this share
    YouOwe(Amount),
    NotInvolved,
}

/// One row of the dashboard's expense list, seen from the viewer's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Amount,
    pub paid_by_viewer: bool,
    pub payer_name: String,
    pub created_at: DateTime<Utc>,
    pub involvement: Involvement,
}

impl ExpenseLine {
    pub fn for_viewer(viewer: UserId, expense: &Expense) -> Self {
        let paid_by_viewer = expense.is_paid_by(viewer);
        let involvement = match (expense.share_for(viewer), paid_by_viewer) {
            (Some(share), true) => Involvement::YourShare(share.share_amount),
            (Some(share), false) => Involvement::YouOwe(share.share_amount),
            (None, _) => Involvement::NotInvolved,
        };

        Self {
            id: expense.id,
            description: expense.description.clone(),
            amount: expense.amount,
            paid_by_viewer,
            payer_name: expense.paid_by.full_name.clone(),
            created_at: expense.created_at,
            involvement,
        }
    }

    /// "You" when the viewer paid, otherwise the payer's full name.
    pub fn payer_label(&self) -> &str {
        if self.paid_by_viewer {
            "You"
        } else {
            &self.payer_name
        }
    }

    pub fn viewer_share(&self) -> Amount {
        match self.involvement {
            Involvement::YourShare(amount) | Involvement::YouOwe(amount) => amount,
            Involvement::NotInvolved => Decimal::ZERO,
        }
    }
}
