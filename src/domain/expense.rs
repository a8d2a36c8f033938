use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Amount, User, UserId};

pub type ExpenseId = i64;

/// The portion of one expense attributed to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub user: User,
    pub share_amount: Amount,
}

impl Share {
    pub fn new(user: User, share_amount: Amount) -> Self {
        Self { user, share_amount }
    }
}

/// A shared cost record. Owned by the backend; the client only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Amount,
    pub paid_by: User,
    #[serde(default)]
    pub shares: Vec<Share>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn is_paid_by(&self, user_id: UserId) -> bool {
        self.paid_by.id == user_id
    }

    /// The first share entry belonging to the given user, if any.
    pub fn share_for(&self, user_id: UserId) -> Option<&Share> {
        self.shares.iter().find(|share| share.user.id == user_id)
    }

    pub fn shares_total(&self) -> Amount {
        self.shares.iter().map(|share| share.share_amount).sum()
    }

    /// Report every deviation from the backend's invariants.
    /// An empty list means the expense is well-formed.
    pub fn shape_issues(&self) -> Vec<ShapeIssue> {
        let mut issues = Vec::new();

        if self.amount <= Decimal::ZERO {
            issues.push(ShapeIssue::NonPositiveAmount(self.amount));
        }

        for share in &self.shares {
            if share.share_amount < Decimal::ZERO {
                issues.push(ShapeIssue::NegativeShare {
                    user_id: share.user.id,
                    share_amount: share.share_amount,
                });
            }
        }

        let shares_total = self.shares_total();
        if shares_total != self.amount {
            issues.push(ShapeIssue::SharesMismatch {
                amount: self.amount,
                shares_total,
            });
        }

        issues
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeIssue {
    NonPositiveAmount(Amount),
    NegativeShare { user_id: UserId, share_amount: Amount },
    SharesMismatch { amount: Amount, shares_total: Amount },
}

impl std::fmt::Display for ShapeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeIssue::NonPositiveAmount(amount) => {
                write!(f, "amount {} is not positive", amount)
            }
            ShapeIssue::NegativeShare {
                user_id,
                share_amount,
            } => write!(f, "share of user {} is negative ({})", user_id, share_amount),
            ShapeIssue::SharesMismatch {
                amount,
                shares_total,
            } => write!(
                f,
                "shares add up to {} but the expense amount is {}",
                shares_total, amount
            ),
        }
    }
}

/// Accepts RFC 3339 timestamps as well as zone-less ISO 8601 date-times,
/// which are taken to be UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid timestamp '{}'", raw))
    })
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
