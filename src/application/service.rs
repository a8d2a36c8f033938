use serde::Serialize;

use crate::api::{ApiClient, NewExpense, RegisterRequest};
use crate::domain::{
    compute_summary, currency_symbol, Amount, BalanceSummary, Currency, Expense, ExpenseLine,
    User, UserId,
};

use super::{AppError, AppResult, Session};

/// Application service providing the client's use cases.
/// This is the primary interface for any front end (CLI, TUI, etc.).
pub struct SplitService {
    client: ApiClient,
}

/// Details collected on the sign-up form
pub struct NewAccount {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub currency: Currency,
}

/// Everything the dashboard shows for the viewer
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user: User,
    pub currency_symbol: &'static str,
    pub summary: BalanceSummary,
    /// Newest first
    pub lines: Vec<ExpenseLine>,
}

impl Dashboard {
    /// Build the dashboard from an already fetched snapshot of expenses.
    pub fn build(user: User, expenses: &[Expense]) -> Self {
        let summary = compute_summary(user.id, expenses);
        let lines = expenses
            .iter()
            .map(|expense| ExpenseLine::for_viewer(user.id, expense))
            .collect();

        Self {
            currency_symbol: currency_symbol(&user.default_currency),
            user,
            summary,
            lines,
        }
    }
}

impl SplitService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // ========================
    // Account operations
    // ========================

    /// Create an account and start a session for it.
    pub async fn register(&self, account: NewAccount) -> AppResult<Session> {
        let request = RegisterRequest {
            full_name: account.full_name,
            email: account.email,
            password: account.password,
            default_currency: account.currency.code().to_string(),
        };

        let user = self
            .client
            .register(&request)
            .await?
            .ok_or(AppError::EmptyResponse("account"))?;

        tracing::info!(user_id = user.id, "account created");
        Ok(Session::new(user))
    }

    /// Sign in and start a session.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let user = self
            .client
            .login(email, password)
            .await?
            .ok_or(AppError::EmptyResponse("user"))?;

        tracing::info!(user_id = user.id, "logged in");
        Ok(Session::new(user))
    }

    // ========================
    // Expense operations
    // ========================

    /// Fetch the viewer's expenses, newest first.
    pub async fn list_expenses(&self, session: &Session) -> AppResult<Vec<Expense>> {
        let mut expenses = self
            .client
            .list_expenses(session.user_id())
            .await?
            .unwrap_or_default();

        for expense in &expenses {
            for issue in expense.shape_issues() {
                tracing::warn!(expense_id = expense.id, "{}", issue);
            }
        }

        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Record an expense paid by the viewer and split with the given users.
    pub async fn add_expense(
        &self,
        session: &Session,
        description: String,
        amount: Amount,
        shared_with_ids: Vec<UserId>,
    ) -> AppResult<Option<Expense>> {
        let request = NewExpense {
            description,
            amount,
            paid_by_id: session.user_id(),
            shared_with_ids,
        };

        let created = self.client.create_expense(&request).await?;
        if let Some(expense) = &created {
            tracing::info!(expense_id = expense.id, "expense recorded");
        }
        Ok(created)
    }

    /// Refresh the expense list and aggregate the viewer's balance.
    pub async fn dashboard(&self, session: &Session) -> AppResult<Dashboard> {
        let expenses = self.list_expenses(session).await?;
        Ok(Dashboard::build(session.user.clone(), &expenses))
    }
}

/// Stable sort on creation time, most recent first.
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
