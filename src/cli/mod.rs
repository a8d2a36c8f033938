use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::api::{ApiClient, ClientConfig, DEFAULT_BASE_URL};
use crate::application::{
    AppError, Dashboard, NewAccount, Session, SessionStore, SplitService, DEFAULT_SESSION_FILE,
};
use crate::domain::{
    currency_symbol, format_amount, parse_amount, parse_shared_with, Currency, Involvement, User,
};

/// ExpenseShare - split bills with friends and family
#[derive(Parser)]
#[command(name = "expenseshare")]
#[command(about = "The simplest way to split bills with friends and family")]
#[command(version)]
pub struct Cli {
    /// Base URL of the ExpenseShare backend
    #[arg(long, env = "EXPENSESHARE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// File holding the logged-in session
    #[arg(long, env = "EXPENSESHARE_SESSION", default_value = DEFAULT_SESSION_FILE)]
    pub session: String,

    /// Request timeout in seconds
    #[arg(long, env = "EXPENSESHARE_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account and log in
    Signup {
        /// Full name shown to other users
        full_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "EXPENSESHARE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Default currency: INR (Indian Rupee), USD (US Dollar), EUR (Euro), GBP (British Pound)
        #[arg(short, long, default_value = "INR")]
        currency: String,
    },

    /// Log in to an existing account
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "EXPENSESHARE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show balances and the shared expense list
    Dashboard {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Add an expense paid by you
    Add {
        /// What the expense was for (e.g., "Dinner")
        description: String,

        /// Total amount (e.g., "50.00" or "50")
        amount: String,

        /// Comma-separated ids of the users sharing the expense
        #[arg(short, long, default_value = "")]
        shared_with: String,
    },
}

impl Cli {
    fn service(&self) -> Result<SplitService> {
        let config = ClientConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.timeout));
        let client = ApiClient::new(config).context("Failed to create HTTP client")?;
        Ok(SplitService::new(client))
    }

    pub async fn run(self) -> Result<()> {
        let store = SessionStore::new(&self.session);

        match &self.command {
            Commands::Signup {
                full_name,
                email,
                password,
                currency,
            } => {
                let currency = Currency::from_code(currency)
                    .ok_or_else(|| AppError::UnsupportedCurrency(currency.clone()))?;
                let service = self.service()?;
                let session = service
                    .register(NewAccount {
                        full_name: full_name.clone(),
                        email: email.clone(),
                        password: password.clone(),
                        currency,
                    })
                    .await?;
                store.save(&session)?;
                println!("Account created! Logged in as {}", session.user.full_name);
            }

            Commands::Login { email, password } => {
                let service = self.service()?;
                let session = service.login(email, password).await?;
                store.save(&session)?;
                println!("Logged in successfully! Welcome back, {}", session.user.full_name);
            }

            Commands::Logout => {
                store.clear()?;
                println!("Logged out.");
            }

            Commands::Whoami => {
                let session = require_session(&store)?;
                let user = &session.user;
                println!("{}", avatar_line(user));
                println!("  ID:        {}", user.id);
                println!(
                    "  Currency:  {} ({})",
                    user.default_currency,
                    currency_symbol(&user.default_currency)
                );
            }

            Commands::Dashboard { format } => {
                let session = require_session(&store)?;
                let service = self.service()?;
                let dashboard = service.dashboard(&session).await?;
                print_dashboard(&dashboard, format)?;
            }

            Commands::Add {
                description,
                amount,
                shared_with,
            } => {
                let session = require_session(&store)?;
                let amount = parse_amount(amount)
                    .map_err(AppError::from)
                    .context("Invalid amount format. Use '50.00' or '50'")?;
                let shared_with_ids = parse_shared_with(shared_with);

                let service = self.service()?;
                let created = service
                    .add_expense(&session, description.clone(), amount, shared_with_ids)
                    .await?;

                let symbol = currency_symbol(&session.user.default_currency);
                match created {
                    Some(expense) => println!(
                        "Added expense: {} {}{} ({})",
                        expense.description,
                        symbol,
                        format_amount(expense.amount),
                        expense.id
                    ),
                    None => println!(
                        "Added expense: {} {}{}",
                        description,
                        symbol,
                        format_amount(amount)
                    ),
                }
            }
        }

        Ok(())
    }
}

fn require_session(store: &SessionStore) -> Result<Session> {
    store
        .load()
        .with_context(|| format!("Failed to read session file {}", store.path().display()))?
        .ok_or_else(|| AppError::NotLoggedIn.into())
}

/// The user's initial as a small avatar next to their name, e.g. "[A] Alice".
fn avatar_line(user: &User) -> String {
    match user.initial() {
        Some(initial) => format!("[{}] {}", initial.to_uppercase(), user.full_name),
        None => format!("[?] (user {})", user.id),
    }
}

fn print_dashboard(dashboard: &Dashboard, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(dashboard)?),
        "csv" => {
            let stdout = std::io::stdout();
            write_dashboard_csv(dashboard, stdout.lock())?;
        }
        "table" => print_dashboard_table(dashboard),
        other => bail!("Unknown format '{}'. Use table, json or csv", other),
    }
    Ok(())
}

fn print_dashboard_table(dashboard: &Dashboard) {
    let symbol = dashboard.currency_symbol;
    let money = |amount| format!("{}{}", symbol, format_amount(amount));

    println!("{}", avatar_line(&dashboard.user));
    println!("Welcome, {}!", dashboard.user.full_name);
    println!();
    println!("Total You Paid: {:>15}", money(dashboard.summary.total_paid));
    println!("You Owe:        {:>15}", money(dashboard.summary.you_owe));
    println!("You Are Owed:   {:>15}", money(dashboard.summary.you_are_owed));
    println!();

    if dashboard.lines.is_empty() {
        println!("No expenses yet. Run `expenseshare add` to get started!");
        return;
    }

    println!("Your Group's Expenses");
    println!(
        "{:<12} {:<25} {:<15} {:>12}  SHARE",
        "DATE", "DESCRIPTION", "PAID BY", "AMOUNT"
    );
    println!("{}", "-".repeat(85));
    for line in &dashboard.lines {
        let share = match line.involvement {
            Involvement::YourShare(amount) => format!("Your share: {}", money(amount)),
            Involvement::YouOwe(amount) => format!("You owe: {}", money(amount)),
            Involvement::NotInvolved => String::new(),
        };
        println!(
            "{:<12} {:<25} {:<15} {:>12}  {}",
            line.created_at.format("%Y-%m-%d"),
            truncate(&line.description, 25),
            truncate(line.payer_label(), 15),
            money(line.amount),
            share
        );
    }
}

/// Write the expense lines as CSV, one row per expense.
pub fn write_dashboard_csv<W: Write>(dashboard: &Dashboard, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "id",
        "created_at",
        "description",
        "paid_by",
        "amount",
        "involvement",
        "viewer_share",
    ])?;

    let mut count = 0;
    for line in &dashboard.lines {
        let involvement = match line.involvement {
            Involvement::YourShare(_) => "your_share",
            Involvement::YouOwe(_) => "you_owe",
            Involvement::NotInvolved => "not_involved",
        };
        csv_writer.write_record([
            line.id.to_string(),
            line.created_at.to_rfc3339(),
            line.description.clone(),
            line.payer_label().to_string(),
            line.amount.to_string(),
            involvement.to_string(),
            line.viewer_share().to_string(),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
