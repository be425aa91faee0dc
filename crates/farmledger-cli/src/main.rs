//! farmledger - command line front end for the farm ledger core.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use farmledger_client::{HttpLedgerStore, Session};
use farmledger_core::{total_in_range, LedgerSnapshot, LedgerStore};
use farmledger_domain::{
    EntryFilter, ExpenseCategory, ExpenseDraft, SaleDraft,
};
use farmledger_config::{Config, ConfigManager};

#[derive(Parser)]
#[command(name = "farmledger", version, about = "Dairy farm ledger toolkit")]
struct Cli {
    /// API base URL; overrides the configured value.
    #[arg(long)]
    api_url: Option<String>,

    /// Bearer token for the backend session.
    #[arg(long, env = "FARMLEDGER_TOKEN", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Production/sales balance and revenue figures.
    Summary {
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Per-day sales revenue series for charting.
    Chart,
    /// Remaining sellable milk for a date.
    Availability {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Record a milk sale (gated by same-day availability).
    Sell {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        price: f64,
    },
    /// List expenses, optionally narrowed by category and date range.
    Expenses {
        #[arg(long)]
        category: Option<ExpenseCategory>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Record a farm expense.
    AddExpense {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        category: ExpenseCategory,
        /// Worker id; required for WAGES.
        #[arg(long)]
        worker: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = ConfigManager::with_default_location()
        .and_then(|manager| manager.load())
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load config, using defaults");
            Config::default()
        });
    let base_url = cli.api_url.unwrap_or(config.api_base_url);
    let session = Session::new(base_url, cli.token);
    let store = match config.request_timeout_secs {
        Some(secs) => {
            HttpLedgerStore::with_timeout(session, std::time::Duration::from_secs(secs))
        }
        None => HttpLedgerStore::new(session),
    }
    .context("failed to build HTTP client")?;
    let currency = config.currency;

    match cli.command {
        Command::Summary { start, end } => summary(&store, &currency, start, end).await,
        Command::Chart => chart(&store, &currency).await,
        Command::Availability { date } => availability(&store, date).await,
        Command::Sell {
            date,
            quantity,
            price,
        } => sell(&store, &currency, date, quantity, price).await,
        Command::Expenses {
            category,
            start,
            end,
        } => expenses(&store, &currency, category, start, end).await,
        Command::AddExpense {
            date,
            amount,
            category,
            worker,
        } => add_expense(&store, &currency, date, amount, category, worker).await,
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("farmledger=info"));
    fmt().with_env_filter(filter).init();
}

fn range_filter(start: Option<NaiveDate>, end: Option<NaiveDate>) -> EntryFilter {
    let mut filter = EntryFilter::all();
    if let Some(start) = start {
        filter = filter.from(start);
    }
    if let Some(end) = end {
        filter = filter.until(end);
    }
    filter
}

async fn summary(
    store: &HttpLedgerStore,
    currency: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> anyhow::Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        farmledger_domain::DateWindow::new(start, end)
            .map_err(farmledger_core::CoreError::from)?;
    }
    let snapshot = LedgerSnapshot::load(store, &range_filter(start, end)).await?;
    let today = Local::now().date_naive();

    println!("Revenue today:      {currency} {:.2}", snapshot.revenue_on(today));
    println!(
        "Revenue this month: {currency} {:.2}",
        snapshot.revenue_in_month(today)
    );
    if start.is_some() || end.is_some() {
        println!(
            "Revenue in range:   {currency} {:.2}",
            snapshot.revenue_in_range(start, end)
        );
    }

    println!();
    println!("{:<12} {:>10} {:>10} {:>10}", "date", "produced", "sold", "left");
    for day in snapshot.daily_aggregates() {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2}",
            day.date, day.total_produced, day.total_consumed, day.available
        );
    }
    Ok(())
}

async fn chart(store: &HttpLedgerStore, currency: &str) -> anyhow::Result<()> {
    let snapshot = LedgerSnapshot::load(store, &EntryFilter::all()).await?;
    let series = farmledger_core::group_by_day(&snapshot.sales, |sale| {
        sale.total_amount.value()
    });
    for point in series {
        println!("{} {currency} {:.2}", point.date, point.total);
    }
    Ok(())
}

async fn availability(store: &HttpLedgerStore, date: NaiveDate) -> anyhow::Result<()> {
    let snapshot = LedgerSnapshot::load(store, &EntryFilter::all()).await?;
    let balance = snapshot.availability_on(date);
    println!(
        "{date}: produced {:.2} L, sold {:.2} L, available {:.2} L",
        balance.total_produced, balance.total_consumed, balance.available
    );
    Ok(())
}

async fn sell(
    store: &HttpLedgerStore,
    currency: &str,
    date: NaiveDate,
    quantity: f64,
    price: f64,
) -> anyhow::Result<()> {
    let snapshot = LedgerSnapshot::load(store, &EntryFilter::all()).await?;
    let sale = snapshot
        .submit_sale(store, SaleDraft::new(date, quantity, price))
        .await?;
    println!(
        "Recorded sale {}: {:.2} L on {} for {currency} {}",
        sale.id, sale.quantity, sale.date, sale.total_amount
    );
    Ok(())
}

async fn expenses(
    store: &HttpLedgerStore,
    currency: &str,
    category: Option<ExpenseCategory>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let mut filter = range_filter(start, end);
    if let Some(category) = category {
        filter = filter.in_category(category);
    }
    let entries = store.fetch_expenses(&filter).await?;

    for expense in &entries {
        println!(
            "{} {:<20} {currency} {:>10.2}",
            expense.date, expense.category, expense.amount
        );
    }
    let range_total = total_in_range(&entries, start, end, |expense| expense.amount);
    if start.is_some() && end.is_some() {
        println!("Total in range: {currency} {range_total:.2}");
    }
    Ok(())
}

async fn add_expense(
    store: &HttpLedgerStore,
    currency: &str,
    date: NaiveDate,
    amount: f64,
    category: ExpenseCategory,
    worker: Option<i64>,
) -> anyhow::Result<()> {
    let mut draft = ExpenseDraft::new(category, date, amount);
    if let Some(worker) = worker {
        draft = draft.paid_to(farmledger_domain::EntryId(worker));
    }
    if let Err(problems) = draft.validate() {
        anyhow::bail!("{}", problems.join("; "));
    }
    let expense = store.submit_expense(&draft).await?;
    println!(
        "Recorded expense {}: {} {currency} {:.2} on {}",
        expense.id, expense.category, expense.amount, expense.date
    );
    Ok(())
}
