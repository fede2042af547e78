use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;

use consultant_dashboard::{
    check_snapshot, load_snapshot, month_from_number, CommissionRates, DashboardConfig,
    MonthlyStats, Snapshot, StatsEngine, YearlyTotals,
};

// ============================================================================
// CLI Structure
// ============================================================================

/// Sales, collections and commission statistics for independent consultants.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// JSON config file (commission rates, data dir, user)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory with the CSV table exports
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Only aggregate this user's records
    #[arg(long, global = true)]
    user: Option<String>,

    /// Override the VSS commission rate (e.g., 0.15)
    #[arg(long, global = true)]
    sales_rate: Option<Decimal>,

    /// Override the personal VSD commission rate (e.g., 0.25)
    #[arg(long, global = true)]
    delivery_rate: Option<Decimal>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Statistics for one month
    Month {
        #[arg(long)]
        year: i32,

        /// 1-12
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },

    /// Month-by-month table for a year, with totals
    Year {
        #[arg(long)]
        year: i32,
    },

    /// Current month and current year
    Current {
        /// Reference date (format: YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Check the loaded records for data quality issues
    Check,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli.common)?;
    let snapshot = load_snapshot(&config.data_dir, config.user_id.as_deref())?;
    let engine = StatsEngine::with_rates(config.commission);

    match cli.command {
        Commands::Month { year, month } => {
            let stats = engine.stats_for_month(&snapshot, month_from_number(month)?, year);
            if cli.common.json {
                print_json(&stats)?;
            } else {
                print_month(&stats, engine.rates());
            }
        }
        Commands::Year { year } => {
            let yearly = engine.stats_for_year(&snapshot, year);
            if cli.common.json {
                print_json(&yearly)?;
            } else {
                print_year(&yearly.months, &yearly.totals, year);
            }
        }
        Commands::Current { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let current = engine.current_period(&snapshot, today);
            if cli.common.json {
                print_json(&current)?;
            } else {
                println!("📅 Reference date: {}", current.reference_date);
                print_month(&current.month, engine.rates());
                println!();
                print_totals("Year to date", &current.year);
            }
        }
        Commands::Check => run_check(&snapshot, cli.common.json)?,
    }

    Ok(())
}

/// Config file first, then CLI overrides
fn resolve_config(args: &CommonArgs) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::load_or_default(args.config.as_deref())?;

    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(user) = &args.user {
        config.user_id = Some(user.clone());
    }
    config.commission = CommissionRates::new(
        args.sales_rate.unwrap_or(config.commission.sales_rate),
        args.delivery_rate.unwrap_or(config.commission.delivery_rate),
    );
    config.validate()?;

    Ok(config)
}

// ============================================================================
// Output
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_month(stats: &MonthlyStats, rates: &CommissionRates) {
    println!("📊 {} {}", stats.label, stats.year);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  VSS (sold)           €{:>12.2}", stats.total_sales);
    println!("  GI (collected)       €{:>12.2}", stats.total_collections);
    println!("  VSD (services)       €{:>12.2}", stats.total_services);
    println!("  VSD personal         €{:>12.2}", stats.total_personal_delivery);
    println!("  NNCF (new clients)    {:>12}", stats.new_clients);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {:<20} €{:>12.2}", rates.sales_label(), stats.sales_commission);
    println!("  {:<20} €{:>12.2}", rates.delivery_label(), stats.delivery_commission);
    println!("  {:<20} €{:>12.2}", "Total commissions", stats.combined_commission);
}

fn print_totals(title: &str, totals: &YearlyTotals) {
    println!("📈 {}", title);
    println!(
        "  VSS €{:.2} | GI €{:.2} | VSD €{:.2} (personal €{:.2})",
        totals.total_sales,
        totals.total_collections,
        totals.total_services,
        totals.total_personal_delivery
    );
    println!("  Commissions €{:.2} | NNCF {}", totals.combined_commission, totals.new_clients);
}

fn print_year(months: &[MonthlyStats], totals: &YearlyTotals, year: i32) {
    println!("📊 Report {}", year);
    println!(
        "{:<10} {:>12} {:>12} {:>12} {:>12} {:>6}",
        "Month", "VSS", "GI", "VSD", "Commissions", "NNCF"
    );
    for m in months {
        println!(
            "{:<10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>6}",
            m.label, m.total_sales, m.total_collections, m.total_services, m.combined_commission, m.new_clients
        );
    }
    println!(
        "{:<10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>6}",
        "TOTAL",
        totals.total_sales,
        totals.total_collections,
        totals.total_services,
        totals.combined_commission,
        totals.new_clients
    );
}

fn run_check(snapshot: &Snapshot, json: bool) -> Result<()> {
    let report = check_snapshot(snapshot);

    if json {
        return print_json(&report);
    }

    println!("🔍 {}", report.summary());
    for issue in &report.issues {
        println!("  [{:?}] {} {}: {}", issue.severity, issue.record_id, issue.field, issue.issue);
    }
    if report.is_clean() {
        println!("✅ No issues found");
    }

    Ok(())
}
