use std::{error::Error, io::Write};

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use engine::{DEFAULT_REPORT_LIMIT, Engine, Period};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "kopilka_admin")]
#[command(about = "Read-only reports over the Kopilka database")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./expenses.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Latest transactions of a period with totals, as JSON.
    Report(ReportArgs),
    /// Totals and top expense categories of a period, as JSON.
    Stats(QueryArgs),
    /// Every transaction of the user, as CSV.
    Export(UserArgs),
}

#[derive(Args, Debug)]
struct UserArgs {
    /// Telegram user id.
    #[arg(long)]
    user_id: i64,
}

#[derive(Args, Debug)]
struct QueryArgs {
    #[command(flatten)]
    user: UserArgs,
    #[arg(long, default_value_t = Period::Month)]
    period: Period,
    /// IANA time zone used for day and month boundaries.
    #[arg(long, default_value = "UTC", value_parser = parse_timezone)]
    timezone: Tz,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    query: QueryArgs,
    #[arg(long, default_value_t = DEFAULT_REPORT_LIMIT)]
    limit: usize,
}

fn parse_timezone(raw: &str) -> Result<Tz, String> {
    raw.parse::<Tz>()
        .map_err(|_| format!("unknown time zone: {raw}"))
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn engine_for(
    db: DatabaseConnection,
    timezone: Tz,
) -> Result<Engine, Box<dyn Error + Send + Sync>> {
    Ok(Engine::builder()
        .database(db)
        .timezone(timezone)
        .build()
        .await?)
}

async fn execute<W: Write>(
    db: DatabaseConnection,
    command: Command,
    mut out: W,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        Command::Report(ReportArgs { query, limit }) => {
            let engine = engine_for(db, query.timezone).await?;
            let report = engine
                .report(query.user.user_id, query.period, limit)
                .await?;
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        Command::Stats(query) => {
            let engine = engine_for(db, query.timezone).await?;
            let stats = engine
                .statistics(query.user.user_id, query.period)
                .await?;
            serde_json::to_writer_pretty(&mut out, &stats)?;
            writeln!(out)?;
        }
        Command::Export(UserArgs { user_id }) => {
            let engine = engine_for(db, Tz::UTC).await?;
            let transactions = engine.transactions(user_id, Period::All).await?;
            engine::write_csv(&transactions, &mut out)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let result = execute(db.clone(), cli.command, std::io::stdout().lock()).await;
    db.close().await?;
    result
}
