//! fedsql - federated SQL demo.

use std::io::{self, Write};

use fedsql_demo::cli::{Cli, Command, PostgresArgs, QueryArgs, SqliteArgs};
use fedsql_demo::config::Config;
use fedsql_demo::db::{DatabaseClient, PostgresClient, PrestoClient};
use fedsql_demo::demo::{check_sqlite, federated_queries, run_queries};
use fedsql_demo::error::Result;
use fedsql_demo::logging::init_stderr_logging;
use fedsql_demo::seed::{seed_postgres, seed_sqlite};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::SeedSqlite(args) => run_seed_sqlite(args, &config, &mut out).await,
        Command::SeedPostgres(args) => run_seed_postgres(args, &config, &mut out).await,
        Command::Query(args) => run_query(args, &config, &mut out).await,
        Command::CheckSqlite(args) => {
            let sqlite = args.resolve(&config.sqlite);
            check_sqlite(&sqlite, &mut out).await
        }
    }
}

async fn run_seed_sqlite<W: Write>(args: &SqliteArgs, config: &Config, out: &mut W) -> Result<()> {
    let sqlite = args.resolve(&config.sqlite);
    let summary = seed_sqlite(&sqlite).await?;

    writeln!(out, "Created {}", summary.target)?;
    for line in summary.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

async fn run_seed_postgres<W: Write>(
    args: &PostgresArgs,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let postgres = args.resolve(&config.postgres)?;

    writeln!(out, "Connecting to PostgreSQL...")?;
    out.flush()?;
    let client = PostgresClient::connect(&postgres).await?;

    let summary = seed_postgres(&client, &postgres.display_string()).await;
    client.close().await?;
    let summary = summary?;

    writeln!(out, "PostgreSQL demo database seeded successfully.")?;
    for line in summary.lines() {
        if line.contains("customer_orders") {
            writeln!(out, "{line}  (product_id links to SQLite products)")?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

async fn run_query<W: Write>(args: &QueryArgs, config: &Config, out: &mut W) -> Result<()> {
    let presto = args.resolve(&config.presto);

    let sqlite = SqliteArgs {
        path: args.path.clone(),
    }
    .resolve(&config.sqlite);
    if !sqlite.path.exists() {
        warn!(
            "SQLite file {} not found; the {} catalog may be empty",
            sqlite.path.display(),
            presto.sqlite_catalog
        );
    }

    let engine = presto.display_string();
    info!("Querying engine at {}", engine);

    let queries = federated_queries(&presto);
    let client = PrestoClient::new(presto)?;
    run_queries(&client, &queries, &engine, out).await?;
    Ok(())
}
