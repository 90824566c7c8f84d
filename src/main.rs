//! db-relay - a lightweight connection registry and query layer for
//! MySQL-compatible databases.

use anyhow::Context;
use db_relay::cli::{Cli, OutputFormat};
use db_relay::config::{Config, ConnectionConfig};
use db_relay::connection::ConnectionRegistry;
use db_relay::error::RelayError;
use db_relay::output;
use db_relay::query::QueryExecutor;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Pick up MYSQL_* defaults from a local .env, if present
    let _ = dotenvy::dotenv();

    db_relay::logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();
    let format = cli
        .parse_output_format()
        .map_err(|e| RelayError::config(e))?;

    // Load configuration file
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    // Build connection config with precedence:
    // 1. CLI arguments (highest)
    // 2. Named connection from config
    // 3. Default connection from config
    // 4. Environment variables
    let connection = resolve_connection(&cli, &config)?
        .ok_or_else(|| RelayError::config("No database connection configured"))?;

    let name = cli.connection_name().unwrap_or("default");
    let dsn = connection.to_connection_string()?;

    let registry = ConnectionRegistry::new();
    registry
        .connect(name, &cli.driver, &dsn)
        .await
        .with_context(|| format!("Failed to connect to {}", connection.display_string()))?;
    info!("Connected: {}", connection.display_string());

    if cli.list_databases {
        for database in registry.list_databases(name).await? {
            println!("{database}");
        }
    }

    if let Some(database) = &cli.list_tables {
        let tables = registry.list_tables(name, database).await?;
        print_result(&tables, format)?;
    }

    if let Some(sql) = &cli.execute {
        let executor = QueryExecutor::new(&registry);
        let result = executor.execute(name, sql).await?;
        print_result(&result, format)?;
    }

    if !cli.has_operation() {
        println!("Connected to {} (no operation given)", connection.display_string());
        println!("Use --execute, --list-databases, or --list-tables. See --help.");
    }

    registry.close_all().await;
    Ok(())
}

/// Resolves the final connection configuration from CLI args, config file, and environment.
fn resolve_connection(cli: &Cli, config: &Config) -> anyhow::Result<Option<ConnectionConfig>> {
    // Start with CLI connection config if provided
    let mut connection = cli.to_connection_config()?;

    // If no CLI connection, try named connection from config
    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(RelayError::config(format!(
                    "Connection '{}' not found in config file",
                    name
                ))
                .into());
            }
        }
    }

    // If still no connection, try default from config
    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    // Apply environment variable defaults
    if let Some(ref mut conn) = connection {
        conn.apply_env_defaults();
    }

    Ok(connection)
}

fn print_result(result: &db_relay::db::QueryResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print!("{}", output::render_table(result)),
        OutputFormat::Json => println!("{}", output::render_json(result)?),
    }
    Ok(())
}
