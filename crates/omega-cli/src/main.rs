//! omega-db CLI
//!
//! Builds statements from command-line arguments and runs them against a
//! SQLite database.

mod filter;

use anyhow::Context;
use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use omega_db::{Connection, DbConfig, Execute, ExecuteStatement};
use omega_sql_core::builder::Connector;
use omega_sql_core::{Direction, DropTable, Query, TableStatement};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::filter::{Filter, row_to_json};

/// Run SQL statements built with omega-sql-core.
#[derive(Parser)]
#[command(name = "omega-db")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = omega_db::DEFAULT_DATABASE_URL)]
    database: String,

    /// Maximum number of pooled connections.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = omega_db::DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Print SQL without executing.
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select rows and print them as JSON.
    Select(SelectArgs),

    /// Drop a table.
    DropTable {
        /// Schema the table lives in, e.g. "main" for SQLite.
        #[arg(long = "database")]
        schema: String,

        /// Table to drop.
        #[arg(short, long)]
        table: String,

        /// Add IF EXISTS.
        #[arg(long)]
        if_exists: bool,
    },

    /// Execute a raw SQL statement.
    Raw {
        /// The statement to run.
        sql: String,
    },
}

#[derive(Args)]
struct SelectArgs {
    /// Table to read from.
    #[arg(short, long)]
    table: String,

    /// Column to select (repeatable, all columns if not specified).
    #[arg(short, long = "column")]
    columns: Vec<String>,

    /// Filter ANDed with the one before it, e.g. "age >= 21".
    #[arg(short, long = "where")]
    filters: Vec<String>,

    /// Filter ORed with the one before it.
    #[arg(long = "or-where")]
    or_filters: Vec<String>,

    /// Column to order by.
    #[arg(long)]
    order_by: Option<String>,

    /// Order descending.
    #[arg(long)]
    desc: bool,

    /// Maximum number of rows.
    #[arg(short, long)]
    limit: Option<u64>,

    /// Rows to skip (needs --limit).
    #[arg(long)]
    offset: Option<u64>,
}

impl SelectArgs {
    /// Builds the statement. `matches` are the `select` subcommand matches,
    /// used to interleave `--where` and `--or-where` in command-line order.
    fn into_statement(self, matches: &ArgMatches) -> anyhow::Result<TableStatement> {
        let columns: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let mut statement = Query::table(self.table.as_str()).select(&columns);

        for (connector, raw) in ordered_filters(matches, self.filters, self.or_filters) {
            statement = Filter::parse(&raw)?.apply(statement, connector);
        }
        if let Some(column) = self.order_by {
            let direction = if self.desc {
                Direction::Desc
            } else {
                Direction::Asc
            };
            statement = statement.order_by(&column, direction);
        }
        if let Some(limit) = self.limit {
            statement = statement.limit(limit);
        }
        if let Some(offset) = self.offset {
            statement = statement.offset(offset);
        }
        Ok(statement)
    }
}

/// Merges both filter lists by their position on the command line.
fn ordered_filters(
    matches: &ArgMatches,
    filters: Vec<String>,
    or_filters: Vec<String>,
) -> Vec<(Connector, String)> {
    let tagged = |id: &str, connector: Connector, values: Vec<String>| {
        matches
            .indices_of(id)
            .into_iter()
            .flatten()
            .zip(values)
            .map(move |(index, raw)| (index, connector, raw))
            .collect::<Vec<_>>()
    };

    let mut merged = tagged("filters", Connector::And, filters);
    merged.extend(tagged("or_filters", Connector::Or, or_filters));
    merged.sort_by_key(|(index, _, _)| *index);
    merged
        .into_iter()
        .map(|(_, connector, raw)| (connector, raw))
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = DbConfig::new(cli.database).max_connections(cli.max_connections);

    match cli.command {
        Commands::Select(args) => {
            let select_matches = matches
                .subcommand_matches("select")
                .context("missing select arguments")?;
            let statement = args.into_statement(select_matches)?;

            if cli.dry_run {
                println!("{}", statement.to_sql());
                return Ok(());
            }

            let conn = config.connect().await?;
            let rows = statement.get(&conn).await?;
            info!("Fetched {} row(s)", rows.len());

            let json: Vec<_> = rows.iter().map(row_to_json).collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }

        Commands::DropTable {
            schema,
            table,
            if_exists,
        } => {
            let mut drop = DropTable::new(schema, table);
            if if_exists {
                drop.if_exists(true);
            }

            if cli.dry_run {
                println!("{}", drop.to_sql());
                return Ok(());
            }

            let conn = config.connect().await?;
            drop.execute(&conn).await?;
            info!("Table dropped.");
        }

        Commands::Raw { sql } => {
            if cli.dry_run {
                println!("{sql}");
                return Ok(());
            }

            let conn = config.connect().await?;
            let outcome = Connection::execute(&conn, &sql, Vec::new()).await?;
            println!("{} row(s) affected", outcome.rows_affected);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_sql(args: &[&str]) -> String {
        let argv = ["omega-db", "--dry-run", "select"].iter().chain(args).copied();
        let matches = Cli::command().try_get_matches_from(argv).unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();
        let Commands::Select(select) = cli.command else {
            panic!("expected the select command");
        };
        select
            .into_statement(matches.subcommand_matches("select").unwrap())
            .unwrap()
            .to_sql()
    }

    #[test]
    fn test_filters_keep_command_line_order() {
        let sql = select_sql(&[
            "-t", "t", "--where", "a = 1", "--or-where", "b = 2", "--where", "c = 3",
        ]);
        assert_eq!(sql, "SELECT * FROM t WHERE a = 1 OR b = 2 AND c = 3");
    }

    #[test]
    fn test_leading_or_filter() {
        let sql = select_sql(&["-t", "t", "--or-where", "a = 1", "--where", "b = 2"]);
        assert_eq!(sql, "SELECT * FROM t WHERE a = 1 AND b = 2");
    }

    #[test]
    fn test_full_select() {
        let sql = select_sql(&[
            "-t", "users", "-c", "id", "-c", "name", "-w", "age >= 21", "--order-by", "name",
            "--desc", "-l", "10", "--offset", "20",
        ]);
        assert_eq!(
            sql,
            "SELECT id, name FROM users WHERE age >= 21 ORDER BY name DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_bad_filter_is_an_error() {
        let matches = Cli::command()
            .try_get_matches_from(["omega-db", "select", "-t", "t", "--where", "this foo"])
            .unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();
        let Commands::Select(select) = cli.command else {
            panic!("expected the select command");
        };
        assert!(select
            .into_statement(matches.subcommand_matches("select").unwrap())
            .is_err());
    }
}
