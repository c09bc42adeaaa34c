//! oxide-dbal CLI
//!
//! Command-line tool printing MySQL DDL for JSON table definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_dbal_cli::{
    create_statements, diff_statements, drop_statement, format_statements, load_config, load_table,
};
use oxide_dbal_mysql::MySqlPlatform;

/// MySQL DDL from table definitions and their differences.
#[derive(Parser)]
#[command(name = "oxide-dbal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Platform configuration file (JSON).
    #[arg(short, long, env = "OXIDE_DBAL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Print statements as a JSON array.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print CREATE TABLE statements for a table definition.
    Create {
        /// Table definition file.
        #[arg(short, long)]
        table: PathBuf,
    },

    /// Print the ALTER statements turning one definition into another.
    Diff {
        /// Current table definition.
        #[arg(short, long)]
        from: PathBuf,

        /// Desired table definition.
        #[arg(short, long)]
        to: PathBuf,
    },

    /// Print a DROP TABLE statement.
    Drop {
        /// Table name.
        #[arg(short, long)]
        table: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(cli.config.as_deref())?;
    let platform = MySqlPlatform::with_config(config);

    let statements = match &cli.command {
        Commands::Create { table } => {
            let table = load_table(table, platform.config())?;
            create_statements(&platform, &table)?
        }
        Commands::Diff { from, to } => {
            let from = load_table(from, platform.config())?;
            let to = load_table(to, platform.config())?;
            diff_statements(&platform, &from, &to)?
        }
        Commands::Drop { table } => vec![drop_statement(&platform, table)],
    };

    info!(statements = statements.len(), "generated statements");
    let output = format_statements(&statements, cli.json)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
