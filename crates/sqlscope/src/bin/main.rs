//! sqlscope command-line interface

use clap::{Parser, Subcommand};
use sqlscope::SqlDialect;
use sqlscope::analyzer::DEFAULT_MAX_DEPTH;
use sqlscope::cli::output::{self, ColorMode, OutputFormat};
use sqlscope::cli::{analyze, codes};
use std::path::PathBuf;

/// SQL column-to-table resolution tool
#[derive(Parser)]
#[command(name = "sqlscope")]
#[command(author, version, about = "Resolve which table each WHERE-clause column belongs to", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Pretty, global = true)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze SELECT statements from files, -e or stdin
    Analyze {
        /// SQL files to analyze, one statement each
        files: Vec<PathBuf>,

        /// SQL statement to analyze (repeatable)
        #[arg(short = 'e', long = "sql")]
        sql: Vec<String>,

        /// SQL dialect of the input
        #[arg(short, long, default_value_t = SqlDialect::default())]
        dialect: SqlDialect,

        /// Deepest join or expression nesting to walk
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Also resolve scalar subqueries in the SELECT list
        #[arg(long)]
        projection_subqueries: bool,

        /// Strict mode (warnings fail the run)
        #[arg(short, long)]
        strict: bool,
    },

    /// List diagnostic and error codes
    Codes,
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(cli.color);

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Analyze {
            files,
            sql,
            dialect,
            max_depth,
            projection_subqueries,
            strict,
        } => {
            let config = analyze::AnalyzeConfig {
                files,
                sql,
                dialect,
                max_depth,
                projection_subqueries,
                strict,
                verbose: cli.verbose,
                format: cli.format,
                output_file: cli.output.clone(),
            };
            analyze::analyze(config)
        }

        Commands::Codes => codes::codes(cli.format, cli.output.as_deref()).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", output::format_error(&e));
            std::process::exit(1);
        }
    }
}
