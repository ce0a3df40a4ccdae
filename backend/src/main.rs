//! Spesafix CLI - validate and correct expense record files
//!
//! ```bash
//! spesafix check spese.xlsx -o spese.csv    # Validate, write corrected text
//! spesafix convert spese.xlsx               # Spreadsheet to ';'-delimited text
//! spesafix columns                          # Show the column schema
//! spesafix serve                            # Start HTTP server (port 3000)
//! ```

use clap::{Parser, Subcommand};
use spesafix::{
    config::parse_separator, load_file, print_errors, save, validate_file, Column, Config, RuleSet,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "spesafix")]
#[command(about = "Validate and normalize healthcare expense records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a file and write the corrected table
    Check {
        /// Input file (xlsx, xls, ods, csv, txt)
        input: PathBuf,

        /// Preferred input separator (auto-detected when it does not fit)
        #[arg(short, long, value_parser = separator_arg)]
        separator: Option<char>,

        /// Separator for the corrected output (default: detected one)
        #[arg(long, value_parser = separator_arg)]
        output_separator: Option<char>,

        /// Output file for the corrected table (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write log entries as JSON to this file
        #[arg(long)]
        logs: Option<PathBuf>,

        /// Expected number of columns
        #[arg(long)]
        columns: Option<usize>,
    },

    /// Convert a spreadsheet or text file to ';'-delimited text
    Convert {
        /// Input file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the column schema and the rule bound to each column
    Columns,

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn separator_arg(value: &str) -> Result<char, String> {
    parse_separator(value).ok_or_else(|| format!("expected a single character or 'tab', got {:?}", value))
}

#[tokio::main]
async fn main() {
    let mut config = Config::from_env();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            input,
            separator,
            output_separator,
            output,
            logs,
            columns,
        } => {
            if let Some(s) = separator {
                config.separator = s;
            }
            if output_separator.is_some() {
                config.output_separator = output_separator;
            }
            if let Some(c) = columns {
                config.expected_columns = c;
            }
            cmd_check(&input, &config, output.as_deref(), logs.as_deref())
        }

        Commands::Convert { input, output } => cmd_convert(&input, output.as_deref()),

        Commands::Columns => cmd_columns(&config),

        Commands::Serve { port } => {
            if let Some(p) = port {
                config.port = p;
            }
            spesafix::server::start_server(config)
                .await
                .map(|()| true)
                .map_err(Into::into)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(2);
        }
    }
}

type CmdResult = Result<bool, Box<dyn std::error::Error>>;

/// Returns `Ok(false)` when the file has validation errors.
fn cmd_check(input: &Path, config: &Config, output: Option<&Path>, logs: Option<&Path>) -> CmdResult {
    eprintln!("📄 Checking: {}", input.display());

    let report = validate_file(input, config)?;

    print_errors(&report.failures);
    eprintln!("{}", report.summary());

    if let Some(path) = logs {
        fs::write(path, serde_json::to_string_pretty(&report.logs)?)?;
        eprintln!("💾 Logs written to: {}", path.display());
    }

    match output {
        Some(path) => {
            save(&report.output, path)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => print!("{}", report.output),
    }

    Ok(report.is_valid())
}

fn cmd_convert(input: &Path, output: Option<&Path>) -> CmdResult {
    let loaded = load_file(input)?;

    match output {
        Some(path) => {
            save(&loaded.text, path)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => print!("{}", loaded.text),
    }

    Ok(true)
}

fn cmd_columns(config: &Config) -> CmdResult {
    let rules = RuleSet::from_config(config);
    println!("Expected columns: {}", rules.expected_columns());
    for column in Column::ALL {
        let rule = column.rule().map_or("-", |r| r.name());
        println!("  [{:2}] {:<24} {}", column.index(), column.name(), rule);
    }
    Ok(true)
}
