use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flowmend", about = "Compile, repair and check Mermaid flow-graph text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean the input, validate it, and report any violations
    Check {
        /// Input file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Print the cleaned text and verdict as JSON
        #[arg(long)]
        json: bool,

        /// Exit non-zero when the text is invalid (default is advisory)
        #[arg(long)]
        strict: bool,
    },
    /// Print the cleaned input text
    Clean {
        /// Input file (reads from stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Compile a JSON graph description to Mermaid source
    Compile {
        /// Input file (reads from stdin if not provided)
        file: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { file, json, strict } => {
            let input = read_input(file.as_deref());
            let (cleaned, verdict) = flowmend::clean_then_validate(&input);
            if json {
                let report = serde_json::json!({ "text": cleaned, "verdict": verdict });
                println!("{report}");
            } else {
                println!("{cleaned}");
                for violation in &verdict.violations {
                    eprintln!("WARNING: {violation}");
                }
            }
            if strict && !verdict.is_valid {
                std::process::exit(1);
            }
        }
        Command::Clean { file } => {
            let input = read_input(file.as_deref());
            println!("{}", flowmend::clean(&input));
        }
        Command::Compile { file } => {
            let input = read_input(file.as_deref());
            let graph: flowmend::StructuredGraph =
                serde_json::from_str(&input).unwrap_or_else(|e| {
                    eprintln!("ERROR: invalid graph JSON: {e}");
                    std::process::exit(1);
                });
            println!("{}", flowmend::compile(&graph));
        }
    }
}

fn read_input(file: Option<&std::path::Path>) -> String {
    match file {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    }
}
