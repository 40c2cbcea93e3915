//! astql CLI - SQL-like queries over TypeScript codebases.
//!
//! Usage:
//!   astql query "SELECT * FROM InterfaceDeclaration"   # run a query
//!   astql query -r ./src -p '**/*.ts' -l 20 "..."      # scoped query
//!   astql validate "SELECT * FROM ClassDeclaration"    # check syntax only
//!   astql stats                                        # program counts

use std::path::PathBuf;

use anyhow::Result;
use astql::{ExecuteOptions, Program, Validation};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "astql")]
#[command(about = "SQL-like queries over parsed TypeScript programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and execute a query against a project directory
    Query {
        /// The query string, e.g. "SELECT * FROM ClassDeclaration WHERE name LIKE '%Service'"
        query: String,

        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Restrict to files matching these globs (repeatable)
        #[arg(short, long = "pattern")]
        patterns: Vec<String>,

        /// Truncate the match list to this many results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Emit JSON instead of plain lines
        #[arg(long)]
        json: bool,
    },

    /// Check a query's syntax without executing it
    Validate {
        /// The query string
        query: String,
    },

    /// Show program statistics for a project directory
    Stats {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

/// One matched node, projected for output.
#[derive(Serialize)]
struct MatchRow {
    name: Option<String>,
    kind: String,
    path: String,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    references: Option<Vec<ReferenceRow>>,
}

#[derive(Serialize)]
struct ReferenceRow {
    path: String,
    line: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Query {
            query,
            root,
            patterns,
            limit,
            json,
        } => {
            let descriptor = astql::parse(&query)?;
            let program = Program::open(&root)?;
            let options = ExecuteOptions {
                file_patterns: patterns,
                max_results: limit,
            };
            let result = astql::execute(&program, &descriptor, &options)?;

            let rows: Vec<MatchRow> = result
                .matches
                .iter()
                .map(|&handle| {
                    let record = program.record(handle);
                    let references = result.references.as_ref().map(|map| {
                        map.get(&handle)
                            .map(|occurrences| {
                                occurrences
                                    .iter()
                                    .map(|&occ| ReferenceRow {
                                        path: program.file(occ.file).path_str(),
                                        line: program.record(occ).line,
                                    })
                                    .collect()
                            })
                            .unwrap_or_default()
                    });
                    MatchRow {
                        name: record.name.clone(),
                        kind: record.kind.clone(),
                        path: program.file(handle.file).path_str(),
                        line: record.line,
                        references,
                    }
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    let name = row.name.as_deref().unwrap_or("<unnamed>");
                    println!("{}  {}  {}:{}", name, row.kind, row.path, row.line);
                    if let Some(references) = &row.references {
                        for reference in references {
                            println!("    ref {}:{}", reference.path, reference.line);
                        }
                    }
                }
                eprintln!("{} match(es)", rows.len());
            }
        }

        Commands::Validate { query } => {
            let validation: Validation = astql::validate(&query);
            println!("{}", serde_json::to_string(&validation)?);
            if !validation.valid {
                std::process::exit(1);
            }
        }

        Commands::Stats { root } => {
            let program = Program::open(&root)?;
            println!("{}", program.stats());
        }
    }
    Ok(())
}
