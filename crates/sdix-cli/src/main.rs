mod batch;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use sdix_core::{IntentRuleConfig, RulesFile};
use sdix_intent::{IntentEvent, IntentMatcher};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sdix-cli")]
#[command(about = "Classify supplement safety search queries")]
struct Cli {
    /// YAML rule catalog to use instead of the built-in rule
    #[arg(long, global = true, env = "SDIX_RULES_PATH")]
    rules: Option<PathBuf>,

    /// Emit match analytics events to the log (`--analytics false` to disable)
    #[arg(
        long,
        global = true,
        env = "SDIX_ANALYTICS",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    analytics: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify one query and print the result as JSON
    Match {
        /// Query words; joined with single spaces
        #[arg(required = true)]
        query: Vec<String>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Classify one query per line and print one JSON object per line
    Batch {
        /// Read queries from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the active rule as YAML
    Rules,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let matcher = sdix_intent::load_matcher(cli.rules.as_deref())
        .context("failed to load intent rules")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Match { query, pretty } => {
            run_match(&matcher, &query.join(" "), pretty, cli.analytics, &mut out)
        }
        Commands::Batch { file } => {
            let summary = match file {
                Some(path) => {
                    let reader = File::open(&path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    batch::run_batch(&matcher, BufReader::new(reader), &mut out, cli.analytics)?
                }
                None => {
                    batch::run_batch(&matcher, io::stdin().lock(), &mut out, cli.analytics)?
                }
            };
            tracing::info!(
                total = summary.total,
                matched = summary.matched,
                "batch classification finished"
            );
            Ok(())
        }
        Commands::Rules => print_rules(&matcher, &mut out),
    }
}

fn run_match<W: Write>(
    matcher: &IntentMatcher,
    query: &str,
    pretty: bool,
    analytics: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let result = matcher.classify(Some(query));
    if analytics {
        if let Some(event) = IntentEvent::from_result(&result) {
            event.emit();
        }
    }

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &result)?;
    } else {
        serde_json::to_writer(&mut *out, &result)?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_rules<W: Write>(matcher: &IntentMatcher, out: &mut W) -> anyhow::Result<()> {
    let file = RulesFile {
        intent: IntentRuleConfig::from(matcher.rule()),
    };
    out.write_all(serde_yaml::to_string(&file)?.as_bytes())?;
    Ok(())
}
