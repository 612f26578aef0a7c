//! `clause-review` command line: serve, render, review.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clause_controls::{render_response, ReviewSession};
use clause_generate::ClauseGenerator;
use clause_review::review::{self, HELP};
use clause_review::telemetry::{self, LogFormat};
use clause_review::{server, text, AppConfig};
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

fn cli() -> Command {
    Command::new("clause-review")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Review legal clauses through generated parameter controls")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML config file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the generate and render endpoints")
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .value_parser(value_parser!(SocketAddr))
                        .help("Listen address (overrides config)"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a raw generated result as text")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Read the result from a file instead of stdin"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the rendered controls as JSON"),
                ),
        )
        .subcommand(
            Command::new("review")
                .about("Submit a clause and interact with the recommended controls")
                .arg(
                    Arg::new("clause")
                        .required(true)
                        .num_args(1..)
                        .help("Clause text"),
                )
                .arg(
                    Arg::new("interactive")
                        .long("interactive")
                        .short('i')
                        .action(ArgAction::SetTrue)
                        .help("Keep reading commands from stdin"),
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    telemetry::init(format)?;

    let config_path = matches.get_one::<PathBuf>("config").cloned();
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;

    match matches.subcommand() {
        Some(("serve", args)) => run_serve(config, args).await,
        Some(("render", args)) => run_render(args),
        Some(("review", args)) => run_review(config, args).await,
        _ => anyhow::bail!("no subcommand given; see --help"),
    }
}

async fn run_serve(config: AppConfig, args: &ArgMatches) -> anyhow::Result<()> {
    let config = match args.get_one::<SocketAddr>("bind") {
        Some(bind) => config.with_bind(*bind),
        None => config,
    };
    if !config.generate.has_api_key() {
        tracing::warn!("No API key configured; /api/generate will answer 500");
    }

    let generator = ClauseGenerator::from_config(config.generate.clone())?;
    server::serve(&config.server, Arc::new(generator))
        .await
        .with_context(|| format!("serving on {}", config.server.bind))
}

fn run_render(args: &ArgMatches) -> anyhow::Result<()> {
    let raw = match args.get_one::<PathBuf>("file") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("reading stdin")?;
            raw
        }
    };

    let outcome = render_response(&raw);
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", text::render_outcome(&outcome));
    }
    Ok(())
}

async fn run_review(config: AppConfig, args: &ArgMatches) -> anyhow::Result<()> {
    let clause = args
        .get_many::<String>("clause")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    let generator = ClauseGenerator::from_config(config.generate)?;
    let mut session = ReviewSession::new();

    review::submit(&mut session, &generator, &clause).await?;
    print!("{}", text::render_session(&session.view()));

    if !args.get_flag("interactive") {
        return Ok(());
    }

    println!("\n{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<review::Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        let show_help = command == review::Command::Help;
        match review::execute(&mut session, &generator, command).await {
            Ok(false) => break,
            Ok(true) if show_help => println!("{HELP}"),
            Ok(true) => print!("{}", text::render_session(&session.view())),
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}
