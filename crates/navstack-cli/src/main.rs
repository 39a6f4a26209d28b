//! `navstack`: decode, encode and replay console workflow URLs

mod ops;
mod telemetry;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use navstack_entity::EntityCatalog;
use navstack_state::{Navigator, WorkflowState};
use navstack_url::{CodecConfig, WorkflowCodec};
use tracing::{debug, info};

use crate::ops::NavOp;

fn cli() -> Command {
    Command::new("navstack")
        .version(navstack_url::VERSION)
        .about("Console workflow URL codec")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Entity catalog YAML file (defaults to the built-in catalog)"),
        )
        .arg(
            Arg::new("base-path")
                .long("base-path")
                .global(true)
                .help("Path prefix of every workflow URL [default: /main]"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode a URL into workflow state JSON")
                .arg(Arg::new("url").required(true).help("Path, path?query or absolute URL"))
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue)
                        .help("Print JSON on one line"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Fail instead of printing the not-found state"),
                ),
        )
        .subcommand(
            Command::new("encode")
                .about("Encode workflow state JSON into a URL")
                .arg(
                    Arg::new("state")
                        .required(true)
                        .help("State JSON, or '-' to read stdin"),
                ),
        )
        .subcommand(
            Command::new("navigate")
                .about("Apply transitions to a URL and print the resulting URL")
                .arg(Arg::new("url").required(true).help("Starting URL"))
                .arg(
                    Arg::new("ops")
                        .num_args(0..)
                        .value_parser(value_parser!(NavOp))
                        .help("list:TYPE entity:TYPE:ID item:ID pop clear search:K=V[,K=V] page:N sort:ID[:desc]"),
                )
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("Print the URL after every transition"),
                ),
        )
        .subcommand(Command::new("catalog").about("Print the entity catalog as YAML"))
}

fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn read_state(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read state from stdin")?;
    Ok(buf)
}

fn run(matches: &ArgMatches, catalog: &EntityCatalog) -> Result<()> {
    let mut config = CodecConfig::default();
    if let Some(base) = matches.get_one::<String>("base-path") {
        config = config.with_base_path(base);
    }
    let codec = WorkflowCodec::new(catalog, config);

    match matches.subcommand() {
        Some(("decode", args)) => {
            let url = args.get_one::<String>("url").map_or("", String::as_str);
            let state = if args.get_flag("strict") {
                codec
                    .try_parse_href(url)
                    .with_context(|| format!("Cannot decode '{url}'"))?
            } else {
                codec.parse_href(url)
            };
            let json = if args.get_flag("compact") {
                serde_json::to_string(&state)?
            } else {
                serde_json::to_string_pretty(&state)?
            };
            println!("{json}");
        }
        Some(("encode", args)) => {
            let raw = read_state(args.get_one::<String>("state").map_or("-", String::as_str))?;
            let state: WorkflowState =
                serde_json::from_str(&raw).context("Invalid workflow state JSON")?;
            println!("{}", codec.try_to_url(&state)?);
        }
        Some(("navigate", args)) => {
            let url = args.get_one::<String>("url").map_or("", String::as_str);
            let trace = args.get_flag("trace");
            let nav = Navigator::new(catalog);

            let mut state = codec.parse_href(url);
            for op in args.get_many::<NavOp>("ops").into_iter().flatten() {
                state = op.apply(&nav, &state);
                debug!(?op, depth = state.stack.len(), "applied transition");
                if trace {
                    println!("{}", codec.to_url(&state));
                }
            }
            if !trace {
                println!("{}", codec.try_to_url(&state)?);
            }
        }
        Some(("catalog", _)) => {
            print!("{}", catalog.to_yaml()?);
        }
        _ => unreachable!("subcommand_required"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    telemetry::init(
        log_level(matches.get_count("verbose")),
        matches.get_flag("log-json"),
    )?;

    let owned;
    let catalog = match matches.get_one::<PathBuf>("catalog") {
        Some(path) => {
            owned = EntityCatalog::load(path)?;
            info!(path = %path.display(), "loaded entity catalog");
            &owned
        }
        None => EntityCatalog::builtin(),
    };

    run(&matches, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn navigate_collects_transitions() {
        let matches = cli()
            .try_get_matches_from(["navstack", "navigate", "/main/vm/deployments", "item:d-1", "list:IMAGE", "pop"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let ops: Vec<&NavOp> = args.get_many::<NavOp>("ops").unwrap().collect();
        assert_eq!(ops.len(), 3);
        assert_eq!(*ops[2], NavOp::Pop);
    }

    #[test]
    fn bad_transition_is_a_usage_error() {
        assert!(cli()
            .try_get_matches_from(["navstack", "navigate", "/main/vm", "fly:away"])
            .is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = cli()
            .try_get_matches_from(["navstack", "decode", "/main", "--base-path", "/console", "-vv"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("base-path").map(String::as_str),
            Some("/console")
        );
        assert_eq!(log_level(matches.get_count("verbose")), tracing::Level::TRACE);
    }
}
