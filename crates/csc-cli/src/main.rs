//! `cs-console` entry point

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use csc_cli::commands;
use csc_cli::logging::{self, Verbosity};
use csc_cli::ConsoleConfig;
use csc_filter::FilterSchema;
use csc_store::{FileStore, KeyValueStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn cli() -> Command {
    let key = Arg::new("key")
        .long("key")
        .required(true)
        .help("Storage key of the filter group");

    Command::new("cs-console")
        .version(csc_cli::VERSION)
        .about("Console client state: filter groups and VM inspection")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML config file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Errors only"),
        )
        .subcommand(
            Command::new("filters")
                .about("Filter group snapshots")
                .subcommand_required(true)
                .subcommand(
                    Command::new("init")
                        .about("Resolve a filter group and print it as JSON")
                        .arg(key.clone())
                        .arg(
                            Arg::new("schema")
                                .long("schema")
                                .required(true)
                                .value_parser(clap::value_parser!(PathBuf))
                                .help("JSON file describing the filter fields"),
                        )
                        .arg(
                            Arg::new("param")
                                .long("param")
                                .action(ArgAction::Append)
                                .help("Query parameter as key=value (repeatable)"),
                        ),
                )
                .subcommand(
                    Command::new("update")
                        .about("Store a snapshot")
                        .arg(key.clone())
                        .arg(
                            Arg::new("patch")
                                .long("patch")
                                .required(true)
                                .help("JSON object of filter values"),
                        ),
                )
                .subcommand(
                    Command::new("show")
                        .about("Print the raw stored snapshot")
                        .arg(key),
                ),
        )
        .subcommand(
            Command::new("vm")
                .about("Virtual machines")
                .subcommand_required(true)
                .subcommand(
                    Command::new("inspect")
                        .about("Remap an API VM and list applicable actions")
                        .arg(
                            Arg::new("file")
                                .required(true)
                                .value_parser(clap::value_parser!(PathBuf))
                                .help("JSON file with one VM as returned by the API"),
                        ),
                ),
        )
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let config = ConsoleConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let verbosity = Verbosity::from_flags(matches.get_flag("verbose"), matches.get_flag("quiet"));
    logging::init(verbosity, &config.log_level);
    tracing::debug!(store = %config.store_path.display(), "config loaded");

    match matches.subcommand() {
        Some(("filters", args)) => run_filters(&config, args),
        Some(("vm", args)) => run_vm(args),
        _ => Ok(()),
    }
}

fn open_store(config: &ConsoleConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store = FileStore::open(&config.store_path)
        .with_context(|| format!("failed to open store {}", config.store_path.display()))?;
    Ok(Arc::new(store))
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a String> {
    args.get_one::<String>(name)
        .with_context(|| format!("missing --{name}"))
}

fn read_json(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run_filters(config: &ConsoleConfig, matches: &ArgMatches) -> anyhow::Result<()> {
    let store = open_store(config)?;

    match matches.subcommand() {
        Some(("init", args)) => {
            let key = required(args, "key")?;
            let schema_path = args
                .get_one::<PathBuf>("schema")
                .context("missing --schema")?;
            let schema = FilterSchema::from_json(&read_json(schema_path)?)
                .with_context(|| format!("invalid schema {}", schema_path.display()))?;
            let params = args
                .get_many::<String>("param")
                .unwrap_or_default()
                .map(|raw| commands::parse_pair(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let filters = commands::filters_init(store, key, &schema, params);
            println!("{}", serde_json::to_string_pretty(&filters)?);
        }
        Some(("update", args)) => {
            let key = required(args, "key")?;
            let patch = required(args, "patch")?;
            commands::filters_update(store, key, patch)?;
        }
        Some(("show", args)) => {
            let key = required(args, "key")?;
            if let Some(raw) = commands::filters_show(store.as_ref(), key)? {
                println!("{raw}");
            }
        }
        _ => {}
    }

    Ok(())
}

fn run_vm(matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(("inspect", args)) = matches.subcommand() {
        let path = args.get_one::<PathBuf>("file").context("missing file")?;
        let raw: serde_json::Value = serde_json::from_str(&read_json(path)?)
            .with_context(|| format!("invalid JSON in {}", path.display()))?;
        let report = commands::vm_inspect(&raw)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
