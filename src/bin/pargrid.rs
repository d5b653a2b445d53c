//! Command-line interface for pargrid
//!
//! Usage:
//!   pargrid resolve `<path>` [--format text|json|yaml] [--defaults `<toml>`] [--set key=value]...
//!   pargrid params `<path>`
//!
//! Resolver defaults are layered: built-in, then `pargrid.toml` beside the
//! parameter file if present, then `--defaults`.
//!
//! Logging goes to stderr. `RUST_LOG` takes precedence over `--verbose`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use pargrid::params::parse_source;
use pargrid::resolve::DefaultsLoader;
use pargrid::{ParameterFileLoader, Pipeline, Resolution};
use std::error::Error;
use tracing::info;
use tracing_subscriber::prelude::*;

fn main() {
    let matches = Command::new("pargrid")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve parameter files into grid geometry")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log resolver decisions to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve a parameter file and print the grid hierarchy")
                .arg(
                    Arg::new("path")
                        .help("Path to the parameter file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["text", "json", "yaml"])
                        .default_value("text"),
                )
                .arg(
                    Arg::new("defaults")
                        .long("defaults")
                        .help("TOML file overriding the built-in resolver defaults and any pargrid.toml next to the parameter file"),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .help("Override a parameter, e.g. --set driver::global_nsize=20")
                        .value_parser(parse_assignment)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("params")
                .about("Print the normalized parameters of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the parameter file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("resolve", resolve_matches)) => handle_resolve_command(resolve_matches),
        Some(("params", params_matches)) => handle_params_command(params_matches),
        _ => unreachable!(),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "pargrid=debug" } else { "pargrid=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Parse a `key=value` override.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got \"{}\"", raw)),
    }
}

/// Handle the resolve command
fn handle_resolve_command(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let path = matches.get_one::<String>("path").expect("path is required");
    let format = matches.get_one::<String>("format").expect("format has a default");

    let mut defaults = DefaultsLoader::new().beside(path);
    if let Some(file) = matches.get_one::<String>("defaults") {
        defaults = defaults.with_file(file);
    }
    let pipeline = Pipeline::with_defaults(defaults.build()?);

    let loader = ParameterFileLoader::from_path(path)?;
    let mut store = parse_source(loader.source())?;
    if let Some(overrides) = matches.get_many::<(String, String)>("set") {
        for (key, value) in overrides {
            store.insert(key, value.clone());
        }
    }
    let resolution = pipeline.run_store(store)?;
    info!(
        path = %path,
        delta_time = resolution.hierarchy.delta_time(),
        "resolved grid hierarchy"
    );

    let output = match format.as_str() {
        "json" => serde_json::to_string_pretty(&resolution)? + "\n",
        "yaml" => serde_yaml::to_string(&resolution)?,
        _ => render_text(&resolution),
    };
    Ok(output)
}

/// Handle the params command
fn handle_params_command(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let path = matches.get_one::<String>("path").expect("path is required");
    let parameters = ParameterFileLoader::from_path(path)?.parameters()?;

    let mut output = String::new();
    for (key, value) in parameters.iter() {
        output.push_str(&format!("{} = {}\n", key, value));
    }
    Ok(output)
}

fn render_text(resolution: &Resolution) -> String {
    let mut output = resolution.hierarchy.to_string();
    if let Some(max_iteration) = resolution.max_iteration {
        output.push_str(&format!("{:<16} = {}\n", "max_iteration", max_iteration));
    }
    let thorns = resolution.parameters.active_thorns();
    if !thorns.is_empty() {
        output.push_str(&format!("{:<16} = {}\n", "active_thorns", thorns.join(" ")));
    }
    output
}
