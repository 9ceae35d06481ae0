//! Command-line interface for rt-tables
//! Parses radiative-transfer benchmark files and extracts the rows for given physical parameters.
//!
//! Usage:
//!   rt-tables parse `<path>` --format `<egap|natraj|sos>` [--tree]
//!   rt-tables egap --name `<name>` --theta-sun `<deg>` --phi `<deg>` --wavelength `<nm>` [--dir `<dir>`]
//!   rt-tables sos --theta-photon `<deg>` --phi `<deg>` --wavelength `<nm>` [--dir `<dir>`]
//!
//! Global options: --config `<file>` layers a TOML file over the built-in defaults,
//! --output `<json|yaml>` overrides `output.format`. `RUST_LOG` controls logging.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rt_tables::config::{Loader, OutputConfig, OutputFormat, RtConfig};
use rt_tables::{extract, parsing};
use rt_tables::{Format, ReducedTable};
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let matches = cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let output = match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub),
        Some(("egap", sub)) => handle_egap_command(sub, &config).map(Output::Table),
        Some(("sos", sub)) => handle_sos_command(sub, &config).map(Output::Table),
        _ => unreachable!("clap requires a subcommand"),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match output {
        Output::Table(table) => {
            let rendered = render(&table, &config.output).unwrap_or_else(|e| {
                eprintln!("Error formatting output: {}", e);
                std::process::exit(1);
            });
            println!("{}", rendered);
        }
        Output::Outline(outline) => print!("{}", outline),
    }
}

enum Output {
    Table(ReducedTable),
    /// Named parse nodes of `parse --tree`.
    Outline(String),
}

fn cli() -> Command {
    let angle = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .help(help)
            .required(true)
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64))
    };
    let dir = Arg::new("dir")
        .long("dir")
        .short('d')
        .help("Dataset root (defaults to the configured directory)")
        .value_parser(value_parser!(PathBuf));

    Command::new("rt-tables")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and slice EGAP, Natraj and SOS radiative-transfer benchmark tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .global(true)
                .help("Output format")
                .value_parser(["json", "yaml"]),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse one file and print its reduced table")
                .arg(
                    Arg::new("path")
                        .help("Path to the benchmark file")
                        .required(true)
                        .index(1)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Layout of the file: egap, natraj or sos")
                        .required(true)
                        .value_parser(value_parser!(Format)),
                )
                .arg(
                    Arg::new("tree")
                        .long("tree")
                        .help("Print the parse tree outline instead of the reduced table")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("egap")
                .about("Rows of an EGAP dataset for one sun angle, azimuth and wavelength")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("Dataset name, e.g. AOS_1")
                        .required(true),
                )
                .arg(angle("theta-sun", "Solar zenith angle in degrees, [0, 90]"))
                .arg(angle("phi", "Relative azimuth in degrees: 0, 60, 180 or 240"))
                .arg(angle("wavelength", "Wavelength in nm"))
                .arg(dir.clone()),
        )
        .subcommand(
            Command::new("sos")
                .about("Rows of the SOS dataset for one photon zenith, azimuth and wavelength")
                .arg(angle("theta-photon", "Photon zenith angle in degrees: 60 or 30"))
                .arg(angle("phi", "Relative azimuth in degrees: 0, 60, 180 or 240"))
                .arg(angle("wavelength", "Wavelength in nm: 350, 450, 550 or 650"))
                .arg(dir),
        )
}

fn load_config(matches: &ArgMatches) -> Result<RtConfig, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(output) = matches.get_one::<String>("output") {
        loader = loader.with_output_format(output)?;
    }
    if let Some((dataset @ ("egap" | "sos"), sub)) = matches.subcommand() {
        if let Some(dir) = sub.get_one::<PathBuf>("dir") {
            loader = loader.with_data_dir(dataset, dir)?;
        }
    }
    loader.build()
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) -> rt_tables::Result<Output> {
    let path = required::<PathBuf>(matches, "path");
    let format = *required::<Format>(matches, "format");
    if matches.get_flag("tree") {
        let source = extract::read_source(path)?;
        let root = parsing::parse(format.grammar(), &source)?;
        return Ok(Output::Outline(root.to_outline()));
    }
    rt_tables::parse_file(format, path).map(Output::Table)
}

/// Handle the egap command. `--dir` has already been folded into `config`.
fn handle_egap_command(
    matches: &ArgMatches,
    config: &RtConfig,
) -> rt_tables::Result<ReducedTable> {
    extract::egap::get_data(
        &config.data.egap_dir,
        required::<String>(matches, "name"),
        *required::<f64>(matches, "theta-sun"),
        *required::<f64>(matches, "phi"),
        *required::<f64>(matches, "wavelength"),
    )
    .map(ReducedTable::Rows)
}

/// Handle the sos command
fn handle_sos_command(
    matches: &ArgMatches,
    config: &RtConfig,
) -> rt_tables::Result<ReducedTable> {
    extract::sos::get_data(
        &config.data.sos_dir,
        *required::<f64>(matches, "theta-photon"),
        *required::<f64>(matches, "phi"),
        *required::<f64>(matches, "wavelength"),
    )
    .map(ReducedTable::Rows)
}

fn required<'m, T: Clone + Send + Sync + 'static>(matches: &'m ArgMatches, id: &str) -> &'m T {
    matches
        .get_one::<T>(id)
        .expect("clap enforces required arguments")
}

fn render(table: &ReducedTable, output: &OutputConfig) -> Result<String, String> {
    match (output.format, output.pretty) {
        (OutputFormat::Json, true) => {
            serde_json::to_string_pretty(table).map_err(|e| e.to_string())
        }
        (OutputFormat::Json, false) => serde_json::to_string(table).map_err(|e| e.to_string()),
        (OutputFormat::Yaml, _) => serde_yaml::to_string(table).map_err(|e| e.to_string()),
    }
}
