//! apkspec CLI
//!
//! Inspect, validate and generate packaging spec files for Python/Kivy
//! Android builds.

use anyhow::Result;
use apkspec_cli::output::{self, Status};
use apkspec_core::error::exit_codes;
use apkspec_core::loader::SpecFile;
use apkspec_core::{template, validation};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "apkspec")]
#[command(about = "Packaging spec tools for Python/Kivy Android builds")]
#[command(version)]
struct Cli {
    /// Spec file path (defaults to apkspec.spec or buildozer.spec)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter spec file
    Init {
        /// Where to write the spec
        #[arg(long, default_value = "apkspec.spec")]
        path: PathBuf,
    },

    /// Parse the spec and run semantic validation
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a value, with interpolation applied
    Get {
        /// Section name
        section: String,
        /// Entry key
        key: String,
        /// Print the raw value without interpolation
        #[arg(long)]
        raw: bool,
        /// Split the value and print one element per line
        #[arg(long)]
        list: bool,
        /// Delimiter used with --list
        #[arg(long, default_value = ",")]
        delimiter: char,
    },

    /// List section names
    Sections,

    /// List a section's entries with raw values
    Keys {
        /// Section name
        section: String,
    },

    /// Print the parsed document, comments stripped
    Dump {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    init_logging(cli.verbose, cli.quiet);

    let exit_code = match cli.command {
        Commands::Init { path } => run_init(&path, cli.quiet),
        Commands::Check { json } => run_check(cli.config.as_deref(), json, cli.quiet),
        Commands::Get {
            section,
            key,
            raw,
            list,
            delimiter,
        } => run_get(cli.config.as_deref(), &section, &key, raw, list, delimiter),
        Commands::Sections => run_sections(cli.config.as_deref()),
        Commands::Keys { section } => run_keys(cli.config.as_deref(), &section),
        Commands::Dump { json } => run_dump(cli.config.as_deref(), json),
    };

    std::process::exit(exit_code);
}

/// Level comes from -v count unless RUST_LOG overrides it.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

fn load_spec(config: Option<&Path>) -> Option<SpecFile> {
    match SpecFile::load(config) {
        Ok(spec) => Some(spec),
        Err(e) => {
            Status::error(&e.to_string());
            None
        }
    }
}

fn run_init(path: &Path, quiet: bool) -> i32 {
    match template::write_template(path) {
        Ok(()) => {
            if !quiet {
                Status::success(&format!("Wrote {}", path.display()));
                Status::info("Edit the [app] section before packaging");
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&e.to_string());
            exit_codes::FAILURE
        }
    }
}

fn run_check(config: Option<&Path>, json: bool, quiet: bool) -> i32 {
    let spec = match SpecFile::load(config) {
        Ok(spec) => spec,
        Err(e) => {
            if json {
                print_json(&e.to_report());
            } else {
                Status::error(&e.to_string());
            }
            return exit_codes::CONFIG_ERROR;
        }
    };

    let result = match validation::validate_spec(&spec.document) {
        Ok(result) => result,
        Err(e) => {
            if json {
                print_json(&e.to_report());
            } else {
                Status::error(&e.to_string());
            }
            return exit_codes::CONFIG_ERROR;
        }
    };

    if json {
        print_json(&result);
    } else {
        output::print_validation(&result);
        if result.is_valid() {
            if !quiet {
                Status::success(&format!("{} is valid", spec.path.display()));
            }
        } else {
            Status::error(&format!(
                "{} in {}",
                output::format_count(result.errors().len(), "error", "errors"),
                spec.path.display()
            ));
        }
    }

    if result.is_valid() {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_ERROR
    }
}

fn run_get(
    config: Option<&Path>,
    section: &str,
    key: &str,
    raw: bool,
    list: bool,
    delimiter: char,
) -> i32 {
    let Some(spec) = load_spec(config) else {
        return exit_codes::CONFIG_ERROR;
    };

    if raw {
        match spec.document.raw(section, key) {
            Ok(value) => {
                println!("{}", value);
                exit_codes::SUCCESS
            }
            Err(e) => {
                Status::error(&e.to_string());
                exit_codes::FAILURE
            }
        }
    } else if list {
        match spec.document.get_list(section, key, delimiter) {
            Ok(values) => {
                for value in values {
                    println!("{}", value);
                }
                exit_codes::SUCCESS
            }
            Err(e) => {
                Status::error(&e.to_string());
                exit_codes::FAILURE
            }
        }
    } else {
        match spec.document.resolve(section, key) {
            Ok(value) => {
                println!("{}", value);
                exit_codes::SUCCESS
            }
            Err(e) => {
                Status::error(&e.to_string());
                exit_codes::FAILURE
            }
        }
    }
}

fn run_sections(config: Option<&Path>) -> i32 {
    let Some(spec) = load_spec(config) else {
        return exit_codes::CONFIG_ERROR;
    };

    for section in spec.document.sections() {
        println!(
            "{}  ({})",
            section.name(),
            output::format_count(section.len(), "entry", "entries")
        );
    }
    exit_codes::SUCCESS
}

fn run_keys(config: Option<&Path>, section: &str) -> i32 {
    let Some(spec) = load_spec(config) else {
        return exit_codes::CONFIG_ERROR;
    };

    match spec.document.section(section) {
        Some(s) => {
            output::print_entries(s);
            exit_codes::SUCCESS
        }
        None => {
            Status::error(&format!("No section named [{}]", section));
            exit_codes::FAILURE
        }
    }
}

fn run_dump(config: Option<&Path>, json: bool) -> i32 {
    let Some(spec) = load_spec(config) else {
        return exit_codes::CONFIG_ERROR;
    };

    if json {
        print_json(&spec.document);
    } else {
        print!("{}", spec.document);
    }
    exit_codes::SUCCESS
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => Status::error(&format!("JSON encoding failed: {}", e)),
    }
}
