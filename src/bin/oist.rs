//! oist - image set tools CLI
//!
//! Commands: verify, build-manifest
//! Exit code 0 is the sole success signal; every failure exits 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use imageset_tools::{Pipeline, SourceConfig};

#[derive(Parser)]
#[command(name = "oist")]
#[command(version, about = "Image set verification and manifest tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify that source images meet the format rules
    Verify {
        /// The directory to look for source images in
        #[arg(short, long)]
        source_directory: Option<PathBuf>,
    },

    /// Build an image set manifest file and save to "imageset.json"
    BuildManifest {
        /// The directory to look for source images in
        #[arg(short, long)]
        source_directory: Option<PathBuf>,
    },

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Verify { source_directory }) => run_verify(source_directory),
        Some(Commands::BuildManifest { source_directory }) => {
            run_build_manifest(source_directory)
        }
        Some(Commands::Unknown(args)) => {
            let name = args.first().map(String::as_str).unwrap_or_default();
            eprintln!("Command \"{name}\" not found");
            ExitCode::FAILURE
        }
        None => {
            let _ = Cli::command().print_help();
            ExitCode::SUCCESS
        }
    }
}

fn run_verify(source_directory: Option<PathBuf>) -> ExitCode {
    let pipeline = Pipeline::new(SourceConfig::resolve(source_directory));
    println!("Verifying images…");

    match pipeline.verify() {
        Ok(report) => {
            for result in report.failures() {
                for violation in &result.violations {
                    eprintln!("✘ {}: {}", result.path.display(), violation.message);
                }
            }
            if report.is_valid() {
                println!("Verified all images");
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            eprintln!("✘ {error}");
            ExitCode::FAILURE
        }
    }
}

fn run_build_manifest(source_directory: Option<PathBuf>) -> ExitCode {
    let pipeline = Pipeline::new(SourceConfig::resolve(source_directory));
    println!("Building manifest file…");

    match pipeline.build_manifest() {
        Ok(_) => {
            println!("✔ Manifest file saved");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("✘ Manifest file could not be saved");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
