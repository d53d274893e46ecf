use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{presets, Table};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use flpstat::config::{Config, CONFIG};
use flpstat::error::FlpStatError;
use flpstat::report::{format_timedelta, ReportSummary};
use flpstat::scan::records::RecordSet;
use flpstat::scan::ProjectPathScanner;

/// flpstat - plugin usage statistics for FL Studio projects
#[derive(Parser)]
#[command(
    name = "flpstat",
    about = "Aggregate third-party plugin usage statistics from FL Studio projects",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the FLP project files an aggregation run would cover
    Discover {
        /// Directory to scan recursively (backup directories are skipped)
        dir: PathBuf,
    },

    /// Build the usage report from a parsed record dump
    Report {
        /// Record dump produced by the external FLP parser
        records: PathBuf,

        /// Report destination (defaults to a timestamped file in the
        /// working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of plugins shown in the summary table
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CONFIG.as_ref() {
        Ok(config) => config.clone(),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_level());

    let result = match cli.command {
        Commands::Discover { dir } => run_discover(&config, &dir),
        Commands::Report {
            records,
            output,
            top,
        } => run_report(&records, output, top),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_discover(config: &Config, dir: &Path) -> Result<(), FlpStatError> {
    let scanner = ProjectPathScanner::from_config(config);
    let paths = scanner.scan_directory(dir)?;
    if paths.is_empty() {
        return Err(FlpStatError::EmptyInput(dir.to_path_buf()));
    }

    for path in &paths {
        println!("{}", path.display());
    }
    info!("Found {} FLP files under {}", paths.len(), dir.display());
    Ok(())
}

fn run_report(
    records_path: &Path,
    output: Option<PathBuf>,
    top: usize,
) -> Result<(), FlpStatError> {
    let records = RecordSet::from_path(records_path)?;
    info!(
        "Loaded {} project records from {}",
        records.len(),
        records_path.display()
    );

    let bar = ProgressBar::new(records.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("Processing FLP files");

    let summary = flpstat::build_report_with_progress(
        &records,
        Some(|completed: u64, _total: u64, _name: &str| {
            bar.set_position(completed);
        }),
    )?;
    bar.finish_and_clear();

    let output = output.unwrap_or_else(default_report_path);
    summary.write_to(&output)?;

    print_summary(&summary, top);
    println!("{} {}", "Data saved to:".green().bold(), output.display());
    Ok(())
}

/// Timestamped default in the working directory, e.g.
/// `2024-05-01_16-04-32_flp_stats.json`.
fn default_report_path() -> PathBuf {
    PathBuf::from(format!(
        "{}_flp_stats.json",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    ))
}

fn print_summary(summary: &ReportSummary, top: usize) {
    println!();
    println!("Scanned directory: {}", summary.scanned_directory);
    println!("Projects scanned:  {}", summary.total_flp_files_scanned);
    println!("Plugins found:     {}", summary.total_plugins_found);
    println!(
        "Total time spent:  {}",
        format_timedelta(summary.total_time_spent_on_flp)
    );
    println!(
        "Average per file:  {}",
        format_timedelta(summary.average_time_spent_on_flp)
    );

    if summary.plugins.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec![
        "Plugin",
        "Projects",
        "Total uses",
        "Avg/project",
        "Last used",
    ]);
    for (key, plugin) in summary.plugins.iter().take(top) {
        table.add_row(vec![
            key.to_string(),
            plugin.used_in_projects.to_string(),
            plugin.total_times_used.to_string(),
            format!("{:.2}", plugin.average_uses_in_project),
            plugin.last_time_used.format("%Y-%m-%d").to_string(),
        ]);
    }
    println!("{}", table);
}

fn init_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            log::LevelFilter::Info
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
