use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use distiller_core::{
    CanonicalStatus, ColumnMapping, DistillerConfig, DistillerSession, StatusMatching,
    StatusSelection,
};
use std::fs;
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "distiller")]
#[command(about = "Distill a proposal spreadsheet down to the rows that need attention", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS workbook
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Status to include (repeatable); replaces the configured defaults
    #[arg(short, long = "status", value_name = "STATUS")]
    statuses: Vec<CanonicalStatus>,

    /// Include every canonical status
    #[arg(long, conflicts_with_all = ["statuses", "no_status_filter"])]
    all_statuses: bool,

    /// Do not filter by status at all
    #[arg(long, conflicts_with = "statuses")]
    no_status_filter: bool,

    /// Override the configured owner
    #[arg(long, value_name = "NAME")]
    owner: Option<String>,

    /// Only show proposals whose PI name contains this text (case-insensitive)
    #[arg(long, value_name = "NAME")]
    pi: Option<String>,

    /// Compare statuses after trimming and case-folding
    #[arg(long)]
    normalize_status: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Write a printable HTML document of the filtered results
    #[arg(long, value_name = "PATH")]
    print_html: Option<PathBuf>,

    /// Show headers, detected columns and status vocabulary
    #[arg(long)]
    diagnostics: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output
    Json,
}

const PRINT_TITLE: &str = "ACT Database Distiller";

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        DistillerConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("distiller.toml");
        if default_config_path.exists() {
            DistillerConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            DistillerConfig::default()
        }
    };

    if let Some(owner) = &cli.owner {
        config.owner = owner.clone();
    }
    if cli.normalize_status {
        config.status_matching = StatusMatching::Normalized;
    }
    config.validate().context("Invalid configuration")?;

    let mut session = DistillerSession::new(config);
    session
        .parse_file(&cli.file)
        .with_context(|| format!("Failed to read file: {}", cli.file.display()))?;

    if cli.all_statuses {
        session.select_all();
    } else if cli.no_status_filter {
        session.clear_all();
    } else if !cli.statuses.is_empty() {
        session.set_selection(cli.statuses.iter().copied().collect::<StatusSelection>());
    }
    if cli.pi.is_some() {
        session.set_pi_filter(cli.pi.clone());
    }

    let Some(data) = session.data() else {
        anyhow::bail!("No data loaded from {}", cli.file.display());
    };
    let filtered = session.filtered();

    if cli.diagnostics {
        let mapping = ColumnMapping::from_headers(&data.headers);
        match cli.format {
            OutputFormat::Human => formatter::print_diagnostics_human(data, &mapping),
            OutputFormat::Json => formatter::print_diagnostics_json(data, &mapping)?,
        }
        return Ok(());
    }

    if let Some(html_path) = &cli.print_html {
        let html = distiller_core::render::render_print_html(
            &filtered,
            data.total_records,
            PRINT_TITLE,
        );
        fs::write(html_path, html)
            .with_context(|| format!("Failed to write {}", html_path.display()))?;
        log::info!("Wrote print document to {}", html_path.display());
    }

    // Output results
    match cli.format {
        OutputFormat::Human => {
            formatter::print_human(&cli.file, &filtered, data, session.filter_options());
        }
        OutputFormat::Json => {
            formatter::print_json(&cli.file, &filtered, data, session.filter_options())?;
        }
    }

    Ok(())
}
