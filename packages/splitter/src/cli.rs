//! Command-line interface for the splitter.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_output_dir, SplitConfig};
use crate::error::{Result, SplitterError};
use crate::splitter::split_file;
use crate::types::ShortGridPolicy;

/// Grid Splitter - Split puzzle record files into per-level grid files.
#[derive(Debug, Parser)]
#[command(name = "grid-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file with one puzzle record per line
    pub input: PathBuf,

    /// Base output directory (default: current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write truncated boards for grids shorter than 81 characters
    #[arg(long)]
    pub allow_short_grids: bool,

    /// Skip malformed records instead of aborting the run
    #[arg(long)]
    pub keep_going: bool,
}

impl Cli {
    /// Layer command-line flags over a base configuration.
    pub fn apply(&self, mut config: SplitConfig) -> SplitConfig {
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if self.allow_short_grids {
            config.short_grids = ShortGridPolicy::Truncate;
        }
        if self.keep_going {
            config.keep_going = true;
        }
        config
    }
}

/// Parse arguments, turning argument errors into [`SplitterError::Usage`].
///
/// `--help` and `--version` print and exit as usual.
pub fn parse_args<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => Err(SplitterError::Usage(e.render().to_string())),
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = parse_args(std::env::args_os())?;
    let config = cli.apply(SplitConfig::from_env());
    split_command(&cli, &config)
}

/// Execute the split.
fn split_command(cli: &Cli, config: &SplitConfig) -> Result<()> {
    // Validate output directory before touching the input
    validate_output_dir(&config.output_dir)?;

    println!(
        "{} {} into {}",
        style("Splitting").bold(),
        style(cli.input.display()).cyan(),
        style(config.output_dir.display()).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Writing grids...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = match split_file(&cli.input, config) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Records: {}", report.records);
    println!("  Directories: {}", report.directories.len());
    if report.skipped > 0 {
        println!("  Skipped: {}", style(report.skipped).yellow().bold());
    }
    if !report.warnings.is_empty() {
        println!("  Warnings: {}", style(report.warnings.len()).yellow().bold());
        for warning in &report.warnings {
            println!("    {}", style(warning).yellow());
        }
    }

    println!();
    if report.is_clean() {
        println!("{}", style("Done.").green().bold());
    } else {
        println!("{}", style("Done with warnings.").yellow().bold());
    }

    Ok(())
}
