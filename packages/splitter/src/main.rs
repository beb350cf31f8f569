//! CLI entry point for the splitter.

use grid_splitter::{cli, SplitterError};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing with WARN level by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        match &e {
            SplitterError::Usage(usage) => eprint!("{usage}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(e.exit_code());
    }
}
