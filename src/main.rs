// src/main.rs
// =============================================================================
// This is the entry point of md2xk6.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout only carries the module list)
// 3. Read the markdown file and extract the extension modules
// 4. Print them and exit (0 = success, 1 = error)
//
// Finding no extension list is NOT an error: we just print nothing.
// =============================================================================

mod cli;     // src/cli.rs - command-line parsing
mod error;   // src/error.rs - error types
mod extract; // src/extract/ - finding the extension list
mod output;  // src/output.rs - printing the result

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    init_tracing(&cli);

    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole cause chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let modules = extract::extract_file(&cli.file)?;

    tracing::info!(count = modules.len(), "extracted extension modules");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        output::write_json(&mut out, &modules)?;
    } else {
        output::write_flags(&mut out, &modules)?;
    }

    out.flush()?;

    Ok(())
}

// RUST_LOG wins over -v when it is set
fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
