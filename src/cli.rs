// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// md2xk6 has no subcommands: one optional positional FILE and a few flags.
//
//   md2xk6                  # reads README.md
//   md2xk6 docs/EXTENSIONS.md
//   md2xk6 --json -vv README.md
// =============================================================================

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "md2xk6",
    version,
    about = "Turn the extension list of a markdown document into xk6 --with flags",
    long_about = "md2xk6 finds the first list in a markdown document where every item is a single \
                  GitHub or GitLab repository link, and prints them as `--with` flags for `xk6 build`."
)]
pub struct Cli {
    /// Markdown file containing the extension list
    #[arg(default_value = "README.md")]
    pub file: PathBuf,

    /// Print the modules as a JSON array instead of --with flags
    #[arg(long)]
    pub json: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when set
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The tracing filter directive for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["md2xk6"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("README.md"));
        assert!(!cli.json);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_positional_file_and_flags() {
        let cli = Cli::try_parse_from(["md2xk6", "--json", "-vv", "docs/EXTENSIONS.md"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("docs/EXTENSIONS.md"));
        assert!(cli.json);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_verbosity_caps_at_trace() {
        let cli = Cli::try_parse_from(["md2xk6", "-vvvvv"]).unwrap();
        assert_eq!(cli.log_filter(), "trace");
    }

    #[test]
    fn test_rejects_extra_positionals() {
        assert!(Cli::try_parse_from(["md2xk6", "a.md", "b.md"]).is_err());
    }
}
