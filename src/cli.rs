use clap::{Parser, Subcommand};
use cruby_pod::version::PatchOffset;
use std::path::PathBuf;

/// Build configuration and version resolver for the CRuby pod
#[derive(Parser, Debug)]
#[command(name = "cruby-pod")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file (.toml, .json, .yml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ruby source label to use instead of the configured one (e.g. 2.6)
    #[arg(long, global = true, value_name = "LABEL")]
    pub ruby: Option<String>,

    /// Patch offset to use instead of the configured one (0-99)
    #[arg(long, global = true, value_name = "N", value_parser = parse_patch_offset)]
    pub patch_offset: Option<PatchOffset>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the extended version used to tag the package
    Version,
    /// Show the active sources and derived versions
    Show,
    /// List every configured ruby source
    List,
    /// Validate the configuration
    Check,
}

fn parse_patch_offset(s: &str) -> Result<PatchOffset, String> {
    let value = s
        .parse::<u32>()
        .map_err(|_| format!("Invalid patch offset '{}'. Expected a number from 0 to 99", s))?;
    PatchOffset::new(value).map_err(|e| e.to_string())
}
