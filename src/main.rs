mod cli;

use clap::Parser;
use cli::{Cli, Command};
use cruby_pod::config::{ConfigOrigin, PodConfig};
use cruby_pod::output::{self, CheckOutput, ListEntry, ListOutput, ShowOutput, VersionOutput};
use cruby_pod::resolve;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `CRUBY_POD_LOG=debug`
const LOG_ENV: &str = "CRUBY_POD_LOG";

fn main() {
    init_logging();

    let mut cli = Cli::parse();
    let json_output = cli.json;

    let Some(command) = cli.command.take() else {
        eprintln!("No command specified. Use --help for usage information.");
        std::process::exit(1);
    };

    let result = load_config(&cli).and_then(|(config, origin)| match command {
        Command::Version => run_version(&config, json_output),
        Command::Show => run_show(&config, &origin, json_output),
        Command::List => run_list(&config, json_output),
        Command::Check => run_check(&config, json_output),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<(PodConfig, ConfigOrigin), Box<dyn std::error::Error>> {
    let (config, origin) = PodConfig::load(cli.config.as_deref())?;
    tracing::debug!("configuration: {}", origin);
    let config = config.with_overrides(cli.ruby.as_deref(), cli.patch_offset);
    Ok((config, origin))
}

fn run_version(config: &PodConfig, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let resolution = resolve::resolve(config)?;

    if json_output {
        output::print_json(&VersionOutput {
            version: resolution.version,
        });
        return Ok(());
    }

    println!("{}", resolution.version);
    Ok(())
}

fn run_show(
    config: &PodConfig,
    origin: &ConfigOrigin,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolution = resolve::resolve(config)?;
    let show = ShowOutput::new(&resolution, &config.repository, &origin.to_string());

    if json_output {
        output::print_json(&show);
        return Ok(());
    }

    println!("config:       {}", show.config);
    println!("repository:   {}", show.repository);
    println!("ruby:         {}", show.ruby.label);
    println!("ruby version: {}", show.ruby_version);
    println!("patch offset: {}", show.patch_offset);
    println!("version:      {}", show.version);
    println!("url:          {}", show.ruby.url);
    println!("sha256:       {}", show.ruby.sha256);
    if let Some(openssl) = &show.openssl {
        println!("openssl:      {}", openssl.label);
        println!("  url:        {}", openssl.url);
        println!("  sha256:     {}", openssl.sha256);
    }

    Ok(())
}

fn run_list(config: &PodConfig, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let reports = resolve::resolve_all(config);

    if json_output {
        output::print_json(&ListOutput {
            sources: reports.iter().map(ListEntry::new).collect(),
        });
        return Ok(());
    }

    if reports.is_empty() {
        println!("No ruby sources configured");
        return Ok(());
    }

    for report in reports {
        let marker = if report.active { "*" } else { " " };
        match &report.version {
            Ok((triple, version)) => println!(
                "{} {}  {} -> {}  {}",
                marker, report.label, triple, version, report.source.url
            ),
            Err(e) => println!("{} {}  (error: {})", marker, report.label, e),
        }
    }

    Ok(())
}

fn run_check(config: &PodConfig, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let problems = resolve::check(config);

    if json_output {
        output::print_json(&CheckOutput::new(&problems));
    } else if problems.is_empty() {
        println!("Configuration OK");
    } else {
        for problem in &problems {
            eprintln!("- {}", problem);
        }
    }

    if !problems.is_empty() {
        return Err(format!("{} problem(s) found", problems.len()).into());
    }

    Ok(())
}
