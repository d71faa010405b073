// ssokit - AWS SSO configuration toolkit

mod cli;
mod config;
mod error;
mod roles;
mod validate;
mod wizard;

use clap::Parser;
use config::Settings;
use error::Result;

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbose flag
    let args = cli::Cli::parse();

    // The configured log_level drives verbosity unless --verbose asks for more
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        Settings::load()
            .map(|settings| settings.tracing_level())
            .unwrap_or(tracing::Level::WARN)
    };

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::execute(args)
}
