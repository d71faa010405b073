// CLI interface
pub mod commands;

use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ssokit")]
#[command(about = "Setup wizard and role tag inspector for AWS SSO configurations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SSO instance name to operate on
    #[arg(short = 'S', long, global = true, env = "AWS_SSO")]
    pub sso: Option<String>,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive configuration wizard
    Setup,

    /// Print each role ARN with its resolved tags
    Tags,

    /// Generate shell completion scripts
    ///
    /// INSTALLATION:
    ///
    /// Bash:
    ///   eval "$(ssokit completions bash)"    # Add to ~/.bashrc
    ///
    /// Zsh:
    ///   eval "$(ssokit completions zsh)"     # Add to ~/.zshrc
    ///
    /// Fish:
    ///   ssokit completions fish > ~/.config/fish/completions/ssokit.fish
    ///
    /// PowerShell:
    ///   ssokit completions powershell | Out-String | Invoke-Expression
    ///
    /// Elvish:
    ///   eval (ssokit completions elvish | slurp)
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

pub fn execute(args: Cli) -> Result<()> {
    match args.command {
        Commands::Setup => commands::setup::execute(args.sso),
        Commands::Tags => commands::tags::execute(args.sso),
        Commands::Completions { shell } => {
            commands::completions::execute(shell);
            Ok(())
        }
    }
}
