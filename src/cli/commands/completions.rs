use crate::cli::{Cli, Shell};
use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};
use std::io;

pub fn execute(shell: Shell) {
    let mut cmd = Cli::command();

    let clap_shell = match shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::PowerShell => ClapShell::PowerShell,
        Shell::Elvish => ClapShell::Elvish,
    };

    eprintln!("Generating completion file for {:?}...", shell);
    generate(clap_shell, &mut cmd, "ssokit", &mut io::stdout());

    eprintln!("\n# Installation:");
    for line in install_instructions(&shell) {
        eprintln!("# {line}");
    }
}

/// Shell-specific pointers for wiring the generated script into a profile.
fn install_instructions(shell: &Shell) -> &'static [&'static str] {
    match shell {
        Shell::Bash => &[
            "Load directly from ~/.bashrc:",
            "  eval \"$(ssokit completions bash)\"",
            "or install system-wide:",
            "  ssokit completions bash > /usr/local/etc/bash_completion.d/ssokit",
        ],
        Shell::Zsh => &[
            "Load directly from ~/.zshrc:",
            "  eval \"$(ssokit completions zsh)\"",
            "or drop the script on your fpath:",
            "  ssokit completions zsh > ~/.zfunc/_ssokit",
            "  fpath=(~/.zfunc $fpath)",
        ],
        Shell::Fish => &[
            "Install into the fish completions directory:",
            "  ssokit completions fish > ~/.config/fish/completions/ssokit.fish",
        ],
        Shell::PowerShell => &[
            "Load from your PowerShell profile:",
            "  ssokit completions powershell | Out-String | Invoke-Expression",
        ],
        Shell::Elvish => &[
            "Load from your Elvish config:",
            "  eval (ssokit completions elvish | slurp)",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_instructions_cover_every_shell() {
        let shells = [
            Shell::Bash,
            Shell::Zsh,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Elvish,
        ];

        for shell in shells {
            let lines = install_instructions(&shell);
            assert!(!lines.is_empty());
            assert!(
                lines
                    .iter()
                    .any(|line| line.contains("ssokit completions")),
                "instructions for {shell:?} never mention the command"
            );
        }
    }
}
