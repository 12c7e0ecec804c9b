use clap::CommandFactory;
use clap_complete::{Shell as CompleteShell, generate};

use crate::cli::{Cli, Shell};

pub fn run(shell: Shell) {
    let shell = match shell {
        Shell::Bash => CompleteShell::Bash,
        Shell::Zsh => CompleteShell::Zsh,
        Shell::Fish => CompleteShell::Fish,
        Shell::Powershell => CompleteShell::PowerShell,
    };
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "snapdeck", &mut std::io::stdout());
}
