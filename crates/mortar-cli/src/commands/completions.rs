use std::io::Write;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::aot::Generator;
use clap_complete::{generate, shells};

use crate::cli::{Cli, CompletionShell};
use crate::error::CliError;

pub fn run_completions(shell: CompletionShell, output: Option<PathBuf>) -> Result<(), CliError> {
    match shell {
        CompletionShell::Bash => write_completions(shells::Bash, output),
        CompletionShell::Zsh => write_completions(shells::Zsh, output),
        CompletionShell::Fish => write_completions(shells::Fish, output),
    }
}

fn write_completions<G: Generator>(shell: G, output: Option<PathBuf>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            generate(shell, &mut command, name, &mut file);
            file.flush()?;
        }
        None => {
            generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }
    Ok(())
}
