use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use crate::application::BankService;
use crate::telemetry;

mod prompt;
mod session;

pub use prompt::*;
pub use session::*;

/// Pocketbank - in-memory bank simulator
#[derive(Parser)]
#[command(name = "pocketbank")]
#[command(about = "An interactive bank simulator: open accounts, credit and withdraw funds, check balances")]
#[command(version)]
pub struct Cli {
    /// Name shown in the welcome banner
    #[arg(long, default_value = "Best Bank")]
    pub bank_name: String,

    /// Read operator input from a file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let is_terminal = stdout.is_terminal();
        self.run_with_output(stdout.lock(), is_terminal)
    }

    /// Run the session writing to `output`. Colors need `terminal` and are
    /// still suppressed by `--no-color` or `NO_COLOR`.
    pub fn run_with_output<W: Write>(self, output: W, terminal: bool) -> Result<()> {
        telemetry::init(self.verbose);

        let color = terminal && !self.no_color && std::env::var_os("NO_COLOR").is_none();
        let palette = Palette::new(color);

        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open input file {}", path.display()))?;
                let prompter = Prompter::new(BufReader::new(file), output, palette);
                Session::new(BankService::new(), prompter, self.bank_name).run()
            }
            None => {
                let prompter = Prompter::new(io::stdin().lock(), output, palette);
                Session::new(BankService::new(), prompter, self.bank_name).run()
            }
        }
    }
}
