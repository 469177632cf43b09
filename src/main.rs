use anyhow::Result;
use clap::Parser;
use pocketbank::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
