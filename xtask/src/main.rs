use clap::Parser;
use color_eyre::eyre::Result;

mod cli;
mod scripts;

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = cli::App::parse();

    match app.command {
        Some(cli::Commands::Lint(args)) => scripts::lint::run(&args),
        Some(cli::Commands::Fixture(args)) => scripts::fixture::run(&args),
        None => {
            println!("No command specified. Run `cargo xtask --help` for usage.");
            Ok(())
        }
    }
}
