use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "xtasks")]
#[command(about = "Run project tasks using rust instead of scripts")]
pub struct App {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run formatting, clippy, tests and unused dependency checks
    Lint(LintArgs),
    /// Write a sample bilingual articles file for `blogtools serve`
    Fixture(FixtureArgs),
}

#[derive(Args, Debug, Default)]
pub struct LintArgs {
    /// Print the output of passing checks too
    #[arg(short, long)]
    pub verbose: bool,

    /// Apply formatting and clippy fixes instead of only checking
    #[arg(long)]
    pub fix: bool,

    /// Skip `cargo fmt`
    #[arg(long)]
    pub no_fmt: bool,

    /// Skip `cargo clippy`
    #[arg(long)]
    pub no_clippy: bool,

    /// Skip `cargo test`
    #[arg(long)]
    pub no_test: bool,

    /// Skip `cargo machete`
    #[arg(long)]
    pub no_machete: bool,
}

#[derive(Args, Debug)]
pub struct FixtureArgs {
    /// Number of articles to generate
    #[arg(short, long, default_value = "25")]
    pub count: usize,

    /// Output file
    #[arg(short, long, default_value = "target/articles.json")]
    pub out: PathBuf,
}
