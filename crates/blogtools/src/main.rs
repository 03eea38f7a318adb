use crate::prelude::*;
use clap::Parser;

mod articles;
mod config;
mod error;
mod prelude;
mod serve;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "List, filter and paginate blog articles from the articles API"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the articles API
    #[clap(
        long,
        env = "BLOGTOOLS_API_URL",
        global = true,
        default_value = "http://127.0.0.1:3000"
    )]
    api_url: String,

    /// Content locale (es, en)
    #[clap(long, env = "BLOGTOOLS_LOCALE", global = true, default_value = "es")]
    locale: String,

    /// Articles per page
    #[clap(long, env = "BLOGTOOLS_PER_PAGE", global = true, default_value = "9")]
    per_page: usize,

    /// Maximum number of page links shown at once
    #[clap(long, env = "BLOGTOOLS_MAX_VISIBLE", global = true, default_value = "5")]
    max_visible: usize,

    /// Whether to display additional information.
    #[clap(long, env = "BLOGTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Article listing, lookup and navigation
    Articles(crate::articles::App),

    /// Serve the articles API from a JSON file
    Serve(crate::serve::ServeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Articles(sub_app) => crate::articles::run(sub_app, app.global).await,
        SubCommands::Serve(options) => crate::serve::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
