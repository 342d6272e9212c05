mod app;
mod cli;
mod config;
mod consts;
mod controller;
mod error;
mod output;
mod state;
mod store;
mod timeline;
mod utils;

use clap::Parser;

use app::CommandContext;
use cli::Cli;
use config::Config;
use error::AppError;
use store::SessionCache;
use utils::set_debug;

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    // JSON output stays clean on stderr too
    let config = if cli.json {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);
    set_debug(cli.debug);

    let ctx = CommandContext {
        cli: &cli,
        session_cache: SessionCache::default_location(),
    };
    app::run(&ctx)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        if let AppError::Store(store_err) = &e
            && store_err.is_transient()
        {
            eprintln!("Nothing was saved; it is safe to try again.");
        }
        std::process::exit(1);
    }
}
