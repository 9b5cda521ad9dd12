mod app;
mod command;
mod config;
mod error;
mod storage;
mod store;
mod task;

use std::io;

use app::App;
use color_eyre::Result;
use config::Config;
use log::{LevelFilter, info};

// Warnings only, on stderr, so nothing lands between the menu lines.
fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    setup_logging();

    let config = Config::default();
    let mut app = App::new(&config, io::stdin().lock(), io::stdout().lock())?;
    app.run()?;
    info!("session ended with {} tasks", app.store().len());
    Ok(())
}
