mod app;
mod cli;
mod config;
mod input;
mod logging;
mod term;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
