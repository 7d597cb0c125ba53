mod args;
mod cache;
mod cmd;
mod config;
mod error;
mod helper;
mod i18n;
mod loader;
mod site;
mod templates;
mod widget;

use crate::args::{Args, Command};
use crate::config::Config;
use crate::error::Result;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{:?}", args);

    let config = Config::load(args.config.as_str())?;
    log::debug!("{:?}", config);

    match args.command {
        Command::Build => cmd::build(&config).await.map(|_| ()),
        Command::Clean => cmd::clean(&config).await,
    }
}
