use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to the site configuration file
    #[clap(short, long, default_value = "config.toml")]
    pub config: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the widget fragment into the output directory
    Build,
    /// Remove the output directory
    Clean,
}
