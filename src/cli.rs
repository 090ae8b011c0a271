use clap::{Parser, Subcommand};

/// NEIS — National Energy Insights API
#[derive(Parser)]
#[command(name = "neis", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the regions present in the loaded dataset
    Regions,
}
