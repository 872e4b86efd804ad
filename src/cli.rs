use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "movie rating statistics backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the statistics API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema if it is missing
    Init,
    /// Print statistics for one movie as JSON
    Report {
        /// Movie identifier
        movie_id: String,
        /// Only this demographic dimension
        #[arg(short, long)]
        dimension: Option<String>,
        /// Print unrounded values, suppressed segments included
        #[arg(long, conflicts_with = "dimension")]
        raw: bool,
    },
}
