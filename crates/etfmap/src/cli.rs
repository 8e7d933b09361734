use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download ETF composition files to the dated downloads directory.
    Fetch {
        /// Country codes whose cached product screeners should be processed.
        ///
        /// If no countries are provided, only `us` is fetched; it is the only
        /// screener shipped with the repository.
        #[arg(short, long)]
        countries: Option<Vec<String>>,
    },

    /// Print the stored ISO 3166-1 country code mapping.
    Iso,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
