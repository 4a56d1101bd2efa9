use clap::{Parser, Subcommand};
use stockboard_market_data::{RecommendationRange, SeriesRange};

#[derive(Debug, Parser)]
#[command(name = "stockboard", version, about = "Stock series and recommendations from the Stockboard backend")]
pub struct Cli {
    /// Print the resulting state as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a price series, refreshing it server-side if nothing is cached
    Series {
        symbol: String,
        /// week, month, 6month, year
        #[arg(long, default_value = SeriesRange::MONTH)]
        range: String,
    },
    /// Recompute a symbol's series on the backend, then reload it
    Refresh {
        symbol: String,
        #[arg(long, default_value = SeriesRange::MONTH)]
        range: String,
    },
    /// Ranked recommendations for a horizon
    Recommend {
        /// short, medium or long
        range: RecommendationRange,
    },
}
