//! Insights command handlers. Every number printed here is synthetic.

use clap::Subcommand;
use flowdeck_insights::{CountsQuery, InsightsProvider, MAX_TIME_SPAN};

use crate::print_json;

/// Sub-commands available under `insights`.
#[derive(Debug, Subcommand)]
pub enum InsightsCommands {
    /// Print the summary tiles
    Summary,
    /// Print count series for the last N days
    Counts {
        /// Number of days to cover, ending today
        #[arg(
            long,
            default_value = "7",
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_TIME_SPAN))
        )]
        time_span: u32,
    },
}

pub(crate) fn run(command: &InsightsCommands) -> anyhow::Result<()> {
    let mut provider = InsightsProvider::new();
    match *command {
        InsightsCommands::Summary => print_json(&provider.fetch_summary()),
        InsightsCommands::Counts { time_span } => {
            print_json(&provider.fetch_counts(CountsQuery { time_span })?)
        }
    }
}
