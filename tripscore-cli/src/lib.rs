//! Command-line interface for scoring scraped attraction reviews.
//!
//! Three subcommands share one attraction file format:
//! - `score` enriches every review with a score and every attraction with a
//!   weight, then writes the result (by default to `score_reviews.json`
//!   next to the input).
//! - `rank` prints attractions ordered by weight.
//! - `stats` prints popularity reports derived from scored input.
//!
//! Options layer as CLI flags over `TRIPSCORE_CMDS_<COMMAND>_*` environment
//! variables over configuration files.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tripscore_core::{Attraction, AttractionStore, JsonAttractionStore};

mod error;
mod rank;
mod score;
mod stats;

pub use error::CliError;

use rank::RankArgs;
use score::ScoreArgs;
use stats::StatsArgs;

const ARG_INPUT: &str = "input";
const ARG_OUTPUT: &str = "output";
const ARG_RATING_WEIGHT: &str = "rating-weight";
const ARG_SENTIMENT_WEIGHT: &str = "sentiment-weight";
const ARG_TITLE_WEIGHT: &str = "title-weight";
const ARG_CONTENT_WEIGHT: &str = "content-weight";
const ARG_TITLE_TOKENS: &str = "title-tokens";
const ARG_CONTENT_TOKENS: &str = "content-tokens";
const ARG_LEXICON: &str = "lexicon";
const ARG_TOP: &str = "top";
const ARG_REPORT: &str = "report";
const ARG_YEAR: &str = "year";
const ARG_START_YEAR: &str = "start-year";
const ARG_END_YEAR: &str = "end-year";
const ARG_BASELINE: &str = "baseline";
const ARG_ATTRACTION: &str = "attraction";
const ENV_SCORE_INPUT: &str = "TRIPSCORE_CMDS_SCORE_INPUT";
const ENV_RANK_INPUT: &str = "TRIPSCORE_CMDS_RANK_INPUT";
const ENV_STATS_INPUT: &str = "TRIPSCORE_CMDS_STATS_INPUT";
const ENV_STATS_REPORT: &str = "TRIPSCORE_CMDS_STATS_REPORT";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid, inputs are missing or
/// malformed, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Score(args) => score::run_score(args).map(|_| ()),
        Command::Rank(args) => rank::run_rank(args, &mut stdout),
        Command::Stats(args) => stats::run_stats(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tripscore",
    about = "Score travel reviews and summarise attraction popularity",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every review and weight every attraction.
    Score(ScoreArgs),
    /// Print attractions ordered by weight.
    Rank(RankArgs),
    /// Print popularity statistics for scored attractions.
    Stats(StatsArgs),
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match tripscore_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn load_attractions(path: &Utf8Path) -> Result<Vec<Attraction>, CliError> {
    Ok(JsonAttractionStore::new(path).load()?)
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, report: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
