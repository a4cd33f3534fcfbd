//! Error types emitted by the tripscore CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tripscore_core::{StoreError, TokenBudgetError};
use tripscore_scorer::{CoefficientError, LexiconError, ScoringError};
use tripscore_stats::StatsError;

/// Errors emitted by the tripscore CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// The path that could not be inspected.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The weight coefficients do not form a valid blend.
    #[error("invalid weight coefficients")]
    InvalidCoefficients(#[from] CoefficientError),
    /// The token budgets cannot be used with the sentiment model.
    #[error("invalid token budget")]
    InvalidTokenBudget(#[from] TokenBudgetError),
    /// Loading the sentiment lexicon failed.
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    /// Reading or writing the attraction file failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// An attraction held a malformed review.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    /// Aggregating statistics failed.
    #[error(transparent)]
    Statistics(#[from] StatsError),
    /// The requested attraction is not in the input.
    #[error("no attraction named {name:?} in the input")]
    UnknownAttraction {
        /// The requested name.
        name: String,
    },
    /// A per-attraction report was requested for an empty input.
    #[error("the input holds no attractions")]
    NoAttractions,
    /// Serialising a report failed.
    #[error("failed to serialise report")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output")]
    WriteOutput(#[source] std::io::Error),
}
