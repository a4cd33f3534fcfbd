//! Score command implementation for the tripscore CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripscore_core::{AttractionStore, JsonAttractionStore, TokenBudget};
use tripscore_scorer::{
    LexiconSentimentScorer, ReviewScorer, ScoringSummary, SentimentLexicon, WeightCoefficients,
};

use crate::{
    ARG_CONTENT_TOKENS, ARG_CONTENT_WEIGHT, ARG_INPUT, ARG_LEXICON, ARG_OUTPUT, ARG_RATING_WEIGHT,
    ARG_SENTIMENT_WEIGHT, ARG_TITLE_TOKENS, ARG_TITLE_WEIGHT, CliError, ENV_SCORE_INPUT,
    load_attractions, require_existing,
};

/// File written next to the input when no output path is given.
pub(crate) const DEFAULT_OUTPUT_NAME: &str = "score_reviews.json";

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every review in a scraped attraction file and weight \
                 each attraction by its mean review score. Coefficients and \
                 token budgets can come from CLI flags, configuration files, \
                 or environment variables.",
    about = "Score reviews and weight attractions"
)]
#[ortho_config(prefix = "TRIPSCORE")]
pub(crate) struct ScoreArgs {
    /// Path to the scraped attraction JSON file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Where to write scored attractions (defaults to `score_reviews.json`
    /// beside the input).
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Share of the score driven by the star rating.
    #[arg(long = ARG_RATING_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) rating_weight: Option<f64>,
    /// Share of the score driven by text sentiment.
    #[arg(long = ARG_SENTIMENT_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) sentiment_weight: Option<f64>,
    /// Share of the sentiment taken from the title.
    #[arg(long = ARG_TITLE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) title_weight: Option<f64>,
    /// Share of the sentiment taken from the body.
    #[arg(long = ARG_CONTENT_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) content_weight: Option<f64>,
    /// Tokens of each title passed to the classifier.
    #[arg(long = ARG_TITLE_TOKENS, value_name = "count")]
    #[serde(default)]
    pub(crate) title_tokens: Option<usize>,
    /// Tokens of each body passed to the classifier.
    #[arg(long = ARG_CONTENT_TOKENS, value_name = "count")]
    #[serde(default)]
    pub(crate) content_tokens: Option<usize>,
    /// JSON lexicon replacing the built-in sentiment word lists.
    #[arg(long = ARG_LEXICON, value_name = "path")]
    #[serde(default)]
    pub(crate) lexicon: Option<Utf8PathBuf>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreConfig {
    /// Scraped attraction file.
    pub(crate) input: Utf8PathBuf,
    /// Destination for scored attractions.
    pub(crate) output: Utf8PathBuf,
    /// Validated weight coefficients.
    pub(crate) coefficients: WeightCoefficients,
    /// Validated token budgets.
    pub(crate) budget: TokenBudget,
    /// Optional replacement lexicon.
    pub(crate) lexicon: Option<Utf8PathBuf>,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.input, ARG_INPUT)?;
        if let Some(lexicon) = &self.lexicon {
            require_existing(lexicon, ARG_LEXICON)?;
        }
        Ok(())
    }
}

/// Default output path: [`DEFAULT_OUTPUT_NAME`] in the input's directory.
pub(crate) fn default_output(input: &Utf8Path) -> Utf8PathBuf {
    input
        .parent()
        .map_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_NAME), |dir| {
            dir.join(DEFAULT_OUTPUT_NAME)
        })
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_SCORE_INPUT,
        })?;
        let output = args.output.unwrap_or_else(|| default_output(&input));

        let defaults = WeightCoefficients::default();
        let coefficients = WeightCoefficients {
            rating_weight: args.rating_weight.unwrap_or(defaults.rating_weight),
            sentiment_weight: args.sentiment_weight.unwrap_or(defaults.sentiment_weight),
            title_weight: args.title_weight.unwrap_or(defaults.title_weight),
            content_weight: args.content_weight.unwrap_or(defaults.content_weight),
        }
        .validate()?;

        let default_budget = TokenBudget::default();
        let budget = TokenBudget {
            title: args.title_tokens.unwrap_or(default_budget.title),
            content: args.content_tokens.unwrap_or(default_budget.content),
        }
        .validate()?;

        Ok(Self {
            input,
            output,
            coefficients,
            budget,
            lexicon: args.lexicon,
        })
    }
}

pub(super) fn run_score(args: ScoreArgs) -> Result<ScoringSummary, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    score_with(&config)
}

/// Load, score and save according to a resolved configuration.
pub(super) fn score_with(config: &ScoreConfig) -> Result<ScoringSummary, CliError> {
    let lexicon = match &config.lexicon {
        Some(path) => SentimentLexicon::from_path(path)?,
        None => SentimentLexicon::default(),
    };
    let scorer = ReviewScorer::new(LexiconSentimentScorer::new(lexicon))
        .with_coefficients(config.coefficients)?
        .with_budget(config.budget)?;

    let mut attractions = load_attractions(&config.input)?;
    let summary = scorer.score_attractions(&mut attractions)?;
    JsonAttractionStore::new(config.output.clone()).save(&attractions)?;
    info!(
        "wrote {} scored attractions to {}",
        summary.attractions, config.output
    );
    Ok(summary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
