//! Rank command implementation for the tripscore CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tripscore_scorer::rank;

use crate::{
    ARG_INPUT, ARG_TOP, CliError, ENV_RANK_INPUT, load_attractions, require_existing, write_json,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print attractions ordered by weight")]
#[ortho_config(prefix = "TRIPSCORE")]
pub(crate) struct RankArgs {
    /// Path to a scored attraction JSON file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Print only the first `n` attractions.
    #[arg(long = ARG_TOP, value_name = "n")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) input: Utf8PathBuf,
    pub(crate) top: Option<usize>,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_RANK_INPUT,
        })?;
        Ok(Self {
            input,
            top: args.top,
        })
    }
}

pub(super) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.input, ARG_INPUT)?;
    rank_with(&config, writer)
}

pub(super) fn rank_with(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let attractions = load_attractions(&config.input)?;
    let mut ranked = rank(&attractions);
    if let Some(top) = config.top {
        ranked.truncate(top);
    }
    write_json(writer, &ranked)
}
