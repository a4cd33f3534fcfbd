//! Stats command implementation for the tripscore CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tripscore_core::Attraction;
use tripscore_stats::{
    DEFAULT_BASELINE, DEFAULT_TOP_ATTRACTIONS, DEFAULT_TOP_TAGS, YearRange,
    attraction_weights_for_year, seasonal_attraction_weights, seasonal_tag_weights,
    tag_weights_for_year, top_n, top_n_with_other, top_per_group, trip_type_attraction_weights,
    trip_type_score_totals, trip_type_tag_weights, yearly_attraction_weights, yearly_leaders,
    yearly_tag_weights,
};

use crate::{
    ARG_ATTRACTION, ARG_BASELINE, ARG_END_YEAR, ARG_INPUT, ARG_REPORT, ARG_START_YEAR, ARG_TOP,
    ARG_YEAR, CliError, ENV_STATS_INPUT, ENV_STATS_REPORT, load_attractions, require_existing,
    write_json,
};

/// Entries kept per group (season or trip type) unless overridden.
const DEFAULT_TOP_PER_GROUP: usize = 1;

/// Popularity reports available from `stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ReportKind {
    /// Leading attraction of every year in the window.
    AttractionsByYear,
    /// Leading tag of every year in the window.
    TagsByYear,
    /// Top attractions of one year.
    AttractionsInYear,
    /// Top tags of one year, with the rest bucketed as "Other".
    TagsInYear,
    /// Top attractions per season of one year.
    AttractionsBySeason,
    /// Top tags per season of one year.
    TagsBySeason,
    /// Top attractions per trip type across all years.
    TripTypes,
    /// Top tags per trip type of one year.
    TripTypeTags,
    /// Raw score totals per trip type for one attraction.
    TripTypeMix,
}

impl ReportKind {
    const fn default_top(self) -> usize {
        match self {
            Self::AttractionsInYear => DEFAULT_TOP_ATTRACTIONS,
            Self::TagsInYear => DEFAULT_TOP_TAGS,
            Self::AttractionsByYear
            | Self::TagsByYear
            | Self::AttractionsBySeason
            | Self::TagsBySeason
            | Self::TripTypes
            | Self::TripTypeTags
            | Self::TripTypeMix => DEFAULT_TOP_PER_GROUP,
        }
    }
}

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise the popularity of scored attractions. Each dated \
                 review contributes its score minus the baseline to the \
                 totals of its attraction, tags, season and trip type.",
    about = "Print popularity statistics"
)]
#[ortho_config(prefix = "TRIPSCORE")]
pub(crate) struct StatsArgs {
    /// Path to a scored attraction JSON file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Report to produce.
    #[arg(long = ARG_REPORT, value_enum, value_name = "kind")]
    #[serde(default)]
    pub(crate) report: Option<ReportKind>,
    /// Year for single-year reports (defaults to the window's last year).
    #[arg(long = ARG_YEAR, value_name = "year")]
    #[serde(default)]
    pub(crate) year: Option<i32>,
    /// First year of the window for by-year reports.
    #[arg(long = ARG_START_YEAR, value_name = "year")]
    #[serde(default)]
    pub(crate) start_year: Option<i32>,
    /// Last year of the window for by-year reports.
    #[arg(long = ARG_END_YEAR, value_name = "year")]
    #[serde(default)]
    pub(crate) end_year: Option<i32>,
    /// Entries listed per report or group.
    #[arg(long = ARG_TOP, value_name = "n")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
    /// Score subtracted from every review before totalling.
    #[arg(long = ARG_BASELINE, value_name = "score")]
    #[serde(default)]
    pub(crate) baseline: Option<f64>,
    /// Attraction for the trip-type mix (defaults to the first in the file).
    #[arg(long = ARG_ATTRACTION, value_name = "name")]
    #[serde(default)]
    pub(crate) attraction: Option<String>,
}

impl StatsArgs {
    pub(crate) fn into_config(self) -> Result<StatsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StatsConfig::try_from(merged)
    }
}

/// Resolved `stats` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatsConfig {
    pub(crate) input: Utf8PathBuf,
    pub(crate) report: ReportKind,
    pub(crate) year: i32,
    pub(crate) range: YearRange,
    pub(crate) top: usize,
    pub(crate) baseline: f64,
    pub(crate) attraction: Option<String>,
}

impl TryFrom<StatsArgs> for StatsConfig {
    type Error = CliError;

    fn try_from(args: StatsArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_STATS_INPUT,
        })?;
        let report = args.report.ok_or(CliError::MissingArgument {
            field: ARG_REPORT,
            env: ENV_STATS_REPORT,
        })?;
        let defaults = YearRange::default();
        let range = YearRange::new(
            args.start_year.unwrap_or(defaults.start()),
            args.end_year.unwrap_or(defaults.end()),
        )?;
        Ok(Self {
            input,
            report,
            year: args.year.unwrap_or(range.end()),
            range,
            top: args.top.unwrap_or_else(|| report.default_top()),
            baseline: args.baseline.unwrap_or(DEFAULT_BASELINE),
            attraction: args.attraction,
        })
    }
}

pub(super) fn run_stats(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.input, ARG_INPUT)?;
    let attractions = load_attractions(&config.input)?;
    let report = build_report(&config, &attractions)?;
    write_json(writer, &report)
}

/// Compute the configured report as JSON.
pub(super) fn build_report(
    config: &StatsConfig,
    attractions: &[Attraction],
) -> Result<Value, CliError> {
    let StatsConfig {
        year,
        range,
        top,
        baseline,
        ..
    } = *config;
    let report = match config.report {
        ReportKind::AttractionsByYear => to_value(&yearly_leaders(
            &yearly_attraction_weights(attractions, range, baseline)?,
            range,
        ))?,
        ReportKind::TagsByYear => to_value(&yearly_leaders(
            &yearly_tag_weights(attractions, range, baseline)?,
            range,
        ))?,
        ReportKind::AttractionsInYear => to_value(&top_n(
            &attraction_weights_for_year(attractions, year, baseline)?,
            top,
        ))?,
        ReportKind::TagsInYear => to_value(&top_n_with_other(
            &tag_weights_for_year(attractions, year, baseline)?,
            top,
        ))?,
        ReportKind::AttractionsBySeason => to_value(&top_per_group(
            &seasonal_attraction_weights(attractions, year, baseline)?,
            top,
        ))?,
        ReportKind::TagsBySeason => to_value(&top_per_group(
            &seasonal_tag_weights(attractions, year, baseline)?,
            top,
        ))?,
        ReportKind::TripTypes => to_value(&top_per_group(
            &trip_type_attraction_weights(attractions, baseline)?,
            top,
        ))?,
        ReportKind::TripTypeTags => to_value(&top_per_group(
            &trip_type_tag_weights(attractions, year, baseline)?,
            top,
        ))?,
        ReportKind::TripTypeMix => {
            let attraction = select_attraction(attractions, config.attraction.as_deref())?;
            json!({
                "attraction": attraction.name,
                "totals": to_value(&trip_type_score_totals(attraction)?)?,
            })
        }
    };
    Ok(report)
}

fn select_attraction<'a>(
    attractions: &'a [Attraction],
    name: Option<&str>,
) -> Result<&'a Attraction, CliError> {
    name.map_or_else(
        || attractions.first().ok_or(CliError::NoAttractions),
        |wanted| {
            attractions
                .iter()
                .find(|attraction| attraction.name == wanted)
                .ok_or_else(|| CliError::UnknownAttraction {
                    name: wanted.to_owned(),
                })
        },
    )
}

fn to_value<T: Serialize + ?Sized>(report: &T) -> Result<Value, CliError> {
    serde_json::to_value(report).map_err(CliError::SerialiseReport)
}
