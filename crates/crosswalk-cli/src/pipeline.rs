//! Loading sources and running a crosswalk end to end.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{info, info_span};

use crosswalk_ingest::{
    Normalized, NormalizeReport, SourceFormat, normalize_enablensw, normalize_ndis,
};
use crosswalk_map::{CrosswalkResult, run_crosswalk};
use crosswalk_model::{CrosswalkConfig, EnableNswEntry, FuzzyThreshold, NdisSupportItem, RuleSet};
use crosswalk_report::{CrosswalkReport, ReportFormat, write_report};

/// Reads an NDIS code guide, inferring the format from the extension.
pub fn load_ndis(path: &Path) -> Result<Normalized<NdisSupportItem>> {
    let (bytes, format) = read_source(path)?;
    normalize_ndis(&bytes, format).with_context(|| format!("normalize {}", path.display()))
}

/// Reads an EnableNSW category list, inferring the format from the extension.
pub fn load_enablensw(path: &Path) -> Result<Normalized<EnableNswEntry>> {
    let (bytes, format) = read_source(path)?;
    normalize_enablensw(&bytes, format).with_context(|| format!("normalize {}", path.display()))
}

fn read_source(path: &Path) -> Result<(Vec<u8>, SourceFormat)> {
    let format = SourceFormat::from_path(path)
        .with_context(|| format!("detect format of {}", path.display()))?;
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok((bytes, format))
}

/// Command-line values layered over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub threshold: Option<u8>,
    pub repair_codes: bool,
}

/// Builds the effective configuration: defaults, then the config file, then
/// the rules file, then individual flags.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<CrosswalkConfig> {
    let mut config = match &overrides.config {
        Some(path) => CrosswalkConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => CrosswalkConfig::default(),
    };
    if let Some(path) = &overrides.rules {
        let rules =
            RuleSet::load(path).with_context(|| format!("load rules {}", path.display()))?;
        config = config.with_rules(rules);
    }
    if let Some(value) = overrides.threshold {
        let threshold = FuzzyThreshold::new(value).context("invalid --threshold")?;
        config = config.with_threshold(threshold);
    }
    if overrides.repair_codes {
        config = config.with_repair_codes(true);
    }
    config.validate().context("validate config")?;
    Ok(config)
}

/// Everything a `run` needs.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub enablensw: PathBuf,
    pub ndis: PathBuf,
    pub output_dir: PathBuf,
    pub format: ReportFormat,
    pub config: CrosswalkConfig,
}

/// What a `run` produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub result: CrosswalkResult,
    pub report: CrosswalkReport,
    pub enablensw: NormalizeReport,
    pub ndis: NormalizeReport,
    pub universe_size: usize,
    pub written: Vec<PathBuf>,
}

/// Normalizes both sources, runs the crosswalk and writes the report.
pub fn run_pipeline(inputs: &RunInputs, analysis_date: NaiveDateTime) -> Result<RunOutcome> {
    let span = info_span!("crosswalk", output = %inputs.output_dir.display());
    let _guard = span.enter();

    let ndis = load_ndis(&inputs.ndis)?;
    let enablensw = load_enablensw(&inputs.enablensw)?;
    info!(
        ndis_items = ndis.records.len(),
        enablensw_entries = enablensw.records.len(),
        "sources normalized"
    );

    let result = run_crosswalk(&enablensw.records, &ndis.records, &inputs.config)
        .with_skipped_rows(enablensw.report.rows_skipped, ndis.report.rows_skipped);
    let report = CrosswalkReport::build(&result, &inputs.config, analysis_date)
        .context("build report")?;
    let written = write_report(&report, &inputs.output_dir, inputs.format)
        .with_context(|| format!("write report to {}", inputs.output_dir.display()))?;

    Ok(RunOutcome {
        result,
        report,
        enablensw: enablensw.report,
        universe_size: ndis.records.len(),
        ndis: ndis.report,
        written,
    })
}
