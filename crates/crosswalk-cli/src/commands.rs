use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crosswalk_cli::pipeline::{
    ConfigOverrides, RunInputs, RunOutcome, load_enablensw, load_ndis, resolve_config,
    run_pipeline,
};
use crosswalk_model::RuleSet;
use crosswalk_report::ReportFormat;

use crate::cli::{InspectArgs, ReportFormatArg, RulesArgs, RunArgs, SourceKindArg};
use crate::summary::{print_inspection, print_rules};

pub fn run_crosswalk_command(args: &RunArgs) -> Result<RunOutcome> {
    let config = resolve_config(&ConfigOverrides {
        config: args.config.clone(),
        rules: args.rules.clone(),
        threshold: args.threshold,
        repair_codes: args.repair_codes,
    })?;
    info!(
        threshold = config.fuzzy_threshold.value(),
        repair_codes = config.include_repair_codes,
        rules = config.mapping_rules.len(),
        "configuration resolved"
    );
    let inputs = RunInputs {
        enablensw: args.enablensw.clone(),
        ndis: args.ndis.clone(),
        output_dir: args.output_dir.clone(),
        format: report_format(args.format),
        config,
    };
    run_pipeline(&inputs, Local::now().naive_local())
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let rules = match &args.rules {
        Some(path) => {
            RuleSet::load(path).with_context(|| format!("load rules {}", path.display()))?
        }
        None => RuleSet::builtin(),
    };
    print_rules(&rules);
    Ok(())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let (report, records) = match args.kind {
        SourceKindArg::Ndis => {
            let normalized = load_ndis(&args.file)?;
            (normalized.report, normalized.records.len())
        }
        SourceKindArg::Enablensw => {
            let normalized = load_enablensw(&args.file)?;
            (normalized.report, normalized.records.len())
        }
    };
    print_inspection(&args.file, &report, records);
    Ok(())
}

fn report_format(arg: ReportFormatArg) -> ReportFormat {
    match arg {
        ReportFormatArg::Csv => ReportFormat::Csv,
        ReportFormatArg::Json => ReportFormat::Json,
        ReportFormatArg::Both => ReportFormat::Both,
    }
}
