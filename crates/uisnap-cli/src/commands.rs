use anyhow::Result;

use uisnap_cli::pipeline::{execute_query, summarize_snapshot};
use uisnap_model::ConditionSet;

use crate::cli::{OutputFormatArg, QueryArgs, SummaryArgs};
use crate::render::{print_matches, print_matches_json, print_snapshot_summary};

pub fn run_query(args: &QueryArgs) -> Result<()> {
    let conditions: ConditionSet = args.conditions.iter().cloned().collect();
    let report = execute_query(&args.snapshot, &conditions)?;
    match args.format {
        OutputFormatArg::Table => print_matches(&report),
        OutputFormatArg::Json => print_matches_json(&report)?,
    }
    Ok(())
}

pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let summary = summarize_snapshot(&args.snapshot)?;
    print_snapshot_summary(&summary);
    Ok(())
}
