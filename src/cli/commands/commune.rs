//! Commune and injured person reports
//!
//! Both commands validate the selection before touching any file, assemble
//! the configured years and write the selected persons as CSV or JSON.

use crate::app::services::assembler::DatasetAssembler;
use crate::app::services::report_writer::write_report;
use crate::app::services::selection::{PersonReport, SelectionCriteria};
use crate::cli::args::{CommuneArgs, DatasetArgs, InjuredArgs, SelectionArgs};
use crate::cli::commands::shared::{RunStats, load_configuration, setup_logging};
use crate::Result;
use colored::Colorize;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::info;

/// Run the commune command
pub fn run_commune(args: &CommuneArgs) -> Result<RunStats> {
    setup_logging(&args.dataset)?;
    run_report(&args.dataset, &args.selection, args.unharmed)
}

/// Run the injured command; unharmed persons are never included
pub fn run_injured(args: &InjuredArgs) -> Result<RunStats> {
    setup_logging(&args.dataset)?;
    run_report(&args.dataset, &args.selection, false)
}

fn run_report(
    dataset: &DatasetArgs,
    selection: &SelectionArgs,
    include_unharmed: bool,
) -> Result<RunStats> {
    let start_time = Instant::now();

    selection.validate()?;
    let criteria = selection.to_criteria(include_unharmed);
    criteria.validate()?;

    let config = load_configuration(dataset)?;
    let range = config.year_range()?;

    let assembler =
        DatasetAssembler::new(&config.data.data_path).with_progress(config.output.show_progress);
    let assembly = assembler.assemble(&range)?;

    let report = PersonReport::build(&assembly.accidents, &criteria);
    info!(
        "Selected {} persons in commune {} of département {}",
        report.len(),
        criteria.commune,
        criteria.department
    );

    let format = selection
        .format
        .map(Into::into)
        .unwrap_or(config.output.format);
    let rows_written = write_report(&report.rows(), format, selection.out.as_deref())?;

    let stats = RunStats {
        years_read: assembly.stats.years.len(),
        accidents_read: assembly.accidents.len(),
        persons_selected: report.len(),
        rows_written,
        processing_time: start_time.elapsed(),
    };

    if !dataset.quiet {
        print_summary(&stats, &criteria);
    }

    Ok(stats)
}

/// Summary on stderr so that stdout carries only the report
fn print_summary(stats: &RunStats, criteria: &SelectionCriteria) {
    eprintln!(
        "{} {} persons selected in {}-{} from {} accidents over {} years ({})",
        "Done:".green().bold(),
        stats.persons_selected,
        criteria.department,
        criteria.commune,
        stats.accidents_read,
        stats.years_read,
        HumanDuration(stats.processing_time)
    );
}
