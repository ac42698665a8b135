//! Human-readable run reports.

use drivesync_reconcile::ReconcileReport;
use std::io::{self, Write};

/// Writes the summary of a finished run. Corrections are printed while the
/// run applies them.
pub fn write_report<W: Write>(out: &mut W, report: &ReconcileReport) -> io::Result<()> {
    writeln!(out, "Sync root: {} [{}]", report.root_name, report.root_id)?;
    writeln!(
        out,
        "Found {} files. {} in the sync hierarchy, {} outside.",
        report.listed, report.in_subtree, report.not_in_subtree
    )?;

    if report.dry_run {
        writeln!(out, "{} corrections planned, none applied (dry run)", report.corrections.len())?;
    } else {
        writeln!(
            out,
            "{} of {} corrections applied",
            report.applied,
            report.corrections.len()
        )?;
    }

    writeln!(out, "Sync finished in {:.2?}", report.elapsed)?;
    Ok(())
}
