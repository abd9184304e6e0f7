//! Cycle reporting and statistics

use super::CycleReport;

/// Cycle reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(report: &CycleReport) -> String {
        let mut output = String::new();

        if report.dry_run {
            output.push_str("\n=== Sync Summary (dry run) ===\n");
        } else {
            output.push_str("\n=== Sync Summary ===\n");
        }
        output.push_str(&format!("Created:   {}\n", report.created));
        output.push_str(&format!("Updated:   {}\n", report.updated));
        output.push_str(&format!("Replaced:  {}\n", report.replaced));
        output.push_str(&format!("Removed:   {}\n", report.removed));
        output.push_str(&format!("Unchanged: {}\n", report.unchanged));

        if !report.warnings.is_empty() {
            output.push_str(&format!("\nWarnings ({}):\n", report.warnings.len()));
            for warning in &report.warnings {
                output.push_str(&format!("  - {warning}\n"));
            }
        }

        output.push_str(&format!(
            "\nTotal operations: {}\n",
            report.total_operations()
        ));

        if report.is_noop() {
            output.push_str("Status: ✓ Already in sync\n");
        } else {
            output.push_str("Status: ✓ Success\n");
        }

        output
    }
}
