//! Human-readable import reports.

use super::reason::{RejectionTally, TallyCategory};

/// One-line report of an import.
///
/// Only non-zero buckets are listed, always in [`TallyCategory::ALL`] order.
pub fn describe(tally: &RejectionTally, accepted: usize) -> String {
    if tally.rejected == 0 {
        return format!("Successfully imported {} points.", accepted);
    }

    let details: Vec<String> = TallyCategory::ALL
        .iter()
        .filter_map(|category| match tally.count(*category) {
            0 => None,
            count => Some(format!("{} {}", count, category.label())),
        })
        .collect();

    let details = if details.is_empty() {
        String::new()
    } else {
        format!(" ({})", details.join(", "))
    };

    format!(
        "Imported {} / Discarded {}{}",
        accepted, tally.rejected, details
    )
}
